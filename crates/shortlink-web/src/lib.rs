#![cfg(target_arch = "wasm32")]
//! ShortLink web front-end: a pointer-reactive dot-grid canvas behind a
//! mock URL-shortening page. Everything runs client-side; the "backend" is
//! simulated locally with artificial latency.

mod api;
mod dom;
mod frame;
mod input;
mod render;
mod storage;
mod ui;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use anyhow::anyhow;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

use shortlink_core::{DotGridEngine, GridConfig, Rgb};

// Palette the page embeds the grid with; the rest of the knobs keep their
// component defaults.
const GRID_BASE_COLOR: &str = "#33658A";
const GRID_ACTIVE_COLOR: &str = "#86BBD8";

/// Everything that must be torn down when the page unmounts. Dropping this
/// cancels the frame loop, disconnects the resize observer and removes
/// every DOM listener.
struct App {
    _listeners: Vec<dom::Listener>,
    _resize: input::ResizeHook,
    _raf: frame::RafLoop,
}

thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("shortlink-web starting");

    match init() {
        Ok(app) => APP.with(|slot| *slot.borrow_mut() = Some(app)),
        Err(e) => log::error!("init error: {e:?}"),
    }
    Ok(())
}

/// Deterministic teardown for embedding pages: releases the animation-frame
/// subscription and every event listener registration.
#[wasm_bindgen]
pub fn shutdown() {
    APP.with(|slot| slot.borrow_mut().take());
    log::info!("shortlink-web stopped");
}

fn init() -> anyhow::Result<App> {
    let window = web::window().ok_or_else(|| anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow!("no document"))?;

    let wrapper = document
        .get_element_by_id("grid-wrap")
        .ok_or_else(|| anyhow!("missing #grid-wrap"))?;
    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id("grid-canvas")
        .ok_or_else(|| anyhow!("missing #grid-canvas"))?
        .dyn_into()
        .map_err(|e| anyhow!(format!("{e:?}")))?;
    let ctx: web::CanvasRenderingContext2d = canvas
        .get_context("2d")
        .ok()
        .flatten()
        .ok_or_else(|| anyhow!("no 2d context"))?
        .dyn_into()
        .map_err(|e| anyhow!(format!("{e:?}")))?;

    let config = GridConfig {
        dot_size: 8.0,
        gap: 20.0,
        base_color: Rgb::from_hex(GRID_BASE_COLOR).ok_or_else(|| anyhow!("bad base color"))?,
        active_color: Rgb::from_hex(GRID_ACTIVE_COLOR)
            .ok_or_else(|| anyhow!("bad active color"))?,
        proximity: 120.0,
        ..GridConfig::default()
    };
    let engine = DotGridEngine::new(config, js_sys::Date::now() as u64)?;
    let engine = Rc::new(RefCell::new(engine));

    // Initial canvas sizing and lattice build.
    let (w, h, dpr) = dom::sync_canvas_size(&canvas, &ctx, &wrapper);
    engine.borrow_mut().rebuild(w, h, dpr);

    // Page shell state and wiring.
    let state = Rc::new(RefCell::new(ui::AppState::load(js_sys::Date::now())));
    let ui_ctx = ui::UiContext {
        document: document.clone(),
        state,
    };
    ui::apply(&ui_ctx);
    let mut listeners = ui::wire(ui_ctx);

    // Grid input and resize detection.
    listeners.extend(input::wire_pointer(&window, &canvas, engine.clone()));
    let pending_resize = Rc::new(Cell::new(None));
    let resize = input::wire_resize(&wrapper, pending_resize.clone());

    let frame_ctx = frame::FrameContext::new(
        engine,
        canvas,
        ctx,
        wrapper,
        pending_resize,
        resize.is_polling(),
    );
    let raf = frame::RafLoop::start(frame_ctx);

    Ok(App {
        _listeners: listeners,
        _resize: resize,
        _raf: raf,
    })
}
