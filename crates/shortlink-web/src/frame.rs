//! The per-frame driver: steps the engine, redraws, and folds resize
//! handling into the same tick so all mutation happens on one schedule.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use instant::Instant;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use shortlink_core::constants::{RESIZE_DEBOUNCE_MS, RESIZE_POLL_INTERVAL_MS};
use shortlink_core::DotGridEngine;

use crate::dom;
use crate::render;

pub struct FrameContext {
    engine: Rc<RefCell<DotGridEngine>>,
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
    wrapper: web::Element,
    /// Timestamp of the latest resize notification, cleared on rebuild.
    pending_resize: Rc<Cell<Option<f64>>>,
    poll_resize: bool,
    last_instant: Instant,
    last_poll_ms: f64,
}

impl FrameContext {
    pub fn new(
        engine: Rc<RefCell<DotGridEngine>>,
        canvas: web::HtmlCanvasElement,
        ctx: web::CanvasRenderingContext2d,
        wrapper: web::Element,
        pending_resize: Rc<Cell<Option<f64>>>,
        poll_resize: bool,
    ) -> Self {
        Self {
            engine,
            canvas,
            ctx,
            wrapper,
            pending_resize,
            poll_resize,
            last_instant: Instant::now(),
            last_poll_ms: 0.0,
        }
    }

    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = (now - self.last_instant).as_secs_f32();
        self.last_instant = now;

        let now_ms = dom::now_ms();
        if self.poll_resize && now_ms - self.last_poll_ms >= RESIZE_POLL_INTERVAL_MS {
            self.last_poll_ms = now_ms;
            let rect = self.wrapper.get_bounding_client_rect();
            let dims = self.engine.borrow().dimensions();
            if (rect.width() as f32 - dims.width).abs() > 0.5
                || (rect.height() as f32 - dims.height).abs() > 0.5
            {
                self.pending_resize.set(Some(now_ms));
            }
        }
        if let Some(observed) = self.pending_resize.get() {
            if now_ms - observed >= RESIZE_DEBOUNCE_MS {
                self.pending_resize.set(None);
                let (w, h, dpr) = dom::sync_canvas_size(&self.canvas, &self.ctx, &self.wrapper);
                self.engine.borrow_mut().rebuild(w, h, dpr);
                log::info!("[resize] rebuilt grid for {w:.0}x{h:.0}@{dpr}");
            }
        }

        let mut engine = self.engine.borrow_mut();
        engine.step(dt);
        render::draw_grid(&self.ctx, &engine);
    }
}

/// A cancellable requestAnimationFrame loop. Dropping it cancels the
/// outstanding frame request and releases the tick closure.
pub struct RafLoop {
    raf_id: Rc<Cell<i32>>,
    closure: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
}

impl RafLoop {
    pub fn start(mut frame_ctx: FrameContext) -> Self {
        let raf_id = Rc::new(Cell::new(0));
        let closure: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));

        let closure_tick = closure.clone();
        let raf_id_tick = raf_id.clone();
        *closure.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            frame_ctx.frame();
            if let Some(window) = web::window() {
                if let Some(cb) = closure_tick.borrow().as_ref() {
                    if let Ok(id) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                        raf_id_tick.set(id);
                    }
                }
            }
        }) as Box<dyn FnMut()>));

        if let Some(window) = web::window() {
            if let Some(cb) = closure.borrow().as_ref() {
                if let Ok(id) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                    raf_id.set(id);
                }
            }
        }

        Self { raf_id, closure }
    }
}

impl Drop for RafLoop {
    fn drop(&mut self) {
        if let Some(window) = web::window() {
            let _ = window.cancel_animation_frame(self.raf_id.get());
        }
        // Break the closure's self-reference so it can actually free.
        self.closure.borrow_mut().take();
    }
}
