//! Event wiring for the dot grid: pointer movement, clicks and resize.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use glam::Vec2;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

use shortlink_core::DotGridEngine;

use crate::dom::{self, Listener};

/// Translate a client-space event position into canvas-local CSS px.
#[inline]
pub fn canvas_local(canvas: &web::HtmlCanvasElement, client: Vec2) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    Vec2::new(client.x - rect.left() as f32, client.y - rect.top() as f32)
}

/// Hook pointer movement and clicks on the window so the grid reacts to the
/// pointer anywhere on the page, not just over the canvas.
pub fn wire_pointer(
    window: &web::Window,
    canvas: &web::HtmlCanvasElement,
    engine: Rc<RefCell<DotGridEngine>>,
) -> Vec<Listener> {
    let mut listeners = Vec::with_capacity(2);

    {
        let canvas = canvas.clone();
        let engine = engine.clone();
        listeners.push(Listener::new(window, "pointermove", move |ev| {
            let Some(ev) = ev.dyn_ref::<web::PointerEvent>() else {
                return;
            };
            let client = Vec2::new(ev.client_x() as f32, ev.client_y() as f32);
            let local = canvas_local(&canvas, client);
            engine.borrow_mut().pointer_moved(client, local, dom::now_ms());
        }));
    }

    {
        let canvas = canvas.clone();
        listeners.push(Listener::new(window, "click", move |ev| {
            let Some(ev) = ev.dyn_ref::<web::MouseEvent>() else {
                return;
            };
            let client = Vec2::new(ev.client_x() as f32, ev.client_y() as f32);
            let local = canvas_local(&canvas, client);
            let launched = engine.borrow_mut().clicked(local);
            log::info!(
                "[click] shockwave at ({:.0},{:.0}) launched {launched} dots",
                local.x,
                local.y
            );
        }));
    }

    listeners
}

/// Resize detection. Prefers a `ResizeObserver` on the wrapper; when the
/// platform has none, the frame loop polls the wrapper rect instead.
pub struct ResizeHook {
    observer: Option<web::ResizeObserver>,
    _closure: Option<Closure<dyn FnMut()>>,
    polling: bool,
}

impl ResizeHook {
    pub fn is_polling(&self) -> bool {
        self.polling
    }
}

impl Drop for ResizeHook {
    fn drop(&mut self) {
        if let Some(observer) = &self.observer {
            observer.disconnect();
        }
    }
}

pub fn wire_resize(wrapper: &web::Element, pending: Rc<Cell<Option<f64>>>) -> ResizeHook {
    let supported = web::window()
        .map(|w| {
            js_sys::Reflect::has(w.as_ref(), &JsValue::from_str("ResizeObserver"))
                .unwrap_or(false)
        })
        .unwrap_or(false);

    if supported {
        let closure = Closure::wrap(Box::new(move || {
            // Stamp every notification; the frame loop rebuilds once the
            // burst has been quiet for the debounce interval.
            pending.set(Some(dom::now_ms()));
        }) as Box<dyn FnMut()>);
        match web::ResizeObserver::new(closure.as_ref().unchecked_ref()) {
            Ok(observer) => {
                observer.observe(wrapper);
                return ResizeHook {
                    observer: Some(observer),
                    _closure: Some(closure),
                    polling: false,
                };
            }
            Err(e) => log::warn!("[resize] observer construction failed: {e:?}"),
        }
    }

    log::warn!("[resize] no ResizeObserver, falling back to polling");
    ResizeHook {
        observer: None,
        _closure: None,
        polling: true,
    }
}
