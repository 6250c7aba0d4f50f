//! Small DOM helpers shared across the frontend modules.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Monotonic-ish milliseconds for throttling and debouncing.
#[inline]
pub fn now_ms() -> f64 {
    web::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

/// An owned DOM event listener that unhooks itself when dropped.
pub struct Listener {
    target: web::EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

impl Listener {
    pub fn new(
        target: &web::EventTarget,
        event: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) -> Self {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(_)>);
        let _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        Self {
            target: target.clone(),
            event,
            closure,
        }
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}

/// Match the canvas backing store to the container's CSS size times the
/// device pixel ratio, and scale the context so drawing stays in CSS px.
/// Returns `(width, height, dpr)` in CSS px.
pub fn sync_canvas_size(
    canvas: &web::HtmlCanvasElement,
    ctx: &web::CanvasRenderingContext2d,
    wrapper: &web::Element,
) -> (f32, f32, f32) {
    let dpr = web::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0);
    let rect = wrapper.get_bounding_client_rect();
    let width = rect.width();
    let height = rect.height();
    canvas.set_width(((width * dpr) as u32).max(1));
    canvas.set_height(((height * dpr) as u32).max(1));
    // Setting width/height resets the transform; re-apply the DPR scale.
    let _ = ctx.scale(dpr, dpr);
    (width as f32, height as f32, dpr as f32)
}

#[inline]
pub fn element(document: &web::Document, id: &str) -> Option<web::Element> {
    document.get_element_by_id(id)
}

#[inline]
pub fn show(document: &web::Document, id: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        let _ = el.set_attribute("style", "");
    }
}

#[inline]
pub fn hide(document: &web::Document, id: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        let _ = el.set_attribute("style", "display:none");
    }
}

#[inline]
pub fn set_visible(document: &web::Document, id: &str, visible: bool) {
    if visible {
        show(document, id);
    } else {
        hide(document, id);
    }
}

#[inline]
pub fn set_text(document: &web::Document, id: &str, text: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        el.set_text_content(Some(text));
    }
}

#[inline]
pub fn input_value(document: &web::Document, id: &str) -> String {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<web::HtmlInputElement>().ok())
        .map(|input| input.value())
        .unwrap_or_default()
}

#[inline]
pub fn set_input_value(document: &web::Document, id: &str, value: &str) {
    if let Some(input) = document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<web::HtmlInputElement>().ok())
    {
        input.set_value(value);
    }
}

pub fn set_link(document: &web::Document, id: &str, url: &str) {
    if let Some(anchor) = document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<web::HtmlAnchorElement>().ok())
    {
        anchor.set_href(url);
        anchor.set_text_content(Some(url));
    }
}
