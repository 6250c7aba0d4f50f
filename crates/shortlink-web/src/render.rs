use web_sys as web;

use shortlink_core::constants::QR_QUIET_ZONE;
use shortlink_core::{DotGridEngine, QrMatrix};

/// Full clear and redraw. Coordinates are CSS px; the context carries the
/// DPR scale from the last canvas sync.
pub fn draw_grid(ctx: &web::CanvasRenderingContext2d, engine: &DotGridEngine) {
    let dims = engine.dimensions();
    ctx.clear_rect(0.0, 0.0, dims.width as f64, dims.height as f64);

    let radius = engine.config().dot_size as f64 / 2.0;
    for dot in engine.dots() {
        let pos = dot.position();
        ctx.begin_path();
        if ctx
            .arc(pos.x as f64, pos.y as f64, radius, 0.0, std::f64::consts::TAU)
            .is_err()
        {
            continue;
        }
        ctx.set_fill_style_str(&engine.dot_color(dot).to_css());
        ctx.fill();
    }
}

/// Paint a QR matrix onto its own square canvas with a light quiet zone.
pub fn draw_qr(canvas: &web::HtmlCanvasElement, matrix: &QrMatrix, size_px: u32) {
    use wasm_bindgen::JsCast;
    let Some(ctx) = canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|c| c.dyn_into::<web::CanvasRenderingContext2d>().ok())
    else {
        log::error!("[qr] no 2d context");
        return;
    };

    canvas.set_width(size_px);
    canvas.set_height(size_px);

    let total = (matrix.size() + 2 * QR_QUIET_ZONE) as f64;
    let module = size_px as f64 / total;

    ctx.set_fill_style_str("#ffffff");
    ctx.fill_rect(0.0, 0.0, size_px as f64, size_px as f64);
    ctx.set_fill_style_str("#000000");
    for y in 0..matrix.size() {
        for x in 0..matrix.size() {
            if matrix.is_dark(x, y) {
                ctx.fill_rect(
                    (x + QR_QUIET_ZONE) as f64 * module,
                    (y + QR_QUIET_ZONE) as f64 * module,
                    module.ceil(),
                    module.ceil(),
                );
            }
        }
    }
}
