// Host-side tests for grid geometry.

use shortlink_core::{grid, GridConfig, Rgb};

fn page_config() -> GridConfig {
    // The values the page embeds the grid with.
    GridConfig {
        dot_size: 8.0,
        gap: 20.0,
        base_color: Rgb::from_hex("#33658A").unwrap(),
        active_color: Rgb::from_hex("#86BBD8").unwrap(),
        proximity: 120.0,
        ..GridConfig::default()
    }
}

#[test]
fn ten_by_ten_grid_fits_a_280px_container() {
    // dot 8 + gap 20 -> cell 28; floor((280 + 20) / 28) = 10 per axis.
    let layout = grid::layout(280.0, 280.0, &page_config());
    assert_eq!(layout.cols, 10);
    assert_eq!(layout.rows, 10);
    assert!((layout.cell - 28.0).abs() < 1e-6);
    let dots = grid::build_dots(280.0, 280.0, &page_config());
    assert_eq!(dots.len(), 100);
}

#[test]
fn grid_is_centered_for_many_container_sizes() {
    let cfg = page_config();
    for (w, h) in [
        (280.0_f32, 280.0_f32),
        (1920.0, 1080.0),
        (333.0, 777.0),
        (29.0, 29.0),
        (641.5, 480.25),
    ] {
        let dots = grid::build_dots(w, h, &cfg);
        if dots.is_empty() {
            continue;
        }
        let half = cfg.dot_size / 2.0;
        let min_x = dots.iter().map(|d| d.cx).fold(f32::INFINITY, f32::min) - half;
        let max_x = dots.iter().map(|d| d.cx).fold(f32::NEG_INFINITY, f32::max) + half;
        let min_y = dots.iter().map(|d| d.cy).fold(f32::INFINITY, f32::min) - half;
        let max_y = dots.iter().map(|d| d.cy).fold(f32::NEG_INFINITY, f32::max) + half;
        // Equal margins on both sides, within float rounding.
        assert!(
            (min_x - (w - max_x)).abs() < 1e-3,
            "x margins differ for {w}x{h}: {min_x} vs {}",
            w - max_x
        );
        assert!(
            (min_y - (h - max_y)).abs() < 1e-3,
            "y margins differ for {w}x{h}: {min_y} vs {}",
            h - max_y
        );
    }
}

#[test]
fn dots_sit_on_a_uniform_lattice() {
    let cfg = page_config();
    let layout = grid::layout(280.0, 280.0, &cfg);
    let dots = grid::build_dots(280.0, 280.0, &cfg);
    for (i, dot) in dots.iter().enumerate() {
        let col = (i % layout.cols) as f32;
        let row = (i / layout.cols) as f32;
        assert!((dot.cx - (layout.origin.x + col * layout.cell)).abs() < 1e-4);
        assert!((dot.cy - (layout.origin.y + row * layout.cell)).abs() < 1e-4);
        assert_eq!(dot.offset, glam::Vec2::ZERO);
        assert!(dot.is_resting());
    }
}

#[test]
fn containers_too_small_for_one_cell_get_no_dots() {
    let cfg = page_config();
    assert!(grid::build_dots(0.0, 0.0, &cfg).is_empty());
    assert!(grid::build_dots(7.0, 280.0, &cfg).is_empty());
}
