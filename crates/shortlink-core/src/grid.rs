//! Lattice construction: a regular grid of dots centered in the container.

use glam::Vec2;

use crate::config::GridConfig;
use crate::physics::{Glide, Spring};

/// Container measurements captured at the last rebuild.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GridDimensions {
    /// CSS px.
    pub width: f32,
    /// CSS px.
    pub height: f32,
    pub dpr: f32,
}

/// Per-dot animation phase.
///
/// `Resting` implies zero offset. A dot only leaves `Resting` through a
/// trigger, and only re-enters it when its return animation completes, so at
/// most one impulse is in flight per dot at any time.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum DotState {
    #[default]
    Resting,
    Displaced(Glide),
    Returning(Spring),
}

/// One lattice cell: a fixed center plus the current displacement.
#[derive(Clone, Debug, PartialEq)]
pub struct Dot {
    pub cx: f32,
    pub cy: f32,
    pub offset: Vec2,
    pub state: DotState,
}

impl Dot {
    pub fn new(cx: f32, cy: f32) -> Self {
        Self {
            cx,
            cy,
            offset: Vec2::ZERO,
            state: DotState::Resting,
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.cx, self.cy)
    }

    /// Where the dot is drawn this frame.
    pub fn position(&self) -> Vec2 {
        self.center() + self.offset
    }

    pub fn is_resting(&self) -> bool {
        self.state == DotState::Resting
    }
}

/// Derived grid geometry for a container size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridLayout {
    pub cols: usize,
    pub rows: usize,
    /// Center-to-center spacing: `dot_size + gap`.
    pub cell: f32,
    /// Center of the first (top-left) dot.
    pub origin: Vec2,
}

/// Compute how many cells fit and where the first dot center sits so the
/// grid footprint is centered with equal margins on both axes.
pub fn layout(width: f32, height: f32, config: &GridConfig) -> GridLayout {
    let cell = config.dot_size + config.gap;
    let cols = (((width + config.gap) / cell).floor()).max(0.0) as usize;
    let rows = (((height + config.gap) / cell).floor()).max(0.0) as usize;

    let grid_w = cell * cols as f32 - config.gap;
    let grid_h = cell * rows as f32 - config.gap;

    let origin = Vec2::new(
        (width - grid_w) / 2.0 + config.dot_size / 2.0,
        (height - grid_h) / 2.0 + config.dot_size / 2.0,
    );

    GridLayout {
        cols,
        rows,
        cell,
        origin,
    }
}

/// Build the dot collection for a container, all resting at their centers.
pub fn build_dots(width: f32, height: f32, config: &GridConfig) -> Vec<Dot> {
    let layout = layout(width, height, config);
    let mut dots = Vec::with_capacity(layout.cols * layout.rows);
    for y in 0..layout.rows {
        for x in 0..layout.cols {
            dots.push(Dot::new(
                layout.origin.x + x as f32 * layout.cell,
                layout.origin.y + y as f32 * layout.cell,
            ));
        }
    }
    dots
}
