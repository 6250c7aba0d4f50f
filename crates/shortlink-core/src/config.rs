//! Grid tuning knobs, validated once at setup.
//!
//! Every field is a read-only parameter supplied by the embedding page.
//! Validation rejects degenerate values outright instead of clamping them:
//! several of these feed distance normalizations where a zero would divide.

use thiserror::Error;

use crate::color::Rgb;
use crate::constants::{
    DEFAULT_ACTIVE_COLOR, DEFAULT_BASE_COLOR, DEFAULT_DOT_SIZE, DEFAULT_GAP, DEFAULT_MAX_SPEED,
    DEFAULT_PROXIMITY, DEFAULT_RESISTANCE, DEFAULT_RETURN_DURATION, DEFAULT_SHOCK_RADIUS,
    DEFAULT_SHOCK_STRENGTH, DEFAULT_SPEED_TRIGGER,
};

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be a positive finite number (got {value})")]
    NonPositive { name: &'static str, value: f32 },
    #[error("gap must not be negative (got {0})")]
    NegativeGap(f32),
}

#[derive(Clone, Debug)]
pub struct GridConfig {
    /// Dot diameter, CSS px.
    pub dot_size: f32,
    /// Spacing between dot edges, CSS px.
    pub gap: f32,
    pub base_color: Rgb,
    pub active_color: Rgb,
    /// Radius within which dots tint toward `active_color` and react to movement.
    pub proximity: f32,
    /// Pointer speed (px/s) above which movement launches impulses.
    pub speed_trigger: f32,
    /// Radius of the click shockwave.
    pub shock_radius: f32,
    pub shock_strength: f32,
    /// Pointer velocity clamp, px/s.
    pub max_speed: f32,
    /// Glide deceleration, px/s^2.
    pub resistance: f32,
    /// Elastic return time, seconds.
    pub return_duration: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            dot_size: DEFAULT_DOT_SIZE,
            gap: DEFAULT_GAP,
            base_color: Rgb::from_hex(DEFAULT_BASE_COLOR).expect("default base color"),
            active_color: Rgb::from_hex(DEFAULT_ACTIVE_COLOR).expect("default active color"),
            proximity: DEFAULT_PROXIMITY,
            speed_trigger: DEFAULT_SPEED_TRIGGER,
            shock_radius: DEFAULT_SHOCK_RADIUS,
            shock_strength: DEFAULT_SHOCK_STRENGTH,
            max_speed: DEFAULT_MAX_SPEED,
            resistance: DEFAULT_RESISTANCE,
            return_duration: DEFAULT_RETURN_DURATION,
        }
    }
}

impl GridConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("dot_size", self.dot_size)?;
        require_positive("proximity", self.proximity)?;
        require_positive("speed_trigger", self.speed_trigger)?;
        require_positive("shock_radius", self.shock_radius)?;
        require_positive("shock_strength", self.shock_strength)?;
        require_positive("max_speed", self.max_speed)?;
        require_positive("resistance", self.resistance)?;
        require_positive("return_duration", self.return_duration)?;
        if self.gap < 0.0 || !self.gap.is_finite() {
            return Err(ConfigError::NegativeGap(self.gap));
        }
        Ok(())
    }
}

fn require_positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { name, value })
    }
}
