//! The dot-grid engine: owns the lattice, the pointer state and the RNG, and
//! advances every per-dot state machine from a single `step` call per frame.

use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::color::Rgb;
use crate::config::{ConfigError, GridConfig};
use crate::constants::{
    MOVE_RETURN_PERIOD, SHOCK_RESISTANCE_SCALE, SHOCK_RETURN_PERIOD, SHOCK_RETURN_SCALE,
};
use crate::grid::{self, Dot, GridDimensions};
use crate::physics;
use crate::pointer::PointerState;

pub struct DotGridEngine {
    config: GridConfig,
    dims: GridDimensions,
    dots: Vec<Dot>,
    pointer: PointerState,
    rng: StdRng,
}

impl DotGridEngine {
    /// Validates the configuration up front; a degenerate config is a setup
    /// error, reported before any frame runs.
    pub fn new(config: GridConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            dims: GridDimensions::default(),
            dots: Vec::new(),
            pointer: PointerState::default(),
            rng: StdRng::seed_from_u64(seed),
        })
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn dimensions(&self) -> GridDimensions {
        self.dims
    }

    pub fn dots(&self) -> &[Dot] {
        &self.dots
    }

    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    /// Rebuild the lattice for a new container size, dropping any in-flight
    /// displacement. Runs on mount and after every (debounced) resize.
    pub fn rebuild(&mut self, width: f32, height: f32, dpr: f32) {
        self.dims = GridDimensions { width, height, dpr };
        self.dots = grid::build_dots(width, height, &self.config);
        log::debug!(
            "[grid] rebuilt {} dots for {width:.0}x{height:.0}@{dpr}",
            self.dots.len()
        );
    }

    /// Feed a pointer-move event (throttled internally). When the sample is
    /// accepted and the pointer is fast enough, resting dots inside the
    /// proximity radius are launched away from it. Returns whether the
    /// sample was accepted.
    pub fn pointer_moved(&mut self, client: Vec2, local: Vec2, now_ms: f64) -> bool {
        if !self
            .pointer
            .sample(client, local, now_ms, self.config.max_speed)
        {
            return false;
        }

        if self.pointer.speed > self.config.speed_trigger {
            let prox_sq = self.config.proximity * self.config.proximity;
            for dot in &mut self.dots {
                if !dot.is_resting() {
                    continue;
                }
                if (dot.center() - self.pointer.pos).length_squared() >= prox_sq {
                    continue;
                }
                let push = physics::move_push(
                    dot.center(),
                    self.pointer.pos,
                    self.pointer.vel,
                    self.pointer.speed,
                    &self.config,
                );
                dot.launch(
                    push,
                    self.config.resistance,
                    self.config.return_duration,
                    MOVE_RETURN_PERIOD,
                );
            }
        }
        true
    }

    /// Feed a click: resting dots inside the shock radius are thrown
    /// outward with radial falloff. Returns how many dots were launched.
    pub fn clicked(&mut self, point: Vec2) -> usize {
        let shock_sq = self.config.shock_radius * self.config.shock_radius;
        let mut launched = 0;
        for dot in &mut self.dots {
            if !dot.is_resting() {
                continue;
            }
            if (dot.center() - point).length_squared() >= shock_sq {
                continue;
            }
            let push = physics::shock_push(dot.center(), point, &self.config, &mut self.rng);
            dot.launch(
                push,
                self.config.resistance * SHOCK_RESISTANCE_SCALE,
                self.config.return_duration * SHOCK_RETURN_SCALE,
                SHOCK_RETURN_PERIOD,
            );
            launched += 1;
        }
        launched
    }

    /// Advance every dot's animation by `dt` seconds. Called once per frame.
    pub fn step(&mut self, dt: f32) {
        for dot in &mut self.dots {
            dot.step(dt);
        }
    }

    /// Fill color for a dot this frame. Distance is measured from the
    /// lattice center (not the displaced position) and compared squared so
    /// the square root is only paid inside the proximity radius.
    pub fn dot_color(&self, dot: &Dot) -> Rgb {
        let dsq = (dot.center() - self.pointer.pos).length_squared();
        let prox_sq = self.config.proximity * self.config.proximity;
        if dsq > prox_sq {
            return self.config.base_color;
        }
        let t = 1.0 - dsq.sqrt() / self.config.proximity;
        self.config.base_color.lerp(self.config.active_color, t)
    }
}
