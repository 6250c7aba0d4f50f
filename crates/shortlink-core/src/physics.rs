//! Impulse motion: inertial glide out, elastic spring back.
//!
//! A triggered dot glides toward a target offset with its velocity decaying
//! linearly at the configured resistance, then eases back to the lattice
//! position with an elastic overshoot. Both phases are advanced purely by
//! `Dot::step`, so the whole animation is a deterministic function of the
//! trigger parameters and elapsed time.

use glam::Vec2;
use rand::Rng;

use crate::config::GridConfig;
use crate::constants::{
    MIN_NORMALIZED_DIST, PUSH_FALLOFF_SCALE, SHOCK_FALLOFF_EXPONENT, SHOCK_JITTER_MAX,
    SHOCK_JITTER_MIN, SHOCK_NEAR_BOOST, SHOCK_NEAR_FRACTION, SHOCK_PUSH_MAX_PX, SHOCK_PUSH_MIN_PX,
    VELOCITY_PUSH_CAP, VELOCITY_PUSH_SCALE,
};
use crate::grid::{Dot, DotState};

/// Outbound phase: current velocity decelerating at `decel` px/s^2.
///
/// The launch velocity is chosen so the glide comes to rest exactly at the
/// requested offset. `return_duration`/`return_period` are carried along for
/// the spring that follows.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Glide {
    pub vel: Vec2,
    pub decel: f32,
    pub return_duration: f32,
    pub return_period: f32,
}

/// Inbound phase: elastic ease from the settled offset back to zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spring {
    pub from: Vec2,
    pub elapsed: f32,
    pub duration: f32,
    pub period: f32,
}

/// Elastic-out easing (amplitude 1). 0 at t=0, 1 at t=1, overshooting in
/// between with oscillation period `period`.
pub fn elastic_out(t: f32, period: f32) -> f32 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }
    let s = period / 4.0;
    2.0_f32.powf(-10.0 * t) * ((t - s) * std::f32::consts::TAU / period).sin() + 1.0
}

/// Target offset for a pointer-move impulse: a repulsion term that grows as
/// the pointer closes in (normalized distance floored at 0.1), plus a small
/// fraction of the pointer velocity.
pub fn move_push(center: Vec2, pointer: Vec2, vel: Vec2, speed: f32, config: &GridConfig) -> Vec2 {
    let delta = center - pointer;
    let dist = delta.length();
    let normalized = (dist / config.proximity).max(MIN_NORMALIZED_DIST);
    let push_mul = (1.0 / normalized) * PUSH_FALLOFF_SCALE;
    let vel_mul = (speed / config.speed_trigger).min(VELOCITY_PUSH_CAP) * VELOCITY_PUSH_SCALE;
    delta * push_mul + vel * vel_mul
}

/// Radial falloff of a click shockwave at `dist` from the click point:
/// 1 at the click point, 0 at the shock radius, raised to a sub-linear
/// power for a gradual decay.
pub fn shock_falloff(dist: f32, shock_radius: f32) -> f32 {
    let falloff = (1.0 - dist / shock_radius).max(0.0);
    falloff.powf(SHOCK_FALLOFF_EXPONENT)
}

/// Target offset for a click shockwave: radial push away from the click
/// point, boosted for dots very close to it and jittered for variation.
pub fn shock_push(center: Vec2, click: Vec2, config: &GridConfig, rng: &mut impl Rng) -> Vec2 {
    let delta = center - click;
    let dist = delta.length();

    let intensity = shock_falloff(dist, config.shock_radius);
    let boost = if dist < config.shock_radius * SHOCK_NEAR_FRACTION {
        SHOCK_NEAR_BOOST
    } else {
        1.0
    };
    let jitter = rng.gen_range(SHOCK_JITTER_MIN..SHOCK_JITTER_MAX);
    let strength = config.shock_strength * intensity * boost * jitter;

    let angle = delta.y.atan2(delta.x);
    let magnitude = strength * rng.gen_range(SHOCK_PUSH_MIN_PX..SHOCK_PUSH_MAX_PX);
    Vec2::new(angle.cos(), angle.sin()) * magnitude
}

impl Dot {
    /// Begin an impulse toward `target` (an offset from the lattice center).
    /// Ignored unless the dot is resting: a dot under displacement finishes
    /// its cycle before it can be pushed again.
    pub fn launch(&mut self, target: Vec2, decel: f32, return_duration: f32, return_period: f32) {
        if !self.is_resting() {
            return;
        }
        let dist = target.length();
        if dist <= f32::EPSILON {
            return;
        }
        // v^2 = 2*a*d puts the glide at rest exactly on the target offset.
        let vel = target / dist * (2.0 * decel * dist).sqrt();
        self.state = DotState::Displaced(Glide {
            vel,
            decel,
            return_duration,
            return_period,
        });
    }

    /// Advance this dot's animation by `dt` seconds.
    pub fn step(&mut self, dt: f32) {
        if dt <= 0.0 {
            return;
        }
        match &mut self.state {
            DotState::Resting => {}
            DotState::Displaced(glide) => {
                let speed = glide.vel.length();
                let settle_in = speed / glide.decel;
                if settle_in <= dt {
                    // Remaining travel under linear decay is v*t/2.
                    self.offset += glide.vel * settle_in * 0.5;
                    self.state = DotState::Returning(Spring {
                        from: self.offset,
                        elapsed: 0.0,
                        duration: glide.return_duration,
                        period: glide.return_period,
                    });
                } else {
                    let decel = glide.vel / speed * glide.decel;
                    self.offset += glide.vel * dt - decel * (0.5 * dt * dt);
                    glide.vel -= decel * dt;
                }
            }
            DotState::Returning(spring) => {
                spring.elapsed += dt;
                let t = spring.elapsed / spring.duration;
                if t >= 1.0 {
                    self.offset = Vec2::ZERO;
                    self.state = DotState::Resting;
                } else {
                    self.offset = spring.from * (1.0 - elastic_out(t, spring.period));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elastic_out_endpoints() {
        assert_eq!(elastic_out(0.0, 0.75), 0.0);
        assert_eq!(elastic_out(1.0, 0.75), 1.0);
        assert_eq!(elastic_out(-0.5, 0.6), 0.0);
        assert_eq!(elastic_out(2.0, 0.6), 1.0);
    }

    #[test]
    fn elastic_out_overshoots_then_settles() {
        let peak = (0..100)
            .map(|i| elastic_out(i as f32 / 100.0, 0.75))
            .fold(0.0_f32, f32::max);
        assert!(peak > 1.0, "elastic ease should overshoot, peak={peak}");
        assert!((elastic_out(0.99, 0.75) - 1.0).abs() < 0.02);
    }
}
