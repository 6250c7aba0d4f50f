//! Pointer tracking: throttled sampling with velocity estimation.

use glam::Vec2;

use crate::constants::POINTER_SAMPLE_INTERVAL_MS;

/// Singleton pointer state. `pos` is in canvas-local CSS coordinates;
/// velocity is estimated from client-space displacement between accepted
/// samples and clamped to the configured maximum speed.
#[derive(Clone, Copy, Debug, Default)]
pub struct PointerState {
    pub pos: Vec2,
    /// px/s, clamped.
    pub vel: Vec2,
    pub speed: f32,
    last_sample_ms: f64,
    last_client: Vec2,
}

impl PointerState {
    /// Feed one raw pointer-move event. Samples closer than the rate-limit
    /// interval to the previously accepted one are dropped wholesale;
    /// returns whether this sample was accepted.
    pub fn sample(&mut self, client: Vec2, local: Vec2, now_ms: f64, max_speed: f32) -> bool {
        if self.last_sample_ms == 0.0 {
            // First sample: nothing to differentiate against yet.
            self.last_sample_ms = now_ms;
            self.last_client = client;
            self.pos = local;
            self.vel = Vec2::ZERO;
            self.speed = 0.0;
            return true;
        }

        let dt_ms = now_ms - self.last_sample_ms;
        if dt_ms < POINTER_SAMPLE_INTERVAL_MS {
            return false;
        }

        let mut vel = (client - self.last_client) / dt_ms as f32 * 1000.0;
        let mut speed = vel.length();
        if speed > max_speed {
            vel *= max_speed / speed;
            speed = max_speed;
        }

        self.last_sample_ms = now_ms;
        self.last_client = client;
        self.pos = local;
        self.vel = vel;
        self.speed = speed;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_sample_has_zero_velocity() {
        let mut p = PointerState::default();
        assert!(p.sample(Vec2::new(40.0, 40.0), Vec2::new(40.0, 40.0), 100.0, 5000.0));
        assert_eq!(p.speed, 0.0);
        assert_eq!(p.pos, Vec2::new(40.0, 40.0));
    }

    #[test]
    fn samples_inside_the_window_are_dropped() {
        let mut p = PointerState::default();
        assert!(p.sample(Vec2::ZERO, Vec2::ZERO, 100.0, 5000.0));
        assert!(!p.sample(Vec2::new(5.0, 0.0), Vec2::new(5.0, 0.0), 110.0, 5000.0));
        // Dropped sample must not disturb the stored position.
        assert_eq!(p.pos, Vec2::ZERO);
        assert!(p.sample(Vec2::new(5.0, 0.0), Vec2::new(5.0, 0.0), 116.0, 5000.0));
    }

    #[test]
    fn velocity_is_displacement_over_elapsed_time() {
        let mut p = PointerState::default();
        p.sample(Vec2::ZERO, Vec2::ZERO, 100.0, 5000.0);
        p.sample(Vec2::new(30.0, 40.0), Vec2::new(30.0, 40.0), 120.0, 5000.0);
        // 50 px over 20 ms -> 2500 px/s.
        assert!((p.speed - 2500.0).abs() < 1e-3);
        assert!((p.vel.x - 1500.0).abs() < 1e-3);
        assert!((p.vel.y - 2000.0).abs() < 1e-3);
    }

    #[test]
    fn speed_is_clamped_by_rescaling_the_vector() {
        let mut p = PointerState::default();
        p.sample(Vec2::ZERO, Vec2::ZERO, 100.0, 5000.0);
        p.sample(Vec2::new(300.0, 400.0), Vec2::new(300.0, 400.0), 120.0, 5000.0);
        // Raw speed would be 25_000 px/s.
        assert!((p.speed - 5000.0).abs() < 1e-3);
        assert!((p.vel.length() - 5000.0).abs() < 1e-3);
        // Direction preserved: 3-4-5 triangle.
        assert!((p.vel.x - 3000.0).abs() < 1e-3);
        assert!((p.vel.y - 4000.0).abs() < 1e-3);
    }
}
