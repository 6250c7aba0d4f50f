// Host-side tests for the engine: trigger gating, color interpolation and
// the frame-step lifecycle.

use glam::Vec2;
use shortlink_core::{DotGridEngine, DotState, GridConfig, Rgb};

fn make_engine() -> DotGridEngine {
    let config = GridConfig {
        dot_size: 8.0,
        gap: 20.0,
        base_color: Rgb::from_hex("#33658A").unwrap(),
        active_color: Rgb::from_hex("#86BBD8").unwrap(),
        proximity: 120.0,
        ..GridConfig::default()
    };
    let mut engine = DotGridEngine::new(config, 42).unwrap();
    engine.rebuild(280.0, 280.0, 1.0);
    engine
}

/// Two samples far enough apart in time to pass the throttle; the second
/// one carries the velocity.
fn sweep(engine: &mut DotGridEngine, from: Vec2, to: Vec2, dt_ms: f64, t0_ms: f64) {
    assert!(engine.pointer_moved(from, from, t0_ms));
    assert!(engine.pointer_moved(to, to, t0_ms + dt_ms));
}

#[test]
fn invalid_config_is_rejected_at_setup() {
    let config = GridConfig {
        dot_size: -4.0,
        ..GridConfig::default()
    };
    assert!(DotGridEngine::new(config, 1).is_err());
}

#[test]
fn dots_outside_proximity_keep_the_base_color_exactly() {
    let mut engine = make_engine();
    // Park the pointer in the top-left corner.
    engine.pointer_moved(Vec2::new(14.0, 14.0), Vec2::new(14.0, 14.0), 1000.0);
    let base = engine.config().base_color;
    for dot in engine.dots() {
        if (dot.center() - engine.pointer().pos).length() > engine.config().proximity {
            assert_eq!(engine.dot_color(dot), base);
        }
    }
}

#[test]
fn dot_under_the_pointer_gets_the_active_color_exactly() {
    let mut engine = make_engine();
    let center = engine.dots()[0].center();
    engine.pointer_moved(center, center, 1000.0);
    let dot = &engine.dots()[0];
    assert_eq!(engine.dot_color(dot), engine.config().active_color);
}

#[test]
fn color_interpolates_between_base_and_active_in_between() {
    let mut engine = make_engine();
    let center = engine.dots()[0].center();
    let pointer = center + Vec2::new(60.0, 0.0); // half the proximity radius
    engine.pointer_moved(pointer, pointer, 1000.0);
    let color = engine.dot_color(&engine.dots()[0]);
    let expected = engine
        .config()
        .base_color
        .lerp(engine.config().active_color, 0.5);
    assert_eq!(color, expected);
}

#[test]
fn sub_threshold_movement_never_displaces_dots() {
    let mut engine = make_engine();
    // 2 px over 20 ms -> 100 px/s, exactly the trigger, which is not enough.
    sweep(&mut engine, Vec2::new(140.0, 140.0), Vec2::new(142.0, 140.0), 20.0, 1000.0);
    assert!(engine.dots().iter().all(|d| d.is_resting()));
}

#[test]
fn fast_movement_displaces_only_nearby_resting_dots() {
    let mut engine = make_engine();
    // 40 px over 20 ms -> 2000 px/s.
    sweep(&mut engine, Vec2::new(100.0, 140.0), Vec2::new(140.0, 140.0), 20.0, 1000.0);
    let prox = engine.config().proximity;
    let pointer = engine.pointer().pos;
    let mut displaced = 0;
    for dot in engine.dots() {
        let inside = (dot.center() - pointer).length() < prox;
        match dot.state {
            DotState::Resting => assert!(!inside, "dot at {:?} should have launched", dot.center()),
            _ => {
                assert!(inside);
                displaced += 1;
            }
        }
    }
    assert!(displaced > 0);
}

#[test]
fn a_displaced_dot_ignores_further_triggers_until_it_rests() {
    let mut engine = make_engine();
    sweep(&mut engine, Vec2::new(100.0, 140.0), Vec2::new(140.0, 140.0), 20.0, 1000.0);
    let snapshot: Vec<DotState> = engine.dots().iter().map(|d| d.state.clone()).collect();

    // A second fast sweep through the same region while everything is still
    // in flight must not restart any animation.
    sweep(&mut engine, Vec2::new(100.0, 140.0), Vec2::new(140.0, 140.0), 20.0, 2000.0);
    for (dot, before) in engine.dots().iter().zip(&snapshot) {
        if !matches!(before, DotState::Resting) {
            assert_eq!(&dot.state, before);
        }
    }
}

#[test]
fn impulse_cycle_returns_every_dot_to_rest_at_zero_offset() {
    let mut engine = make_engine();
    sweep(&mut engine, Vec2::new(100.0, 140.0), Vec2::new(140.0, 140.0), 20.0, 1000.0);
    assert!(engine.dots().iter().any(|d| !d.is_resting()));

    // Far longer than any glide plus the 1.5 s return.
    for _ in 0..(10 * 60) {
        engine.step(1.0 / 60.0);
    }
    for dot in engine.dots() {
        assert!(dot.is_resting());
        assert_eq!(dot.offset, Vec2::ZERO);
    }
}

#[test]
fn dot_can_be_retriggered_after_completing_a_cycle() {
    let mut engine = make_engine();
    sweep(&mut engine, Vec2::new(100.0, 140.0), Vec2::new(140.0, 140.0), 20.0, 1000.0);
    for _ in 0..(10 * 60) {
        engine.step(1.0 / 60.0);
    }
    assert!(engine.pointer_moved(Vec2::new(100.0, 140.0), Vec2::new(100.0, 140.0), 5000.0));
    assert!(engine.pointer_moved(Vec2::new(140.0, 140.0), Vec2::new(140.0, 140.0), 5020.0));
    assert!(engine.dots().iter().any(|d| !d.is_resting()));
}

#[test]
fn click_launches_every_resting_dot_inside_the_shock_radius() {
    let mut engine = make_engine();
    let click = Vec2::new(140.0, 140.0);
    let radius = engine.config().shock_radius;
    let expected = engine
        .dots()
        .iter()
        .filter(|d| (d.center() - click).length() < radius)
        .count();
    let launched = engine.clicked(click);
    assert_eq!(launched, expected);
    assert!(launched > 0);
}

#[test]
fn click_exactly_on_a_dot_center_throws_it_the_farthest_class_of_push() {
    let mut engine = make_engine();
    let target = engine.dots()[55].center();
    let near_zone = engine.config().shock_radius * 0.3;
    engine.clicked(target);
    // Let every glide settle to its peak displacement.
    let mut peak_target = 0.0_f32;
    let mut peak_far: f32 = 0.0;
    for _ in 0..(5 * 240) {
        engine.step(1.0 / 240.0);
        for (i, dot) in engine.dots().iter().enumerate() {
            if i == 55 {
                peak_target = peak_target.max(dot.offset.length());
            } else if (dot.center() - target).length() >= near_zone {
                peak_far = peak_far.max(dot.offset.length());
            }
        }
    }
    // The dot under the click point gets the near boost; with strength 5 and
    // the 50-80 px base range its peak displacement clears 500 px, more than
    // any dot outside the boosted zone can reach.
    assert!(peak_target >= 500.0, "peak {peak_target}");
    assert!(peak_target > peak_far, "target {peak_target} vs far {peak_far}");
}

#[test]
fn rebuild_resets_all_displacement_state() {
    let mut engine = make_engine();
    engine.clicked(Vec2::new(140.0, 140.0));
    assert!(engine.dots().iter().any(|d| !d.is_resting()));
    engine.rebuild(560.0, 280.0, 2.0);
    assert!(engine.dots().iter().all(|d| d.is_resting()));
    assert_eq!(engine.dimensions().width, 560.0);
    assert_eq!(engine.dimensions().dpr, 2.0);
}

#[test]
fn same_seed_yields_identical_shockwaves() {
    let mut a = make_engine();
    let mut b = make_engine();
    a.clicked(Vec2::new(140.0, 140.0));
    b.clicked(Vec2::new(140.0, 140.0));
    for _ in 0..30 {
        a.step(1.0 / 60.0);
        b.step(1.0 / 60.0);
    }
    for (da, db) in a.dots().iter().zip(b.dots()) {
        assert_eq!(da.offset, db.offset);
    }
}
