//! Integration tests: centroid math and release glide convergence over a
//! spread of inputs.

use tp_core::{InertiaEngine, TouchPoint, TouchSet, Vector2, ZoomMode, ZoomState};

#[test]
fn centroid_matches_mean_for_many_sets() {
    for n in 1..=10_i64 {
        let set: TouchSet = (0..n)
            .map(|i| TouchPoint::new(i, (i * 37 % 101) as f64, (i * i) as f64 - 12.5))
            .collect();
        let sum_x: f64 = set.iter().map(|p| p.x).sum();
        let sum_y: f64 = set.iter().map(|p| p.y).sum();
        let centroid = set.centroid();
        assert!((centroid.x - sum_x / n as f64).abs() < 1e-9);
        assert!((centroid.y - sum_y / n as f64).abs() < 1e-9);
    }
}

#[test]
fn duplicate_ids_collapse_to_one_point() {
    let set = TouchSet::from_points([
        TouchPoint::new(1, 0.0, 0.0),
        TouchPoint::new(1, 10.0, 10.0),
    ]);
    assert_eq!(set.len(), 1);
    assert_eq!(set.centroid(), Vector2::new(10.0, 10.0));
}

#[test]
fn every_glide_stops_within_its_bound() {
    let engine = InertiaEngine::default();
    let speeds = [0.05, 0.1, 0.35, 1.0, 12.0, 50.0, 333.0, 2500.0];
    for &vx in &speeds {
        for &vy in &speeds {
            for sign in [1.0, -1.0] {
                let start = Vector2::new(vx * sign, -vy);
                let bound = engine.max_ticks(start);
                let mut v = start;
                let mut ticks = 0;
                while !v.is_zero() {
                    engine.step(&mut v, None);
                    ticks += 1;
                }
                assert!(ticks <= bound, "{start:?}: {ticks} > {bound}");
            }
        }
    }
}

#[test]
fn alternating_wheel_and_pinch_deltas_respect_floor() {
    let mut zoom = ZoomState::new(ZoomMode::Distance, 400.0);
    for i in 0..200 {
        let delta = if i % 3 == 0 { -17.0 } else { 41.0 };
        zoom.apply_delta(delta);
        assert!(zoom.value >= zoom.min);
    }
}
