//! Release glide: momentum that keeps the camera moving after the user lets
//! go, decaying geometrically until it stops.

use crate::vector::Vector2;
use serde::{Deserialize, Serialize};

pub const DEFAULT_DAMPING: f64 = 0.9;
pub const DEFAULT_STOP_THRESHOLD: f64 = 0.1;

/// Nominal frame length used to scale time-based decay.
pub const DEFAULT_FRAME_MS: f64 = 16.0;

/// How the damping factor is applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum DecayMode {
    /// Multiply by the damping factor once per tick, whatever the frame
    /// rate. Glide speed follows the host's tick cadence.
    #[default]
    PerTick,
    /// Multiply by `damping^(elapsed / frame_ms)`, so the glide covers the
    /// same distance at any frame rate.
    TimeBased { frame_ms: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InertiaEngine {
    pub damping: f64,
    pub stop_threshold: f64,
    pub decay: DecayMode,
}

impl Default for InertiaEngine {
    fn default() -> Self {
        Self {
            damping: DEFAULT_DAMPING,
            stop_threshold: DEFAULT_STOP_THRESHOLD,
            decay: DecayMode::PerTick,
        }
    }
}

impl InertiaEngine {
    pub fn new(damping: f64, stop_threshold: f64, decay: DecayMode) -> Self {
        Self {
            damping,
            stop_threshold,
            decay,
        }
    }

    /// Damping factor for one step. `elapsed_ms` is only used by
    /// [`DecayMode::TimeBased`]; without it a nominal frame is assumed.
    pub fn factor(&self, elapsed_ms: Option<f64>) -> f64 {
        match self.decay {
            DecayMode::PerTick => self.damping,
            DecayMode::TimeBased { frame_ms } => match elapsed_ms {
                Some(dt) if dt > 0.0 && frame_ms > 0.0 => self.damping.powf(dt / frame_ms),
                _ => self.damping,
            },
        }
    }

    /// Advance the glide by one tick.
    ///
    /// Returns the displacement to add to the camera (the velocity before
    /// damping) and decays `velocity` in place, snapping it to zero once both
    /// components drop under the stop threshold.
    pub fn step(&self, velocity: &mut Vector2, elapsed_ms: Option<f64>) -> Vector2 {
        if velocity.is_zero() {
            return Vector2::ZERO;
        }

        let displacement = *velocity;
        *velocity *= self.factor(elapsed_ms);

        if velocity.x.abs() < self.stop_threshold && velocity.y.abs() < self.stop_threshold {
            log::debug!("release glide finished");
            velocity.zero();
        }
        displacement
    }

    /// Upper bound on the ticks a per-tick glide needs to stop. A glide that
    /// is already below the threshold still takes the one tick that zeroes it.
    pub fn max_ticks(&self, velocity: Vector2) -> u32 {
        if velocity.is_zero() {
            return 0;
        }
        let peak = velocity.x.abs().max(velocity.y.abs());
        if peak < self.stop_threshold || self.damping <= 0.0 || self.damping >= 1.0 {
            return 1;
        }
        (((self.stop_threshold / peak).ln() / self.damping.ln()).ceil() as u32).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_step_moves_by_full_velocity() {
        let engine = InertiaEngine::default();
        let mut v = Vector2::new(10.0, -5.0);
        let moved = engine.step(&mut v, None);
        assert_eq!(moved, Vector2::new(10.0, -5.0));
        assert!((v.x - 9.0).abs() < 1e-12);
        assert!((v.y + 4.5).abs() < 1e-12);
    }

    #[test]
    fn glide_reaches_exact_zero_within_bound() {
        let engine = InertiaEngine::default();
        for start in [Vector2::new(50.0, 0.0), Vector2::new(-3.0, 7.5), Vector2::new(0.2, 0.0)] {
            let bound = engine.max_ticks(start);
            let mut v = start;
            let mut ticks = 0;
            while !v.is_zero() {
                engine.step(&mut v, None);
                ticks += 1;
                assert!(ticks <= bound, "{start:?} took more than {bound} ticks");
            }
            assert_eq!(v, Vector2::ZERO);
        }
    }

    #[test]
    fn fifty_pixel_flick_stops_after_59_ticks() {
        let engine = InertiaEngine::default();
        assert_eq!(engine.max_ticks(Vector2::new(-50.0, 0.0)), 59);
    }

    #[test]
    fn total_distance_is_bounded_by_ten_times_velocity() {
        let engine = InertiaEngine::default();
        let mut v = Vector2::new(30.0, 40.0);
        let mut travelled = Vector2::ZERO;
        while !v.is_zero() {
            travelled += engine.step(&mut v, None);
        }
        assert!(travelled.magnitude() <= 10.0 * 50.0);
    }

    #[test]
    fn time_based_decay_scales_with_elapsed_time() {
        let engine = InertiaEngine::new(0.9, 0.1, DecayMode::TimeBased { frame_ms: 16.0 });
        assert!((engine.factor(Some(16.0)) - 0.9).abs() < 1e-12);
        assert!((engine.factor(Some(32.0)) - 0.81).abs() < 1e-12);
        assert!((engine.factor(None) - 0.9).abs() < 1e-12);
    }

    #[test]
    fn zero_velocity_is_inert() {
        let engine = InertiaEngine::default();
        let mut v = Vector2::ZERO;
        assert_eq!(engine.step(&mut v, None), Vector2::ZERO);
    }
}
