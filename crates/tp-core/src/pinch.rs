//! Pinch-zoom detection from the spread of the active touches.

use crate::touch::TouchSet;
use crate::vector::Vector2;

/// Tracks the pinch spread between frames and turns its change into a zoom
/// delta.
///
/// The first frame of a pinch, and any frame where the number of touches
/// differs from the previous one, only re-seeds the accumulator so a finger
/// joining or leaving never makes the view jump.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PinchZoomDetector {
    accum_distance: f64,
    last_count: usize,
}

impl PinchZoomDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spread recorded on the previous frame (0 when no pinch is running).
    pub fn accum_distance(&self) -> f64 {
        self.accum_distance
    }

    pub fn reset(&mut self) {
        self.accum_distance = 0.0;
        self.last_count = 0;
    }

    /// Feed one frame. Returns the spread change (positive when the fingers
    /// move apart), or `None` when the accumulator was only re-seeded.
    pub fn update(&mut self, touches: &TouchSet, centroid: Vector2) -> Option<f64> {
        let total = touches.spread(centroid);
        let count = touches.len();
        let changed = count != self.last_count;
        self.last_count = count;

        if self.accum_distance == 0.0 || changed {
            log::trace!("pinch re-seeded: spread={total:.2} touches={count}");
            self.accum_distance = total;
            return None;
        }

        let delta = total - self.accum_distance;
        self.accum_distance = total;
        Some(delta)
    }
}
