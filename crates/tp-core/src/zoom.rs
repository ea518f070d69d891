//! Zoom level bookkeeping.
//!
//! The zoom value is either a camera distance (larger = farther away) or a
//! field-of-view angle, picked once at construction. Both wheel and pinch
//! input go through the same clamped update.

use serde::{Deserialize, Serialize};

/// Lowest distance a distance-mode camera may reach.
pub const DISTANCE_FLOOR: f64 = 200.0;

/// Narrowest angle a field-of-view camera may reach.
pub const FOV_FLOOR: f64 = 0.1;

/// What the zoom value of the camera represents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoomMode {
    /// Camera `z` distance.
    #[default]
    Distance,
    /// Camera field-of-view angle.
    FieldOfView,
}

impl ZoomMode {
    pub fn default_floor(self) -> f64 {
        match self {
            ZoomMode::Distance => DISTANCE_FLOOR,
            ZoomMode::FieldOfView => FOV_FLOOR,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomState {
    pub mode: ZoomMode,
    pub value: f64,
    pub min: f64,
    /// Upper clamp. Infinite unless configured, so zooming out is unbounded.
    pub max: f64,
    /// Value at construction (after clamping); the reference for pan speed
    /// compensation.
    pub reference: f64,
}

impl ZoomState {
    /// Start at `initial` with the mode's default floor and no ceiling.
    pub fn new(mode: ZoomMode, initial: f64) -> Self {
        Self::with_bounds(mode, initial, mode.default_floor(), f64::INFINITY)
    }

    pub fn with_bounds(mode: ZoomMode, initial: f64, min: f64, max: f64) -> Self {
        let mut state = Self {
            mode,
            value: initial,
            min,
            max: max.max(min),
            reference: initial,
        };
        state.value = state.clamp(initial);
        state.reference = state.value;
        state
    }

    fn clamp(&self, value: f64) -> f64 {
        value.max(self.min).min(self.max)
    }

    /// Apply a zoom delta. Positive deltas zoom in (the value shrinks).
    /// Returns the new value.
    pub fn apply_delta(&mut self, delta: f64) -> f64 {
        if !delta.is_finite() {
            log::trace!("ignoring non-finite zoom delta {delta}");
            return self.value;
        }
        self.value = self.clamp(self.value - delta);
        self.value
    }

    /// Overwrite the value, still honouring the bounds.
    pub fn set(&mut self, value: f64) -> f64 {
        if value.is_finite() {
            self.value = self.clamp(value);
        }
        self.value
    }

    /// `reference / value`: how far the view is zoomed relative to where it
    /// started. Returns 1 when the value is zero.
    pub fn ratio(&self) -> f64 {
        if self.value == 0.0 {
            return 1.0;
        }
        self.reference / self.value
    }
}
