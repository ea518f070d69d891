//! Controller configuration.
//!
//! Every field has a default matching the stock behaviour, so a config can
//! be built from partial JSON:
//!
//! ```json
//! { "zoom_mode": "field_of_view", "decay": { "kind": "time_based", "frame_ms": 16 } }
//! ```

use crate::gesture::DEFAULT_RELEASE_WINDOW_MS;
use crate::normalize::DEFAULT_WHEEL_SCALE;
use serde::{Deserialize, Serialize};
use tp_core::inertia::{DEFAULT_DAMPING, DEFAULT_STOP_THRESHOLD, DecayMode, InertiaEngine};
use tp_core::zoom::{ZoomMode, ZoomState};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Whether the camera zoom is a distance or a field-of-view angle.
    pub zoom_mode: ZoomMode,
    /// Accept native touch events.
    pub multitouch: bool,
    /// Longest pause between the last move and the release that still
    /// starts a glide.
    pub release_window_ms: f64,
    /// Velocity multiplier applied per glide step, in `(0, 1)`.
    pub damping: f64,
    /// Speed under which the glide stops.
    pub stop_threshold: f64,
    /// Scale for legacy wheel delta magnitudes.
    pub wheel_scale: f64,
    /// Zoom floor; the mode's default when unset.
    pub zoom_floor: Option<f64>,
    /// Zoom ceiling; unbounded when unset.
    pub zoom_ceiling: Option<f64>,
    pub decay: DecayMode,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            zoom_mode: ZoomMode::Distance,
            multitouch: true,
            release_window_ms: DEFAULT_RELEASE_WINDOW_MS,
            damping: DEFAULT_DAMPING,
            stop_threshold: DEFAULT_STOP_THRESHOLD,
            wheel_scale: DEFAULT_WHEEL_SCALE,
            zoom_floor: None,
            zoom_ceiling: None,
            decay: DecayMode::PerTick,
        }
    }
}

impl ControllerConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self, String> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| format!("invalid controller config: {e}"))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string(self).map_err(|e| format!("cannot serialize config: {e}"))
    }

    /// Check that every constant is finite and in range.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.damping > 0.0 && self.damping < 1.0) {
            return Err(format!("damping must be in (0, 1), got {}", self.damping));
        }
        if !(self.stop_threshold.is_finite() && self.stop_threshold > 0.0) {
            return Err(format!(
                "stop_threshold must be positive, got {}",
                self.stop_threshold
            ));
        }
        if !(self.release_window_ms.is_finite() && self.release_window_ms >= 0.0) {
            return Err(format!(
                "release_window_ms must be non-negative, got {}",
                self.release_window_ms
            ));
        }
        if !self.wheel_scale.is_finite() {
            return Err(format!("wheel_scale must be finite, got {}", self.wheel_scale));
        }
        let floor = self.floor();
        if !(floor.is_finite() && floor > 0.0) {
            return Err(format!("zoom_floor must be positive, got {floor}"));
        }
        if let Some(ceiling) = self.zoom_ceiling
            && !(ceiling >= floor)
        {
            return Err(format!(
                "zoom_ceiling ({ceiling}) must not be below zoom_floor ({floor})"
            ));
        }
        if let DecayMode::TimeBased { frame_ms } = self.decay
            && !(frame_ms.is_finite() && frame_ms > 0.0)
        {
            return Err(format!("decay frame_ms must be positive, got {frame_ms}"));
        }
        Ok(())
    }

    pub fn floor(&self) -> f64 {
        self.zoom_floor
            .unwrap_or_else(|| self.zoom_mode.default_floor())
    }

    pub fn zoom_state(&self, initial: f64) -> ZoomState {
        ZoomState::with_bounds(
            self.zoom_mode,
            initial,
            self.floor(),
            self.zoom_ceiling.unwrap_or(f64::INFINITY),
        )
    }

    pub fn inertia(&self) -> InertiaEngine {
        InertiaEngine::new(self.damping, self.stop_threshold, self.decay)
    }
}
