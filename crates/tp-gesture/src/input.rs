//! Input abstraction layer.
//!
//! Raw events as a host delivers them: mouse, native multi-touch lists,
//! unified pointer events, and wheel. The [`EventNormalizer`] reduces all of
//! them to one canonical shape.
//!
//! Every type here is serde-friendly so recorded sessions can be replayed.
//!
//! [`EventNormalizer`]: crate::normalize::EventNormalizer

use serde::{Deserialize, Serialize};
use tp_core::touch::TouchSet;

/// Where in a press an event sits, as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RawPhase {
    /// mousedown / touchstart / pointerdown.
    Down,
    /// mousemove / touchmove / pointermove.
    Move,
    /// mouseup / touchend / pointerup.
    Up,
    /// touchcancel / pointercancel. Handled like `Up`.
    Cancel,
}

impl RawPhase {
    /// Phase of a DOM event type (`"pointerdown"`, `"touchend"`, ...), or of
    /// a bare phase name (`"down"`, `"move"`, `"up"`, `"cancel"`).
    pub fn from_dom(event_type: &str) -> Option<Self> {
        match event_type {
            "down" | "mousedown" | "pointerdown" | "touchstart" => Some(RawPhase::Down),
            "move" | "mousemove" | "pointermove" | "touchmove" => Some(RawPhase::Move),
            "up" | "mouseup" | "pointerup" | "touchend" => Some(RawPhase::Up),
            "cancel" | "pointercancel" | "touchcancel" => Some(RawPhase::Cancel),
            _ => None,
        }
    }
}

/// `pointerType` of a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerKind {
    Mouse,
    Pen,
    Touch,
}

impl PointerKind {
    /// Parse the DOM `pointerType` string. Unknown values map to `Mouse`.
    pub fn from_dom(pointer_type: &str) -> Self {
        match pointer_type {
            "touch" => PointerKind::Touch,
            "pen" => PointerKind::Pen,
            _ => PointerKind::Mouse,
        }
    }
}

/// A wheel or scroll event. Browsers report one of several delta shapes;
/// unset fields are `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WheelInput {
    /// Legacy WebKit `wheelDeltaY`.
    #[serde(default)]
    pub wheel_delta_y: Option<f64>,
    /// Legacy `wheelDelta`.
    #[serde(default)]
    pub wheel_delta: Option<f64>,
    /// Standard pixel `deltaY`.
    #[serde(default)]
    pub delta_y: Option<f64>,
    /// Legacy Firefox `detail`.
    #[serde(default)]
    pub detail: Option<f64>,
}

/// A raw input event from any pointing device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RawEvent {
    /// Mouse button press, drag or release.
    Mouse {
        phase: RawPhase,
        x: f64,
        y: f64,
        timestamp: f64,
    },

    /// Native touch event. `touches` is the list of fingers still on the
    /// surface after the event (the DOM `event.touches`).
    Touch {
        phase: RawPhase,
        touches: TouchSet,
        timestamp: f64,
    },

    /// Unified pointer event. Each finger arrives as its own event.
    Pointer {
        phase: RawPhase,
        pointer_id: i64,
        pointer_kind: PointerKind,
        x: f64,
        y: f64,
        timestamp: f64,
    },

    /// Scroll wheel.
    Wheel(WheelInput),
}

impl RawEvent {
    pub fn mouse(phase: RawPhase, x: f64, y: f64, timestamp: f64) -> Self {
        Self::Mouse {
            phase,
            x,
            y,
            timestamp,
        }
    }

    pub fn touch(phase: RawPhase, touches: TouchSet, timestamp: f64) -> Self {
        Self::Touch {
            phase,
            touches,
            timestamp,
        }
    }

    pub fn pointer(
        phase: RawPhase,
        pointer_id: i64,
        pointer_kind: PointerKind,
        x: f64,
        y: f64,
        timestamp: f64,
    ) -> Self {
        Self::Pointer {
            phase,
            pointer_id,
            pointer_kind,
            x,
            y,
            timestamp,
        }
    }

    /// A wheel event carrying only the standard pixel delta.
    pub fn wheel_pixels(delta_y: f64) -> Self {
        Self::Wheel(WheelInput {
            delta_y: Some(delta_y),
            ..WheelInput::default()
        })
    }

    /// Event time in milliseconds, if the event carries one.
    pub fn timestamp(&self) -> Option<f64> {
        match self {
            Self::Mouse { timestamp, .. }
            | Self::Touch { timestamp, .. }
            | Self::Pointer { timestamp, .. } => Some(*timestamp),
            Self::Wheel(_) => None,
        }
    }

    pub fn phase(&self) -> Option<RawPhase> {
        match self {
            Self::Mouse { phase, .. } | Self::Touch { phase, .. } | Self::Pointer { phase, .. } => {
                Some(*phase)
            }
            Self::Wheel(_) => None,
        }
    }
}
