//! Event normalization.
//!
//! Reconciles the three browser input models into one canonical touch set:
//!
//! | Source | Touch set produced |
//! |--------|--------------------|
//! | Mouse, pointer (mouse/pen) | one synthetic touch with id `0` |
//! | Native touch | the event's list of active fingers |
//! | Pointer (touch) | accumulated per pointer id across events |
//!
//! Wheel events bypass the touch set entirely and become a signed zoom delta.

use crate::input::{PointerKind, RawEvent, RawPhase, WheelInput};
use tp_core::touch::{TouchPoint, TouchSet};

/// Scale applied to the legacy `wheelDeltaY` / `wheelDelta` magnitudes.
pub const DEFAULT_WHEEL_SCALE: f64 = 0.05;

/// Canonical phase of a gesture event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    Start,
    Move,
    End,
}

/// One press/move/release event in canonical form.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureInput {
    pub phase: GesturePhase,
    /// Active touches after the event was applied.
    pub touches: TouchSet,
    pub timestamp: f64,
    /// For `End`: nothing is pressed any more (mouse-up, last finger lifted).
    pub released: bool,
}

/// Result of normalizing one raw event.
#[derive(Debug, Clone, PartialEq)]
pub enum Normalized {
    Gesture(GestureInput),
    /// Signed zoom delta; positive zooms in.
    Wheel(f64),
    /// Nothing to do (unknown pointer id, touch disabled, ...).
    Ignored,
}

/// Turns raw events into [`Normalized`] values.
///
/// Keeps the touch list for unified pointer events, which report one finger
/// per event. It never sees gesture state.
#[derive(Debug, Clone)]
pub struct EventNormalizer {
    pointer_touches: TouchSet,
    wheel_scale: f64,
    multitouch: bool,
}

impl Default for EventNormalizer {
    fn default() -> Self {
        Self::new(DEFAULT_WHEEL_SCALE, true)
    }
}

impl EventNormalizer {
    pub fn new(wheel_scale: f64, multitouch: bool) -> Self {
        Self {
            pointer_touches: TouchSet::new(),
            wheel_scale,
            multitouch,
        }
    }

    /// Touches currently held through pointer events.
    pub fn pointer_touches(&self) -> &TouchSet {
        &self.pointer_touches
    }

    pub fn normalize(&mut self, event: &RawEvent) -> Normalized {
        match event {
            RawEvent::Mouse {
                phase,
                x,
                y,
                timestamp,
            } => Self::single_contact(*phase, *x, *y, *timestamp),
            RawEvent::Touch {
                phase,
                touches,
                timestamp,
            } => {
                if !self.multitouch {
                    log::trace!("native touch ignored: multitouch disabled");
                    return Normalized::Ignored;
                }
                Self::touch_list(*phase, touches, *timestamp)
            }
            RawEvent::Pointer {
                phase,
                pointer_id,
                pointer_kind,
                x,
                y,
                timestamp,
            } => match pointer_kind {
                PointerKind::Touch => {
                    let point = TouchPoint::new(*pointer_id, *x, *y);
                    self.accumulate(*phase, point, *timestamp)
                }
                PointerKind::Mouse | PointerKind::Pen => {
                    Self::single_contact(*phase, *x, *y, *timestamp)
                }
            },
            RawEvent::Wheel(wheel) => Normalized::Wheel(self.wheel_delta(wheel)),
        }
    }

    /// Collapse the wheel delta shapes into one signed value.
    ///
    /// Fields are checked in order; a zero counts as absent.
    pub fn wheel_delta(&self, wheel: &WheelInput) -> f64 {
        let present = |v: Option<f64>| v.filter(|d| *d != 0.0 && d.is_finite());

        if let Some(d) = present(wheel.wheel_delta_y) {
            d * self.wheel_scale
        } else if let Some(d) = present(wheel.wheel_delta) {
            d * self.wheel_scale
        } else if let Some(d) = present(wheel.delta_y) {
            -d
        } else if let Some(d) = present(wheel.detail) {
            d
        } else {
            0.0
        }
    }

    fn single_contact(phase: RawPhase, x: f64, y: f64, timestamp: f64) -> Normalized {
        let (phase, touches) = match phase {
            RawPhase::Down => (GesturePhase::Start, TouchSet::single(TouchPoint::mouse(x, y))),
            RawPhase::Move => (GesturePhase::Move, TouchSet::single(TouchPoint::mouse(x, y))),
            RawPhase::Up | RawPhase::Cancel => (GesturePhase::End, TouchSet::new()),
        };
        Normalized::Gesture(GestureInput {
            released: phase == GesturePhase::End,
            phase,
            touches,
            timestamp,
        })
    }

    fn touch_list(phase: RawPhase, touches: &TouchSet, timestamp: f64) -> Normalized {
        let phase = match phase {
            RawPhase::Down => GesturePhase::Start,
            RawPhase::Move => GesturePhase::Move,
            RawPhase::Up | RawPhase::Cancel => GesturePhase::End,
        };
        Normalized::Gesture(GestureInput {
            released: phase == GesturePhase::End && touches.is_empty(),
            phase,
            touches: touches.clone(),
            timestamp,
        })
    }

    fn accumulate(&mut self, phase: RawPhase, point: TouchPoint, timestamp: f64) -> Normalized {
        let phase = match phase {
            RawPhase::Down => {
                self.pointer_touches.upsert(point);
                GesturePhase::Start
            }
            RawPhase::Move => {
                if !self.pointer_touches.update(point) {
                    log::trace!("move for unknown pointer {} ignored", point.id);
                    return Normalized::Ignored;
                }
                GesturePhase::Move
            }
            RawPhase::Up | RawPhase::Cancel => {
                if self.pointer_touches.remove(point.id).is_none() {
                    log::trace!("release for unknown pointer {} ignored", point.id);
                    return Normalized::Ignored;
                }
                GesturePhase::End
            }
        };
        Normalized::Gesture(GestureInput {
            released: phase == GesturePhase::End && self.pointer_touches.is_empty(),
            phase,
            touches: self.pointer_touches.clone(),
            timestamp,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn gesture(normalized: Normalized) -> GestureInput {
        match normalized {
            Normalized::Gesture(input) => input,
            other => panic!("expected gesture, got {other:?}"),
        }
    }

    #[test]
    fn mouse_becomes_single_touch_with_id_zero() {
        let mut n = EventNormalizer::default();
        let input = gesture(n.normalize(&RawEvent::mouse(RawPhase::Down, 4.0, 8.0, 1.0)));
        assert_eq!(input.phase, GesturePhase::Start);
        assert_eq!(input.touches, TouchSet::single(TouchPoint::new(0, 4.0, 8.0)));

        let up = gesture(n.normalize(&RawEvent::mouse(RawPhase::Up, 4.0, 8.0, 2.0)));
        assert_eq!(up.phase, GesturePhase::End);
        assert!(up.released);
        assert!(up.touches.is_empty());
    }

    #[test]
    fn pen_pointer_behaves_like_mouse() {
        let mut n = EventNormalizer::default();
        let input = gesture(n.normalize(&RawEvent::pointer(
            RawPhase::Down,
            17,
            PointerKind::Pen,
            3.0,
            3.0,
            0.0,
        )));
        assert_eq!(input.touches, TouchSet::single(TouchPoint::mouse(3.0, 3.0)));
        assert!(n.pointer_touches().is_empty());
    }

    #[test]
    fn pointer_touches_accumulate_by_id() {
        let mut n = EventNormalizer::default();
        n.normalize(&RawEvent::pointer(RawPhase::Down, 1, PointerKind::Touch, 0.0, 0.0, 0.0));
        let second = gesture(n.normalize(&RawEvent::pointer(
            RawPhase::Down,
            2,
            PointerKind::Touch,
            10.0,
            0.0,
            1.0,
        )));
        assert_eq!(second.touches.len(), 2);

        let moved = gesture(n.normalize(&RawEvent::pointer(
            RawPhase::Move,
            1,
            PointerKind::Touch,
            4.0,
            4.0,
            2.0,
        )));
        assert_eq!(moved.touches.get(1), Some(&TouchPoint::new(1, 4.0, 4.0)));
        assert_eq!(moved.touches.len(), 2);

        let lifted = gesture(n.normalize(&RawEvent::pointer(
            RawPhase::Up,
            2,
            PointerKind::Touch,
            10.0,
            0.0,
            3.0,
        )));
        assert_eq!(lifted.phase, GesturePhase::End);
        assert!(!lifted.released);
        assert_eq!(lifted.touches.len(), 1);

        let last = gesture(n.normalize(&RawEvent::pointer(
            RawPhase::Cancel,
            1,
            PointerKind::Touch,
            4.0,
            4.0,
            4.0,
        )));
        assert!(last.released);
    }

    #[test]
    fn unknown_pointer_move_is_ignored() {
        let mut n = EventNormalizer::default();
        let result = n.normalize(&RawEvent::pointer(
            RawPhase::Move,
            9,
            PointerKind::Touch,
            0.0,
            0.0,
            0.0,
        ));
        assert_eq!(result, Normalized::Ignored);
    }

    #[test]
    fn touchend_with_fingers_left_is_not_a_release() {
        let mut n = EventNormalizer::default();
        let remaining = TouchSet::single(TouchPoint::new(5, 1.0, 1.0));
        let input = gesture(n.normalize(&RawEvent::touch(RawPhase::Up, remaining, 0.0)));
        assert_eq!(input.phase, GesturePhase::End);
        assert!(!input.released);
    }

    #[test]
    fn native_touch_ignored_without_multitouch() {
        let mut n = EventNormalizer::new(DEFAULT_WHEEL_SCALE, false);
        let touches = TouchSet::single(TouchPoint::new(5, 1.0, 1.0));
        assert_eq!(
            n.normalize(&RawEvent::touch(RawPhase::Down, touches, 0.0)),
            Normalized::Ignored
        );
    }

    #[test]
    fn wheel_shapes_are_normalized_in_order() {
        let n = EventNormalizer::default();
        let legacy_y = WheelInput {
            wheel_delta_y: Some(120.0),
            wheel_delta: Some(-999.0),
            ..WheelInput::default()
        };
        assert!((n.wheel_delta(&legacy_y) - 6.0).abs() < 1e-12);

        let legacy = WheelInput {
            wheel_delta: Some(-120.0),
            ..WheelInput::default()
        };
        assert!((n.wheel_delta(&legacy) + 6.0).abs() < 1e-12);

        let pixels = WheelInput {
            wheel_delta_y: Some(0.0),
            delta_y: Some(53.0),
            ..WheelInput::default()
        };
        assert_eq!(n.wheel_delta(&pixels), -53.0);

        let detail = WheelInput {
            detail: Some(3.0),
            ..WheelInput::default()
        };
        assert_eq!(n.wheel_delta(&detail), 3.0);

        assert_eq!(n.wheel_delta(&WheelInput::default()), 0.0);
    }
}
