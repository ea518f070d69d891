//! Gesture state machine.
//!
//! Two states, `Idle` and `Pressing`, cycling forever. Each transition takes
//! a canonical [`GestureInput`] plus the camera position and returns a
//! [`GestureOutput`] describing what to write back to the camera; the
//! machine itself never touches the camera.
//!
//! ## Coordinates
//!
//! The camera's Y axis points the other way from client coordinates. The
//! pan offset is stored in client space (`pan = centroid + (cam.x, -cam.y)`)
//! and the camera is recovered as `(pan.x - centroid.x, centroid.y - pan.y)`,
//! so the flip never leaks into stored state.
//!
//! ## Continuity
//!
//! Whenever the number of active touches changes, the centroid jumps. The
//! same jump is added to the pan offset and to the previous centroid, so the
//! camera stays put and the release velocity is unaffected.

use crate::normalize::{GestureInput, GesturePhase};
use tp_core::pinch::PinchZoomDetector;
use tp_core::touch::TouchSet;
use tp_core::vector::Vector2;

/// Maximum gap between the last move and the release for a glide to start.
/// About one frame at 30 fps.
pub const DEFAULT_RELEASE_WINDOW_MS: f64 = 35.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Idle,
    Pressing,
}

/// Interaction state owned by one controller.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GestureState {
    pub mode: Mode,
    pub touch_count: usize,
    /// Mean of the active touches.
    pub press_centroid: Vector2,
    /// Centroid one move earlier, adjusted for touch-count changes.
    pub previous_press_centroid: Vector2,
    /// Reference point: camera = pan offset - centroid (Y flipped).
    pub pan_offset: Vector2,
    /// Glide velocity, non-zero only while idle.
    pub release_velocity: Vector2,
    /// Timestamp of the last move, in milliseconds.
    pub last_event_timestamp: Option<f64>,
    pub pinch: PinchZoomDetector,
}

impl GestureState {
    pub fn is_pressing(&self) -> bool {
        self.mode == Mode::Pressing
    }

    pub fn pinch_accum_distance(&self) -> f64 {
        self.pinch.accum_distance()
    }

    /// Camera position implied by the pan offset and current centroid.
    pub fn camera_position(&self) -> Vector2 {
        Vector2::new(
            self.pan_offset.x - self.press_centroid.x,
            self.press_centroid.y - self.pan_offset.y,
        )
    }
}

/// What a transition asks the controller to apply.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GestureOutput {
    /// New camera x/y.
    pub camera: Option<Vector2>,
    /// Pinch spread change to feed into the zoom (positive zooms in).
    pub zoom_delta: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct GestureStateMachine {
    state: GestureState,
    release_window_ms: f64,
}

impl Default for GestureStateMachine {
    fn default() -> Self {
        Self::new(DEFAULT_RELEASE_WINDOW_MS)
    }
}

impl GestureStateMachine {
    pub fn new(release_window_ms: f64) -> Self {
        Self {
            state: GestureState::default(),
            release_window_ms,
        }
    }

    pub fn state(&self) -> &GestureState {
        &self.state
    }

    /// The glide velocity, for the inertia engine to decay.
    pub fn release_velocity_mut(&mut self) -> &mut Vector2 {
        &mut self.state.release_velocity
    }

    /// Whether a release glide is in progress.
    pub fn is_gliding(&self) -> bool {
        !self.state.is_pressing() && !self.state.release_velocity.is_zero()
    }

    /// Apply one canonical event. `camera` is the camera's current x/y.
    pub fn handle(&mut self, input: &GestureInput, camera: Vector2) -> GestureOutput {
        match (self.state.mode, input.phase) {
            (Mode::Idle, GesturePhase::Start) => {
                self.begin(&input.touches, camera);
                GestureOutput::default()
            }
            (Mode::Pressing, GesturePhase::Start) => {
                self.absorb_count_change(&input.touches);
                GestureOutput::default()
            }
            (Mode::Pressing, GesturePhase::Move) => self.track(input),
            (Mode::Pressing, GesturePhase::End) => {
                if input.released {
                    self.release(input.timestamp);
                } else {
                    self.absorb_count_change(&input.touches);
                }
                GestureOutput::default()
            }
            (Mode::Idle, GesturePhase::Move | GesturePhase::End) => GestureOutput::default(),
        }
    }

    /// Idle → Pressing. Cancels any glide in progress.
    fn begin(&mut self, touches: &TouchSet, camera: Vector2) {
        if touches.is_empty() {
            log::trace!("press start without touches ignored");
            return;
        }
        let s = &mut self.state;
        s.mode = Mode::Pressing;
        s.touch_count = touches.len();
        s.press_centroid = touches.centroid();
        s.pan_offset = s.press_centroid + camera.flip_y();
        s.previous_press_centroid = s.press_centroid;
        s.release_velocity.zero();
        s.pinch.reset();
        log::debug!(
            "press start: {} touch(es) at ({:.1}, {:.1})",
            s.touch_count,
            s.press_centroid.x,
            s.press_centroid.y
        );
    }

    /// Adopt a touch set of a different size without moving the camera.
    fn absorb_count_change(&mut self, touches: &TouchSet) {
        if touches.is_empty() {
            return;
        }
        let s = &mut self.state;
        let centroid = touches.centroid();
        let diff = centroid - s.press_centroid;
        s.pan_offset += diff;
        s.previous_press_centroid += diff;
        s.press_centroid = centroid;
        s.touch_count = touches.len();
        log::trace!("touch count now {}", s.touch_count);
    }

    fn track(&mut self, input: &GestureInput) -> GestureOutput {
        let touches = &input.touches;
        if touches.is_empty() {
            return GestureOutput::default();
        }

        self.state.previous_press_centroid = self.state.press_centroid;
        if touches.len() != self.state.touch_count {
            self.absorb_count_change(touches);
        } else {
            self.state.press_centroid = touches.centroid();
        }

        let s = &mut self.state;
        let zoom_delta = if s.touch_count >= 2 {
            s.pinch.update(touches, s.press_centroid)
        } else {
            s.pinch.reset();
            None
        };
        s.last_event_timestamp = Some(input.timestamp);

        GestureOutput {
            camera: Some(s.camera_position()),
            zoom_delta,
        }
    }

    /// Pressing → Idle, starting a glide if the last move was recent.
    fn release(&mut self, timestamp: f64) {
        let window = self.release_window_ms;
        let s = &mut self.state;
        s.mode = Mode::Idle;
        s.touch_count = 0;
        s.pinch.reset();

        let recent = s
            .last_event_timestamp
            .is_some_and(|last| timestamp - last < window);
        if recent {
            s.release_velocity = (s.previous_press_centroid - s.press_centroid).flip_y();
        } else {
            s.release_velocity.zero();
        }
        log::debug!(
            "release: velocity ({:.2}, {:.2})",
            s.release_velocity.x,
            s.release_velocity.y
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tp_core::touch::TouchPoint;

    fn input(phase: GesturePhase, points: &[(i64, f64, f64)], timestamp: f64) -> GestureInput {
        let touches: TouchSet = points
            .iter()
            .map(|&(id, x, y)| TouchPoint::new(id, x, y))
            .collect();
        GestureInput {
            phase,
            released: phase == GesturePhase::End && touches.is_empty(),
            touches,
            timestamp,
        }
    }

    #[test]
    fn press_start_records_centroid_and_pan() {
        let mut m = GestureStateMachine::default();
        m.handle(
            &input(GesturePhase::Start, &[(1, 100.0, 100.0), (2, 200.0, 100.0)], 0.0),
            Vector2::new(10.0, 20.0),
        );
        let s = m.state();
        assert_eq!(s.mode, Mode::Pressing);
        assert_eq!(s.touch_count, 2);
        assert_eq!(s.press_centroid, Vector2::new(150.0, 100.0));
        assert_eq!(s.previous_press_centroid, Vector2::new(150.0, 100.0));
        assert_eq!(s.pan_offset, Vector2::new(160.0, 80.0));
        // The stored pan reproduces the camera it was built from.
        assert_eq!(s.camera_position(), Vector2::new(10.0, 20.0));
    }

    #[test]
    fn move_pans_camera_against_the_finger() {
        let mut m = GestureStateMachine::default();
        m.handle(&input(GesturePhase::Start, &[(0, 0.0, 0.0)], 0.0), Vector2::ZERO);
        let out = m.handle(&input(GesturePhase::Move, &[(0, 30.0, 40.0)], 5.0), Vector2::ZERO);
        assert_eq!(out.camera, Some(Vector2::new(-30.0, 40.0)));
        assert_eq!(out.zoom_delta, None);
        assert_eq!(m.state().last_event_timestamp, Some(5.0));
    }

    #[test]
    fn new_press_cancels_glide() {
        let mut m = GestureStateMachine::default();
        m.handle(&input(GesturePhase::Start, &[(0, 0.0, 0.0)], 0.0), Vector2::ZERO);
        m.handle(&input(GesturePhase::Move, &[(0, 20.0, 0.0)], 10.0), Vector2::ZERO);
        m.handle(&input(GesturePhase::End, &[], 12.0), Vector2::ZERO);
        assert!(m.is_gliding());

        m.handle(&input(GesturePhase::Start, &[(0, 5.0, 5.0)], 20.0), Vector2::ZERO);
        assert_eq!(m.state().release_velocity, Vector2::ZERO);
        assert!(!m.is_gliding());
    }

    #[test]
    fn slow_release_does_not_glide() {
        let mut m = GestureStateMachine::default();
        m.handle(&input(GesturePhase::Start, &[(0, 0.0, 0.0)], 0.0), Vector2::ZERO);
        m.handle(&input(GesturePhase::Move, &[(0, 80.0, 10.0)], 10.0), Vector2::ZERO);
        m.handle(&input(GesturePhase::End, &[], 45.0), Vector2::ZERO);
        assert_eq!(m.state().mode, Mode::Idle);
        assert_eq!(m.state().release_velocity, Vector2::ZERO);
    }

    #[test]
    fn fast_release_velocity_flips_y() {
        let mut m = GestureStateMachine::default();
        m.handle(&input(GesturePhase::Start, &[(0, 0.0, 0.0)], 0.0), Vector2::ZERO);
        m.handle(&input(GesturePhase::Move, &[(0, 10.0, 10.0)], 10.0), Vector2::ZERO);
        m.handle(&input(GesturePhase::Move, &[(0, 14.0, 13.0)], 20.0), Vector2::ZERO);
        m.handle(&input(GesturePhase::End, &[], 30.0), Vector2::ZERO);
        assert_eq!(m.state().release_velocity, Vector2::new(-4.0, 3.0));
    }

    #[test]
    fn finger_added_mid_pan_keeps_camera() {
        let mut m = GestureStateMachine::default();
        m.handle(&input(GesturePhase::Start, &[(1, 100.0, 100.0)], 0.0), Vector2::ZERO);
        let before = m
            .handle(&input(GesturePhase::Move, &[(1, 110.0, 100.0)], 5.0), Vector2::ZERO)
            .camera
            .unwrap();

        m.handle(
            &input(GesturePhase::Start, &[(1, 110.0, 100.0), (2, 210.0, 300.0)], 8.0),
            before,
        );
        assert_eq!(m.state().touch_count, 2);
        assert_eq!(m.state().camera_position(), before);

        let after = m
            .handle(
                &input(GesturePhase::Move, &[(1, 110.0, 100.0), (2, 210.0, 300.0)], 10.0),
                before,
            )
            .camera
            .unwrap();
        assert_eq!(after, before);
    }

    #[test]
    fn count_change_seen_only_on_move_is_absorbed() {
        let mut m = GestureStateMachine::default();
        m.handle(&input(GesturePhase::Start, &[(1, 0.0, 0.0)], 0.0), Vector2::ZERO);
        let out = m.handle(
            &input(GesturePhase::Move, &[(1, 0.0, 0.0), (2, 100.0, 50.0)], 5.0),
            Vector2::ZERO,
        );
        assert_eq!(out.camera, Some(Vector2::ZERO));
        assert_eq!(m.state().touch_count, 2);
        assert_eq!(m.state().previous_press_centroid, m.state().press_centroid);
    }

    #[test]
    fn partial_lift_stays_pressing() {
        let mut m = GestureStateMachine::default();
        m.handle(
            &input(GesturePhase::Start, &[(1, 0.0, 0.0), (2, 100.0, 0.0)], 0.0),
            Vector2::ZERO,
        );
        let lift = GestureInput {
            phase: GesturePhase::End,
            touches: TouchSet::single(TouchPoint::new(2, 100.0, 0.0)),
            timestamp: 4.0,
            released: false,
        };
        m.handle(&lift, Vector2::ZERO);
        assert_eq!(m.state().mode, Mode::Pressing);
        assert_eq!(m.state().touch_count, 1);
        assert_eq!(m.state().camera_position(), Vector2::ZERO);
    }

    #[test]
    fn idle_moves_are_ignored() {
        let mut m = GestureStateMachine::default();
        let out = m.handle(&input(GesturePhase::Move, &[(0, 5.0, 5.0)], 0.0), Vector2::ZERO);
        assert_eq!(out, GestureOutput::default());
        assert_eq!(m.state(), &GestureState::default());
    }
}
