//! The pan/zoom controller.
//!
//! Owns the normalizer, the gesture state machine, the zoom state and the
//! inertia engine, and writes their results into a [`CameraAdapter`].
//!
//! - **Input** — [`Controller::handle`] takes one raw event, runs it through
//!   the normalizer and the state machine, then writes the camera.
//! - **Frame** — [`Controller::tick`] runs the release glide and the
//!   adapter's `update()`, with pan speed compensated for the zoom level.
//!
//! A controller built without a camera is disabled for good: every call is a
//! no-op. This is reported once, at construction.

use crate::camera::{CameraAdapter, CameraPose};
use crate::config::ControllerConfig;
use crate::gesture::{GestureState, GestureStateMachine};
use crate::input::RawEvent;
use crate::normalize::{EventNormalizer, Normalized};
use tp_core::inertia::InertiaEngine;
use tp_core::zoom::ZoomState;

pub struct Controller<C: CameraAdapter> {
    camera: Option<C>,
    /// Cached [`CameraAdapter::drives_view`].
    drives_view: bool,
    normalizer: EventNormalizer,
    machine: GestureStateMachine,
    zoom: ZoomState,
    inertia: InertiaEngine,
    config: ControllerConfig,
}

impl<C: CameraAdapter> Controller<C> {
    /// Build a controller around `camera`. The camera's current zoom becomes
    /// the zoom reference. An invalid config is replaced by the defaults.
    pub fn new(camera: Option<C>, config: ControllerConfig) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(e) => {
                log::warn!("{e}; using default controller config");
                ControllerConfig::default()
            }
        };

        let (drives_view, initial_zoom) = match &camera {
            Some(camera) => (camera.drives_view(), camera.pose().zoom),
            None => {
                log::error!("controller requires a camera; it will stay disabled");
                (false, config.floor())
            }
        };

        let mut controller = Self {
            camera,
            drives_view,
            normalizer: EventNormalizer::new(config.wheel_scale, config.multitouch),
            machine: GestureStateMachine::new(config.release_window_ms),
            zoom: config.zoom_state(initial_zoom),
            inertia: config.inertia(),
            config,
        };
        // The initial zoom may have been clamped into range.
        controller.write_zoom();
        controller
    }

    pub fn is_enabled(&self) -> bool {
        self.camera.is_some()
    }

    pub fn camera(&self) -> Option<&C> {
        self.camera.as_ref()
    }

    pub fn camera_mut(&mut self) -> Option<&mut C> {
        self.camera.as_mut()
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn state(&self) -> &GestureState {
        self.machine.state()
    }

    pub fn zoom(&self) -> &ZoomState {
        &self.zoom
    }

    pub fn is_gliding(&self) -> bool {
        self.machine.is_gliding()
    }

    /// Process one raw event. Returns `true` if the camera changed.
    pub fn handle(&mut self, event: &RawEvent) -> bool {
        let Some(camera) = self.camera.as_mut() else {
            return false;
        };

        match self.normalizer.normalize(event) {
            Normalized::Ignored => false,
            Normalized::Wheel(delta) => self.apply_zoom_delta(delta),
            Normalized::Gesture(input) => {
                let pose = camera.pose();
                let output = self.machine.handle(&input, pose.position());

                let mut changed = false;
                if let Some(position) = output.camera {
                    camera.set_pose(pose.with_position(position));
                    changed = true;
                }
                if let Some(delta) = output.zoom_delta {
                    changed |= self.apply_zoom_delta(delta);
                }
                changed
            }
        }
    }

    /// Per-frame update with the tick counted as one nominal frame.
    pub fn tick(&mut self) {
        self.step(None);
    }

    /// Per-frame update passing the time since the previous frame, used by
    /// time-based decay.
    pub fn tick_elapsed(&mut self, elapsed_ms: f64) {
        self.step(Some(elapsed_ms));
    }

    /// Replace the zoom value, clamped to the configured bounds.
    pub fn set_zoom(&mut self, value: f64) {
        if self.camera.is_none() {
            return;
        }
        self.zoom.set(value);
        self.write_zoom();
    }

    fn step(&mut self, elapsed_ms: Option<f64>) {
        let Some(camera) = self.camera.as_mut() else {
            return;
        };

        // Pan in screen space: scale down by the zoom ratio, act, scale back.
        let ratio = self.zoom.ratio();
        let mut position = camera.pose().position();
        position.divide(ratio);
        camera.set_pose(camera.pose().with_position(position));

        if self.drives_view {
            camera.update();
        }

        let mut position = camera.pose().position();
        if self.machine.is_gliding() {
            position += self
                .inertia
                .step(self.machine.release_velocity_mut(), elapsed_ms);
        }
        position *= ratio;
        camera.set_pose(camera.pose().with_position(position));
    }

    fn apply_zoom_delta(&mut self, delta: f64) -> bool {
        if delta == 0.0 {
            return false;
        }
        let before = self.zoom.value;
        self.zoom.apply_delta(delta);
        self.write_zoom();
        self.zoom.value != before
    }

    fn write_zoom(&mut self) {
        let value = self.zoom.value;
        if let Some(camera) = self.camera.as_mut() {
            let pose = camera.pose();
            if pose.zoom != value {
                camera.set_pose(CameraPose {
                    zoom: value,
                    ..pose
                });
            }
        }
    }
}
