//! The camera collaborator.
//!
//! The engine only needs to read and write a pose. Adapters that also render
//! (a DOM element, a scene camera) declare it through
//! [`CameraAdapter::drives_view`] and get [`CameraAdapter::update`] called
//! once per tick.

use serde::{Deserialize, Serialize};
use tp_core::vector::Vector2;

/// Camera position plus its zoom value (a distance or an angle, depending on
/// the controller's `ZoomMode`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    pub x: f64,
    pub y: f64,
    pub zoom: f64,
}

impl CameraPose {
    pub const fn new(x: f64, y: f64, zoom: f64) -> Self {
        Self { x, y, zoom }
    }

    pub fn position(&self) -> Vector2 {
        Vector2::new(self.x, self.y)
    }

    pub fn with_position(self, position: Vector2) -> Self {
        Self {
            x: position.x,
            y: position.y,
            ..self
        }
    }
}

/// Capability interface for whatever the controller steers.
pub trait CameraAdapter {
    fn pose(&self) -> CameraPose;

    fn set_pose(&mut self, pose: CameraPose);

    /// Whether this adapter applies the pose to visuals itself and wants
    /// [`update`](Self::update) called every tick. Checked once, when the
    /// controller is built.
    fn drives_view(&self) -> bool {
        false
    }

    fn update(&mut self) {}
}

/// A bare pose for hosts that read the numbers and render on their own.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlainCamera {
    pub pose: CameraPose,
}

impl PlainCamera {
    pub fn new(x: f64, y: f64, zoom: f64) -> Self {
        Self {
            pose: CameraPose::new(x, y, zoom),
        }
    }
}

impl CameraAdapter for PlainCamera {
    fn pose(&self) -> CameraPose {
        self.pose
    }

    fn set_pose(&mut self, pose: CameraPose) {
        self.pose = pose;
    }
}

impl<C: CameraAdapter + ?Sized> CameraAdapter for Box<C> {
    fn pose(&self) -> CameraPose {
        (**self).pose()
    }

    fn set_pose(&mut self, pose: CameraPose) {
        (**self).set_pose(pose);
    }

    fn drives_view(&self) -> bool {
        (**self).drives_view()
    }

    fn update(&mut self) {
        (**self).update();
    }
}
