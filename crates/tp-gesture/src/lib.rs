pub mod camera;
pub mod config;
pub mod controller;
pub mod gesture;
pub mod input;
pub mod normalize;

pub use camera::{CameraAdapter, CameraPose, PlainCamera};
pub use config::ControllerConfig;
pub use controller::Controller;
pub use gesture::{GestureOutput, GestureState, GestureStateMachine, Mode};
pub use input::{PointerKind, RawEvent, RawPhase, WheelInput};
pub use normalize::{EventNormalizer, GestureInput, GesturePhase, Normalized};

// Re-export the core types so hosts only need one dependency
pub use tp_core::{DecayMode, TouchPoint, TouchSet, Vector2, ZoomMode, ZoomState};
