pub mod inertia;
pub mod pinch;
pub mod touch;
pub mod vector;
pub mod zoom;

pub use inertia::{DecayMode, InertiaEngine};
pub use pinch::PinchZoomDetector;
pub use touch::{MOUSE_TOUCH_ID, TouchPoint, TouchSet};
pub use vector::Vector2;
pub use zoom::{ZoomMode, ZoomState};
