//! CSS camera for plain DOM content.
//!
//! Two elements: the *camera* element is scaled to show zoom, the *content*
//! element inside it is offset with `left`/`top` to show panning.

use tp_gesture::{CameraAdapter, CameraPose};
use web_sys::{CssStyleDeclaration, HtmlElement};

/// Zoom distance that maps to a scale of 1.
pub const DEFAULT_INITIAL_ZOOM: f64 = 600.0;

pub struct DomCamera {
    camera: HtmlElement,
    content: HtmlElement,
    pose: CameraPose,
    initial_zoom: f64,
    scale: f64,
}

impl DomCamera {
    pub fn new(camera: HtmlElement, content: HtmlElement, initial_zoom: Option<f64>) -> Self {
        let initial_zoom = initial_zoom
            .filter(|z| z.is_finite() && *z > 0.0)
            .unwrap_or(DEFAULT_INITIAL_ZOOM);

        let style = camera.style();
        set_style(&style, "position", "absolute");
        set_style(&style, "width", "inherit");
        set_style(&style, "height", "inherit");
        set_style(&style, "left", "0px");
        set_style(&style, "top", "0px");

        let dom_camera = Self {
            camera,
            content,
            pose: CameraPose::new(0.0, 0.0, initial_zoom),
            initial_zoom,
            scale: 1.0,
        };
        dom_camera.apply_scale();
        dom_camera
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    fn apply_scale(&self) {
        let transform = format!("scale({s}, {s})", s = self.scale);
        let style = self.camera.style();
        set_style(&style, "transform", &transform);
        set_style(&style, "-webkit-transform", &transform);
    }
}

impl CameraAdapter for DomCamera {
    fn pose(&self) -> CameraPose {
        self.pose
    }

    fn set_pose(&mut self, pose: CameraPose) {
        self.pose = pose;
    }

    fn drives_view(&self) -> bool {
        true
    }

    fn update(&mut self) {
        let scale = scale_for(self.initial_zoom, self.pose.zoom);
        if scale != self.scale {
            self.scale = scale;
            self.apply_scale();
        }

        let style = self.content.style();
        set_style(&style, "left", &format!("{}px", -self.pose.x));
        set_style(&style, "top", &format!("{}px", self.pose.y));
    }
}

/// `initial / zoom`, or 1 when the zoom is not usable.
pub(crate) fn scale_for(initial_zoom: f64, zoom: f64) -> f64 {
    if zoom > 0.0 && zoom.is_finite() {
        initial_zoom / zoom
    } else {
        1.0
    }
}

fn set_style(style: &CssStyleDeclaration, property: &str, value: &str) {
    if let Err(e) = style.set_property(property, value) {
        log::warn!("cannot set style {property}={value}: {e:?}");
    }
}
