//! WASM bridge for TouchPan — pan and pinch-zoom for plain DOM pages.
//!
//! Compiled via `wasm-pack build --target web`. A page hands over two
//! elements (a camera wrapper and the content inside it), then either calls
//! `attach_listeners()` or forwards events itself, and calls `tick()` from
//! its `requestAnimationFrame` loop.

mod console_log;
mod dom_camera;
mod events;
mod listeners;

use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;
use tp_gesture::{CameraAdapter, Controller, ControllerConfig, PointerKind, RawEvent, RawPhase};
use wasm_bindgen::prelude::*;
use web_sys::{Event, HtmlElement};

pub use dom_camera::{DEFAULT_INITIAL_ZOOM, DomCamera};

use listeners::{Listeners, SharedController};

/// The JS-facing controller.
///
/// Wraps a [`Controller`] over a [`DomCamera`]. The controller is shared with
/// the DOM listeners, so every method borrows it for the duration of the
/// call only.
#[wasm_bindgen]
pub struct TouchPanController {
    inner: SharedController,
    listeners: Option<Listeners>,
}

#[wasm_bindgen]
impl TouchPanController {
    /// Create a controller. `config_json` is a partial `ControllerConfig`;
    /// missing fields take their defaults. Missing elements leave the
    /// controller disabled rather than failing.
    #[wasm_bindgen(constructor)]
    pub fn new(
        camera: Option<HtmlElement>,
        content: Option<HtmlElement>,
        config_json: Option<String>,
        initial_zoom: Option<f64>,
    ) -> Result<TouchPanController, JsValue> {
        console_error_panic_hook_setup();

        let config = match config_json.as_deref() {
            Some(json) => ControllerConfig::from_json(json).map_err(|e| JsValue::from_str(&e))?,
            None => ControllerConfig::default(),
        };
        let camera = match (camera, content) {
            (Some(camera), Some(content)) => Some(DomCamera::new(camera, content, initial_zoom)),
            _ => None,
        };

        Ok(Self {
            inner: Rc::new(RefCell::new(Controller::new(camera, config))),
            listeners: None,
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.inner.borrow().is_enabled()
    }

    pub fn is_gliding(&self) -> bool {
        self.inner.borrow().is_gliding()
    }

    /// Forward any supported DOM event (mouse, touch, pointer, wheel).
    /// Returns `true` if the camera changed.
    pub fn handle_event(&self, event: &Event) -> bool {
        match events::raw_event(event) {
            Some(raw) => self.dispatch(&raw),
            None => false,
        }
    }

    /// Forward a mouse event by hand. `kind` is a DOM type (`"mousedown"`)
    /// or a bare phase (`"down"`, `"move"`, `"up"`).
    pub fn handle_mouse(&self, kind: &str, x: f64, y: f64, timestamp: f64) -> bool {
        match RawPhase::from_dom(kind) {
            Some(phase) => self.dispatch(&RawEvent::mouse(phase, x, y, timestamp)),
            None => false,
        }
    }

    /// Forward a pointer event by hand.
    pub fn handle_pointer(
        &self,
        kind: &str,
        pointer_id: i32,
        pointer_type: &str,
        x: f64,
        y: f64,
        timestamp: f64,
    ) -> bool {
        match RawPhase::from_dom(kind) {
            Some(phase) => self.dispatch(&RawEvent::pointer(
                phase,
                i64::from(pointer_id),
                PointerKind::from_dom(pointer_type),
                x,
                y,
                timestamp,
            )),
            None => false,
        }
    }

    /// Forward a standard pixel wheel delta.
    pub fn handle_wheel(&self, delta_y: f64) -> bool {
        self.dispatch(&RawEvent::wheel_pixels(delta_y))
    }

    /// Per-frame update; call once per animation frame.
    pub fn tick(&self) {
        self.inner.borrow_mut().tick();
    }

    /// Per-frame update with the elapsed frame time, for time-based decay.
    pub fn tick_elapsed(&self, elapsed_ms: f64) {
        self.inner.borrow_mut().tick_elapsed(elapsed_ms);
    }

    pub fn set_zoom(&self, value: f64) {
        self.inner.borrow_mut().set_zoom(value);
    }

    /// Listen for input on `target`, or on `document.body` when omitted.
    /// Replaces any listeners attached earlier.
    pub fn attach_listeners(&mut self, target: Option<HtmlElement>) -> Result<(), JsValue> {
        self.listeners = None;
        if !self.is_enabled() {
            return Ok(());
        }
        let target = match target {
            Some(target) => target,
            None => web_sys::window()
                .and_then(|w| w.document())
                .and_then(|d| d.body())
                .ok_or_else(|| JsValue::from_str("no document body to listen on"))?,
        };
        self.listeners = Some(Listeners::attach(target.into(), self.inner.clone())?);
        Ok(())
    }

    pub fn detach_listeners(&mut self) {
        self.listeners = None;
    }

    /// Snapshot of pose, zoom and interaction state as JSON.
    pub fn state_json(&self) -> Result<String, JsValue> {
        let snapshot = Snapshot::of(&self.inner.borrow());
        serde_json::to_string(&snapshot).map_err(|e| JsValue::from_str(&format!("{e}")))
    }

    fn dispatch(&self, event: &RawEvent) -> bool {
        match self.inner.try_borrow_mut() {
            Ok(mut controller) => controller.handle(event),
            Err(_) => false,
        }
    }
}

/// Install the console logger at `level` (`"error"` … `"trace"`).
#[wasm_bindgen]
pub fn init_logging(level: Option<String>) {
    console_log::init(level.as_deref().unwrap_or("info"));
}

// ─── State snapshot ──────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct Snapshot {
    enabled: bool,
    x: f64,
    y: f64,
    zoom: f64,
    zoom_min: f64,
    /// `None` when unbounded.
    zoom_max: Option<f64>,
    pressing: bool,
    gliding: bool,
    touch_count: usize,
}

impl Snapshot {
    fn of<C: CameraAdapter>(controller: &Controller<C>) -> Self {
        let pose = controller.camera().map(|c| c.pose()).unwrap_or_default();
        let zoom = controller.zoom();
        let state = controller.state();
        Self {
            enabled: controller.is_enabled(),
            x: pose.x,
            y: pose.y,
            zoom: zoom.value,
            zoom_min: zoom.min,
            zoom_max: zoom.max.is_finite().then_some(zoom.max),
            pressing: state.is_pressing(),
            gliding: controller.is_gliding(),
            touch_count: state.touch_count,
        }
    }
}

// ─── Panic hook for WASM debugging ───────────────────────────────────────

fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("TouchPan WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}
