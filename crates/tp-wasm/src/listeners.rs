//! DOM listener wiring.
//!
//! Pointer events when the browser has them, otherwise mouse plus native
//! touch. Wheel is always listened to. Every handled event has its default
//! action suppressed so the page does not scroll or zoom underneath.

use std::cell::RefCell;
use std::rc::Rc;

use tp_gesture::Controller;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{AddEventListenerOptions, Event, EventTarget};

use crate::dom_camera::DomCamera;
use crate::events::raw_event;

const POINTER_EVENTS: &[&str] = &["pointerdown", "pointermove", "pointerup", "pointercancel"];
const MOUSE_EVENTS: &[&str] = &["mousedown", "mousemove", "mouseup"];
const TOUCH_EVENTS: &[&str] = &["touchstart", "touchmove", "touchend", "touchcancel"];
const WHEEL_EVENTS: &[&str] = &["wheel"];

pub(crate) type SharedController = Rc<RefCell<Controller<DomCamera>>>;

/// Event names to listen to for the given browser capabilities.
pub(crate) fn event_names(has_pointer_events: bool, multitouch: bool) -> Vec<&'static str> {
    let mut names = Vec::new();
    if has_pointer_events {
        names.extend_from_slice(POINTER_EVENTS);
    } else {
        names.extend_from_slice(MOUSE_EVENTS);
        if multitouch {
            names.extend_from_slice(TOUCH_EVENTS);
        }
    }
    names.extend_from_slice(WHEEL_EVENTS);
    names
}

/// Listeners attached to one target. Removed again on drop.
pub(crate) struct Listeners {
    target: EventTarget,
    handlers: Vec<(&'static str, Closure<dyn FnMut(Event)>)>,
}

impl Listeners {
    pub fn attach(target: EventTarget, controller: SharedController) -> Result<Self, JsValue> {
        let has_pointer_events = web_sys::window()
            .map(|w| js_sys::Reflect::has(&w, &JsValue::from_str("PointerEvent")).unwrap_or(false))
            .unwrap_or(false);
        let multitouch = controller.borrow().config().multitouch;

        // Non-passive, or prevent_default() is ignored for touch and wheel.
        let options = AddEventListenerOptions::new();
        options.set_passive(false);

        let mut listeners = Self {
            target,
            handlers: Vec::new(),
        };
        for name in event_names(has_pointer_events, multitouch) {
            let controller = controller.clone();
            let closure = Closure::wrap(Box::new(move |event: Event| {
                let Some(raw) = raw_event(&event) else {
                    return;
                };
                event.prevent_default();
                // A handler re-entered from inside the controller is dropped.
                match controller.try_borrow_mut() {
                    Ok(mut controller) => {
                        controller.handle(&raw);
                    }
                    Err(_) => log::debug!("controller busy, dropping {}", event.type_()),
                }
            }) as Box<dyn FnMut(_)>);

            listeners
                .target
                .add_event_listener_with_callback_and_add_event_listener_options(
                    name,
                    closure.as_ref().unchecked_ref(),
                    &options,
                )?;
            listeners.handlers.push((name, closure));
        }
        log::debug!(
            "attached {} listeners (pointer events: {has_pointer_events})",
            listeners.handlers.len()
        );
        Ok(listeners)
    }
}

impl Drop for Listeners {
    fn drop(&mut self) {
        for (name, closure) in self.handlers.drain(..) {
            if let Err(e) = self
                .target
                .remove_event_listener_with_callback(name, closure.as_ref().unchecked_ref())
            {
                log::warn!("cannot remove {name} listener: {e:?}");
            }
        }
    }
}
