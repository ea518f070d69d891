//! DOM event → `RawEvent` conversion.
//!
//! Dispatches on the event's `type` string instead of `instanceof`, since
//! some browsers have no `TouchEvent` constructor at all.

use tp_gesture::{PointerKind, RawEvent, RawPhase, TouchPoint, TouchSet, WheelInput};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Event, MouseEvent, PointerEvent, TouchEvent, TouchList, WheelEvent};

pub(crate) fn raw_event(event: &Event) -> Option<RawEvent> {
    let kind = event.type_();
    let timestamp = event.time_stamp();

    if matches!(kind.as_str(), "wheel" | "mousewheel" | "DOMMouseScroll") {
        return Some(RawEvent::Wheel(wheel_input(event.unchecked_ref())));
    }

    let phase = RawPhase::from_dom(&kind)?;
    if kind.starts_with("pointer") {
        let e: &PointerEvent = event.unchecked_ref();
        Some(RawEvent::pointer(
            phase,
            i64::from(e.pointer_id()),
            PointerKind::from_dom(&e.pointer_type()),
            f64::from(e.client_x()),
            f64::from(e.client_y()),
            timestamp,
        ))
    } else if kind.starts_with("touch") {
        let e: &TouchEvent = event.unchecked_ref();
        Some(RawEvent::touch(phase, touch_set(&e.touches()), timestamp))
    } else if kind.starts_with("mouse") {
        let e: &MouseEvent = event.unchecked_ref();
        Some(RawEvent::mouse(
            phase,
            f64::from(e.client_x()),
            f64::from(e.client_y()),
            timestamp,
        ))
    } else {
        None
    }
}

pub(crate) fn touch_set(list: &TouchList) -> TouchSet {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .map(|t| {
            TouchPoint::new(
                i64::from(t.identifier()),
                f64::from(t.client_x()),
                f64::from(t.client_y()),
            )
        })
        .collect()
}

/// Read every delta shape a wheel event may carry, including the legacy
/// non-standard properties.
pub(crate) fn wheel_input(event: &WheelEvent) -> WheelInput {
    WheelInput {
        wheel_delta_y: legacy_number(event, "wheelDeltaY"),
        wheel_delta: legacy_number(event, "wheelDelta"),
        delta_y: Some(event.delta_y()),
        detail: Some(f64::from(event.detail())),
    }
}

fn legacy_number(event: &WheelEvent, property: &str) -> Option<f64> {
    js_sys::Reflect::get(event.as_ref(), &JsValue::from_str(property))
        .ok()
        .and_then(|v| v.as_f64())
}
