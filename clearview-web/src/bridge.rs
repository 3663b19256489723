//! `window.__clearviewTest`, exposed when the page is opened with `?test=1`
//! so browser automation can read and drive the controller.
use clearview_core::AccessibilityAction;
use serde::Serialize;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::app::SharedController;
use crate::dom;

pub const BRIDGE_NAME: &str = "__clearviewTest";

pub fn install(shared: &SharedController) {
    let Some(window) = dom::window() else {
        return;
    };

    let state_handle = shared.clone();
    let state_fn = Closure::wrap(Box::new(move || {
        let serializer = serde_wasm_bindgen::Serializer::json_compatible();
        state_handle
            .preferences()
            .serialize(&serializer)
            .unwrap_or(JsValue::NULL)
    }) as Box<dyn FnMut() -> JsValue>);

    let dispatch_handle = shared.clone();
    let dispatch_fn = Closure::wrap(Box::new(move |value: JsValue| -> bool {
        let Some(name) = value.as_string() else {
            return false;
        };
        match name.parse::<AccessibilityAction>() {
            Ok(action) => {
                dispatch_handle.dispatch(action);
                true
            }
            Err(err) => {
                log::warn!("test bridge: {err}");
                false
            }
        }
    }) as Box<dyn FnMut(JsValue) -> bool>);

    let bridge = js_sys::Object::new();
    let _ = js_sys::Reflect::set(
        &bridge,
        &JsValue::from_str("state"),
        state_fn.as_ref().unchecked_ref(),
    );
    let _ = js_sys::Reflect::set(
        &bridge,
        &JsValue::from_str("dispatch"),
        dispatch_fn.as_ref().unchecked_ref(),
    );
    let _ = js_sys::Reflect::set(&window, &JsValue::from_str(BRIDGE_NAME), &bridge);
    state_fn.forget();
    dispatch_fn.forget();
}
