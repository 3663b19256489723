//! Wires server-rendered `[data-accessibility-action]` controls to the
//! controller.
use clearview_core::AccessibilityAction;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Element, Event, HtmlElement, KeyboardEvent};

use crate::app::SharedController;
use crate::dom;
use crate::keyboard::is_activation_key;

pub const ACTION_ATTR: &str = "data-accessibility-action";
const BOUND_MARKER: &str = "data-clearview-bound";

/// Attach click and keyboard listeners to every unbound control.
/// Returns how many controls were bound.
pub fn bind_controls(shared: &SharedController) -> usize {
    dom::query_document(&format!("[{ACTION_ATTR}]:not([{BOUND_MARKER}])"))
        .into_iter()
        .filter(|el| bind_control(shared, el))
        .count()
}

fn bind_control(shared: &SharedController, el: &Element) -> bool {
    let raw = el.get_attribute(ACTION_ATTR).unwrap_or_default();
    let action = match raw.parse::<AccessibilityAction>() {
        Ok(action) => action,
        Err(err) => {
            log::warn!("leaving control unbound: {err}");
            return false;
        }
    };

    let handle = shared.clone();
    let on_click = Closure::<dyn FnMut(Event)>::new(move |e: Event| {
        e.prevent_default();
        handle.dispatch(action);
    });

    let target = el.clone();
    let on_keydown = Closure::<dyn FnMut(KeyboardEvent)>::new(move |e: KeyboardEvent| {
        if !is_activation_key(&e.key()) {
            return;
        }
        e.prevent_default();
        if let Some(html) = target.dyn_ref::<HtmlElement>() {
            html.click();
        }
    });

    let bound = el
        .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
        .and_then(|()| {
            el.add_event_listener_with_callback("keydown", on_keydown.as_ref().unchecked_ref())
        })
        .is_ok();
    // Listeners live as long as the page.
    on_click.forget();
    on_keydown.forget();

    if bound {
        let _ = el.set_attribute(BOUND_MARKER, action.name());
    }
    bound
}
