//! Document-wide keyboard support.
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Element, HtmlElement, KeyboardEvent};

use crate::dom;
use crate::enhance::FOCUSABLE_QUERY;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyIntent {
    /// Shift+Tab, wraps from the first focusable element to the last.
    WrapBackward,
    /// Enter or Space on a `role="button"` element.
    Activate,
    /// Escape, closes every open modal.
    CloseModals,
}

#[must_use]
pub fn is_activation_key(key: &str) -> bool {
    matches!(key, "Enter" | " ")
}

#[must_use]
pub fn classify(key: &str, shift: bool) -> Option<KeyIntent> {
    match key {
        "Tab" if shift => Some(KeyIntent::WrapBackward),
        "Escape" => Some(KeyIntent::CloseModals),
        k if is_activation_key(k) => Some(KeyIntent::Activate),
        _ => None,
    }
}

/// Listen for keyboard shortcuts on the whole document for the page's
/// lifetime.
pub fn install() {
    let Some(doc) = dom::document() else {
        return;
    };
    let handler = Closure::<dyn FnMut(KeyboardEvent)>::new(move |e: KeyboardEvent| {
        on_keydown(&e);
    });
    if doc
        .add_event_listener_with_callback("keydown", handler.as_ref().unchecked_ref())
        .is_ok()
    {
        handler.forget();
    }
}

fn as_html(el: Element) -> Option<HtmlElement> {
    el.dyn_into::<HtmlElement>().ok()
}

fn on_keydown(e: &KeyboardEvent) {
    let Some(intent) = classify(&e.key(), e.shift_key()) else {
        return;
    };
    let active = dom::document().and_then(|doc| doc.active_element());
    match intent {
        KeyIntent::WrapBackward => {
            let focusables = dom::query_document(FOCUSABLE_QUERY);
            let (Some(first), Some(last), Some(active)) =
                (focusables.first(), focusables.last(), active)
            else {
                return;
            };
            if &active == first {
                e.prevent_default();
                if let Some(last) = as_html(last.clone()) {
                    let _ = last.focus();
                }
            }
        }
        KeyIntent::Activate => {
            let Some(active) = active else {
                return;
            };
            // Bound controls handle their own activation keys.
            if active.get_attribute("role").as_deref() != Some("button")
                || active.has_attribute("data-accessibility-action")
            {
                return;
            }
            e.prevent_default();
            if let Some(el) = as_html(active) {
                el.click();
            }
        }
        KeyIntent::CloseModals => {
            for modal in dom::query_document(".modal.show") {
                if let Some(close) = dom::query_all(&modal, "[data-dismiss=\"modal\"]")
                    .into_iter()
                    .next()
                    .and_then(as_html)
                {
                    close.click();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_supported_keys() {
        assert_eq!(classify("Tab", true), Some(KeyIntent::WrapBackward));
        assert_eq!(classify("Tab", false), None);
        assert_eq!(classify("Enter", false), Some(KeyIntent::Activate));
        assert_eq!(classify(" ", true), Some(KeyIntent::Activate));
        assert_eq!(classify("Escape", false), Some(KeyIntent::CloseModals));
        assert_eq!(classify("a", false), None);
    }
}
