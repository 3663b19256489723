//! One-shot markup fixes run at boot: table captions and header scopes,
//! form labels, tab stops, the main landmark and icon labels.
use clearview_core::Messages;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlTableElement};

use crate::dom;

pub const FOCUSABLE_QUERY: &str = "a, button, input, select, textarea, [tabindex]";

/// Apply every enhancement to the current document.
pub fn enhance_document(messages: &Messages) {
    let Some(doc) = dom::document() else {
        return;
    };
    label_tables(messages);
    label_forms(&doc, messages);
    ensure_tab_stops();
    mark_main_landmark(&doc);
    label_icons();
}

fn label_tables(messages: &Messages) {
    for el in dom::query_document("table") {
        if !el.has_attribute("summary") && dom::query_all(&el, "caption").is_empty() {
            if let Some(table) = el.dyn_ref::<HtmlTableElement>() {
                let caption = table.create_caption();
                caption.set_text_content(Some(messages.table_caption));
            }
        }
        for th in dom::query_all(&el, "th") {
            if !th.has_attribute("scope") {
                let _ = th.set_attribute("scope", "col");
            }
        }
    }
}

fn label_forms(doc: &Document, messages: &Messages) {
    for form in dom::query_document("form") {
        if form.has_attribute("aria-label") || form.has_attribute("aria-labelledby") {
            continue;
        }
        let legend = dom::query_all(&form, "legend").into_iter().next();
        let heading = dom::query_all(&form, "h1, h2, h3, h4, h5, h6")
            .into_iter()
            .next();
        match (legend, heading) {
            (Some(legend), _) => labelled_by(doc, &form, &legend, "form-legend"),
            (None, Some(heading)) => labelled_by(doc, &form, &heading, "form-heading"),
            (None, None) => {
                let _ = form.set_attribute("aria-label", messages.form_label);
            }
        }
    }
}

fn labelled_by(doc: &Document, form: &Element, label: &Element, prefix: &str) {
    if label.id().is_empty() {
        let id = next_free_id(prefix, |id| doc.get_element_by_id(id).is_some());
        label.set_id(&id);
    }
    let _ = form.set_attribute("aria-labelledby", &label.id());
}

/// First `{prefix}-{n}` id for which `taken` is false.
#[must_use]
pub fn next_free_id(prefix: &str, taken: impl Fn(&str) -> bool) -> String {
    (1_u32..)
        .map(|n| format!("{prefix}-{n}"))
        .find(|id| !taken(id))
        .unwrap_or_else(|| prefix.to_string())
}

fn ensure_tab_stops() {
    for el in dom::query_document(FOCUSABLE_QUERY) {
        if !el.has_attribute("tabindex") {
            let _ = el.set_attribute("tabindex", "0");
        }
    }
}

fn mark_main_landmark(doc: &Document) {
    let Ok(Some(main)) = doc.query_selector("main") else {
        return;
    };
    if main.id().is_empty() {
        main.set_id("main-content");
        let _ = main.set_attribute("role", "main");
    }
}

fn label_icons() {
    for icon in dom::query_document("i[class*=\"fa-\"]") {
        if icon.has_attribute("aria-label") {
            continue;
        }
        if let Some(label) = icon_label(&icon.class_name()) {
            let _ = icon.set_attribute("aria-label", &label);
        }
    }
}

/// Derive a spoken name from an icon's class list: the first `fa-*` class
/// with dashes read as spaces.
#[must_use]
pub fn icon_label(class_list: &str) -> Option<String> {
    class_list
        .split_whitespace()
        .find_map(|class| class.strip_prefix("fa-"))
        .filter(|name| !name.is_empty())
        .map(|name| name.replace('-', " "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icon_label_uses_first_fa_class() {
        assert_eq!(
            icon_label("fa fa-search-plus").as_deref(),
            Some("search plus")
        );
        assert_eq!(icon_label("fa-phone fa-lg").as_deref(), Some("phone"));
        assert_eq!(icon_label("icon fa"), None);
        assert_eq!(icon_label("fa-"), None);
    }

    #[test]
    fn next_free_id_skips_taken_ids() {
        let taken = ["form-legend-1", "form-legend-2"];
        assert_eq!(
            next_free_id("form-legend", |id| taken.contains(&id)),
            "form-legend-3"
        );
        assert_eq!(next_free_id("form-heading", |_| false), "form-heading-1");
    }
}
