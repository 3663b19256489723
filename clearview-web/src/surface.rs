//! Live-DOM rendering of accessibility preferences.
use clearview_core::{ContrastTheme, FontScale, Messages, PageSurface};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, HtmlImageElement};

use crate::dom;

pub const LIVE_REGION_ID: &str = "clearview-live";
pub const PLACEHOLDER_CLASS: &str = "image-replacement";
/// Set on every placeholder this crate inserts; site markup may reuse
/// [`PLACEHOLDER_CLASS`] and is never removed.
pub const PLACEHOLDER_MARKER: &str = "data-clearview-placeholder";
const HIDDEN_MARKER: &str = "data-clearview-hidden";
const ORIGINAL_SRC: &str = "data-original-src";
const ORIGINAL_DISPLAY: &str = "data-original-display";

/// [`PageSurface`] over the current document.
pub struct DomSurface {
    announce_clear_ms: i32,
    live_region: Option<Element>,
}

impl DomSurface {
    #[must_use]
    pub fn new(announce_clear_ms: u32) -> Self {
        Self {
            announce_clear_ms: i32::try_from(announce_clear_ms).unwrap_or(i32::MAX),
            live_region: None,
        }
    }

    /// Find or create the single visually hidden live region.
    fn live_region(&mut self) -> Option<Element> {
        if let Some(region) = &self.live_region {
            return Some(region.clone());
        }
        let doc = dom::document()?;
        let region = match doc.get_element_by_id(LIVE_REGION_ID) {
            Some(existing) => existing,
            None => {
                let region = doc.create_element("div").ok()?;
                region.set_id(LIVE_REGION_ID);
                let _ = region.set_attribute("aria-live", "polite");
                let _ = region.set_attribute("aria-atomic", "true");
                region.set_class_name("sr-only");
                doc.body()?.append_child(&region).ok()?;
                region
            }
        };
        self.live_region = Some(region.clone());
        Some(region)
    }
}

fn placeholder_for(img: &HtmlElement, messages: &Messages) -> Option<Element> {
    let placeholder = dom::document()?.create_element("span").ok()?;
    placeholder.set_class_name(PLACEHOLDER_CLASS);
    let _ = placeholder.set_attribute(PLACEHOLDER_MARKER, "");
    let alt = img.get_attribute("alt");
    let text = messages.image_placeholder(alt.as_deref());
    placeholder.set_text_content(Some(&text));
    Some(placeholder)
}

/// Put a text placeholder in front of `img` and hide it.
///
/// Returns `false` when the placeholder could not be inserted, in which
/// case the image is left exactly as it was.
pub fn hide_image(img: &HtmlElement, messages: &Messages) -> bool {
    let Some(parent) = img.parent_node() else {
        return false;
    };
    let Some(placeholder) = placeholder_for(img, messages) else {
        return false;
    };
    if let Err(err) = parent.insert_before(&placeholder, Some(img)) {
        log::debug!("no placeholder for image: {}", dom::js_error_message(&err));
        return false;
    }

    let src = img
        .dyn_ref::<HtmlImageElement>()
        .map(HtmlImageElement::src)
        .or_else(|| img.get_attribute("src"))
        .unwrap_or_default();
    let style = img.style();
    let display = style.get_property_value("display").unwrap_or_default();
    let _ = img.set_attribute(ORIGINAL_SRC, &src);
    let _ = img.set_attribute(ORIGINAL_DISPLAY, &display);
    let _ = img.set_attribute(HIDDEN_MARKER, "true");
    style.set_property("display", "none").is_ok()
}

fn restore_image(img: &HtmlElement) {
    let display = img.get_attribute(ORIGINAL_DISPLAY).unwrap_or_default();
    let style = img.style();
    let _ = if display.is_empty() {
        style.remove_property("display").map(|_| ())
    } else {
        style.set_property("display", &display)
    };
    let _ = img.remove_attribute(ORIGINAL_DISPLAY);
    let _ = img.remove_attribute(ORIGINAL_SRC);
    let _ = img.remove_attribute(HIDDEN_MARKER);

    if let Some(prev) = img.previous_element_sibling()
        && prev.has_attribute(PLACEHOLDER_MARKER)
    {
        prev.remove();
    }
}

fn images(selector: &str) -> Vec<HtmlElement> {
    dom::query_document(selector)
        .into_iter()
        .filter_map(|el| el.dyn_into::<HtmlElement>().ok())
        .collect()
}

impl PageSurface for DomSurface {
    fn apply_theme(&mut self, theme: Option<ContrastTheme>) {
        let Some(root) = dom::root_element() else {
            return;
        };
        let classes = root.class_list();
        for class in ContrastTheme::class_names() {
            let _ = classes.remove_1(class);
        }
        if let Some(theme) = theme {
            let _ = classes.add_1(theme.class_name());
        }
    }

    fn apply_font_scale(&mut self, scale: Option<FontScale>) {
        let Some(root) = dom::root_element() else {
            return;
        };
        let style = root.style();
        let _ = match scale {
            Some(scale) => style.set_property("font-size", &scale.css_value()),
            None => style.remove_property("font-size").map(|_| ()),
        };
    }

    fn mark_active_theme(&mut self, theme: Option<ContrastTheme>) {
        for control in dom::query_document("[data-contrast-style]") {
            let active = theme.is_some_and(|t| {
                control.get_attribute("data-contrast-style").as_deref() == Some(t.id())
            });
            let _ = if active {
                control.class_list().add_1("active")
            } else {
                control.class_list().remove_1("active")
            };
            let _ = control.set_attribute("aria-pressed", if active { "true" } else { "false" });
        }
    }

    fn hide_images(&mut self, messages: &Messages) -> usize {
        images(&format!("img:not([{HIDDEN_MARKER}])"))
            .iter()
            .filter(|img| hide_image(img, messages))
            .count()
    }

    fn show_images(&mut self) -> usize {
        let hidden = images(&format!("img[{HIDDEN_MARKER}]"));
        for img in &hidden {
            restore_image(img);
        }
        for orphan in dom::query_document(&format!("[{PLACEHOLDER_MARKER}]")) {
            orphan.remove();
        }
        hidden.len()
    }

    fn announce(&mut self, message: &str) {
        let Some(region) = self.live_region() else {
            return;
        };
        region.set_text_content(Some(message));
        let delay = self.announce_clear_ms;
        wasm_bindgen_futures::spawn_local(async move {
            if dom::sleep_ms(delay).await.is_ok() {
                region.set_text_content(Some(""));
            }
        });
    }

    fn navigate(&mut self, url: &str) {
        let Some(win) = dom::window() else {
            return;
        };
        if let Err(err) = win.location().set_href(url) {
            let message = dom::js_error_message(&err);
            log::warn!("navigation to {url} failed: {message}");
        }
    }
}
