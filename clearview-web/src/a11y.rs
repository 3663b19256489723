// Accessibility stylesheet

use crate::dom;

pub const STYLE_ELEMENT_ID: &str = "clearview-a11y-styles";

/// Get CSS for visible focus indicators, screen reader utilities and image
/// placeholders
///
/// Returns critical accessibility CSS that should be injected early in the page load.
#[must_use]
pub const fn stylesheet() -> &'static str {
    ".sr-only{position:absolute;width:1px;height:1px;padding:0;margin:-1px;overflow:hidden;clip:rect(0,0,0,0);white-space:nowrap;border:0}\
     :focus{outline:3px solid #FF0000 !important;outline-offset:2px !important}\
     .accessibility-controls button.active{outline:3px solid #FF0000 !important;outline-offset:2px !important}\
     .focus-highlight{box-shadow:0 0 0 3px #FF0000 !important}\
     .image-replacement{display:block;padding:10px;border:2px dashed #666;background:#f0f0f0;margin:10px 0;font-weight:bold}"
}

/// Append the accessibility stylesheet to `<head>` unless it is already there.
pub fn inject_styles() {
    let Some(doc) = dom::document() else {
        return;
    };
    if doc.get_element_by_id(STYLE_ELEMENT_ID).is_some() {
        return;
    }
    let Some(head) = doc.head() else {
        return;
    };
    if let Ok(style) = doc.create_element("style") {
        style.set_id(STYLE_ELEMENT_ID);
        style.set_text_content(Some(stylesheet()));
        let _ = head.append_child(&style);
    }
}
