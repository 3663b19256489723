#![cfg(target_arch = "wasm32")]

use clearview_core::{
    AccessibilityController, ClearviewConfig, ContrastTheme, FontAdjust, Locale, MemoryStore,
    PageSurface,
};
use clearview_web::dom;
use clearview_web::surface::{
    DomSurface, LIVE_REGION_ID, PLACEHOLDER_CLASS, PLACEHOLDER_MARKER, hide_image,
};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::HtmlElement;

wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

fn reset_fixture(markup: &str) {
    let doc = dom::document().expect("document");
    let body = doc.body().expect("document body");
    body.set_inner_html(markup);
    let root = dom::root_element().expect("root");
    root.set_class_name("");
    let _ = root.style().remove_property("font-size");
}

fn controller(store: MemoryStore) -> AccessibilityController<MemoryStore, DomSurface> {
    let surface = DomSurface::new(50);
    let mut ctl = AccessibilityController::new(store, surface, ClearviewConfig::default())
        .with_locale(Locale::En);
    ctl.initialize();
    ctl
}

fn display_of(el: &HtmlElement) -> String {
    el.style().get_property_value("display").unwrap_or_default()
}

#[wasm_bindgen_test]
fn theme_switch_keeps_single_class_and_pressed_control() {
    reset_fixture(
        r#"<button data-contrast-style="contrast-white"></button>
           <button data-contrast-style="contrast-black"></button>"#,
    );
    let mut ctl = controller(MemoryStore::new());
    ctl.set_contrast_theme(ContrastTheme::White);
    ctl.set_contrast_theme(ContrastTheme::Black);

    let root = dom::root_element().expect("root");
    assert!(root.class_list().contains("contrast-black"));
    assert!(!root.class_list().contains("contrast-white"));
    let pressed = dom::query_document("[aria-pressed=\"true\"]");
    assert_eq!(pressed.len(), 1);
    assert_eq!(
        pressed[0].get_attribute("data-contrast-style").as_deref(),
        Some("contrast-black")
    );
}

#[wasm_bindgen_test]
fn font_scale_is_written_to_root() {
    reset_fixture("<p>text</p>");
    let store = MemoryStore::with_entries([("accessibilityFontSize", "140")]);
    let mut ctl = controller(store);
    ctl.adjust_font_scale(FontAdjust::Increase);
    let root = dom::root_element().expect("root");
    assert_eq!(
        root.style().get_property_value("font-size").unwrap_or_default(),
        "160%"
    );
}

#[wasm_bindgen_test]
fn hiding_images_inserts_placeholders_and_restores_display() {
    reset_fixture(
        r#"<div><img id="a" src="data:," alt="Logo" style="display: inline-block"></div>
           <div><img id="b" src="data:,"></div>"#,
    );
    let mut ctl = controller(MemoryStore::new());
    ctl.set_images_hidden(true);
    ctl.set_images_hidden(true);

    let placeholder_selector = format!(".{PLACEHOLDER_CLASS}");
    let placeholders = dom::query_document(&placeholder_selector);
    assert_eq!(placeholders.len(), 2);
    assert_eq!(
        placeholders[0].text_content().as_deref(),
        Some("[IMAGE: Logo]")
    );
    assert_eq!(
        placeholders[1].text_content().as_deref(),
        Some("[IMAGE: Image without description]")
    );

    ctl.set_images_hidden(false);
    assert!(dom::query_document(&placeholder_selector).is_empty());
    let doc = dom::document().expect("document");
    let a: HtmlElement = doc.get_element_by_id("a").expect("img a").unchecked_into();
    let b: HtmlElement = doc.get_element_by_id("b").expect("img b").unchecked_into();
    assert_eq!(display_of(&a), "inline-block");
    assert_eq!(display_of(&b), "");
    assert_eq!(a.get_attribute("src").as_deref(), Some("data:,"));
}

#[wasm_bindgen_test]
fn site_placeholder_markup_survives_show() {
    reset_fixture(
        r#"<div><span id="site" class="image-replacement">Chart below</span><img src="data:,"></div>
           <p><span id="legacy" class="image-replacement">Old note</span></p>"#,
    );
    let mut ctl = controller(MemoryStore::new());
    ctl.set_images_hidden(true);
    let generated = format!("[{PLACEHOLDER_MARKER}]");
    assert_eq!(dom::query_document(&generated).len(), 1);

    ctl.set_images_hidden(false);
    assert!(dom::query_document(&generated).is_empty());
    let doc = dom::document().expect("document");
    let site = doc.get_element_by_id("site").expect("site span");
    assert_eq!(site.text_content().as_deref(), Some("Chart below"));
    assert!(doc.get_element_by_id("legacy").is_some());
}

#[wasm_bindgen_test]
fn image_is_untouched_when_placeholder_cannot_be_inserted() {
    reset_fixture("");
    let doc = dom::document().expect("document");
    let img: HtmlElement = doc.create_element("img").expect("img").unchecked_into();
    let _ = img.set_attribute("src", "data:,");
    // A document may hold a single element child, so nothing fits before it.
    let owner = web_sys::Document::new().expect("document");
    owner.append_child(&img).expect("adopt image");

    assert!(!hide_image(&img, Locale::En.messages()));
    assert!(!img.has_attribute("data-clearview-hidden"));
    assert!(!img.has_attribute("data-original-src"));
    assert!(!img.has_attribute("data-original-display"));
    assert_eq!(display_of(&img), "");
}

#[wasm_bindgen_test]
async fn announcement_is_cleared_after_delay() {
    reset_fixture("");
    let mut surface = DomSurface::new(20);
    surface.announce("hello");
    let doc = dom::document().expect("document");
    let region = doc.get_element_by_id(LIVE_REGION_ID).expect("live region");
    assert_eq!(region.text_content().as_deref(), Some("hello"));
    assert_eq!(region.get_attribute("aria-live").as_deref(), Some("polite"));
    dom::sleep_ms(80).await.expect("sleep");
    assert_eq!(region.text_content().unwrap_or_default(), "");
}
