//! Page-wide controller handle and boot sequence.
use clearview_core::{
    AccessibilityAction, AccessibilityController, AccessibilityPreferences, ClearviewConfig, Locale,
};
use std::cell::RefCell;
use std::rc::Rc;

use crate::dom;
use crate::storage::BrowserStore;
use crate::surface::DomSurface;

pub const CONFIG_ELEMENT_ID: &str = "clearview-config";
pub const PANEL_ROOT_ID: &str = "clearview-panel";

pub type WebController = AccessibilityController<BrowserStore, DomSurface>;

/// Cheaply clonable handle shared by every event listener on the page.
#[derive(Clone)]
pub struct SharedController(Rc<RefCell<WebController>>);

impl SharedController {
    #[must_use]
    pub fn new(controller: WebController) -> Self {
        Self(Rc::new(RefCell::new(controller)))
    }

    #[must_use]
    pub fn standard_url(&self) -> String {
        self.0
            .try_borrow()
            .map(|controller| controller.config().standard_url.clone())
            .unwrap_or_else(|_| clearview_core::config::default_standard_url())
    }

    pub fn dispatch(&self, action: AccessibilityAction) {
        match self.0.try_borrow_mut() {
            Ok(mut controller) => controller.dispatch(action),
            Err(_) => log::warn!("dropped {action}: controller busy"),
        }
    }

    #[must_use]
    pub fn preferences(&self) -> AccessibilityPreferences {
        self.0
            .try_borrow()
            .map(|controller| *controller.preferences())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn locale(&self) -> Locale {
        self.0
            .try_borrow()
            .map(|controller| controller.locale())
            .unwrap_or_default()
    }
}

impl PartialEq for SharedController {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// Read the optional JSON override from `<script id="clearview-config">`.
/// A malformed blob is logged and ignored.
#[must_use]
pub fn load_config() -> ClearviewConfig {
    let Some(text) = dom::document()
        .and_then(|doc| doc.get_element_by_id(CONFIG_ELEMENT_ID))
        .and_then(|el| el.text_content())
    else {
        return ClearviewConfig::default();
    };
    parse_config(&text)
}

fn parse_config(text: &str) -> ClearviewConfig {
    if text.trim().is_empty() {
        return ClearviewConfig::default();
    }
    ClearviewConfig::from_json(text).unwrap_or_else(|err| {
        log::warn!("ignoring invalid clearview config: {err}");
        ClearviewConfig::default()
    })
}

/// Message language: explicit config first, then `<html lang>`.
#[must_use]
pub fn resolve_locale(config: &ClearviewConfig) -> Locale {
    config.locale.unwrap_or_else(|| {
        dom::root_element()
            .map(|root| Locale::from_lang_tag(&root.lang()))
            .unwrap_or_default()
    })
}

/// Build the controller, render the saved preferences and wire the page.
pub fn boot() -> SharedController {
    crate::a11y::inject_styles();

    let config = load_config();
    let locale = resolve_locale(&config);
    let surface = DomSurface::new(config.announce_clear_ms);
    let mut controller = AccessibilityController::new(BrowserStore, surface, config)
        .with_locale(locale);
    controller.initialize();
    log::info!("clearview initialized: {:?}", controller.preferences());

    crate::enhance::enhance_document(locale.messages());
    let shared = SharedController::new(controller);
    crate::controls::bind_controls(&shared);
    crate::keyboard::install();
    crate::components::panel::mount(&shared);
    if dom::test_mode_enabled() {
        crate::bridge::install(&shared);
    }
    shared
}

#[cfg(test)]
mod tests {
    use super::parse_config;
    use clearview_core::{ClearviewConfig, Locale};

    #[test]
    fn blank_config_uses_defaults() {
        assert_eq!(parse_config("   \n"), ClearviewConfig::default());
    }

    #[test]
    fn invalid_config_uses_defaults() {
        assert_eq!(
            parse_config("{ \"locale\": 5 }"),
            ClearviewConfig::default()
        );
    }

    #[test]
    fn valid_config_is_applied() {
        let cfg = parse_config(r#"{ "locale": "en", "standard_url": "/plain" }"#);
        assert_eq!(cfg.locale, Some(Locale::En));
        assert_eq!(cfg.standard_url, "/plain");
    }
}
