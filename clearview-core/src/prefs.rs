use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::config::StorageKeys;
use crate::font::{FontAdjust, FontScale};
use crate::storage::PreferenceStore;
use crate::theme::ContrastTheme;

/// The three persisted accessibility settings.
///
/// `font_scale` is `None` until the visitor touches the font controls, so
/// the page's own font size is left alone on a fresh profile. The serde
/// form is what the browser test bridge hands to automation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessibilityPreferences {
    pub contrast_theme: Option<ContrastTheme>,
    pub font_scale: Option<FontScale>,
    pub images_hidden: bool,
}

impl AccessibilityPreferences {
    /// Read every field from storage. Missing, unreadable or malformed
    /// values fall back to the field default.
    pub fn load<S: PreferenceStore>(store: &S, keys: &StorageKeys) -> Self {
        Self {
            contrast_theme: read_parsed(store, &keys.theme),
            font_scale: read_parsed(store, &keys.font_scale),
            images_hidden: read_value(store, &keys.images_hidden)
                .is_some_and(|v| v.trim() == "true"),
        }
    }

    #[must_use]
    pub fn effective_font_scale(&self) -> FontScale {
        self.font_scale.unwrap_or_default()
    }

    pub fn select_theme(&mut self, theme: ContrastTheme) {
        self.contrast_theme = Some(theme);
    }

    /// Apply a font control press and return the new, clamped scale.
    pub fn adjust_font(&mut self, adjust: FontAdjust) -> FontScale {
        let next = self.effective_font_scale().adjust(adjust);
        self.font_scale = Some(next);
        next
    }

    /// Returns whether the flag actually changed.
    pub fn set_images_hidden(&mut self, hidden: bool) -> bool {
        let changed = self.images_hidden != hidden;
        self.images_hidden = hidden;
        changed
    }

    /// Storage encoding of the image flag.
    #[must_use]
    pub const fn images_hidden_value(&self) -> &'static str {
        if self.images_hidden { "true" } else { "false" }
    }
}

fn read_value<S: PreferenceStore>(store: &S, key: &str) -> Option<String> {
    match store.read(key) {
        Ok(value) => value,
        Err(err) => {
            log::warn!("failed to read preference {key}: {err}");
            None
        }
    }
}

fn read_parsed<S, T>(store: &S, key: &str) -> Option<T>
where
    S: PreferenceStore,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = read_value(store, key)?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(err) => {
            log::debug!("ignoring stored {key}: {err}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn empty_store_loads_defaults() {
        let prefs = AccessibilityPreferences::load(&MemoryStore::new(), &StorageKeys::default());
        assert_eq!(prefs, AccessibilityPreferences::default());
        assert_eq!(prefs.effective_font_scale(), FontScale::DEFAULT);
    }

    #[test]
    fn malformed_values_are_treated_as_unset() {
        let store = MemoryStore::with_entries([
            ("accessibilityStyle", "neon"),
            ("accessibilityFontSize", "huge"),
            ("accessibilityImagesHidden", "yes"),
        ]);
        let prefs = AccessibilityPreferences::load(&store, &StorageKeys::default());
        assert_eq!(prefs, AccessibilityPreferences::default());
    }

    #[test]
    fn stored_values_are_loaded_and_clamped() {
        let store = MemoryStore::with_entries([
            ("accessibilityStyle", "contrast-blue"),
            ("accessibilityFontSize", "260"),
            ("accessibilityImagesHidden", "true"),
        ]);
        let prefs = AccessibilityPreferences::load(&store, &StorageKeys::default());
        assert_eq!(prefs.contrast_theme, Some(ContrastTheme::Blue));
        assert_eq!(prefs.font_scale, Some(FontScale::new(200)));
        assert!(prefs.images_hidden);
    }

    #[test]
    fn adjust_font_starts_from_default_when_unset() {
        let mut prefs = AccessibilityPreferences::default();
        assert_eq!(prefs.adjust_font(FontAdjust::Decrease).percent(), 80);
        assert_eq!(prefs.font_scale, Some(FontScale::new(80)));
    }

    #[test]
    fn json_form_uses_stored_identifiers() {
        let prefs = AccessibilityPreferences {
            contrast_theme: Some(ContrastTheme::Black),
            font_scale: Some(FontScale::new(140)),
            images_hidden: true,
        };
        let json = serde_json::to_value(prefs).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "contrast_theme": "contrast-black",
                "font_scale": 140,
                "images_hidden": true,
            })
        );

        let fresh = AccessibilityPreferences::default();
        let fresh = serde_json::to_value(fresh).unwrap();
        assert_eq!(fresh["contrast_theme"], serde_json::Value::Null);
        assert_eq!(fresh["font_scale"], serde_json::Value::Null);
    }

    #[test]
    fn json_font_scale_is_clamped_on_the_way_in() {
        let json = r#"{ "contrast_theme": null, "font_scale": 260, "images_hidden": false }"#;
        let prefs: AccessibilityPreferences = serde_json::from_str(json).unwrap();
        assert_eq!(prefs.font_scale, Some(FontScale::new(200)));
    }

    #[test]
    fn set_images_hidden_reports_changes() {
        let mut prefs = AccessibilityPreferences::default();
        assert!(prefs.set_images_hidden(true));
        assert!(!prefs.set_images_hidden(true));
        assert_eq!(prefs.images_hidden_value(), "true");
    }
}
