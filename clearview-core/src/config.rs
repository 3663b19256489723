//! Runtime configuration, overridable per site with a JSON blob.
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::messages::Locale;

/// Persisted key names. Defaults match the keys already present in
/// visitors' browsers, so changing them drops everyone's saved settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageKeys {
    pub theme: String,
    pub font_scale: String,
    pub images_hidden: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            theme: "accessibilityStyle".to_string(),
            font_scale: "accessibilityFontSize".to_string(),
            images_hidden: "accessibilityImagesHidden".to_string(),
        }
    }
}

impl StorageKeys {
    #[must_use]
    pub fn all(&self) -> [&str; 3] {
        [&self.theme, &self.font_scale, &self.images_hidden]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClearviewConfig {
    pub keys: StorageKeys,
    /// Where "return to the standard version" sends the visitor.
    pub standard_url: String,
    /// Delay before the live region is emptied again.
    pub announce_clear_ms: u32,
    /// Forced message language; `None` lets the page decide.
    pub locale: Option<Locale>,
}

impl Default for ClearviewConfig {
    fn default() -> Self {
        Self {
            keys: StorageKeys::default(),
            standard_url: default_standard_url(),
            announce_clear_ms: 1_000,
            locale: None,
        }
    }
}

impl ClearviewConfig {
    /// Parse a (possibly partial) JSON override; missing fields keep their
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid JSON for this shape.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Standard-version URL, prefixed with `PUBLIC_URL` when the site is
/// deployed under a sub-path.
#[must_use]
pub fn default_standard_url() -> String {
    standard_url_with_base(option_env!("PUBLIC_URL").unwrap_or(""))
}

fn standard_url_with_base(base: &str) -> String {
    let base = base.trim().trim_end_matches('/');
    format!("{base}/?style=standard")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_legacy_keys() {
        let cfg = ClearviewConfig::default();
        assert_eq!(cfg.keys.theme, "accessibilityStyle");
        assert_eq!(cfg.keys.font_scale, "accessibilityFontSize");
        assert_eq!(cfg.keys.images_hidden, "accessibilityImagesHidden");
        assert_eq!(cfg.announce_clear_ms, 1_000);
        assert_eq!(cfg.locale, None);
    }

    #[test]
    fn standard_url_is_root_anchored_without_base() {
        assert_eq!(standard_url_with_base(""), "/?style=standard");
        assert_eq!(standard_url_with_base("/site/"), "/site/?style=standard");
    }

    #[test]
    fn partial_json_keeps_remaining_defaults() {
        let cfg = ClearviewConfig::from_json(
            r#"{ "announce_clear_ms": 250, "locale": "en", "keys": { "theme": "t" } }"#,
        )
        .unwrap();
        assert_eq!(cfg.announce_clear_ms, 250);
        assert_eq!(cfg.locale, Some(Locale::En));
        assert_eq!(cfg.keys.theme, "t");
        assert_eq!(cfg.keys.font_scale, "accessibilityFontSize");
        assert_eq!(cfg.standard_url, default_standard_url());
    }

    #[test]
    fn malformed_json_is_an_error() {
        let err = ClearviewConfig::from_json("{ nope").unwrap_err();
        assert!(err.to_string().contains("JSON"));
    }
}
