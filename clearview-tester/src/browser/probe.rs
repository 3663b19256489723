use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thirtyfour::prelude::*;

/// Preferences as reported by `window.__clearviewTest.state()`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct BridgeState {
    pub contrast_theme: Option<String>,
    /// `None` until a font control has been used.
    pub font_scale: Option<u16>,
    pub images_hidden: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ImageSnapshot {
    pub display: String,
    pub src: String,
}

/// What the page visibly looks like right now.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PageSnapshot {
    pub theme_classes: Vec<String>,
    pub font_size: String,
    pub placeholders: Vec<String>,
    pub images: Vec<ImageSnapshot>,
    pub pressed: Vec<String>,
    pub live_text: Option<String>,
}

const SNAPSHOT_JS: &str = r#"
const root = document.documentElement;
const themes = ['contrast-white', 'contrast-black', 'contrast-blue'];
const live = document.getElementById('clearview-live');
return {
  themeClasses: themes.filter(t => root.classList.contains(t)),
  fontSize: root.style.fontSize || '',
  placeholders: Array.from(document.querySelectorAll('[data-clearview-placeholder]')).map(p => p.textContent),
  images: Array.from(document.querySelectorAll('img')).map(i => ({ display: i.style.display || '', src: i.getAttribute('src') || '' })),
  pressed: Array.from(document.querySelectorAll('[data-contrast-style][aria-pressed="true"]')).map(b => b.dataset.contrastStyle),
  liveText: live ? live.textContent : null,
};
"#;

const PRESS_JS: &str = r#"
const el = document.querySelector('[data-accessibility-action="' + arguments[0] + '"]');
if (el) { el.click(); return true; }
return !!(window.__clearviewTest && window.__clearviewTest.dispatch(arguments[0]));
"#;

/// Drives the page under test through WebDriver and reads back its state.
#[derive(Clone, Copy)]
pub struct PageProbe<'a> {
    driver: &'a WebDriver,
    base_url: &'a str,
}

impl<'a> PageProbe<'a> {
    pub const fn new(driver: &'a WebDriver, base_url: &'a str) -> Self {
        Self { driver, base_url }
    }

    /// Open the page with empty storage.
    pub async fn open_fresh(&self) -> Result<()> {
        self.driver
            .goto(self.base_url)
            .await
            .context("opening page")?;
        self.driver
            .execute("window.localStorage.clear()", vec![])
            .await?;
        self.reload().await
    }

    pub async fn reload(&self) -> Result<()> {
        self.driver.refresh().await.context("reloading page")?;
        self.ensure_available().await
    }

    pub async fn ensure_available(&self) -> Result<()> {
        let result = self
            .driver
            .execute("return !!window.__clearviewTest", vec![])
            .await?;
        if !result.json().as_bool().unwrap_or(false) {
            bail!("__clearviewTest is not available. Did you pass ?test=1?");
        }
        Ok(())
    }

    /// Activate a control by its action name, falling back to the bridge
    /// when the page has no such control.
    pub async fn press(&self, action: &str) -> Result<()> {
        let result = self.driver.execute(PRESS_JS, vec![action.into()]).await?;
        if !result.json().as_bool().unwrap_or(false) {
            bail!("no control or bridge accepted action {action}");
        }
        Ok(())
    }

    pub async fn state(&self) -> Result<BridgeState> {
        let result = self
            .driver
            .execute("return window.__clearviewTest.state()", vec![])
            .await?;
        serde_json::from_value(result.json().clone()).context("parsing bridge state")
    }

    pub async fn snapshot(&self) -> Result<PageSnapshot> {
        let result = self.driver.execute(SNAPSHOT_JS, vec![]).await?;
        serde_json::from_value(result.json().clone()).context("parsing page snapshot")
    }

    pub async fn storage_item(&self, key: &str) -> Result<Option<String>> {
        let result = self
            .driver
            .execute(
                "return window.localStorage.getItem(arguments[0])",
                vec![key.into()],
            )
            .await?;
        Ok(result.json().as_str().map(str::to_string))
    }

    pub async fn set_storage_item(&self, key: &str, value: &str) -> Result<()> {
        self.driver
            .execute(
                "window.localStorage.setItem(arguments[0], arguments[1])",
                vec![key.into(), value.into()],
            )
            .await?;
        Ok(())
    }

    pub async fn current_url(&self) -> Result<String> {
        Ok(self.driver.current_url().await?.to_string())
    }

    pub async fn pause(&self, ms: u64) {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clearview_core::{AccessibilityPreferences, ContrastTheme, FontScale};

    #[test]
    fn bridge_state_reads_serialized_preferences() {
        let prefs = AccessibilityPreferences {
            contrast_theme: Some(ContrastTheme::Blue),
            font_scale: Some(FontScale::new(160)),
            images_hidden: true,
        };
        let json = serde_json::to_value(prefs).expect("serialize");
        let state: BridgeState = serde_json::from_value(json).expect("parse");
        assert_eq!(state.contrast_theme.as_deref(), Some("contrast-blue"));
        assert_eq!(state.font_scale, Some(160));
        assert!(state.images_hidden);
    }

    #[test]
    fn fresh_bridge_state_has_no_font_scale() {
        let prefs = AccessibilityPreferences::default();
        let json = serde_json::to_value(prefs).expect("serialize");
        let state: BridgeState = serde_json::from_value(json).expect("parse");
        assert_eq!(state, BridgeState::default());
    }
}
