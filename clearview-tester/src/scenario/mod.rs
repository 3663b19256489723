//! Scenario catalog. Every scenario checks the same behavior twice: once
//! against the core controller with an in-memory page and once against a
//! real browser page.
mod lifecycle;
mod preferences;

use anyhow::Result;
use async_trait::async_trait;
use clearview_core::{
    AccessibilityController, ClearviewConfig, ContrastTheme, Locale, MemoryStore, VirtualPage,
};

use crate::browser::PageProbe;

pub type LogicController = AccessibilityController<MemoryStore, VirtualPage>;

#[async_trait]
pub trait Scenario: Send + Sync {
    fn key(&self) -> &'static str;
    fn description(&self) -> &'static str;

    /// Run against [`VirtualPage`] and [`MemoryStore`].
    fn run_logic(&self) -> Result<()>;

    /// Run against the page behind `probe`.
    async fn run_browser(&self, probe: &PageProbe<'_>) -> Result<()>;
}

/// Page fixture used by logic runs: two images (one without alt text) and
/// one control per theme.
#[must_use]
pub fn fixture_page() -> VirtualPage {
    ContrastTheme::ALL.iter().fold(
        VirtualPage::new()
            .with_root_class("site")
            .with_styled_image("/static/logo.png", Some("Logo"), "inline-block")
            .with_image("/static/banner.jpg", None),
        |page, theme| page.with_theme_control(theme.id()),
    )
}

#[must_use]
pub fn logic_controller(store: MemoryStore) -> LogicController {
    let mut ctl = AccessibilityController::new(store, fixture_page(), ClearviewConfig::default())
        .with_locale(Locale::En);
    ctl.initialize();
    ctl
}

fn catalog() -> Vec<Box<dyn Scenario>> {
    vec![
        Box::new(lifecycle::InitEmpty),
        Box::new(preferences::ContrastCycle),
        Box::new(preferences::FontBounds),
        Box::new(preferences::ImagesRoundTrip),
        Box::new(lifecycle::Announcements),
        Box::new(lifecycle::ReturnToStandard),
    ]
}

#[must_use]
pub fn get_scenario(key: &str) -> Option<Box<dyn Scenario>> {
    catalog().into_iter().find(|s| s.key() == key)
}

#[must_use]
pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    catalog()
        .iter()
        .map(|s| (s.key(), s.description()))
        .collect()
}

#[must_use]
pub fn all_keys() -> Vec<String> {
    catalog().iter().map(|s| s.key().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_scenario_passes_in_logic_mode() {
        for scenario in catalog() {
            scenario
                .run_logic()
                .unwrap_or_else(|err| panic!("{} failed: {err:#}", scenario.key()));
        }
    }

    #[test]
    fn keys_are_unique_and_resolvable() {
        let keys = all_keys();
        let mut deduped = keys.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(keys.len(), deduped.len());
        for key in &keys {
            assert!(get_scenario(key).is_some());
        }
        assert!(get_scenario("missing").is_none());
    }
}
