use anyhow::{Result, ensure};
use async_trait::async_trait;
use clearview_core::{
    AccessibilityAction, ClearviewConfig, ContrastTheme, FontAdjust, MemoryStore, StorageKeys,
};

use super::{Scenario, fixture_page, logic_controller};
use crate::browser::PageProbe;

/// Live-region clear delay plus slack for the browser's timer.
const ANNOUNCE_WAIT_MS: u64 = 1_500;

pub struct InitEmpty;

#[async_trait]
impl Scenario for InitEmpty {
    fn key(&self) -> &'static str {
        "init"
    }

    fn description(&self) -> &'static str {
        "Empty storage leaves the page untouched and repeated start-up is a no-op"
    }

    fn run_logic(&self) -> Result<()> {
        let mut ctl = logic_controller(MemoryStore::new());
        let untouched = fixture_page();
        ensure!(
            ctl.page().theme_classes().is_empty(),
            "theme applied on empty storage"
        );
        ensure!(
            ctl.page().font_size.is_none(),
            "font size applied on empty storage"
        );
        ensure!(
            ctl.page().images == untouched.images,
            "images changed on empty storage"
        );
        ensure!(ctl.store().is_empty(), "start-up wrote preferences");

        let keys = StorageKeys::default();
        let mut stored = logic_controller(MemoryStore::with_entries([
            (keys.theme.as_str(), ContrastTheme::Blue.id()),
            (keys.font_scale.as_str(), "160"),
            (keys.images_hidden.as_str(), "true"),
        ]));
        let first = stored.page().clone();
        stored.initialize();
        ensure!(
            *stored.page() == first,
            "second initialize changed the page"
        );
        ensure!(first.placeholders().len() == first.images.len());

        ctl.initialize();
        ensure!(ctl.page().images == untouched.images);
        Ok(())
    }

    async fn run_browser(&self, probe: &PageProbe<'_>) -> Result<()> {
        probe.open_fresh().await?;
        let snap = probe.snapshot().await?;
        ensure!(
            snap.theme_classes.is_empty(),
            "theme classes {:?}",
            snap.theme_classes
        );
        ensure!(snap.font_size.is_empty(), "font size {:?}", snap.font_size);
        ensure!(
            snap.placeholders.is_empty(),
            "placeholders {:?}",
            snap.placeholders
        );

        let state = probe.state().await?;
        ensure!(state.contrast_theme.is_none());
        ensure!(state.font_scale.is_none());
        ensure!(!state.images_hidden);

        let keys = StorageKeys::default();
        for key in keys.all() {
            ensure!(
                probe.storage_item(key).await?.is_none(),
                "{key} written on start-up"
            );
        }

        probe.reload().await?;
        let again = probe.snapshot().await?;
        ensure!(again.theme_classes == snap.theme_classes);
        ensure!(again.images == snap.images, "reload changed images");
        Ok(())
    }
}

pub struct Announcements;

#[async_trait]
impl Scenario for Announcements {
    fn key(&self) -> &'static str {
        "announce"
    }

    fn description(&self) -> &'static str {
        "Every change is announced once and the live region empties afterwards"
    }

    fn run_logic(&self) -> Result<()> {
        let mut ctl = logic_controller(MemoryStore::new());
        let actions = [
            AccessibilityAction::SetContrast(ContrastTheme::Black),
            AccessibilityAction::AdjustFont(FontAdjust::Increase),
            AccessibilityAction::AdjustFont(FontAdjust::Reset),
            AccessibilityAction::ToggleImages,
        ];
        let expected = [
            "Contrast mode enabled: white text on a black background",
            "Font size set to 120 percent",
            "Font size reset",
            "Images disabled. Text descriptions are used instead.",
        ];
        for (action, text) in actions.into_iter().zip(expected) {
            ctl.dispatch(action);
            ensure!(
                ctl.page().live_region == text,
                "after {action}: {:?}",
                ctl.page().live_region
            );
            ctl.page_mut().run_timers();
            ensure!(
                ctl.page().live_region.is_empty(),
                "live region kept text after {action}"
            );
        }
        ensure!(ctl.page().announcements.len() == expected.len());
        Ok(())
    }

    async fn run_browser(&self, probe: &PageProbe<'_>) -> Result<()> {
        probe.open_fresh().await?;
        probe
            .press(AccessibilityAction::AdjustFont(FontAdjust::Increase).name())
            .await?;
        let live = probe.snapshot().await?.live_text.unwrap_or_default();
        ensure!(live.contains("120"), "live region text {live:?}");

        probe.pause(ANNOUNCE_WAIT_MS).await;
        let cleared = probe.snapshot().await?.live_text.unwrap_or_default();
        ensure!(cleared.is_empty(), "live region not cleared: {cleared:?}");
        Ok(())
    }
}

pub struct ReturnToStandard;

#[async_trait]
impl Scenario for ReturnToStandard {
    fn key(&self) -> &'static str {
        "standard"
    }

    fn description(&self) -> &'static str {
        "Standard version clears every stored preference and navigates away"
    }

    fn run_logic(&self) -> Result<()> {
        let config = ClearviewConfig::default();
        let mut ctl = logic_controller(MemoryStore::new());
        ctl.dispatch(AccessibilityAction::SetContrast(ContrastTheme::White));
        ctl.dispatch(AccessibilityAction::AdjustFont(FontAdjust::Increase));
        ctl.dispatch(AccessibilityAction::ToggleImages);
        ensure!(ctl.store().len() == 3, "expected three stored preferences");

        ctl.dispatch(AccessibilityAction::StandardVersion);
        ensure!(ctl.store().is_empty(), "preferences survived the reset");
        ensure!(
            ctl.page().location.as_deref() == Some(config.standard_url.as_str()),
            "navigated to {:?}",
            ctl.page().location
        );
        Ok(())
    }

    async fn run_browser(&self, probe: &PageProbe<'_>) -> Result<()> {
        let keys = StorageKeys::default();
        probe.open_fresh().await?;
        probe.press(ContrastTheme::Blue.id()).await?;
        probe
            .press(AccessibilityAction::AdjustFont(FontAdjust::Decrease).name())
            .await?;
        probe.press(AccessibilityAction::ToggleImages.name()).await?;
        for key in keys.all() {
            ensure!(probe.storage_item(key).await?.is_some(), "{key} not stored");
        }

        probe
            .press(AccessibilityAction::StandardVersion.name())
            .await?;
        probe.pause(500).await;
        for key in keys.all() {
            ensure!(
                probe.storage_item(key).await?.is_none(),
                "{key} survived the reset"
            );
        }
        let url = probe.current_url().await?;
        ensure!(url.contains("style=standard"), "still on {url}");
        Ok(())
    }
}
