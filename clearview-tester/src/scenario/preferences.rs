use anyhow::{Result, ensure};
use async_trait::async_trait;
use clearview_core::{
    AccessibilityAction, ContrastTheme, FontAdjust, FontScale, MemoryStore, StorageKeys,
};

use super::{Scenario, logic_controller};
use crate::browser::PageProbe;

const THEME_ORDER: [ContrastTheme; 5] = [
    ContrastTheme::Black,
    ContrastTheme::Blue,
    ContrastTheme::White,
    ContrastTheme::Blue,
    ContrastTheme::Black,
];

pub struct ContrastCycle;

#[async_trait]
impl Scenario for ContrastCycle {
    fn key(&self) -> &'static str {
        "contrast"
    }

    fn description(&self) -> &'static str {
        "Theme switches leave exactly one theme class and one pressed control"
    }

    fn run_logic(&self) -> Result<()> {
        let keys = StorageKeys::default();
        let mut ctl = logic_controller(MemoryStore::new());
        for theme in THEME_ORDER {
            ctl.set_contrast_theme(theme);
            ensure!(
                ctl.page().theme_classes() == vec![theme.class_name()],
                "theme classes after {theme}: {:?}",
                ctl.page().theme_classes()
            );
            ensure!(
                ctl.page().pressed_controls() == vec![theme.id()],
                "pressed controls after {theme}: {:?}",
                ctl.page().pressed_controls()
            );
            ensure!(ctl.store().get(&keys.theme) == Some(theme.id()));
        }
        ensure!(
            ctl.page().root_classes.contains("site"),
            "unrelated class removed"
        );
        Ok(())
    }

    async fn run_browser(&self, probe: &PageProbe<'_>) -> Result<()> {
        let keys = StorageKeys::default();
        probe.open_fresh().await?;
        for theme in THEME_ORDER {
            probe.press(theme.id()).await?;
            let snap = probe.snapshot().await?;
            ensure!(
                snap.theme_classes == vec![theme.class_name().to_string()],
                "theme classes after {theme}: {:?}",
                snap.theme_classes
            );
            ensure!(
                snap.pressed.iter().all(|p| p == theme.id()),
                "pressed controls after {theme}: {:?}",
                snap.pressed
            );
            let stored = probe.storage_item(&keys.theme).await?;
            ensure!(
                stored.as_deref() == Some(theme.id()),
                "stored theme {stored:?}"
            );
        }
        Ok(())
    }
}

pub struct FontBounds;

fn font_action(adjust: FontAdjust) -> AccessibilityAction {
    AccessibilityAction::AdjustFont(adjust)
}

#[async_trait]
impl Scenario for FontBounds {
    fn key(&self) -> &'static str {
        "font"
    }

    fn description(&self) -> &'static str {
        "Font scale steps by 20 from a stored value and stays within 50..=200"
    }

    fn run_logic(&self) -> Result<()> {
        let keys = StorageKeys::default();
        let store = MemoryStore::with_entries([(keys.font_scale.as_str(), "140")]);
        let mut ctl = logic_controller(store);
        ctl.dispatch(font_action(FontAdjust::Decrease));
        ctl.dispatch(font_action(FontAdjust::Decrease));
        ensure!(ctl.preferences().effective_font_scale().percent() == 100);

        for _ in 0..10 {
            ctl.dispatch(font_action(FontAdjust::Increase));
        }
        ensure!(ctl.page().font_size.as_deref() == Some("200%"));
        for _ in 0..10 {
            ctl.dispatch(font_action(FontAdjust::Decrease));
        }
        ensure!(ctl.page().font_size.as_deref() == Some("50%"));
        ensure!(ctl.store().get(&keys.font_scale) == Some("50"));

        ctl.dispatch(font_action(FontAdjust::Reset));
        ensure!(ctl.preferences().font_scale == Some(FontScale::DEFAULT));
        Ok(())
    }

    async fn run_browser(&self, probe: &PageProbe<'_>) -> Result<()> {
        let keys = StorageKeys::default();
        probe.open_fresh().await?;
        probe.set_storage_item(&keys.font_scale, "140").await?;
        probe.reload().await?;
        ensure!(
            probe.snapshot().await?.font_size == "140%",
            "stored scale not applied"
        );

        let decrease = font_action(FontAdjust::Decrease).name();
        let increase = font_action(FontAdjust::Increase).name();
        probe.press(decrease).await?;
        probe.press(decrease).await?;
        let state = probe.state().await?;
        ensure!(
            state.font_scale == Some(100),
            "expected 100, got {:?}",
            state.font_scale
        );

        for _ in 0..10 {
            probe.press(increase).await?;
        }
        ensure!(probe.snapshot().await?.font_size == "200%");
        for _ in 0..10 {
            probe.press(decrease).await?;
        }
        ensure!(probe.snapshot().await?.font_size == "50%");
        let stored = probe.storage_item(&keys.font_scale).await?;
        ensure!(stored.as_deref() == Some("50"), "stored scale {stored:?}");
        Ok(())
    }
}

pub struct ImagesRoundTrip;

#[async_trait]
impl Scenario for ImagesRoundTrip {
    fn key(&self) -> &'static str {
        "images"
    }

    fn description(&self) -> &'static str {
        "Hiding images adds one placeholder each and showing restores display styles"
    }

    fn run_logic(&self) -> Result<()> {
        let keys = StorageKeys::default();
        let mut ctl = logic_controller(MemoryStore::new());
        let before = ctl.page().images.clone();

        ctl.dispatch(AccessibilityAction::ToggleImages);
        ensure!(ctl.page().placeholders().len() == before.len());
        ensure!(ctl.page().images.iter().all(|img| !img.is_visible()));
        ensure!(
            ctl.page()
                .placeholders()
                .contains(&"[IMAGE: Image without description]"),
            "fallback description missing"
        );
        ensure!(ctl.store().get(&keys.images_hidden) == Some("true"));

        ctl.dispatch(AccessibilityAction::ToggleImages);
        ensure!(ctl.page().placeholders().is_empty());
        for (after, orig) in ctl.page().images.iter().zip(&before) {
            ensure!(
                after.display == orig.display,
                "display not restored for {}",
                orig.src
            );
            ensure!(after.src == orig.src, "src changed for {}", orig.src);
        }
        ensure!(ctl.store().get(&keys.images_hidden) == Some("false"));
        Ok(())
    }

    async fn run_browser(&self, probe: &PageProbe<'_>) -> Result<()> {
        let toggle = AccessibilityAction::ToggleImages.name();
        probe.open_fresh().await?;
        let before = probe.snapshot().await?;
        ensure!(
            before.placeholders.is_empty(),
            "fresh page has placeholders"
        );

        probe.press(toggle).await?;
        let hidden = probe.snapshot().await?;
        ensure!(hidden.placeholders.len() == before.images.len());
        ensure!(hidden.images.iter().all(|img| img.display == "none"));

        probe.reload().await?;
        let reloaded = probe.snapshot().await?;
        ensure!(
            reloaded.placeholders.len() == before.images.len(),
            "hidden images not restored after reload"
        );

        probe.press(toggle).await?;
        let shown = probe.snapshot().await?;
        ensure!(shown.placeholders.is_empty());
        ensure!(
            shown.images == before.images,
            "images differ after round trip: {:?}",
            shown.images
        );
        Ok(())
    }
}
