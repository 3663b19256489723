use crate::action::AccessibilityAction;
use crate::config::ClearviewConfig;
use crate::font::{FontAdjust, FontScale};
use crate::messages::{Locale, Messages};
use crate::prefs::AccessibilityPreferences;
use crate::storage::PreferenceStore;
use crate::surface::PageSurface;
use crate::theme::ContrastTheme;

/// Keeps the persisted preferences, the rendered page and the screen
/// reader announcements consistent with each other.
pub struct AccessibilityController<S, P>
where
    S: PreferenceStore,
    P: PageSurface,
{
    store: S,
    page: P,
    config: ClearviewConfig,
    locale: Locale,
    prefs: AccessibilityPreferences,
}

impl<S, P> AccessibilityController<S, P>
where
    S: PreferenceStore,
    P: PageSurface,
{
    /// Create a controller. Nothing is read or rendered until
    /// [`Self::initialize`].
    pub fn new(store: S, page: P, config: ClearviewConfig) -> Self {
        let locale = config.locale.unwrap_or_default();
        Self {
            store,
            page,
            config,
            locale,
            prefs: AccessibilityPreferences::default(),
        }
    }

    #[must_use]
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    #[must_use]
    pub const fn preferences(&self) -> &AccessibilityPreferences {
        &self.prefs
    }

    #[must_use]
    pub const fn page(&self) -> &P {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut P {
        &mut self.page
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub const fn config(&self) -> &ClearviewConfig {
        &self.config
    }

    #[must_use]
    pub const fn locale(&self) -> Locale {
        self.locale
    }

    #[must_use]
    pub const fn messages(&self) -> &'static Messages {
        self.locale.messages()
    }

    /// Load the stored preferences and render them onto the page.
    pub fn initialize(&mut self) {
        self.prefs = AccessibilityPreferences::load(&self.store, &self.config.keys);
        log::debug!("loaded accessibility preferences: {:?}", self.prefs);

        self.page.apply_theme(self.prefs.contrast_theme);
        self.page.mark_active_theme(self.prefs.contrast_theme);
        self.page.apply_font_scale(self.prefs.font_scale);
        if self.prefs.images_hidden {
            self.page.hide_images(self.locale.messages());
        } else {
            self.page.show_images();
        }
    }

    /// Switch to `theme`, replacing any other theme class, persist it and
    /// announce the change.
    pub fn set_contrast_theme(&mut self, theme: ContrastTheme) {
        self.prefs.select_theme(theme);
        self.page.apply_theme(Some(theme));
        self.persist(&self.config.keys.theme.clone(), theme.id());
        self.page.mark_active_theme(Some(theme));
        let message = self.messages().contrast_changed(theme);
        self.announce(&message);
    }

    /// Apply a font control press and return the resulting scale.
    pub fn adjust_font_scale(&mut self, adjust: FontAdjust) -> FontScale {
        let scale = self.prefs.adjust_font(adjust);
        self.page.apply_font_scale(Some(scale));
        self.persist(&self.config.keys.font_scale.clone(), &scale.to_string());
        let message = match adjust {
            FontAdjust::Reset => self.messages().font_reset.to_string(),
            FontAdjust::Increase | FontAdjust::Decrease => self.messages().font_changed(scale),
        };
        self.announce(&message);
        scale
    }

    /// Hide every image behind a text placeholder, or bring them back.
    ///
    /// Repeating the current state is harmless: already hidden images are
    /// skipped, and the flag is still persisted and announced. Returns
    /// whether the flag changed.
    pub fn set_images_hidden(&mut self, hidden: bool) -> bool {
        let changed = self.prefs.set_images_hidden(hidden);
        let touched = if hidden {
            self.page.hide_images(self.locale.messages())
        } else {
            self.page.show_images()
        };
        log::debug!("images hidden={hidden} (changed={changed}), {touched} image(s) updated");
        self.persist(
            &self.config.keys.images_hidden.clone(),
            self.prefs.images_hidden_value(),
        );
        self.announce(self.messages().images_changed(hidden));
        changed
    }

    /// Flip the image flag.
    pub fn toggle_images(&mut self) {
        self.set_images_hidden(!self.prefs.images_hidden);
    }

    /// Speak `message` through the live region.
    pub fn announce(&mut self, message: &str) {
        self.page.announce(message);
    }

    /// Forget every stored preference and leave for the standard site.
    pub fn reset_to_standard(&mut self) {
        for key in self.config.keys.all() {
            if let Err(err) = self.store.remove(key) {
                log::warn!("failed to remove preference {key}: {err}");
            }
        }
        self.prefs = AccessibilityPreferences::default();
        self.page.navigate(&self.config.standard_url);
    }

    /// Route a control press to the matching operation.
    pub fn dispatch(&mut self, action: AccessibilityAction) {
        log::debug!("dispatching accessibility action {action}");
        match action {
            AccessibilityAction::SetContrast(theme) => self.set_contrast_theme(theme),
            AccessibilityAction::AdjustFont(adjust) => {
                self.adjust_font_scale(adjust);
            }
            AccessibilityAction::ToggleImages => self.toggle_images(),
            AccessibilityAction::StandardVersion => self.reset_to_standard(),
        }
    }

    fn persist(&mut self, key: &str, value: &str) {
        if let Err(err) = self.store.write(key, value) {
            log::warn!("failed to persist preference {key}: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use crate::virtual_page::VirtualPage;

    fn controller(
        store: MemoryStore,
        page: VirtualPage,
    ) -> AccessibilityController<MemoryStore, VirtualPage> {
        AccessibilityController::new(store, page, ClearviewConfig::default())
            .with_locale(Locale::En)
    }

    #[test]
    fn contrast_selection_persists_and_announces() {
        let page = VirtualPage::new()
            .with_theme_control("contrast-white")
            .with_theme_control("contrast-black");
        let mut ctl = controller(MemoryStore::new(), page);
        ctl.initialize();
        ctl.set_contrast_theme(ContrastTheme::Black);

        assert_eq!(
            ctl.store().get("accessibilityStyle"),
            Some("contrast-black")
        );
        assert_eq!(ctl.page().theme_classes(), vec!["contrast-black"]);
        assert_eq!(ctl.page().pressed_controls(), vec!["contrast-black"]);
        assert!(
            ctl.page()
                .live_region
                .contains("white text on a black background")
        );
    }

    #[test]
    fn font_reset_announces_reset() {
        let mut ctl = controller(
            MemoryStore::with_entries([("accessibilityFontSize", "180")]),
            VirtualPage::new(),
        );
        ctl.initialize();
        assert_eq!(ctl.page().font_size.as_deref(), Some("180%"));
        assert_eq!(ctl.adjust_font_scale(FontAdjust::Reset), FontScale::DEFAULT);
        assert_eq!(ctl.page().live_region, "Font size reset");
        assert_eq!(ctl.store().get("accessibilityFontSize"), Some("100"));
    }

    #[test]
    fn toggle_flips_image_flag() {
        let mut ctl = controller(
            MemoryStore::new(),
            VirtualPage::new().with_image("/a.png", None),
        );
        ctl.initialize();
        ctl.dispatch(AccessibilityAction::ToggleImages);
        assert!(ctl.preferences().images_hidden);
        assert_eq!(ctl.store().get("accessibilityImagesHidden"), Some("true"));
        ctl.dispatch(AccessibilityAction::ToggleImages);
        assert!(!ctl.preferences().images_hidden);
        assert_eq!(ctl.store().get("accessibilityImagesHidden"), Some("false"));
        assert!(ctl.page().placeholders().is_empty());
    }

    #[test]
    fn repeated_hide_reports_no_change() {
        let mut ctl = controller(
            MemoryStore::new(),
            VirtualPage::new().with_image("/a.png", Some("Logo")),
        );
        ctl.initialize();
        assert!(ctl.set_images_hidden(true));
        assert!(!ctl.set_images_hidden(true));
        assert_eq!(ctl.page().placeholders(), vec!["[IMAGE: Logo]"]);
        assert_eq!(ctl.page().announcements.len(), 2);
        assert!(ctl.set_images_hidden(false));
    }

    #[test]
    fn configured_locale_is_used_by_default() {
        let config = ClearviewConfig {
            locale: Some(Locale::En),
            ..ClearviewConfig::default()
        };
        let mut ctl = AccessibilityController::new(MemoryStore::new(), VirtualPage::new(), config);
        ctl.set_images_hidden(false);
        assert_eq!(ctl.page().live_region, "Images enabled");
    }
}
