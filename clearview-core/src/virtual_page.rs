//! In-memory page used to exercise the controller without a browser.
use std::collections::BTreeSet;

use crate::font::FontScale;
use crate::messages::Messages;
use crate::surface::PageSurface;
use crate::theme::ContrastTheme;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualImage {
    pub src: String,
    pub alt: Option<String>,
    /// Inline `display` style; empty means none set.
    pub display: String,
    pub saved_src: Option<String>,
    pub saved_display: Option<String>,
    pub placeholder: Option<String>,
}

impl VirtualImage {
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.display != "none"
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeControl {
    pub style: String,
    pub pressed: Option<bool>,
    pub active: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VirtualPage {
    pub root_classes: BTreeSet<String>,
    pub font_size: Option<String>,
    pub images: Vec<VirtualImage>,
    pub controls: Vec<ThemeControl>,
    pub live_region: String,
    pub announcements: Vec<String>,
    pub pending_clears: usize,
    pub location: Option<String>,
}

impl VirtualPage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_image(self, src: &str, alt: Option<&str>) -> Self {
        self.with_styled_image(src, alt, "")
    }

    #[must_use]
    pub fn with_styled_image(mut self, src: &str, alt: Option<&str>, display: &str) -> Self {
        self.images.push(VirtualImage {
            src: src.to_string(),
            alt: alt.map(str::to_string),
            display: display.to_string(),
            saved_src: None,
            saved_display: None,
            placeholder: None,
        });
        self
    }

    #[must_use]
    pub fn with_theme_control(mut self, style: &str) -> Self {
        self.controls.push(ThemeControl {
            style: style.to_string(),
            pressed: None,
            active: false,
        });
        self
    }

    #[must_use]
    pub fn with_root_class(mut self, class: &str) -> Self {
        self.root_classes.insert(class.to_string());
        self
    }

    /// Theme classes currently on the root, in class order.
    #[must_use]
    pub fn theme_classes(&self) -> Vec<&str> {
        self.root_classes
            .iter()
            .map(String::as_str)
            .filter(|class| ContrastTheme::class_names().contains(class))
            .collect()
    }

    #[must_use]
    pub fn placeholders(&self) -> Vec<&str> {
        self.images
            .iter()
            .filter_map(|img| img.placeholder.as_deref())
            .collect()
    }

    #[must_use]
    pub fn pressed_controls(&self) -> Vec<&str> {
        self.controls
            .iter()
            .filter(|c| c.pressed == Some(true))
            .map(|c| c.style.as_str())
            .collect()
    }

    /// Fire every pending clear timer.
    pub fn run_timers(&mut self) {
        if self.pending_clears > 0 {
            self.pending_clears = 0;
            self.live_region.clear();
        }
    }
}

impl PageSurface for VirtualPage {
    fn apply_theme(&mut self, theme: Option<ContrastTheme>) {
        for class in ContrastTheme::class_names() {
            self.root_classes.remove(class);
        }
        if let Some(theme) = theme {
            self.root_classes.insert(theme.class_name().to_string());
        }
    }

    fn apply_font_scale(&mut self, scale: Option<FontScale>) {
        self.font_size = scale.map(FontScale::css_value);
    }

    fn mark_active_theme(&mut self, theme: Option<ContrastTheme>) {
        for control in &mut self.controls {
            let active = theme.is_some_and(|t| control.style == t.id());
            control.active = active;
            control.pressed = Some(active);
        }
    }

    fn hide_images(&mut self, messages: &Messages) -> usize {
        let mut hidden = 0;
        for img in &mut self.images {
            if img.placeholder.is_some() {
                continue;
            }
            img.saved_src = Some(img.src.clone());
            img.saved_display = Some(img.display.clone());
            img.placeholder = Some(messages.image_placeholder(img.alt.as_deref()));
            img.display = "none".to_string();
            hidden += 1;
        }
        hidden
    }

    fn show_images(&mut self) -> usize {
        let mut restored = 0;
        for img in &mut self.images {
            if img.placeholder.take().is_none() {
                continue;
            }
            img.display = img.saved_display.clone().unwrap_or_default();
            restored += 1;
        }
        restored
    }

    fn announce(&mut self, message: &str) {
        self.live_region = message.to_string();
        self.announcements.push(message.to_string());
        self.pending_clears += 1;
    }

    fn navigate(&mut self, url: &str) {
        self.location = Some(url.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::Locale;

    #[test]
    fn hide_is_idempotent() {
        let msgs = Locale::En.messages();
        let mut page = VirtualPage::new().with_image("/a.png", Some("A"));
        assert_eq!(page.hide_images(msgs), 1);
        assert_eq!(page.hide_images(msgs), 0);
        assert_eq!(page.placeholders(), vec!["[IMAGE: A]"]);
    }

    #[test]
    fn show_restores_saved_display() {
        let msgs = Locale::En.messages();
        let mut page = VirtualPage::new().with_styled_image("/a.png", None, "inline-block");
        page.hide_images(msgs);
        assert!(!page.images[0].is_visible());
        assert_eq!(page.show_images(), 1);
        assert_eq!(page.images[0].display, "inline-block");
        assert_eq!(page.images[0].src, "/a.png");
    }

    #[test]
    fn timers_clear_live_region() {
        let mut page = VirtualPage::new();
        page.announce("one");
        page.announce("two");
        assert_eq!(page.live_region, "two");
        page.run_timers();
        assert!(page.live_region.is_empty());
        assert_eq!(page.announcements, vec!["one", "two"]);
    }
}
