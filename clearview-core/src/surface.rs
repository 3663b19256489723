use crate::font::FontScale;
use crate::messages::Messages;
use crate::theme::ContrastTheme;

/// The rendered page the controller keeps in sync with the preferences.
///
/// Every method must be idempotent: applying the same state twice leaves
/// the page as it was after the first call.
pub trait PageSurface {
    /// Leave exactly the class for `theme` (or no theme class) on the
    /// document root.
    fn apply_theme(&mut self, theme: Option<ContrastTheme>);

    /// Write the root font-size; `None` restores the page default.
    fn apply_font_scale(&mut self, scale: Option<FontScale>);

    /// Reflect the active theme on every control carrying
    /// `data-contrast-style`.
    fn mark_active_theme(&mut self, theme: Option<ContrastTheme>);

    /// Hide every visible image behind a textual placeholder, recording
    /// its display style first. Returns how many images were hidden now.
    fn hide_images(&mut self, messages: &Messages) -> usize;

    /// Drop every placeholder and restore the recorded display styles.
    /// Returns how many images were restored.
    fn show_images(&mut self) -> usize;

    /// Speak `message` through the live region and schedule its clearing.
    fn announce(&mut self, message: &str);

    fn navigate(&mut self, url: &str);
}
