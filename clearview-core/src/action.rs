use std::fmt;
use std::str::FromStr;

use crate::error::PreferenceError;
use crate::font::FontAdjust;
use crate::theme::ContrastTheme;

/// Closed vocabulary of `data-accessibility-action` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessibilityAction {
    SetContrast(ContrastTheme),
    AdjustFont(FontAdjust),
    ToggleImages,
    StandardVersion,
}

impl AccessibilityAction {
    pub const ALL: [Self; 8] = [
        Self::SetContrast(ContrastTheme::White),
        Self::SetContrast(ContrastTheme::Black),
        Self::SetContrast(ContrastTheme::Blue),
        Self::AdjustFont(FontAdjust::Increase),
        Self::AdjustFont(FontAdjust::Decrease),
        Self::AdjustFont(FontAdjust::Reset),
        Self::ToggleImages,
        Self::StandardVersion,
    ];

    /// Attribute value naming this action in markup.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::SetContrast(theme) => theme.id(),
            Self::AdjustFont(FontAdjust::Increase) => "font-increase",
            Self::AdjustFont(FontAdjust::Decrease) => "font-decrease",
            Self::AdjustFont(FontAdjust::Reset) => "font-reset",
            Self::ToggleImages => "toggle-images",
            Self::StandardVersion => "standard-version",
        }
    }
}

impl fmt::Display for AccessibilityAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AccessibilityAction {
    type Err = PreferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL
            .into_iter()
            .find(|action| action.name() == name)
            .ok_or_else(|| PreferenceError::UnknownAction(s.to_string()))
    }
}
