use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PreferenceError;

/// Mutually exclusive high-contrast color schemes.
///
/// The identifier doubles as the CSS class put on the document root and as
/// the persisted value, so it must stay stable across releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ContrastTheme {
    /// Black text on a white background.
    #[serde(rename = "contrast-white")]
    White,
    /// White text on a black background.
    #[serde(rename = "contrast-black")]
    Black,
    /// Dark blue text on a beige background.
    #[serde(rename = "contrast-blue")]
    Blue,
}

impl ContrastTheme {
    pub const ALL: [Self; 3] = [Self::White, Self::Black, Self::Blue];

    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::White => "contrast-white",
            Self::Black => "contrast-black",
            Self::Blue => "contrast-blue",
        }
    }

    /// CSS class applied to the document root while the theme is active.
    #[must_use]
    pub const fn class_name(self) -> &'static str {
        self.id()
    }

    /// Every theme class, for clearing before a new one is applied.
    #[must_use]
    pub fn class_names() -> [&'static str; 3] {
        Self::ALL.map(Self::class_name)
    }
}

impl fmt::Display for ContrastTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ContrastTheme {
    type Err = PreferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|theme| theme.id() == s.trim())
            .ok_or_else(|| PreferenceError::UnknownTheme(s.to_string()))
    }
}
