use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PreferenceError;

/// Root font-size as a percentage of the page default, always within
/// [`FontScale::MIN`, `FontScale::MAX`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "u16")]
pub struct FontScale(u16);

/// One press of a font-size control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontAdjust {
    Increase,
    Decrease,
    Reset,
}

impl FontScale {
    pub const MIN: u16 = 50;
    pub const MAX: u16 = 200;
    pub const STEP: u16 = 20;
    pub const DEFAULT: Self = Self(100);

    /// Build a scale from any integer, clamping into range.
    #[must_use]
    pub fn new(percent: i64) -> Self {
        let clamped = percent.clamp(i64::from(Self::MIN), i64::from(Self::MAX));
        // Range fits in u16 after clamping.
        Self(u16::try_from(clamped).unwrap_or(Self::DEFAULT.0))
    }

    #[must_use]
    pub const fn percent(self) -> u16 {
        self.0
    }

    /// Apply a control press; the result is clamped regardless of the
    /// starting point.
    #[must_use]
    pub fn adjust(self, adjust: FontAdjust) -> Self {
        let current = i64::from(self.0);
        let step = i64::from(Self::STEP);
        match adjust {
            FontAdjust::Increase => Self::new(current + step),
            FontAdjust::Decrease => Self::new(current - step),
            FontAdjust::Reset => Self::DEFAULT,
        }
    }

    /// Value written to the root element's `font-size` style.
    #[must_use]
    pub fn css_value(self) -> String {
        format!("{}%", self.0)
    }
}

impl Default for FontScale {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<i64> for FontScale {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl From<FontScale> for u16 {
    fn from(value: FontScale) -> Self {
        value.0
    }
}

impl fmt::Display for FontScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for FontScale {
    type Err = PreferenceError;

    /// Accepts `"140"` or `"140%"`; out-of-range numbers are clamped.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed.strip_suffix('%').unwrap_or(trimmed).trim_end();
        digits
            .parse::<i64>()
            .map(Self::new)
            .map_err(|_| PreferenceError::InvalidFontScale(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_on_construction() {
        assert_eq!(FontScale::new(10).percent(), 50);
        assert_eq!(FontScale::new(999).percent(), 200);
        assert_eq!(FontScale::new(-5_000).percent(), 50);
        assert_eq!(FontScale::new(120).percent(), 120);
    }

    #[test]
    fn decrease_from_sixty_stops_at_minimum() {
        let scale = FontScale::new(60).adjust(FontAdjust::Decrease);
        assert_eq!(scale.percent(), 50);
        assert_eq!(scale.adjust(FontAdjust::Decrease).percent(), 50);
    }

    #[test]
    fn increase_stops_at_maximum() {
        let mut scale = FontScale::DEFAULT;
        for _ in 0..10 {
            scale = scale.adjust(FontAdjust::Increase);
        }
        assert_eq!(scale.percent(), 200);
    }

    #[test]
    fn reset_returns_to_default() {
        assert_eq!(
            FontScale::new(180).adjust(FontAdjust::Reset),
            FontScale::DEFAULT
        );
    }

    #[test]
    fn parses_stored_text() {
        assert_eq!("140".parse::<FontScale>().unwrap().percent(), 140);
        assert_eq!(" 80% ".parse::<FontScale>().unwrap().percent(), 80);
        assert_eq!("450".parse::<FontScale>().unwrap().percent(), 200);
        assert!("large".parse::<FontScale>().is_err());
        assert!("".parse::<FontScale>().is_err());
    }

    #[test]
    fn deserializing_clamps_into_range() {
        let scale: FontScale = serde_json::from_str("260").unwrap();
        assert_eq!(scale.percent(), 200);
        let scale: FontScale = serde_json::from_str("-40").unwrap();
        assert_eq!(scale.percent(), 50);
        assert_eq!(serde_json::to_string(&FontScale::new(140)).unwrap(), "140");
    }

    #[test]
    fn css_value_has_percent_suffix() {
        assert_eq!(FontScale::new(160).css_value(), "160%");
    }
}
