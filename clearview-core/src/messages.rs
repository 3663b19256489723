//! Announcement and placeholder text.
use serde::{Deserialize, Serialize};

use crate::font::FontScale;
use crate::theme::ContrastTheme;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Ru,
    En,
}

impl Locale {
    /// Pick a locale from an `<html lang>` tag such as `en-GB`.
    /// Anything that is not English falls back to the default.
    #[must_use]
    pub fn from_lang_tag(tag: &str) -> Self {
        let primary = tag
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match primary.as_str() {
            "en" => Self::En,
            _ => Self::Ru,
        }
    }

    #[must_use]
    pub const fn messages(self) -> &'static Messages {
        match self {
            Self::Ru => &RU,
            Self::En => &EN,
        }
    }
}

/// Static catalogue for one locale.
#[derive(Debug, PartialEq, Eq)]
pub struct Messages {
    pub theme_white: &'static str,
    pub theme_black: &'static str,
    pub theme_blue: &'static str,
    pub contrast_enabled: &'static str,
    pub font_size_set: &'static str,
    pub font_reset: &'static str,
    pub images_on: &'static str,
    pub images_off: &'static str,
    pub image_label: &'static str,
    pub image_fallback: &'static str,
    pub table_caption: &'static str,
    pub form_label: &'static str,
    pub panel_title: &'static str,
    pub font_increase: &'static str,
    pub font_decrease: &'static str,
    pub font_reset_button: &'static str,
    pub toggle_images: &'static str,
    pub standard_version: &'static str,
}

const RU: Messages = Messages {
    theme_white: "черный текст на белом фоне",
    theme_black: "белый текст на черном фоне",
    theme_blue: "синий текст на бежевом фоне",
    contrast_enabled: "Включен режим {theme}",
    font_size_set: "Размер шрифта установлен на {n} процентов",
    font_reset: "Размер шрифта сброшен",
    images_on: "Изображения включены",
    images_off: "Изображения выключены. Используются текстовые описания.",
    image_label: "ИЗОБРАЖЕНИЕ",
    image_fallback: "Изображение без описания",
    table_caption: "Таблица данных",
    form_label: "Форма",
    panel_title: "Настройки доступности",
    font_increase: "Увеличить шрифт",
    font_decrease: "Уменьшить шрифт",
    font_reset_button: "Обычный шрифт",
    toggle_images: "Изображения",
    standard_version: "Обычная версия сайта",
};

const EN: Messages = Messages {
    theme_white: "black text on a white background",
    theme_black: "white text on a black background",
    theme_blue: "blue text on a beige background",
    contrast_enabled: "Contrast mode enabled: {theme}",
    font_size_set: "Font size set to {n} percent",
    font_reset: "Font size reset",
    images_on: "Images enabled",
    images_off: "Images disabled. Text descriptions are used instead.",
    image_label: "IMAGE",
    image_fallback: "Image without description",
    table_caption: "Data table",
    form_label: "Form",
    panel_title: "Accessibility settings",
    font_increase: "Larger text",
    font_decrease: "Smaller text",
    font_reset_button: "Default text size",
    toggle_images: "Images",
    standard_version: "Standard version",
};

impl Messages {
    #[must_use]
    pub const fn theme_description(&self, theme: ContrastTheme) -> &'static str {
        match theme {
            ContrastTheme::White => self.theme_white,
            ContrastTheme::Black => self.theme_black,
            ContrastTheme::Blue => self.theme_blue,
        }
    }

    #[must_use]
    pub fn contrast_changed(&self, theme: ContrastTheme) -> String {
        self.contrast_enabled
            .replace("{theme}", self.theme_description(theme))
    }

    #[must_use]
    pub fn font_changed(&self, scale: FontScale) -> String {
        self.font_size_set.replace("{n}", &scale.to_string())
    }

    #[must_use]
    pub const fn images_changed(&self, hidden: bool) -> &'static str {
        if hidden {
            self.images_off
        } else {
            self.images_on
        }
    }

    /// Placeholder text for a hidden image; blank alt text counts as
    /// missing.
    #[must_use]
    pub fn image_placeholder(&self, alt: Option<&str>) -> String {
        let description = alt
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .unwrap_or(self.image_fallback);
        format!("[{}: {description}]", self.image_label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lang_tag_selects_locale() {
        assert_eq!(Locale::from_lang_tag("en"), Locale::En);
        assert_eq!(Locale::from_lang_tag("EN-gb"), Locale::En);
        assert_eq!(Locale::from_lang_tag("ru-RU"), Locale::Ru);
        assert_eq!(Locale::from_lang_tag(""), Locale::Ru);
        assert_eq!(Locale::from_lang_tag("de"), Locale::Ru);
    }

    #[test]
    fn placeholder_falls_back_for_missing_or_blank_alt() {
        let msgs = Locale::En.messages();
        assert_eq!(
            msgs.image_placeholder(None),
            "[IMAGE: Image without description]"
        );
        assert_eq!(
            msgs.image_placeholder(Some("  ")),
            "[IMAGE: Image without description]"
        );
        assert_eq!(msgs.image_placeholder(Some("Logo")), "[IMAGE: Logo]");
    }

    #[test]
    fn font_message_includes_number() {
        let text = Locale::Ru.messages().font_changed(FontScale::new(140));
        assert_eq!(text, "Размер шрифта установлен на 140 процентов");
    }

    #[test]
    fn contrast_message_names_theme() {
        let text = Locale::En.messages().contrast_changed(ContrastTheme::Black);
        assert_eq!(
            text,
            "Contrast mode enabled: white text on a black background"
        );
    }
}
