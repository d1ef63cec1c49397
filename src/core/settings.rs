//! User settings record: style, language, theme and zoom levels

use serde::{Deserialize, Serialize};

use super::i18n::Language;
use super::styles::DEFAULT_STYLE;

pub const EDITOR_ZOOM_MIN: u32 = 10;
pub const EDITOR_ZOOM_MAX: u32 = 36;
pub const EDITOR_ZOOM_DEFAULT: u32 = 14;
pub const PREVIEW_ZOOM_MIN: u32 = 10;
pub const PREVIEW_ZOOM_MAX: u32 = 32;
pub const PREVIEW_ZOOM_DEFAULT: u32 = 16;
pub const ZOOM_STEP: u32 = 2;

/// Light or dark UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggle(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }

    /// Toolbar icon for the current theme
    pub fn icon(self) -> &'static str {
        match self {
            Theme::Dark => "\u{1F319}",
            Theme::Light => "\u{2600}",
        }
    }
}

/// Persisted settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub style: String,
    pub lang: Language,
    pub theme: Theme,
    pub editor_zoom: u32,
    pub preview_zoom: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            style: DEFAULT_STYLE.to_string(),
            lang: Language::detect().unwrap_or_default(),
            theme: Theme::default(),
            editor_zoom: EDITOR_ZOOM_DEFAULT,
            preview_zoom: PREVIEW_ZOOM_DEFAULT,
        }
    }
}

impl Settings {
    /// Parse stored settings, keeping defaults for anything missing or invalid
    pub fn from_json(json: &str) -> Self {
        let mut settings = Self::default();
        let Ok(serde_json::Value::Object(map)) = serde_json::from_str::<serde_json::Value>(json)
        else {
            tracing::warn!("Ignoring unreadable settings record");
            return settings;
        };

        if let Some(style) = map.get("style").and_then(|v| v.as_str()) {
            if !style.is_empty() {
                settings.style = style.to_string();
            }
        }
        if let Some(lang) = map.get("lang").and_then(|v| v.as_str()).and_then(Language::from_code) {
            settings.lang = lang;
        }
        if let Some(theme) = map.get("theme").and_then(|v| v.as_str()) {
            settings.theme = if theme == "light" { Theme::Light } else { Theme::Dark };
        }
        if let Some(zoom) = map.get("editor_zoom").and_then(|v| v.as_u64()) {
            settings.editor_zoom = clamp_zoom(zoom, EDITOR_ZOOM_MIN, EDITOR_ZOOM_MAX);
        }
        if let Some(zoom) = map.get("preview_zoom").and_then(|v| v.as_u64()) {
            settings.preview_zoom = clamp_zoom(zoom, PREVIEW_ZOOM_MIN, PREVIEW_ZOOM_MAX);
        }
        settings
    }

    pub fn editor_zoom_in(&mut self) -> bool {
        step_up(&mut self.editor_zoom, EDITOR_ZOOM_MAX)
    }

    pub fn editor_zoom_out(&mut self) -> bool {
        step_down(&mut self.editor_zoom, EDITOR_ZOOM_MIN)
    }

    pub fn editor_zoom_reset(&mut self) {
        self.editor_zoom = EDITOR_ZOOM_DEFAULT;
    }

    pub fn preview_zoom_in(&mut self) -> bool {
        step_up(&mut self.preview_zoom, PREVIEW_ZOOM_MAX)
    }

    pub fn preview_zoom_out(&mut self) -> bool {
        step_down(&mut self.preview_zoom, PREVIEW_ZOOM_MIN)
    }

    pub fn preview_zoom_reset(&mut self) {
        self.preview_zoom = PREVIEW_ZOOM_DEFAULT;
    }
}

/// Clamp before narrowing so huge stored values land on the maximum
fn clamp_zoom(zoom: u64, min: u32, max: u32) -> u32 {
    zoom.clamp(u64::from(min), u64::from(max)) as u32
}

fn step_up(value: &mut u32, max: u32) -> bool {
    if *value < max {
        *value = (*value + ZOOM_STEP).min(max);
        true
    } else {
        false
    }
}

fn step_down(value: &mut u32, min: u32) -> bool {
    if *value > min {
        *value = value.saturating_sub(ZOOM_STEP).max(min);
        true
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_bounds() {
        let mut settings = Settings::default();
        while settings.editor_zoom_in() {}
        assert_eq!(settings.editor_zoom, EDITOR_ZOOM_MAX);
        assert!(!settings.editor_zoom_in());

        while settings.preview_zoom_out() {}
        assert_eq!(settings.preview_zoom, PREVIEW_ZOOM_MIN);
        assert!(!settings.preview_zoom_out());

        settings.editor_zoom_reset();
        settings.preview_zoom_reset();
        assert_eq!(settings.editor_zoom, 14);
        assert_eq!(settings.preview_zoom, 16);
    }

    #[test]
    fn test_partial_record_keeps_defaults() {
        let settings = Settings::from_json(r#"{"style": "outlook", "theme": "light"}"#);
        assert_eq!(settings.style, "outlook");
        assert_eq!(settings.theme, Theme::Light);
        assert_eq!(settings.editor_zoom, EDITOR_ZOOM_DEFAULT);
        assert_eq!(settings.preview_zoom, PREVIEW_ZOOM_DEFAULT);
    }

    #[test]
    fn test_invalid_values_ignored() {
        let settings = Settings::from_json(r#"{"lang": "xx", "editor_zoom": 400, "style": ""}"#);
        assert_eq!(settings.lang, Settings::default().lang);
        assert_eq!(settings.editor_zoom, EDITOR_ZOOM_MAX);
        assert_eq!(settings.style, DEFAULT_STYLE);

        assert_eq!(Settings::from_json("not json"), Settings::default());
        assert_eq!(Settings::from_json("[1, 2]"), Settings::default());
    }

    #[test]
    fn test_oversized_zoom_clamps_to_max() {
        let settings = Settings::from_json(
            r#"{"editor_zoom": 4294967306, "preview_zoom": 18446744073709551615}"#,
        );
        assert_eq!(settings.editor_zoom, EDITOR_ZOOM_MAX);
        assert_eq!(settings.preview_zoom, PREVIEW_ZOOM_MAX);
    }

    #[test]
    fn test_theme_toggle_and_serde() {
        assert_eq!(Theme::Dark.toggle(), Theme::Light);
        assert_eq!(Theme::Light.toggle().toggle(), Theme::Light);
        assert_eq!(serde_json::to_string(&Theme::Light).unwrap(), "\"light\"");
    }
}
