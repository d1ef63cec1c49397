//! Markdown preview panel using egui_commonmark
//!
//! The preview is painted like a standalone document: colours and sizes come
//! from the selected style's CSS, independent of the application theme.

use eframe::egui;
use egui::{Color32, FontId, TextStyle};
use egui_commonmark::CommonMarkViewer;

use crate::app::MarkdownEditorApp;
use crate::core::styles::{find_color, parse_length_px, StyleSheet};

const PAGE_BACKGROUND: [u8; 3] = [255, 255, 255];
const PAGE_TEXT: [u8; 3] = [36, 41, 46];
const PAGE_LINK: [u8; 3] = [0, 102, 204];
const PAGE_CODE_BACKGROUND: [u8; 3] = [246, 248, 250];

/// Visual parameters extracted from a style's CSS
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewTheme {
    pub background: [u8; 3],
    pub text: [u8; 3],
    pub heading: [u8; 3],
    pub link: [u8; 3],
    pub code_background: [u8; 3],
    /// Base font size in px
    pub font_size: f32,
    /// Inline/block code size in px
    pub code_size: f32,
    pub max_width: Option<f32>,
}

fn color_of(sheet: &StyleSheet, selectors: &[&str], properties: &[&str]) -> Option<[u8; 3]> {
    selectors.iter().find_map(|selector| {
        properties
            .iter()
            .find_map(|property| sheet.get(selector, property).and_then(find_color))
    })
}

impl PreviewTheme {
    /// Derive the theme from CSS; `zoom_px` replaces the style's base font size
    pub fn from_css(css: &str, zoom_px: u32) -> Self {
        let sheet = StyleSheet::parse(css);
        let font_size = zoom_px as f32;
        let background_props = ["background-color", "background"];

        let text = color_of(&sheet, &["body", "p"], &["color"]).unwrap_or(PAGE_TEXT);
        let code_size = ["code", "pre"]
            .iter()
            .find_map(|selector| sheet.get(selector, "font-size"))
            .and_then(|value| parse_length_px(value, font_size))
            .filter(|size| *size > 0.0)
            .map(|size| size.min(font_size))
            .unwrap_or(font_size * 0.9);

        Self {
            background: color_of(&sheet, &["body", "html"], &background_props)
                .unwrap_or(PAGE_BACKGROUND),
            text,
            heading: color_of(&sheet, &["h1", "h2", "h3"], &["color"]).unwrap_or(text),
            link: color_of(&sheet, &["a"], &["color"]).unwrap_or(PAGE_LINK),
            code_background: color_of(&sheet, &["code", "pre"], &background_props)
                .unwrap_or(PAGE_CODE_BACKGROUND),
            font_size,
            code_size,
            max_width: sheet
                .get("body", "max-width")
                .and_then(|value| parse_length_px(value, font_size)),
        }
    }

    fn color(rgb: [u8; 3]) -> Color32 {
        Color32::from_rgb(rgb[0], rgb[1], rgb[2])
    }

    fn is_dark(&self) -> bool {
        let [r, g, b] = self.background;
        (r as u32 * 299 + g as u32 * 587 + b as u32 * 114) / 1000 < 128
    }

    /// Apply to the preview's child UI only
    pub fn apply(&self, style: &mut egui::Style) {
        let visuals = &mut style.visuals;
        visuals.dark_mode = self.is_dark();
        visuals.override_text_color = None;
        visuals.panel_fill = Self::color(self.background);
        visuals.extreme_bg_color = Self::color(self.code_background);
        visuals.code_bg_color = Self::color(self.code_background);
        visuals.hyperlink_color = Self::color(self.link);
        visuals.widgets.noninteractive.fg_stroke.color = Self::color(self.text);
        // Strong text (headings)
        visuals.widgets.active.fg_stroke.color = Self::color(self.heading);

        style
            .text_styles
            .insert(TextStyle::Body, FontId::proportional(self.font_size));
        style
            .text_styles
            .insert(TextStyle::Heading, FontId::proportional(self.font_size * 2.0));
        style
            .text_styles
            .insert(TextStyle::Small, FontId::proportional(self.font_size * 0.8));
        style
            .text_styles
            .insert(TextStyle::Monospace, FontId::monospace(self.code_size));
        style
            .text_styles
            .insert(TextStyle::Button, FontId::proportional(self.font_size));
    }
}

/// Markdown preview panel
pub struct PreviewPanel;

impl PreviewPanel {
    /// Show the preview of the last debounced render
    pub fn show(ui: &mut egui::Ui, app: &mut MarkdownEditorApp) {
        let theme = app.preview_theme();
        let frame = egui::Frame::new()
            .fill(PreviewTheme::color(theme.background))
            .inner_margin(egui::Margin::same(16));

        frame.show(ui, |ui| {
            ui.set_min_size(ui.available_size());
            theme.apply(ui.style_mut());

            let mut scroll = egui::ScrollArea::vertical()
                .id_salt("preview_scroll")
                .auto_shrink([false, false]);
            if let Some(offset) = app.scroll_sync.take_target(crate::ui::scroll_sync::Pane::Preview) {
                scroll = scroll.vertical_scroll_offset(offset);
            }

            let output = scroll.show(ui, |ui| {
                let mut viewer = CommonMarkViewer::new()
                    .max_image_width(Some(ui.available_width() as usize))
                    .show_alt_text_on_hover(true);
                if let Some(width) = theme.max_width {
                    viewer = viewer.default_width(Some(width as usize));
                }
                viewer.show(ui, &mut app.commonmark_cache, &app.preview_source);
            });

            app.scroll_sync.record(
                crate::ui::scroll_sync::Pane::Preview,
                output.state.offset.y,
                output.content_size.y,
                output.inner_rect.height(),
            );
        });
    }
}
