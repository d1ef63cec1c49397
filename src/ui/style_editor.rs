//! Style editor window
//!
//! Edits a parsed copy of the selected style. The draft is previewed live
//! while the window is open; nothing changes until Apply or Save as.

use std::collections::HashMap;

use eframe::egui;

use crate::core::i18n::{t, Language};
use crate::core::styles::{
    parse_color, PropertyKind, StyleProperty, StyleSheet, ADVANCED_PROPERTIES, BASIC_PROPERTIES,
    STYLE_ELEMENTS,
};

/// What the user asked for when leaving the editor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleEditorAction {
    /// Replace the current style's CSS
    Apply(String),
    /// Store the draft as a new custom style and select it
    SaveAs { name: String, css: String },
    /// Delete the current (custom) style
    Delete,
}

#[derive(Debug, Default)]
pub struct StyleEditor {
    open: bool,
    sheet: StyleSheet,
    element: usize,
    advanced: bool,
    naming: Option<String>,
    /// Text typed per (selector, property), kept untrimmed while editing
    fields: HashMap<(&'static str, &'static str), String>,
}

impl StyleEditor {
    pub fn open(&mut self, css: &str) {
        self.sheet = StyleSheet::parse(css);
        self.element = 0;
        self.advanced = false;
        self.naming = None;
        self.fields.clear();
        self.open = true;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn close(&mut self) {
        self.open = false;
        self.naming = None;
    }

    /// CSS of the draft, while the editor is open
    pub fn draft_css(&self) -> Option<String> {
        self.open.then(|| self.sheet.to_css())
    }

    fn selector(&self) -> &'static str {
        STYLE_ELEMENTS
            .get(self.element)
            .map(|(selector, _)| *selector)
            .unwrap_or("body")
    }

    pub fn show(
        &mut self,
        ctx: &egui::Context,
        lang: Language,
        can_delete: bool,
    ) -> Option<StyleEditorAction> {
        if !self.open {
            return None;
        }

        let mut action = None;
        let mut open = self.open;
        egui::Window::new(t(lang, "style.editor_title"))
            .open(&mut open)
            .collapsible(false)
            .resizable(true)
            .default_width(380.0)
            .show(ctx, |ui| {
                self.element_and_mode(ui, lang);
                ui.separator();

                egui::ScrollArea::vertical()
                    .max_height(360.0)
                    .show(ui, |ui| {
                        egui::Grid::new("style_properties")
                            .num_columns(2)
                            .spacing([12.0, 6.0])
                            .show(ui, |ui| {
                                let selector = self.selector();
                                let properties: Vec<&StyleProperty> = if self.advanced {
                                    BASIC_PROPERTIES.iter().chain(ADVANCED_PROPERTIES).collect()
                                } else {
                                    BASIC_PROPERTIES.iter().collect()
                                };
                                for property in properties {
                                    ui.label(t(lang, property.label_key));
                                    self.property_input(ui, selector, property);
                                    ui.end_row();
                                }
                            });
                    });

                ui.separator();
                action = self.buttons(ui, lang, can_delete);
            });

        if !open || action.is_some() {
            self.close();
        }
        action
    }

    fn element_and_mode(&mut self, ui: &mut egui::Ui, lang: Language) {
        egui::Grid::new("style_element").num_columns(2).show(ui, |ui| {
            ui.label(t(lang, "style.element"));
            let current = STYLE_ELEMENTS
                .get(self.element)
                .map(|(_, label)| *label)
                .unwrap_or_default();
            egui::ComboBox::from_id_salt("style_element_select")
                .selected_text(current)
                .show_ui(ui, |ui| {
                    for (index, (_, label)) in STYLE_ELEMENTS.iter().enumerate() {
                        ui.selectable_value(&mut self.element, index, *label);
                    }
                });
            ui.end_row();

            ui.label(t(lang, "style.mode"));
            ui.horizontal(|ui| {
                ui.selectable_value(&mut self.advanced, false, t(lang, "style.basic"));
                ui.selectable_value(&mut self.advanced, true, t(lang, "style.advanced"));
            });
            ui.end_row();
        });
    }

    /// Edit buffer for a property, seeded from the sheet on first use
    fn field(&mut self, selector: &'static str, property: &'static str) -> &mut String {
        let sheet = &self.sheet;
        self.fields
            .entry((selector, property))
            .or_insert_with(|| sheet.get(selector, property).unwrap_or_default().to_string())
    }

    /// Write the edit buffer through to the sheet
    fn commit(&mut self, selector: &'static str, property: &'static str) {
        if let Some(value) = self.fields.get(&(selector, property)) {
            self.sheet.set(selector, property, value);
        }
    }

    fn property_input(
        &mut self,
        ui: &mut egui::Ui,
        selector: &'static str,
        property: &StyleProperty,
    ) {
        let name = property.name;
        let changed = match property.kind {
            PropertyKind::Choice(options) => {
                let value = self.field(selector, name);
                let before = value.clone();
                egui::ComboBox::from_id_salt(("style_prop", name))
                    .selected_text(value.clone())
                    .width(200.0)
                    .show_ui(ui, |ui| {
                        ui.selectable_value(value, String::new(), "");
                        for option in options {
                            ui.selectable_value(value, option.to_string(), *option);
                        }
                    });
                *value != before
            }
            PropertyKind::Text { placeholder } => {
                let value = self.field(selector, name);
                ui.add(
                    egui::TextEdit::singleline(value)
                        .hint_text(placeholder)
                        .desired_width(200.0),
                )
                .changed()
            }
            PropertyKind::Color => {
                let value = self.field(selector, name);
                ui.horizontal(|ui| {
                    let mut changed = ui
                        .add(
                            egui::TextEdit::singleline(value)
                                .hint_text("#000000")
                                .desired_width(120.0),
                        )
                        .changed();
                    let mut rgb = parse_color(value).unwrap_or([0, 0, 0]);
                    if egui::color_picker::color_edit_button_srgb(ui, &mut rgb).changed() {
                        *value = format!("#{:02x}{:02x}{:02x}", rgb[0], rgb[1], rgb[2]);
                        changed = true;
                    }
                    changed
                })
                .inner
            }
        };

        if changed {
            self.commit(selector, name);
        }
    }

    fn buttons(
        &mut self,
        ui: &mut egui::Ui,
        lang: Language,
        can_delete: bool,
    ) -> Option<StyleEditorAction> {
        if let Some(name) = self.naming.as_mut() {
            let mut action = None;
            ui.horizontal(|ui| {
                ui.label(t(lang, "style.entername"));
                let response = ui.text_edit_singleline(name);
                let submitted =
                    response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                let name = name.trim().to_string();
                if (ui.button(t(lang, "dialog.ok")).clicked() || submitted) && !name.is_empty() {
                    action = Some(StyleEditorAction::SaveAs {
                        name,
                        css: self.sheet.to_css(),
                    });
                }
            });
            if ui.button(t(lang, "style.cancel")).clicked() {
                self.naming = None;
            }
            return action;
        }

        let mut action = None;
        ui.horizontal(|ui| {
            if ui.button(t(lang, "style.apply")).clicked() {
                action = Some(StyleEditorAction::Apply(self.sheet.to_css()));
            }
            if ui.button(t(lang, "style.save_as")).clicked() {
                self.naming = Some(default_style_name(lang).to_string());
            }
            if can_delete && ui.button(t(lang, "style.delete")).clicked() {
                action = Some(StyleEditorAction::Delete);
            }
            if ui.button(t(lang, "style.cancel")).clicked() {
                self.open = false;
            }
        });
        action
    }
}

fn default_style_name(lang: Language) -> &'static str {
    match lang {
        Language::Es => "Mi Estilo",
        Language::En => "My Style",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_only_while_open() {
        let mut editor = StyleEditor::default();
        assert_eq!(editor.draft_css(), None);

        editor.open("body { color: red; } h1 { margin: 0; }");
        assert_eq!(
            editor.draft_css().as_deref(),
            Some("body { color: red; } h1 { margin: 0; } ")
        );
        assert_eq!(editor.selector(), "body");

        editor.close();
        assert!(!editor.is_open());
        assert_eq!(editor.draft_css(), None);
    }

    #[test]
    fn test_typed_spaces_survive_between_frames() {
        let mut editor = StyleEditor::default();
        editor.open("body { margin: 0; }");

        for c in "1px solid #ccc".chars() {
            editor.field("body", "border").push(c);
            editor.commit("body", "border");
        }

        assert_eq!(editor.field("body", "border").as_str(), "1px solid #ccc");
        assert_eq!(editor.sheet.get("body", "border"), Some("1px solid #ccc"));
    }

    #[test]
    fn test_trailing_space_kept_in_field_only() {
        let mut editor = StyleEditor::default();
        editor.open("h1 { margin: 0; }");

        editor.field("h1", "margin").push_str(" 0 ");
        editor.commit("h1", "margin");

        assert_eq!(editor.field("h1", "margin").as_str(), "0 0 ");
        assert_eq!(editor.sheet.get("h1", "margin"), Some("0 0"));

        editor.open("h1 { margin: 2px; }");
        assert_eq!(editor.field("h1", "margin").as_str(), "2px");
    }
}
