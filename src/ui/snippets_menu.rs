//! Snippet insertion menu

use eframe::egui;

use crate::core::i18n::{t, Language};
use crate::core::snippets::grouped;

pub struct SnippetsMenu;

impl SnippetsMenu {
    /// Draw the menu button; returns the id of the chosen snippet
    pub fn show(ui: &mut egui::Ui, lang: Language) -> Option<&'static str> {
        let mut chosen = None;
        ui.menu_button(format!("\u{2795} {}", t(lang, "snippets.title")), |ui| {
            for (group, items) in grouped() {
                ui.menu_button(t(lang, group.label_key()), |ui| {
                    for snippet in items {
                        if ui.button(snippet.label(lang)).clicked() {
                            chosen = Some(snippet.id);
                            ui.close();
                        }
                    }
                });
            }
        });
        chosen
    }
}
