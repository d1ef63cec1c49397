//! Find/replace bar

use std::ops::Range;

use eframe::egui;

use crate::core::i18n::{t, tr, Language};
use crate::core::search::SearchState;

/// Result of one frame of the find bar
#[derive(Debug, Default)]
pub struct FindOutput {
    /// Match to select in the editor
    pub select: Option<Range<usize>>,
    /// The text was changed by a replacement
    pub edited: bool,
}

#[derive(Debug, Default)]
pub struct FindBar {
    pub visible: bool,
    pub show_replace: bool,
    focus_requested: bool,
    search: SearchState,
}

impl FindBar {
    /// Open the bar, optionally with the replace row
    pub fn open(&mut self, replace: bool) {
        self.visible = true;
        self.show_replace = replace;
        self.focus_requested = true;
    }

    pub fn close(&mut self) {
        self.visible = false;
    }

    pub fn show(&mut self, ui: &mut egui::Ui, lang: Language, text: &mut String) -> FindOutput {
        let mut output = FindOutput::default();
        if !self.visible {
            return output;
        }

        ui.horizontal(|ui| {
            let response = ui.add(
                egui::TextEdit::singleline(&mut self.search.query)
                    .hint_text(t(lang, "find.placeholder"))
                    .desired_width(220.0),
            );
            if self.focus_requested {
                response.request_focus();
                self.focus_requested = false;
            }
            let case_changed = ui
                .toggle_value(&mut self.search.case_sensitive, t(lang, "find.case_sensitive"))
                .changed();

            if response.changed() || case_changed {
                self.search.update(text);
                output.select = self.search.current();
            }

            let enter = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            let shift = ui.input(|i| i.modifiers.shift);
            if enter {
                response.request_focus();
            }
            if ui.button("\u{2191}").clicked() || (enter && shift) {
                output.select = self.search.prev();
            }
            if ui.button("\u{2193}").clicked() || (enter && !shift) {
                output.select = self.search.next();
            }

            match self.search.counter() {
                Some((current, total)) => ui.label(tr(
                    lang,
                    "find.count",
                    &[("current", &current.to_string()), ("total", &total.to_string())],
                )),
                None if self.search.query.is_empty() => ui.label(""),
                None => ui.weak(t(lang, "find.no_results")),
            };

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("\u{2715}").clicked() {
                    self.close();
                }
            });
        });

        if self.show_replace {
            ui.horizontal(|ui| {
                ui.add(
                    egui::TextEdit::singleline(&mut self.search.replacement)
                        .hint_text(t(lang, "find.replace_placeholder"))
                        .desired_width(220.0),
                );
                if ui.button(t(lang, "find.replace")).clicked() && self.search.replace_current(text) {
                    output.edited = true;
                    output.select = self.search.current();
                }
                if ui.button(t(lang, "find.replace_all")).clicked() && self.search.replace_all(text) > 0 {
                    output.edited = true;
                }
            });
        }

        output
    }

    /// Keep match positions current after the text changed elsewhere
    pub fn refresh(&mut self, text: &str) {
        if self.visible {
            self.search.update(text);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::editor::{editor_id, set_selection};

    /// One frame of the find bar above the editor, wired as in the app
    fn frame(ctx: &egui::Context, events: Vec<egui::Event>, bar: &mut FindBar, text: &mut String) {
        let input = egui::RawInput {
            events,
            ..Default::default()
        };
        let _ = ctx.run(input, |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                let output = bar.show(ui, Language::En, text);
                if let Some(range) = output.select {
                    set_selection(ui.ctx(), range);
                }
                egui::TextEdit::multiline(text).id(editor_id()).show(ui);
            });
        });
    }

    #[test]
    fn test_typing_a_query_leaves_the_document_alone() {
        let ctx = egui::Context::default();
        let mut bar = FindBar::default();
        let mut text = "say hello, say hi".to_string();

        bar.open(false);
        frame(&ctx, Vec::new(), &mut bar, &mut text);
        for key in ["s", "a", "y"] {
            frame(&ctx, vec![egui::Event::Text(key.to_string())], &mut bar, &mut text);
        }

        assert_eq!(text, "say hello, say hi");
        assert_eq!(bar.search.query, "say");
        assert_eq!(bar.search.counter(), Some((1, 2)));
        assert!(!ctx.memory(|memory| memory.has_focus(editor_id())));
    }
}
