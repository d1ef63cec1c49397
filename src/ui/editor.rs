//! Markdown editor panel

use std::ops::Range;

use eframe::egui;
use egui::text::{CCursor, CCursorRange};

use crate::app::MarkdownEditorApp;
use crate::ui::scroll_sync::Pane;

/// Id of the editor's `TextEdit`, used to read and move its cursor
pub fn editor_id() -> egui::Id {
    egui::Id::new("markdown_editor")
}

/// Select a char range in the editor without moving keyboard focus
pub fn set_selection(ctx: &egui::Context, range: Range<usize>) {
    let id = editor_id();
    let mut state = egui::text_edit::TextEditState::load(ctx, id).unwrap_or_default();
    state.cursor.set_char_range(Some(CCursorRange::two(
        CCursor::new(range.start),
        CCursor::new(range.end),
    )));
    state.store(ctx, id);
}

/// Give the editor keyboard focus
pub fn focus(ctx: &egui::Context) {
    ctx.memory_mut(|memory| memory.request_focus(editor_id()));
}

/// Markdown editor panel
pub struct EditorPanel;

impl EditorPanel {
    /// Show the editor panel
    pub fn show(ui: &mut egui::Ui, app: &mut MarkdownEditorApp) {
        let font = egui::FontId::monospace(app.settings.editor_zoom as f32);

        let mut scroll = egui::ScrollArea::vertical()
            .id_salt("editor_scroll")
            .auto_shrink([false, false]);
        if let Some(offset) = app.scroll_sync.take_target(Pane::Editor) {
            scroll = scroll.vertical_scroll_offset(offset);
        }

        let output = scroll.show(ui, |ui| {
            egui::TextEdit::multiline(&mut app.document.content)
                .id(editor_id())
                .code_editor()
                .font(font)
                .desired_width(f32::INFINITY)
                .desired_rows(30)
                .show(ui)
        });

        app.scroll_sync.record(
            Pane::Editor,
            output.state.offset.y,
            output.content_size.y,
            output.inner_rect.height(),
        );

        let edit = output.inner;
        if let Some(range) = edit.state.cursor.char_range() {
            let (a, b) = (range.primary.index, range.secondary.index);
            app.selection = (a.min(b), a.max(b));
        }
        if edit.response.changed() {
            app.on_text_edited();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_selection_keeps_focus() {
        let ctx = egui::Context::default();
        let other = egui::Id::new("other_field");
        ctx.memory_mut(|memory| memory.request_focus(other));

        set_selection(&ctx, 2..5);

        assert!(ctx.memory(|memory| memory.has_focus(other)));
        let state = egui::text_edit::TextEditState::load(&ctx, editor_id()).unwrap_or_default();
        let range = state.cursor.char_range().map(|r| {
            let (a, b) = (r.primary.index, r.secondary.index);
            (a.min(b), a.max(b))
        });
        assert_eq!(range, Some((2, 5)));

        focus(&ctx);
        assert!(ctx.memory(|memory| memory.has_focus(editor_id())));
    }
}
