//! UI components for the Markdown editor

pub mod clipboard;
pub mod editor;
pub mod find_bar;
pub mod preview;
pub mod scroll_sync;
pub mod snippets_menu;
pub mod style_editor;
pub mod toast;
pub mod update_banner;
