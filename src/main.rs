//! Markdown Editor - split-pane markdown editing with live preview
//!
//! Local autosave, switchable preview styles, snippet insertion and an
//! offline cache for remote images.

mod app;
mod core;
mod offline;
mod ui;

use app::MarkdownEditorApp;
use core::config::APP_NAME;
use eframe::egui;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> eframe::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::filter::LevelFilter::INFO)
        .init();

    tracing::info!("Starting {}...", APP_NAME);

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([480.0, 400.0])
            .with_title(APP_NAME)
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        APP_NAME,
        native_options,
        Box::new(|cc| Ok(Box::new(MarkdownEditorApp::new(cc)))),
    )
}
