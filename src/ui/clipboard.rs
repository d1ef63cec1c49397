//! Clipboard writes

use eframe::egui;

/// Put `text` on the system clipboard, falling back to egui's platform output
pub fn copy_text(ctx: &egui::Context, text: &str) {
    let result = arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text));
    if let Err(e) = result {
        tracing::warn!("System clipboard unavailable, using fallback: {}", e);
        ctx.copy_text(text.to_string());
    }
}
