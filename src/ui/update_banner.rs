//! Banner announcing a new cache version

use eframe::egui;

use crate::core::i18n::{t, Language};
use crate::offline::{WorkerEvent, WorkerMessage};

#[derive(Debug, Default)]
pub struct UpdateBanner {
    waiting: bool,
}

impl UpdateBanner {
    pub fn is_visible(&self) -> bool {
        self.waiting
    }

    /// Track worker lifecycle events
    pub fn on_event(&mut self, event: &WorkerEvent) {
        match event {
            WorkerEvent::Waiting => self.waiting = true,
            WorkerEvent::Activated(_) => self.waiting = false,
            _ => {}
        }
    }

    /// Hide the banner and return the message that activates the new version
    pub fn accept(&mut self) -> WorkerMessage {
        self.waiting = false;
        WorkerMessage::SkipWaiting
    }

    /// Draw the banner; true when clicked
    pub fn show(&self, ctx: &egui::Context, lang: Language) -> bool {
        if !self.waiting {
            return false;
        }
        let mut clicked = false;
        egui::TopBottomPanel::top("update_banner").show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                clicked = ui.link(t(lang, "update.available")).clicked();
            });
        });
        clicked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accept_hides_before_activation() {
        let mut banner = UpdateBanner::default();
        assert!(!banner.is_visible());

        banner.on_event(&WorkerEvent::Waiting);
        assert!(banner.is_visible());

        assert_eq!(banner.accept(), WorkerMessage::SkipWaiting);
        assert!(!banner.is_visible());

        banner.on_event(&WorkerEvent::Activated("md-editor-v2".to_string()));
        assert!(!banner.is_visible());
    }

    #[test]
    fn test_fetch_events_leave_banner_alone() {
        let mut banner = UpdateBanner::default();
        banner.on_event(&WorkerEvent::Waiting);
        banner.on_event(&WorkerEvent::FetchFailed {
            url: "https://example.org/a.png".to_string(),
        });
        assert!(banner.is_visible());
    }

    #[test]
    fn test_hidden_banner_draws_nothing() {
        let ctx = egui::Context::default();
        let banner = UpdateBanner::default();
        let mut clicked = true;
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            clicked = banner.show(ctx, Language::En);
        });
        assert!(!clicked);
    }
}
