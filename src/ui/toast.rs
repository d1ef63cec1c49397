//! Transient notifications and the autosave indicator

use std::time::{Duration, Instant};

use eframe::egui;

use crate::core::config::TOAST_DURATION;

/// A message that disappears after a fixed time
#[derive(Debug, Clone)]
pub struct Timed {
    pub message: String,
    expires: Instant,
}

/// Single-slot timed message; a new one replaces the old
#[derive(Debug, Default)]
pub struct TimedMessage {
    current: Option<Timed>,
}

impl TimedMessage {
    pub fn show(&mut self, message: impl Into<String>, duration: Duration, now: Instant) {
        self.current = Some(Timed {
            message: message.into(),
            expires: now + duration,
        });
    }

    /// The message, if it has not expired
    pub fn active(&mut self, now: Instant) -> Option<&str> {
        if self.current.as_ref().is_some_and(|t| now >= t.expires) {
            self.current = None;
        }
        self.current.as_ref().map(|t| t.message.as_str())
    }

    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.current
            .as_ref()
            .map(|t| t.expires.saturating_duration_since(now))
    }
}

/// Toast overlay at the bottom of the window
#[derive(Debug, Default)]
pub struct Toasts {
    slot: TimedMessage,
}

impl Toasts {
    pub fn show(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!("Toast: {}", message);
        self.slot.show(message, TOAST_DURATION, Instant::now());
    }

    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.slot.remaining(now)
    }

    pub fn ui(&mut self, ctx: &egui::Context) {
        let Some(message) = self.slot.active(Instant::now()) else {
            return;
        };

        egui::Area::new(egui::Id::new("toast"))
            .anchor(egui::Align2::CENTER_BOTTOM, egui::vec2(0.0, -48.0))
            .order(egui::Order::Foreground)
            .interactable(false)
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style())
                    .inner_margin(egui::Margin::symmetric(16, 8))
                    .show(ui, |ui| {
                        ui.label(message);
                    });
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_expires() {
        let now = Instant::now();
        let mut slot = TimedMessage::default();
        assert_eq!(slot.active(now), None);

        slot.show("Saved", Duration::from_millis(2000), now);
        assert_eq!(slot.active(now + Duration::from_millis(1999)), Some("Saved"));
        assert_eq!(
            slot.remaining(now + Duration::from_millis(500)),
            Some(Duration::from_millis(1500))
        );
        assert_eq!(slot.active(now + Duration::from_millis(2000)), None);
        assert_eq!(slot.remaining(now), None);
    }

    #[test]
    fn test_new_message_replaces_old() {
        let now = Instant::now();
        let mut slot = TimedMessage::default();
        slot.show("one", Duration::from_secs(1), now);
        slot.show("two", Duration::from_secs(1), now);
        assert_eq!(slot.active(now), Some("two"));
    }
}
