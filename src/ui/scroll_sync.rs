//! Scroll position carried across view-mode switches, as a fraction of the scrollable height

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    Editor,
    Preview,
}

impl Pane {
    fn index(self) -> usize {
        match self {
            Pane::Editor => 0,
            Pane::Preview => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Metrics {
    ratio: f32,
    max_scroll: f32,
}

#[derive(Debug, Default)]
pub struct ScrollSync {
    metrics: [Option<Metrics>; 2],
    pending: [Option<f32>; 2],
}

/// Fraction scrolled, 0 when nothing can scroll
pub fn scroll_ratio(offset: f32, content_height: f32, viewport_height: f32) -> f32 {
    let max_scroll = content_height - viewport_height;
    if max_scroll > 0.0 {
        (offset / max_scroll).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

impl ScrollSync {
    /// Remember where `pane` is scrolled after it was drawn
    pub fn record(&mut self, pane: Pane, offset: f32, content_height: f32, viewport_height: f32) {
        self.metrics[pane.index()] = Some(Metrics {
            ratio: scroll_ratio(offset, content_height, viewport_height),
            max_scroll: (content_height - viewport_height).max(0.0),
        });
    }

    /// Queue `targets` to scroll to the same fraction as `source`
    pub fn mirror(&mut self, source: Pane, targets: &[Pane]) {
        let ratio = self.metrics[source.index()].map_or(0.0, |m| m.ratio);
        for target in targets.iter().filter(|target| **target != source) {
            self.pending[target.index()] = Some(ratio);
        }
    }

    /// Offset to apply to `pane` this frame, once its scrollable height is known
    pub fn take_target(&mut self, pane: Pane) -> Option<f32> {
        let metrics = self.metrics[pane.index()]?;
        let ratio = self.pending[pane.index()].take()?;
        Some(ratio * metrics.max_scroll)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio() {
        assert_eq!(scroll_ratio(50.0, 300.0, 200.0), 0.5);
        assert_eq!(scroll_ratio(10.0, 100.0, 200.0), 0.0);
        assert_eq!(scroll_ratio(500.0, 300.0, 200.0), 1.0);
    }

    #[test]
    fn test_mirror_to_other_pane() {
        let mut sync = ScrollSync::default();
        sync.record(Pane::Editor, 250.0, 1100.0, 100.0);
        sync.record(Pane::Preview, 0.0, 2100.0, 100.0);

        sync.mirror(Pane::Editor, &[Pane::Editor, Pane::Preview]);
        assert_eq!(sync.take_target(Pane::Editor), None);
        assert_eq!(sync.take_target(Pane::Preview), Some(500.0));
        assert_eq!(sync.take_target(Pane::Preview), None);
    }

    #[test]
    fn test_target_waits_for_first_layout() {
        let mut sync = ScrollSync::default();
        sync.record(Pane::Preview, 100.0, 300.0, 100.0);
        sync.mirror(Pane::Preview, &[Pane::Editor]);

        assert_eq!(sync.take_target(Pane::Editor), None);
        sync.record(Pane::Editor, 0.0, 500.0, 100.0);
        assert_eq!(sync.take_target(Pane::Editor), Some(200.0));
    }
}
