//! Deadline-based debouncing driven by the frame loop

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// Restart the delay from `now`
    pub fn poke(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    /// True exactly once after the delay has elapsed since the last poke
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Time left before firing, for scheduling a repaint
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline.map(|deadline| deadline.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_after_delay() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(300));
        assert!(!debouncer.fire(start));

        debouncer.poke(start);
        assert!(!debouncer.fire(start + Duration::from_millis(299)));
        assert!(debouncer.fire(start + Duration::from_millis(300)));
        assert!(!debouncer.fire(start + Duration::from_millis(600)));
    }

    #[test]
    fn test_poke_restarts() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(1000));
        debouncer.poke(start);
        debouncer.poke(start + Duration::from_millis(800));

        assert!(!debouncer.fire(start + Duration::from_millis(1500)));
        assert_eq!(
            debouncer.remaining(start + Duration::from_millis(1500)),
            Some(Duration::from_millis(300))
        );
        assert!(debouncer.fire(start + Duration::from_millis(1800)));
        assert_eq!(debouncer.remaining(start), None);
    }

    #[test]
    fn test_cancel() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(10));
        debouncer.poke(start);
        assert!(debouncer.is_pending());
        debouncer.cancel();
        assert!(!debouncer.fire(start + Duration::from_secs(1)));
    }
}
