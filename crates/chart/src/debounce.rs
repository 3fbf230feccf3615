//! Resize debouncing.
//!
//! Bursts of resize notifications collapse into one re-layout once the
//! container has been quiet for the configured delay.

use std::time::{Duration, Instant};

/// Trailing-edge debouncer driven by explicit timestamps.
#[derive(Debug, Clone)]
pub struct ResizeDebouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl ResizeDebouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    /// Record a resize notification, pushing the deadline back.
    pub fn notify(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    /// Whether the pending resize should run now. Fires once per burst.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Whether a resize is waiting.
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_burst_fires_once() {
        let t0 = Instant::now();
        let ms = Duration::from_millis;
        let mut debouncer = ResizeDebouncer::from_millis(120);

        debouncer.notify(t0);
        debouncer.notify(t0 + ms(50));
        debouncer.notify(t0 + ms(100));

        assert!(!debouncer.poll(t0 + ms(200)));
        assert!(debouncer.poll(t0 + ms(220)));
        assert!(!debouncer.poll(t0 + ms(400)));
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn test_idle_never_fires() {
        let mut debouncer = ResizeDebouncer::from_millis(120);
        assert!(!debouncer.poll(Instant::now()));
    }
}
