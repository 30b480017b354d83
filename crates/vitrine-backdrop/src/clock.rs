//! Monotonic elapsed-time counter for one backdrop.

use std::time::Duration;

/// Elapsed time since acquisition.
///
/// The host passes its own monotonic reading (time since the app started)
/// to every call, which keeps the clock trivially testable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameClock {
    origin: Duration,
}

impl FrameClock {
    /// Start the clock at the host's current reading.
    pub const fn start(now: Duration) -> Self {
        Self { origin: now }
    }

    /// Time since start. Readings earlier than the origin count as zero.
    pub fn elapsed(&self, now: Duration) -> Duration {
        now.saturating_sub(self.origin)
    }

    /// Time since start in seconds.
    pub fn elapsed_secs(&self, now: Duration) -> f32 {
        self.elapsed(now).as_secs_f32()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elapsed_from_origin() {
        let clock = FrameClock::start(Duration::from_millis(500));
        assert_eq!(clock.elapsed(Duration::from_millis(1750)), Duration::from_millis(1250));
        assert_eq!(clock.elapsed_secs(Duration::from_millis(2500)), 2.0);
    }

    #[test]
    fn test_earlier_reading_saturates() {
        let clock = FrameClock::start(Duration::from_secs(10));
        assert_eq!(clock.elapsed(Duration::from_secs(3)), Duration::ZERO);
    }
}
