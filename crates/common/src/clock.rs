//! Session clock.
//!
//! Gesture timers (click debounce, shutdown hold) need a monotonic time
//! base in seconds. Tracker feeds usually stamp each frame; when they do
//! not, the session falls back to the elapsed time of this clock.

use std::time::Instant;

/// A session clock that provides monotonic timestamps relative to
/// a fixed epoch (the moment the session started).
#[derive(Debug, Clone)]
pub struct SessionClock {
    /// The instant the session started.
    epoch: Instant,

    /// Wall-clock time at epoch (ISO 8601 string).
    epoch_wall: String,
}

impl SessionClock {
    /// Create a new session clock anchored to now.
    pub fn start() -> Self {
        Self {
            epoch: Instant::now(),
            epoch_wall: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Seconds elapsed since session start.
    pub fn elapsed_secs(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64()
    }

    /// Wall-clock time at session start.
    pub fn epoch_wall(&self) -> &str {
        &self.epoch_wall
    }

    /// Convert seconds to whole milliseconds, saturating at zero.
    pub fn secs_to_ms(secs: f64) -> u64 {
        (secs.max(0.0) * 1000.0).round() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_elapsed() {
        let clock = SessionClock::start();
        let first = clock.elapsed_secs();
        let second = clock.elapsed_secs();
        assert!(first >= 0.0);
        assert!(second >= first);
        assert!(second < 1.0);
    }

    #[test]
    fn test_epoch_wall_is_rfc3339() {
        let clock = SessionClock::start();
        assert!(chrono::DateTime::parse_from_rfc3339(clock.epoch_wall()).is_ok());
    }

    #[test]
    fn test_secs_to_ms() {
        assert_eq!(SessionClock::secs_to_ms(0.4), 400);
        assert_eq!(SessionClock::secs_to_ms(-1.0), 0);
    }
}
