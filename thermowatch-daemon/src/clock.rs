//! Time sources for the polling loop

use std::time::Instant;

/// Wall-clock format shown on the display and in alerts
pub const CLOCK_FORMAT: &str = "%H:%M:%S";

/// Local wall-clock time as `HH:MM:SS`
pub fn wall_clock() -> String {
    chrono::Local::now().format(CLOCK_FORMAT).to_string()
}

/// Milliseconds since the daemon started, never going backwards
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    start: Instant,
}

impl MonotonicClock {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn now_ms(&self) -> u64 {
        u64::try_from(self.start.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}
