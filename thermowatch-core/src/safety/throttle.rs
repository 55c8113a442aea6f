//! Alert throttling
//!
//! A single continuous-time gate: at most one alert per cooldown window,
//! however many breaches are reported in between. The gate holds one
//! timestamp and recomputes the elapsed time on every request.
//!
//! Owned by the monitor and mutated through `&mut self` only. A driver
//! that polls from several threads must wrap the monitor in a mutex, since
//! [`AlertThrottle::request`] is a check-then-act sequence.

use crate::config::ALERT_COOLDOWN_MS;

/// Timestamp of the last alert that was allowed out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AlertState {
    /// Monotonic time of the last send decision (ms), `None` if never sent
    pub last_alert_ms: Option<u64>,
}

/// Outcome of a breach request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ThrottleDecision {
    /// Deliver the alert; the cooldown has started
    Send,
    /// Drop the alert; the previous one went out `since_last_ms` ago
    Suppressed { since_last_ms: u64 },
}

impl ThrottleDecision {
    /// Check if the alert should be delivered
    pub fn is_send(&self) -> bool {
        matches!(self, ThrottleDecision::Send)
    }
}

/// Observable phase of the gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ThrottlePhase {
    /// Next breach will send
    Idle,
    /// Within the cooldown window of the last alert
    Cooling,
}

/// Cooldown gate for outgoing alerts
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AlertThrottle {
    state: AlertState,
    cooldown_ms: u64,
}

impl Default for AlertThrottle {
    fn default() -> Self {
        Self::new()
    }
}

impl AlertThrottle {
    /// Create a gate with the standard 10 s cooldown
    pub const fn new() -> Self {
        Self::with_cooldown(ALERT_COOLDOWN_MS)
    }

    /// Create a gate with a custom cooldown
    pub const fn with_cooldown(cooldown_ms: u64) -> Self {
        Self {
            state: AlertState {
                last_alert_ms: None,
            },
            cooldown_ms,
        }
    }

    /// Request permission to send an alert at `now_ms`
    ///
    /// Sends when more than the cooldown has elapsed since the last send
    /// (strictly greater), or when nothing has been sent yet. On `Send` the
    /// timestamp advances immediately; a failed delivery does not undo it.
    pub fn request(&mut self, now_ms: u64) -> ThrottleDecision {
        match self.since_last(now_ms) {
            Some(elapsed) if elapsed <= self.cooldown_ms => {
                ThrottleDecision::Suppressed {
                    since_last_ms: elapsed,
                }
            }
            _ => {
                self.state.last_alert_ms = Some(now_ms);
                ThrottleDecision::Send
            }
        }
    }

    /// Phase of the gate at `now_ms`, without changing it
    pub fn phase(&self, now_ms: u64) -> ThrottlePhase {
        match self.since_last(now_ms) {
            Some(elapsed) if elapsed <= self.cooldown_ms => ThrottlePhase::Cooling,
            _ => ThrottlePhase::Idle,
        }
    }

    /// Current state
    pub fn state(&self) -> &AlertState {
        &self.state
    }

    /// Cooldown window (ms)
    pub fn cooldown_ms(&self) -> u64 {
        self.cooldown_ms
    }

    /// Time since the last send, `None` if nothing was sent
    ///
    /// A clock that reads earlier than the last send counts as zero elapsed.
    fn since_last(&self, now_ms: u64) -> Option<u64> {
        self.state
            .last_alert_ms
            .map(|last| now_ms.saturating_sub(last))
    }
}
