//! Log-only notifier

use thermowatch_core::safety::Alert;
use thermowatch_core::traits::{DeliveryError, Notifier};
use tracing::warn;

/// Writes alerts to the log instead of sending them anywhere
#[derive(Debug, Default)]
pub struct LogNotifier {
    sent: u64,
}

impl LogNotifier {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Notifier for LogNotifier {
    fn send(&mut self, alert: &Alert) -> Result<(), DeliveryError> {
        self.sent += 1;
        warn!(
            subject = alert.subject(),
            reading = %alert.reading,
            at = %alert.clock,
            count = self.sent,
            "{}",
            alert.body()
        );
        Ok(())
    }
}
