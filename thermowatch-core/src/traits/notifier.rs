//! Alert delivery trait

use crate::safety::Alert;

/// Errors that can occur delivering an alert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeliveryError {
    /// Could not reach or talk to the delivery service
    Transport,
    /// Service refused the message
    Rejected,
    /// Delivery did not complete in time
    Timeout,
    /// Channel is not configured or turned off
    Disabled,
}

/// Outbound alert channel (email, chat, pager...)
///
/// Called synchronously from the polling cycle; implementations should
/// bound their own latency.
pub trait Notifier {
    /// Deliver one alert
    fn send(&mut self, alert: &Alert) -> Result<(), DeliveryError>;
}

impl<T: Notifier + ?Sized> Notifier for &mut T {
    fn send(&mut self, alert: &Alert) -> Result<(), DeliveryError> {
        T::send(self, alert)
    }
}
