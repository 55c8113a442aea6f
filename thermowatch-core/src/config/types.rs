//! Monitor configuration and timing constants

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::thermistor::{RailPolicy, ADC_FULL_SCALE_8BIT};
use crate::units::Unit;

/// Minimum time between two outgoing alerts (ms)
pub const ALERT_COOLDOWN_MS: u64 = 10_000;

/// Default polling cadence of the driver loop (ms)
pub const POLL_INTERVAL_MS: u64 = 100;

/// Startup configuration for a [`Monitor`](crate::monitor::Monitor)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MonitorConfig {
    /// Unit used for the readout and for breach evaluation
    pub unit: Unit,
    /// Handling of raw codes at either rail of the ADC range
    pub rail_policy: RailPolicy,
    /// Full-scale code of the sampler (255 for 8-bit converters)
    pub full_scale: u16,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            unit: Unit::Fahrenheit,
            rail_policy: RailPolicy::Reject,
            full_scale: ADC_FULL_SCALE_8BIT,
        }
    }
}
