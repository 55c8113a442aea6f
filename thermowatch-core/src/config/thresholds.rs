//! Per-unit safety bands
//!
//! The three bands are tuned independently and are not exact conversions
//! of each other: 29.5°C is 85.1°F, not 85°F. Each unit is evaluated
//! against its own band only.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::units::Unit;

/// Safe range for one unit system, bounds inclusive
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ThresholdBand {
    /// Lowest safe value
    pub low: f64,
    /// Highest safe value
    pub high: f64,
}

impl ThresholdBand {
    /// Create a band
    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// Check if `value` lies inside the band (boundaries are safe)
    pub fn contains(&self, value: f64) -> bool {
        !(value > self.high || value < self.low)
    }
}

/// Safe band in degrees Fahrenheit
pub const FAHRENHEIT_BAND: ThresholdBand = ThresholdBand::new(68.0, 85.0);

/// Safe band in degrees Celsius
pub const CELSIUS_BAND: ThresholdBand = ThresholdBand::new(20.0, 29.5);

/// Safe band in Kelvin
pub const KELVIN_BAND: ThresholdBand = ThresholdBand::new(293.0, 302.6);

/// One band per unit system
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ThresholdBands {
    pub fahrenheit: ThresholdBand,
    pub celsius: ThresholdBand,
    pub kelvin: ThresholdBand,
}

impl ThresholdBands {
    /// The room-temperature bands
    pub const DEFAULT: Self = Self {
        fahrenheit: FAHRENHEIT_BAND,
        celsius: CELSIUS_BAND,
        kelvin: KELVIN_BAND,
    };

    /// Band for `unit`
    pub const fn for_unit(&self, unit: Unit) -> &ThresholdBand {
        match unit {
            Unit::Fahrenheit => &self.fahrenheit,
            Unit::Celsius => &self.celsius,
            Unit::Kelvin => &self.kelvin,
        }
    }
}

impl Default for ThresholdBands {
    fn default() -> Self {
        Self::DEFAULT
    }
}
