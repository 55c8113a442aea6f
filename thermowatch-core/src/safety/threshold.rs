//! Threshold evaluation
//!
//! Each unit system is compared against its own band. Comparisons are
//! strict: a reading exactly on a boundary is safe.

use crate::config::ThresholdBands;
use crate::units::{Temperature, Unit};

/// Where a reading falls relative to its band
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BreachStatus {
    /// Within the safe band
    Normal,
    /// Below the low bound
    TooLow,
    /// Above the high bound
    TooHigh,
}

impl BreachStatus {
    /// Check if this status is a breach
    pub fn is_breach(&self) -> bool {
        !matches!(self, BreachStatus::Normal)
    }
}

/// Threshold evaluator over the per-unit bands
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ThresholdEvaluator {
    bands: ThresholdBands,
}

impl Default for ThresholdEvaluator {
    fn default() -> Self {
        Self::new(ThresholdBands::DEFAULT)
    }
}

impl ThresholdEvaluator {
    /// Create an evaluator over `bands`
    pub const fn new(bands: ThresholdBands) -> Self {
        Self { bands }
    }

    /// The bands in use
    pub fn bands(&self) -> &ThresholdBands {
        &self.bands
    }

    /// Check if `temperature`, viewed in `unit`, is outside that unit's band
    pub fn is_unsafe(&self, temperature: Temperature, unit: Unit) -> bool {
        self.check(temperature, unit).is_breach()
    }

    /// Classify `temperature`, viewed in `unit`
    pub fn check(&self, temperature: Temperature, unit: Unit) -> BreachStatus {
        self.check_value(temperature.in_unit(unit), unit)
    }

    /// Classify a value already expressed in `unit`
    ///
    /// Expects a finite value; the converter never produces anything else.
    pub fn check_value(&self, value: f64, unit: Unit) -> BreachStatus {
        let band = self.bands.for_unit(unit);
        if value > band.high {
            BreachStatus::TooHigh
        } else if value < band.low {
            BreachStatus::TooLow
        } else {
            BreachStatus::Normal
        }
    }
}
