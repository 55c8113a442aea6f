//! Thermistor circuit parameters
//!
//! Circuit: 3V3 -- 10K reference -- ADC_IN -- NTC 10K -- GND, sampled by
//! an 8-bit converter referenced to the same 3V3 rail.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Full-scale code of an 8-bit converter
pub const ADC_FULL_SCALE_8BIT: u16 = 255;

/// Handling of raw codes at either end of the converter range
///
/// At full scale the divider current is zero and the resistance is
/// unbounded; at zero the resistance is zero and its logarithm diverges.
/// Neither yields a physical temperature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum RailPolicy {
    /// Reject rail codes with a conversion error
    #[default]
    Reject,
    /// Clamp raw codes into `1..=full_scale - 1` before converting
    Clamp,
}

/// Thermistor divider and beta model parameters
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ThermistorModel {
    /// Divider and ADC reference voltage (V)
    pub supply_volts: f64,
    /// Reference resistor, equal to the NTC nominal resistance (kΩ)
    pub reference_kohms: f64,
    /// Temperature at which the NTC has its nominal resistance (K)
    pub nominal_kelvin: f64,
    /// Beta coefficient (K)
    pub beta: f64,
    /// Full-scale ADC code
    pub full_scale: u16,
    /// Handling of rail codes
    pub rail_policy: RailPolicy,
}

impl ThermistorModel {
    /// 10K NTC, B=3950, on a 3.3V divider with an 8-bit ADC
    pub const DEFAULT: Self = Self {
        supply_volts: 3.3,
        reference_kohms: 10.0,
        nominal_kelvin: 298.15,
        beta: 3950.0,
        full_scale: ADC_FULL_SCALE_8BIT,
        rail_policy: RailPolicy::Reject,
    };

    /// Same model with a different rail policy
    pub const fn with_rail_policy(mut self, rail_policy: RailPolicy) -> Self {
        self.rail_policy = rail_policy;
        self
    }

    /// Same model for a converter with a different full-scale code
    pub const fn with_full_scale(mut self, full_scale: u16) -> Self {
        self.full_scale = full_scale;
        self
    }
}

impl Default for ThermistorModel {
    fn default() -> Self {
        Self::DEFAULT
    }
}
