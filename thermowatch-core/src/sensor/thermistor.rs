//! NTC thermistor conversion
//!
//! Raw code → divider voltage → thermistor resistance → Kelvin, using the
//! single-coefficient (beta) form of the Steinhart-Hart equation:
//!
//! ```text
//! V  = raw / full_scale * Vcc
//! Rt = R_ref * V / (Vcc - V)
//! T  = 1 / (1/T0 + ln(Rt / R_ref) / B)
//! ```
//!
//! The NTC sits on the high side of the divider, so a higher code means a
//! higher resistance and therefore a *lower* temperature.

use crate::config::{RailPolicy, ThermistorModel};
use crate::units::Temperature;

/// Errors from converting a raw code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConversionError {
    /// Code is zero: zero resistance, logarithm diverges
    Grounded,
    /// Code is at full scale: divider denominator is zero
    Saturated { raw: u16 },
    /// Code is above the converter's full scale
    OutOfRange { raw: u16 },
    /// Computation produced a non-finite or non-positive Kelvin value
    NonPhysical,
}

impl ThermistorModel {
    /// Convert a raw ADC code to a temperature
    ///
    /// Never returns NaN, infinity or a non-positive Kelvin value; those
    /// cases are reported as errors so they cannot reach threshold logic.
    pub fn convert(&self, raw: u16) -> Result<Temperature, ConversionError> {
        let raw = self.admit(raw)?;

        let kohms = self.resistance_kohms(raw);
        let inv_t = 1.0 / self.nominal_kelvin + libm::log(kohms / self.reference_kohms) / self.beta;
        let kelvin = 1.0 / inv_t;

        if !kelvin.is_finite() || kelvin <= 0.0 {
            return Err(ConversionError::NonPhysical);
        }

        Ok(Temperature::from_kelvin(kelvin))
    }

    /// Divider voltage for a raw code (V)
    pub fn voltage(&self, raw: u16) -> f64 {
        f64::from(raw) / f64::from(self.full_scale) * self.supply_volts
    }

    /// Thermistor resistance for a raw code (kΩ)
    ///
    /// Unbounded at full scale; callers go through [`Self::convert`].
    pub fn resistance_kohms(&self, raw: u16) -> f64 {
        let volts = self.voltage(raw);
        self.reference_kohms * volts / (self.supply_volts - volts)
    }

    /// Apply the rail policy
    fn admit(&self, raw: u16) -> Result<u16, ConversionError> {
        match self.rail_policy {
            RailPolicy::Reject => {
                if raw > self.full_scale {
                    Err(ConversionError::OutOfRange { raw })
                } else if raw == self.full_scale {
                    Err(ConversionError::Saturated { raw })
                } else if raw == 0 {
                    Err(ConversionError::Grounded)
                } else {
                    Ok(raw)
                }
            }
            RailPolicy::Clamp => Ok(raw.clamp(1, self.full_scale.saturating_sub(1).max(1))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::Unit;
    use proptest::prelude::*;

    fn model() -> ThermistorModel {
        ThermistorModel::default()
    }

    #[test]
    fn test_full_scale_rejected() {
        assert_eq!(
            model().convert(255),
            Err(ConversionError::Saturated { raw: 255 })
        );
    }

    #[test]
    fn test_zero_rejected() {
        assert_eq!(model().convert(0), Err(ConversionError::Grounded));
    }

    #[test]
    fn test_above_full_scale_rejected() {
        assert_eq!(
            model().convert(4095),
            Err(ConversionError::OutOfRange { raw: 4095 })
        );
    }

    #[test]
    fn test_clamp_policy_converts_rails() {
        let m = model().with_rail_policy(RailPolicy::Clamp);
        assert_eq!(m.convert(255).unwrap(), m.convert(254).unwrap());
        assert_eq!(m.convert(0).unwrap(), m.convert(1).unwrap());
        assert_eq!(m.convert(1000).unwrap(), m.convert(254).unwrap());
    }

    #[test]
    fn test_midpoint_is_nominal() {
        // Equal resistances put the divider at half supply: 25°C exactly
        let m = model().with_full_scale(254);
        let t = m.convert(127).unwrap();
        assert!((t.kelvin() - 298.15).abs() < 1e-9);
    }

    #[test]
    fn test_known_codes() {
        // 130 → 24.12°C / 75.42°F
        let t = model().convert(130).unwrap();
        assert_eq!(t.format(Unit::Celsius).as_str(), "24.12 C");
        assert_eq!(t.format(Unit::Fahrenheit).as_str(), "75.42 F");

        // 100 → 95.36°F
        let t = model().convert(100).unwrap();
        assert_eq!(t.format(Unit::Fahrenheit).as_str(), "95.36 F");
    }

    #[test]
    fn test_higher_code_is_colder() {
        let m = model();
        let warm = m.convert(100).unwrap();
        let cold = m.convert(150).unwrap();
        assert!(warm.kelvin() > cold.kelvin());
    }

    #[test]
    fn test_resistance_at_midpoint() {
        let m = model().with_full_scale(254);
        assert!((m.resistance_kohms(127) - 10.0).abs() < 1e-9);
        assert!((m.voltage(127) - 1.65).abs() < 1e-9);
    }

    proptest! {
        #[test]
        fn prop_accepted_codes_are_finite_and_positive(raw in 1u16..255) {
            let t = model().convert(raw).unwrap();
            prop_assert!(t.kelvin().is_finite());
            prop_assert!(t.kelvin() > 0.0);
        }

        #[test]
        fn prop_clamped_codes_are_finite_and_positive(raw in 0u16..255) {
            let t = model().with_rail_policy(RailPolicy::Clamp).convert(raw).unwrap();
            prop_assert!(t.kelvin().is_finite());
            prop_assert!(t.kelvin() > 0.0);
        }

        #[test]
        fn prop_strictly_decreasing(raw in 1u16..254) {
            let m = model();
            let here = m.convert(raw).unwrap();
            let next = m.convert(raw + 1).unwrap();
            prop_assert!(next.kelvin() < here.kelvin());
        }
    }
}
