//! Temperature units and display formatting
//!
//! Kelvin is the canonical representation. Fahrenheit and Celsius are
//! derived views computed on demand, so formatting has no hidden state.

use core::fmt::Write;

use heapless::String;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize};

/// Offset between Kelvin and Celsius
pub const KELVIN_OFFSET: f64 = 273.15;

/// Capacity of a formatted reading ("-123.45 F" and beyond)
pub const READING_LEN: usize = 24;

/// Unit system for display and threshold evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Unit {
    #[default]
    Fahrenheit,
    Celsius,
    Kelvin,
}

/// Unrecognized unit name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UnknownUnit;

impl core::fmt::Display for UnknownUnit {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("expected F, C, K or a unit name")
    }
}

impl core::str::FromStr for Unit {
    type Err = UnknownUnit;

    /// Accepts the suffix letter or the full name, in any case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Unit::ALL
            .into_iter()
            .find(|unit| {
                s.eq_ignore_ascii_case(unit.suffix()) || s.eq_ignore_ascii_case(unit.name())
            })
            .ok_or(UnknownUnit)
    }
}

/// Deserializes through [`FromStr`](core::str::FromStr), so config files
/// accept the same spellings as the command line
#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Unit {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct UnitVisitor;

        impl serde::de::Visitor<'_> for UnitVisitor {
            type Value = Unit;

            fn expecting(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str("F, C, K or a unit name")
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<Unit, E> {
                v.parse()
                    .map_err(|_| E::invalid_value(serde::de::Unexpected::Str(v), &self))
            }
        }

        deserializer.deserialize_str(UnitVisitor)
    }
}

impl Unit {
    /// All unit systems
    pub const ALL: [Unit; 3] = [Unit::Fahrenheit, Unit::Celsius, Unit::Kelvin];

    /// Suffix printed after the value
    pub const fn suffix(&self) -> &'static str {
        match self {
            Unit::Fahrenheit => "F",
            Unit::Celsius => "C",
            Unit::Kelvin => "K",
        }
    }

    /// Lowercase full name
    pub const fn name(&self) -> &'static str {
        match self {
            Unit::Fahrenheit => "fahrenheit",
            Unit::Celsius => "celsius",
            Unit::Kelvin => "kelvin",
        }
    }
}

/// A temperature, stored in Kelvin
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Temperature {
    kelvin: f64,
}

impl Temperature {
    /// Create from a Kelvin value
    pub const fn from_kelvin(kelvin: f64) -> Self {
        Self { kelvin }
    }

    /// Create from a value in any unit
    pub fn from_unit(value: f64, unit: Unit) -> Self {
        let kelvin = match unit {
            Unit::Kelvin => value,
            Unit::Celsius => value + KELVIN_OFFSET,
            Unit::Fahrenheit => (value - 32.0) / 1.8 + KELVIN_OFFSET,
        };
        Self { kelvin }
    }

    /// Value in Kelvin
    pub const fn kelvin(&self) -> f64 {
        self.kelvin
    }

    /// Value in degrees Celsius
    pub fn celsius(&self) -> f64 {
        self.kelvin - KELVIN_OFFSET
    }

    /// Value in degrees Fahrenheit
    pub fn fahrenheit(&self) -> f64 {
        (self.kelvin - KELVIN_OFFSET) * 1.8 + 32.0
    }

    /// Value in `unit`
    pub fn in_unit(&self, unit: Unit) -> f64 {
        match unit {
            Unit::Fahrenheit => self.fahrenheit(),
            Unit::Celsius => self.celsius(),
            Unit::Kelvin => self.kelvin(),
        }
    }

    /// Format for display in `unit`, e.g. `"72.31 F"`
    pub fn format(&self, unit: Unit) -> FormattedTemperature {
        let value = self.in_unit(unit);
        let mut text = String::new();
        // Capacity covers every reading the converter accepts
        let _ = write!(text, "{:.2} {}", value, unit.suffix());
        FormattedTemperature { unit, value, text }
    }
}

/// A reading prepared for display
///
/// `value` is unrounded and is what thresholds are compared against;
/// `text` carries two decimals and the unit suffix.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FormattedTemperature {
    pub unit: Unit,
    pub value: f64,
    pub text: String<READING_LEN>,
}

impl FormattedTemperature {
    /// The display text
    pub fn as_str(&self) -> &str {
        self.text.as_str()
    }
}

impl core::fmt::Display for FormattedTemperature {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
