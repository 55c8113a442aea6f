//! Status readout text
//!
//! Layout for a 16x2 character display:
//!
//! ```text
//! Temp: 75.42 F
//!     14:03:59
//! ```

use core::fmt::Write;

use heapless::String;

use crate::safety::alert::{truncated, CLOCK_LEN};
use crate::units::FormattedTemperature;

/// Capacity of one status line
pub const LINE_LEN: usize = 32;

/// Two lines of status text
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StatusLines {
    line1: String<LINE_LEN>,
    line2: String<LINE_LEN>,
}

impl StatusLines {
    /// Build the readout for `reading` taken at wall-clock `clock`
    ///
    /// `clock` is cut to [`CLOCK_LEN`] bytes, as in the alert.
    pub fn new(reading: &FormattedTemperature, clock: &str) -> Self {
        let mut line1 = String::new();
        let mut line2 = String::new();
        let _ = write!(line1, "Temp: {}", reading);
        let _ = write!(line2, "    {}", truncated::<CLOCK_LEN>(clock));
        Self { line1, line2 }
    }

    /// Top row
    pub fn line1(&self) -> &str {
        &self.line1
    }

    /// Bottom row
    pub fn line2(&self) -> &str {
        &self.line2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{Temperature, Unit};

    #[test]
    fn test_layout() {
        let reading = Temperature::from_kelvin(298.15).format(Unit::Fahrenheit);
        let lines = StatusLines::new(&reading, "09:15:00");
        assert_eq!(lines.line1(), "Temp: 77.00 F");
        assert_eq!(lines.line2(), "    09:15:00");
        assert!(lines.line1().len() <= 16);
    }

    #[test]
    fn test_long_clock_is_truncated_not_dropped() {
        let reading = Temperature::from_kelvin(298.15).format(Unit::Fahrenheit);
        let clock = "2026-10-18 09:15:00.123456789 +02:00";
        let lines = StatusLines::new(&reading, clock);
        assert_eq!(lines.line2(), "    2026-10-18 09:15");
    }
}
