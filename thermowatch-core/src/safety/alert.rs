//! Alert message

use core::fmt::{self, Write};

use heapless::String;

use crate::units::FormattedTemperature;

/// Subject line of every alert
pub const ALERT_SUBJECT: &str = "UNSAFE TEMPERATURE";

/// Capacity of the wall-clock text ("HH:MM:SS")
pub const CLOCK_LEN: usize = 16;

/// Capacity of a rendered alert body
pub const ALERT_BODY_LEN: usize = 160;

/// An alert ready to hand to a notifier
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Alert {
    /// The breaching reading
    pub reading: FormattedTemperature,
    /// Wall-clock time of the reading, as shown on the display
    pub clock: String<CLOCK_LEN>,
}

impl Alert {
    /// Create an alert; `clock` is truncated to [`CLOCK_LEN`] bytes
    pub fn new(reading: FormattedTemperature, clock: &str) -> Self {
        Self {
            reading,
            clock: truncated(clock),
        }
    }

    /// Subject line
    pub fn subject(&self) -> &'static str {
        ALERT_SUBJECT
    }

    /// Render the human-readable body
    pub fn body(&self) -> String<ALERT_BODY_LEN> {
        let mut body = String::new();
        let _ = self.write_body(&mut body);
        body
    }

    /// Write the body into any formatter
    pub fn write_body<W: Write>(&self, out: &mut W) -> fmt::Result {
        write!(
            out,
            "The temperature in the room has reached an unsafe level. \nIt is currently {} \nAt {}",
            self.reading, self.clock
        )
    }
}

/// Copy at most `N` bytes of `text`, cutting on a char boundary
pub(crate) fn truncated<const N: usize>(text: &str) -> String<N> {
    let mut end = text.len().min(N);
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    let mut out = String::new();
    let _ = out.push_str(&text[..end]);
    out
}
