//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in thermowatch-core and thermowatch-display for the parts found on the
//! usual Raspberry Pi thermistor hat:
//!
//! - Analog converters (PCF8591, ADS7830) behind one `Sampler`
//! - PCF8574 port expander ("I2C backpack")
//! - HD44780 character LCD driven through the expander

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
#[macro_use]
extern crate std;

pub mod adc;
pub mod lcd;
pub mod probe;

#[cfg(test)]
pub(crate) mod mock;

pub use adc::{detect_adc, AdcDevice, AdcKind};
pub use lcd::{Lcd, Pcf8574};
pub use probe::ProbeError;
