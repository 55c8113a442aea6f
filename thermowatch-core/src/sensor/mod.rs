//! Raw sample conversion
//!
//! Turns ADC codes into temperatures.

pub mod thermistor;

pub use thermistor::ConversionError;
