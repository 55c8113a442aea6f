//! Board-agnostic core logic for the room temperature monitor
//!
//! This crate contains all sampling and alerting logic that does not
//! depend on specific hardware implementations:
//!
//! - Collaborator traits (sampler, notifier, status display)
//! - Thermistor conversion from raw ADC codes to Kelvin
//! - Unit formatting (Fahrenheit, Celsius, Kelvin)
//! - Threshold evaluation and alert throttling
//! - The per-tick monitor pipeline
//! - Fixed constants and configuration types

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
#[macro_use]
extern crate std;

pub mod config;
pub mod monitor;
pub mod safety;
pub mod sensor;
pub mod traits;
pub mod units;

pub use monitor::{CycleReport, Monitor, StatusLines, TickOutcome};
pub use units::{FormattedTemperature, Temperature, Unit};
