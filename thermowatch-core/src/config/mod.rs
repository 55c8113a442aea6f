//! Configuration types
//!
//! Fixed model parameters, safety bands and the startup-time monitor
//! configuration. Nothing here changes while the monitor is running.

pub mod thermistor;
pub mod thresholds;
pub mod types;

pub use thermistor::{RailPolicy, ThermistorModel};
pub use thresholds::{ThresholdBand, ThresholdBands};
pub use types::*;
