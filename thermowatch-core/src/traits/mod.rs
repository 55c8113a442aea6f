//! Collaborator traits
//!
//! These traits define the interface between the monitor core and the
//! hardware or network implementations around it.

pub mod display;
pub mod notifier;
pub mod sampler;

pub use display::StatusDisplay;
pub use notifier::{DeliveryError, Notifier};
pub use sampler::{Sampler, SensorError};
