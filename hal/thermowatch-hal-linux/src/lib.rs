//! Linux HAL for the Thermowatch monitor
//!
//! This crate provides the Linux implementation of the Thermowatch HAL:
//! - I2C master access through the kernel `i2c-dev` interface
//! - An adapter from any `embedded-hal` 1.0 I2C master to [`I2cBus`]
//! - A sleeping `DelayNs` for controller timing (LCD init)

#![deny(unsafe_code)]

pub mod i2c;

pub use i2c::{open_bus, EhalI2c, I2cBusError, LinuxI2c, OpenError};
pub use linux_embedded_hal::Delay;
pub use thermowatch_hal::{I2cBus, I2cError};
