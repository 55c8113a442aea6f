//! Thermowatch Hardware Abstraction Layer
//!
//! This crate defines the bus traits that the peripheral drivers are written
//! against. Platform crates implement them so the same drivers run on a
//! Raspberry Pi (Linux `i2c-dev`) or any other board with an I2C master.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │  thermowatch-drivers (ADC, LCD)          │
//! └──────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌──────────────────────────────────────────┐
//! │  thermowatch-hal (this crate - traits)   │
//! └──────────────────────────────────────────┘
//!                     │
//!                     ▼
//!          ┌─────────────────────┐
//!          │ thermowatch-hal-    │
//!          │       linux         │
//!          └─────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`i2c::I2cBus`] - I2C bus operations and device probing
//! - [`i2c::I2cError`] - tells a missing device from a bus fault

#![no_std]
#![deny(unsafe_code)]

pub mod i2c;

pub use i2c::{I2cBus, I2cError};
