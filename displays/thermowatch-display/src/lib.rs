//! Display abstraction and shared components for Thermowatch
//!
//! This crate provides:
//! - `DisplayBackend` trait for character displays (HD44780 LCDs and similar)
//! - `Screen` buffer with per-row dirty tracking
//! - `ScreenRenderer`, which implements the core `StatusDisplay` trait on
//!   top of any backend
//!
//! # Architecture
//!
//! The monitor core only knows how to hand over two lines of text. The
//! renderer keeps a shadow copy of what is on the glass and rewrites only
//! rows that changed, which matters on a 100 ms cadence over a 100 kHz bus.

#![no_std]

#[cfg(test)]
extern crate std;

pub mod backend;
pub mod renderer;
pub mod screen;

// Re-export key types
pub use backend::{DisplayBackend, DisplayError};
pub use renderer::ScreenRenderer;
pub use screen::{Screen, MAX_COLS, MAX_ROWS};
