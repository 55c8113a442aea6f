//! PCF8574 / PCF8574A quasi-bidirectional port expander
//!
//! The chip has no registers: a one-byte write sets all eight pins. The
//! driver keeps the output latch so single pins can be changed.

use thermowatch_hal::I2cBus;

use crate::probe::{first_responding, ProbeError};

/// PCF8574 backpack address
pub const ADDRESS: u8 = 0x27;

/// PCF8574A backpack address
pub const ADDRESS_A: u8 = 0x3F;

/// Port expander handle
pub struct Pcf8574<B: I2cBus> {
    bus: B,
    address: u8,
    latch: u8,
}

impl<B: I2cBus> Pcf8574<B> {
    /// Wrap an expander at a known address; all outputs start low
    pub fn new(bus: B, address: u8) -> Self {
        Self {
            bus,
            address,
            latch: 0x00,
        }
    }

    /// Find the expander at 0x27, falling back to 0x3F
    pub fn detect(mut bus: B) -> Result<Self, ProbeError> {
        let address = first_responding(&mut bus, &[ADDRESS, ADDRESS_A]).ok_or(ProbeError::NotFound)?;
        Ok(Self::new(bus, address))
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    /// Last value written to the port
    pub fn latch(&self) -> u8 {
        self.latch
    }

    /// Drive one pin (0..=7) high or low
    pub fn output(&mut self, pin: u8, high: bool) -> Result<(), B::Error> {
        let mask = 1u8 << (pin & 0x07);
        let value = if high {
            self.latch | mask
        } else {
            self.latch & !mask
        };
        self.write_port(value)
    }

    /// Write all eight pins at once
    pub fn write_port(&mut self, value: u8) -> Result<(), B::Error> {
        self.bus.write(self.address, &[value])?;
        self.latch = value;
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    /// Release the bus
    pub fn into_inner(self) -> B {
        self.bus
    }
}
