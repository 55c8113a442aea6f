//! PCF8591 8-bit converter
//!
//! Four analog inputs, one DAC output. The control byte selects the input;
//! the byte returned by a read is the result of the *previous* conversion,
//! so a fresh sample needs two reads.

use thermowatch_core::traits::SensorError;
use thermowatch_hal::I2cBus;

use super::sensor_error;

/// Default address with A0..A2 tied low
pub const ADDRESS: u8 = 0x48;

/// Number of single-ended inputs
pub const CHANNELS: u8 = 4;

/// Control byte base (analog output enabled, single-ended inputs)
const CONTROL: u8 = 0x40;

/// Control byte selecting `channel`
pub const fn control_byte(channel: u8) -> u8 {
    CONTROL | (channel & 0x03)
}

/// Read one sample from `channel`
pub fn read_channel<B: I2cBus + ?Sized>(bus: &mut B, channel: u8) -> Result<u8, SensorError> {
    bus.write(ADDRESS, &[control_byte(channel)])
        .map_err(sensor_error)?;

    let mut buf = [0u8; 1];
    // Stale conversion
    bus.read(ADDRESS, &mut buf).map_err(sensor_error)?;
    bus.read(ADDRESS, &mut buf).map_err(sensor_error)?;
    Ok(buf[0])
}
