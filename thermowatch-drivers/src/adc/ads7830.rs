//! ADS7830 8-bit, 8-channel converter

use thermowatch_core::traits::SensorError;
use thermowatch_hal::I2cBus;

use super::sensor_error;

/// Default address on the common Pi hats
pub const ADDRESS: u8 = 0x4B;

/// Number of single-ended inputs
pub const CHANNELS: u8 = 8;

/// Single-ended, internal reference off, converter on
const COMMAND: u8 = 0x84;

/// Command byte selecting `channel`
///
/// The channel-select bits interleave odd and even inputs
/// (CH0, CH2, CH4, CH6, CH1, CH3, CH5, CH7).
pub const fn command_byte(channel: u8) -> u8 {
    let select = ((channel << 2) | (channel >> 1)) & 0x07;
    COMMAND | (select << 4)
}

/// Read one sample from `channel`
pub fn read_channel<B: I2cBus + ?Sized>(bus: &mut B, channel: u8) -> Result<u8, SensorError> {
    bus.write(ADDRESS, &[command_byte(channel)])
        .map_err(sensor_error)?;

    let mut buf = [0u8; 1];
    bus.read(ADDRESS, &mut buf).map_err(sensor_error)?;
    Ok(buf[0])
}
