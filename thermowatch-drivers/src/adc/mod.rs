//! Analog converter drivers
//!
//! Both supported chips are 8-bit, so the full-scale code is 255 either
//! way. `detect_adc` picks whichever one answers on the bus and hands back
//! a single `Sampler`.

pub mod ads7830;
pub mod pcf8591;

use thermowatch_core::traits::{Sampler, SensorError};
use thermowatch_hal::{I2cBus, I2cError};

use crate::probe::{first_responding, ProbeError};

/// Full-scale code of the 8-bit converters
pub const FULL_SCALE: u16 = 255;

/// Map a bus failure onto the sampler error: an unacknowledged address
/// means the converter is gone, anything else is a bus fault
pub(crate) fn sensor_error<E: I2cError>(err: E) -> SensorError {
    if err.is_address_nack() {
        SensorError::Unavailable
    } else {
        SensorError::Bus
    }
}

/// Converter chip variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AdcKind {
    Pcf8591,
    Ads7830,
}

impl AdcKind {
    /// Probe order matters: 0x48 first, then 0x4B
    pub const ALL: [AdcKind; 2] = [AdcKind::Pcf8591, AdcKind::Ads7830];

    pub const fn address(&self) -> u8 {
        match self {
            AdcKind::Pcf8591 => pcf8591::ADDRESS,
            AdcKind::Ads7830 => ads7830::ADDRESS,
        }
    }

    pub const fn channels(&self) -> u8 {
        match self {
            AdcKind::Pcf8591 => pcf8591::CHANNELS,
            AdcKind::Ads7830 => ads7830::CHANNELS,
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            AdcKind::Pcf8591 => "PCF8591",
            AdcKind::Ads7830 => "ADS7830",
        }
    }

    fn from_address(address: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.address() == address)
    }
}

/// Detected converter bound to one input channel
pub struct AdcDevice<B: I2cBus> {
    bus: B,
    kind: AdcKind,
    channel: u8,
}

impl<B: I2cBus> AdcDevice<B> {
    /// Bind a known chip without probing
    pub fn new(bus: B, kind: AdcKind, channel: u8) -> Result<Self, ProbeError> {
        if channel >= kind.channels() {
            return Err(ProbeError::InvalidChannel {
                channel,
                available: kind.channels(),
            });
        }
        Ok(Self { bus, kind, channel })
    }

    pub fn kind(&self) -> AdcKind {
        self.kind
    }

    pub fn channel(&self) -> u8 {
        self.channel
    }

    /// Release the bus
    pub fn into_inner(self) -> B {
        self.bus
    }
}

impl<B: I2cBus> Sampler for AdcDevice<B> {
    fn read_raw(&mut self) -> Result<u16, SensorError> {
        let code = match self.kind {
            AdcKind::Pcf8591 => pcf8591::read_channel(&mut self.bus, self.channel)?,
            AdcKind::Ads7830 => ads7830::read_channel(&mut self.bus, self.channel)?,
        };
        Ok(u16::from(code))
    }

    fn full_scale(&self) -> u16 {
        FULL_SCALE
    }
}

/// Find the converter on `bus` and bind it to `channel`
pub fn detect_adc<B: I2cBus>(mut bus: B, channel: u8) -> Result<AdcDevice<B>, ProbeError> {
    let addresses = AdcKind::ALL.map(|k| k.address());
    let kind = first_responding(&mut bus, &addresses)
        .and_then(AdcKind::from_address)
        .ok_or(ProbeError::NotFound)?;
    AdcDevice::new(bus, kind, channel)
}
