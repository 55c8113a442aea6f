//! I2C bus over Linux `i2c-dev`
//!
//! `/dev/i2c-1` is the header bus on every Raspberry Pi since the B+.

use std::path::{Path, PathBuf};

use embedded_hal::i2c::{Error as _, ErrorKind, I2c, NoAcknowledgeSource};
use linux_embedded_hal::I2cdev;
use thermowatch_hal::{I2cBus, I2cError};

/// I2C bus on a Linux host
pub type LinuxI2c = EhalI2c<I2cdev>;

/// Error from I2C operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum I2cBusError {
    /// Bus error
    Bus,
    /// Arbitration lost
    ArbitrationLost,
    /// No device acknowledged the address
    AddressNack,
    /// Device stopped acknowledging data bytes
    DataNack,
    /// Overrun
    Overrun,
    /// Other error
    Other,
}

impl From<ErrorKind> for I2cBusError {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::Bus => I2cBusError::Bus,
            ErrorKind::ArbitrationLoss => I2cBusError::ArbitrationLost,
            ErrorKind::NoAcknowledge(NoAcknowledgeSource::Data) => I2cBusError::DataNack,
            ErrorKind::NoAcknowledge(_) => I2cBusError::AddressNack,
            ErrorKind::Overrun => I2cBusError::Overrun,
            _ => I2cBusError::Other,
        }
    }
}

impl I2cError for I2cBusError {
    fn is_address_nack(&self) -> bool {
        matches!(self, I2cBusError::AddressNack)
    }
}

/// Failure to open the bus device node
#[derive(Debug, thiserror::Error)]
#[error("cannot open I2C bus {path}: {reason}")]
pub struct OpenError {
    /// Device node that failed to open
    pub path: PathBuf,
    /// Reason reported by the kernel interface
    pub reason: String,
}

/// Adapter from an `embedded-hal` I2C master to [`I2cBus`]
pub struct EhalI2c<T> {
    inner: T,
}

impl<T> EhalI2c<T> {
    /// Wrap an `embedded-hal` I2C master
    pub fn new(inner: T) -> Self {
        Self { inner }
    }

    /// Release the wrapped master
    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T: I2c> I2cBus for EhalI2c<T> {
    type Error = I2cBusError;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.inner
            .write(address, data)
            .map_err(|e| I2cBusError::from(e.kind()))
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.inner
            .read(address, buf)
            .map_err(|e| I2cBusError::from(e.kind()))
    }

    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.inner
            .write_read(address, write_data, read_buf)
            .map_err(|e| I2cBusError::from(e.kind()))
    }
}

/// Open an `i2c-dev` bus node such as `/dev/i2c-1`
pub fn open_bus(path: impl AsRef<Path>) -> Result<LinuxI2c, OpenError> {
    let path = path.as_ref();
    I2cdev::new(path)
        .map(EhalI2c::new)
        .map_err(|e| OpenError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
}
