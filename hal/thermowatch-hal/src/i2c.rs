//! I2C bus abstractions
//!
//! Provides the I2C master operations the ADC and LCD drivers need.

/// Classification of an I2C failure
///
/// Drivers use it to tell a device that is not there (no ACK on its
/// address) from a bus that is misbehaving.
pub trait I2cError: core::fmt::Debug {
    /// True when the device did not acknowledge its address
    fn is_address_nack(&self) -> bool {
        false
    }
}

impl I2cError for core::convert::Infallible {}

/// I2C bus master
///
/// Provides basic I2C read/write operations for communicating with
/// peripheral devices.
pub trait I2cBus {
    /// Error type for I2C operations
    type Error: I2cError;

    /// Write data to a device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `data` - Bytes to write
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error>;

    /// Read data from a device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `buf` - Buffer to read into
    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error>;

    /// Write then read in a single transaction (repeated start)
    ///
    /// This is commonly used to write a command byte then read the result.
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `write_data` - Bytes to write (typically a command byte)
    /// * `read_buf` - Buffer to read into
    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error>;

    /// Check whether a device acknowledges at `address`
    ///
    /// Sends a single `0x00` byte, the same probe `i2cdetect` uses for
    /// write-only devices. Any bus error counts as "not present".
    fn probe(&mut self, address: u8) -> bool {
        self.write(address, &[0x00]).is_ok()
    }
}

impl<T: I2cBus + ?Sized> I2cBus for &mut T {
    type Error = T::Error;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        T::write(self, address, data)
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        T::read(self, address, buf)
    }

    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error> {
        T::write_read(self, address, write_data, read_buf)
    }

    fn probe(&mut self, address: u8) -> bool {
        T::probe(self, address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct NoAck;

    impl I2cError for NoAck {
        fn is_address_nack(&self) -> bool {
            true
        }
    }

    /// Bus that only acknowledges a single address
    struct SingleDeviceBus {
        present: u8,
        writes: usize,
    }

    impl I2cBus for SingleDeviceBus {
        type Error = NoAck;

        fn write(&mut self, address: u8, _data: &[u8]) -> Result<(), NoAck> {
            self.writes += 1;
            if address == self.present {
                Ok(())
            } else {
                Err(NoAck)
            }
        }

        fn read(&mut self, _address: u8, _buf: &mut [u8]) -> Result<(), NoAck> {
            Err(NoAck)
        }

        fn write_read(&mut self, _address: u8, _w: &[u8], _r: &mut [u8]) -> Result<(), NoAck> {
            Err(NoAck)
        }
    }

    #[test]
    fn test_probe_acknowledged() {
        let mut bus = SingleDeviceBus { present: 0x48, writes: 0 };
        assert!(bus.probe(0x48));
        assert!(!bus.probe(0x4B));
        assert_eq!(bus.writes, 2);
    }

    fn probe_owned<B: I2cBus>(mut bus: B, address: u8) -> bool {
        bus.probe(address)
    }

    #[test]
    fn test_probe_through_mut_ref() {
        let mut bus = SingleDeviceBus { present: 0x27, writes: 0 };
        assert!(probe_owned(&mut bus, 0x27));
        assert_eq!(bus.writes, 1);
    }

    #[test]
    fn test_error_classification() {
        let mut bus = SingleDeviceBus { present: 0x48, writes: 0 };
        let err = bus.write(0x4B, &[0x00]).unwrap_err();
        assert!(err.is_address_nack());
    }
}
