//! Recording I2C bus for driver tests

use std::collections::VecDeque;
use std::vec::Vec;

use thermowatch_hal::{I2cBus, I2cError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockError {
    /// Address not acknowledged
    Nack,
    /// Injected bus fault
    Bus,
}

impl I2cError for MockError {
    fn is_address_nack(&self) -> bool {
        *self == MockError::Nack
    }
}

/// Acknowledges a fixed set of addresses, records writes, and answers
/// reads from a queue
pub struct MockBus {
    devices: Vec<u8>,
    pub writes: Vec<(u8, Vec<u8>)>,
    pub reads: VecDeque<u8>,
    pub fail_all: bool,
}

impl MockBus {
    pub fn with_devices(devices: &[u8]) -> Self {
        Self {
            devices: devices.to_vec(),
            writes: Vec::new(),
            reads: VecDeque::new(),
            fail_all: false,
        }
    }

    /// Stop acknowledging `address`
    pub fn unplug(&mut self, address: u8) {
        self.devices.retain(|&a| a != address);
    }

    pub fn queue_reads(&mut self, bytes: &[u8]) {
        self.reads.extend(bytes.iter().copied());
    }

    /// All bytes written to `address`, excluding probe traffic
    pub fn bytes_to(&self, address: u8) -> Vec<u8> {
        self.writes
            .iter()
            .filter(|(a, _)| *a == address)
            .flat_map(|(_, d)| d.iter().copied())
            .collect()
    }

    fn check(&self, address: u8) -> Result<(), MockError> {
        if self.fail_all {
            Err(MockError::Bus)
        } else if !self.devices.contains(&address) {
            Err(MockError::Nack)
        } else {
            Ok(())
        }
    }
}

impl I2cBus for MockBus {
    type Error = MockError;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), MockError> {
        self.check(address)?;
        self.writes.push((address, data.to_vec()));
        Ok(())
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), MockError> {
        self.check(address)?;
        for b in buf.iter_mut() {
            *b = self.reads.pop_front().unwrap_or(0);
        }
        Ok(())
    }

    fn write_read(&mut self, address: u8, write: &[u8], buf: &mut [u8]) -> Result<(), MockError> {
        self.write(address, write)?;
        self.read(address, buf)
    }

    fn probe(&mut self, address: u8) -> bool {
        self.check(address).is_ok()
    }
}

/// Delay that returns immediately and sums the requested time
#[derive(Default)]
pub struct NoDelay {
    pub total_ns: u64,
}

impl embedded_hal::delay::DelayNs for NoDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
    }
}
