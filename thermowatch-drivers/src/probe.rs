//! Bus scanning helpers shared by the detection factories

use thermowatch_hal::I2cBus;

/// Detection errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProbeError {
    /// Nothing acknowledged at any candidate address
    NotFound,
    /// Requested input channel does not exist on the detected chip
    InvalidChannel { channel: u8, available: u8 },
}

/// Return the first candidate address that acknowledges a probe
pub fn first_responding<B: I2cBus + ?Sized>(bus: &mut B, candidates: &[u8]) -> Option<u8> {
    candidates.iter().copied().find(|&addr| bus.probe(addr))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockBus;

    #[test]
    fn test_first_responding_respects_order() {
        let mut bus = MockBus::with_devices(&[0x3F, 0x27]);
        assert_eq!(first_responding(&mut bus, &[0x27, 0x3F]), Some(0x27));
        assert_eq!(first_responding(&mut bus, &[0x3F, 0x27]), Some(0x3F));
    }

    #[test]
    fn test_first_responding_none() {
        let mut bus = MockBus::with_devices(&[]);
        assert_eq!(first_responding(&mut bus, &[0x48, 0x4B]), None);
    }
}
