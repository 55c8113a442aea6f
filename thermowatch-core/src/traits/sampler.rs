//! Analog sampler trait

/// Errors that can occur while sampling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// Converter did not respond (not acknowledged, unplugged)
    Unavailable,
    /// Bus fault during the transfer
    Bus,
}

/// Source of raw analog samples
///
/// Implementations hide which converter chip is fitted.
pub trait Sampler {
    /// Read one raw code in `0..=full_scale()`
    ///
    /// Takes `&mut self` because bus transfers require mutable access.
    fn read_raw(&mut self) -> Result<u16, SensorError>;

    /// Full-scale code of the converter
    fn full_scale(&self) -> u16 {
        255
    }
}

impl<T: Sampler + ?Sized> Sampler for &mut T {
    fn read_raw(&mut self) -> Result<u16, SensorError> {
        T::read_raw(self)
    }

    fn full_scale(&self) -> u16 {
        T::full_scale(self)
    }
}
