//! Two-line status display trait

/// Two-line text readout
///
/// Fire-and-forget: implementations absorb their own failures.
pub trait StatusDisplay {
    /// Show `line1` on the top row and `line2` on the bottom row
    fn render(&mut self, line1: &str, line2: &str);

    /// Writes that have failed since startup
    fn failed_writes(&self) -> u32 {
        0
    }
}

impl<T: StatusDisplay + ?Sized> StatusDisplay for &mut T {
    fn render(&mut self, line1: &str, line2: &str) {
        T::render(self, line1, line2)
    }

    fn failed_writes(&self) -> u32 {
        T::failed_writes(self)
    }
}
