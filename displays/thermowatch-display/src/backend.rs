//! Character panel backend
//!
//! The seam between [`Screen`](crate::Screen) rendering and a concrete
//! controller. Positions are character cells, never pixels.

/// Why a panel operation failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// The controller or its port expander did not take the write
    Communication,
    /// Row or column outside the panel, or an unsupported panel size
    InvalidCoordinates,
    /// Drawing before the panel was brought up
    NotInitialized,
}

/// A character LCD the monitor can write its readout to
///
/// Rows and columns are zero-based cell indices. Text past the right
/// edge is dropped by the implementation rather than wrapped.
pub trait DisplayBackend {
    /// Blank every cell
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Put `text` on `row` starting at `col`
    ///
    /// Only ASCII is rendered; other characters are substituted.
    fn draw_text(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError>;

    /// Push pending cells to the glass
    ///
    /// An HD44780 writes every character as it is sent, so the default
    /// has nothing to do.
    fn flush(&mut self) -> Result<(), DisplayError> {
        Ok(())
    }

    /// Panel size as `(columns, rows)`
    fn dimensions(&self) -> (u8, u8);

    /// Whether the init sequence has completed
    fn is_ready(&self) -> bool;
}
