//! Screen buffer types
//!
//! Provides a character-based screen buffer for text-mode displays.

use heapless::String;

/// Largest supported geometry (20x4 modules)
pub const MAX_ROWS: usize = 4;

/// Largest supported line width
pub const MAX_COLS: usize = 20;

/// Screen buffer for text-mode displays
///
/// Every row is kept padded to the full width so that writing a row also
/// blanks whatever a longer previous text left behind.
#[derive(Clone, Debug)]
pub struct Screen {
    /// Current display content, padded to `cols`
    lines: [String<MAX_COLS>; MAX_ROWS],
    /// Rows changed since the last render
    dirty: [bool; MAX_ROWS],
    cols: usize,
    rows: usize,
}

impl Screen {
    /// Create a blank screen; geometry is capped at `MAX_COLS` x `MAX_ROWS`
    pub fn new(cols: u8, rows: u8) -> Self {
        let cols = (cols as usize).min(MAX_COLS);
        let rows = (rows as usize).min(MAX_ROWS);
        let mut screen = Self {
            lines: core::array::from_fn(|_| String::new()),
            dirty: [false; MAX_ROWS],
            cols,
            rows,
        };
        screen.clear();
        screen
    }

    /// Blank every row
    pub fn clear(&mut self) {
        for row in 0..self.rows {
            self.set_line(row, "");
        }
    }

    /// Set the content of a specific row
    ///
    /// Text is truncated to the width and padded with spaces. The row is
    /// marked dirty only if its content actually changed.
    pub fn set_line(&mut self, row: usize, text: &str) {
        if row >= self.rows {
            return;
        }

        let mut padded: String<MAX_COLS> = String::new();
        for ch in text.chars().take(self.cols) {
            if padded.push(ch).is_err() {
                break;
            }
        }
        while padded.chars().count() < self.cols {
            if padded.push(' ').is_err() {
                break;
            }
        }

        if self.lines[row] != padded || self.lines[row].is_empty() {
            self.lines[row] = padded;
            self.dirty[row] = true;
        }
    }

    /// Get the content of a specific row
    pub fn get_line(&self, row: usize) -> Option<&str> {
        if row < self.rows {
            Some(self.lines[row].as_str())
        } else {
            None
        }
    }

    /// Check if a row needs redrawing
    pub fn is_row_dirty(&self, row: usize) -> bool {
        row < self.rows && self.dirty[row]
    }

    /// Check if any row needs redrawing
    pub fn is_dirty(&self) -> bool {
        self.dirty[..self.rows].iter().any(|d| *d)
    }

    /// Mark a row clean (after rendering)
    pub fn mark_clean(&mut self, row: usize) {
        if row < self.rows {
            self.dirty[row] = false;
        }
    }

    /// Mark every row dirty (force full redraw)
    pub fn mark_dirty(&mut self) {
        for d in &mut self.dirty[..self.rows] {
            *d = true;
        }
    }

    /// Get number of rows
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Get number of columns
    pub const fn cols(&self) -> usize {
        self.cols
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Screen {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Screen[");
        for (i, line) in self.lines[..self.rows].iter().enumerate() {
            if i > 0 {
                defmt::write!(f, ", ");
            }
            defmt::write!(f, "{}", line.as_str());
        }
        defmt::write!(f, "]");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_screen_is_blank_and_dirty() {
        let screen = Screen::new(16, 2);
        assert_eq!(screen.get_line(0), Some("                "));
        assert!(screen.is_row_dirty(0));
        assert!(screen.is_row_dirty(1));
        assert_eq!(screen.get_line(2), None);
    }

    #[test]
    fn test_truncate_and_pad() {
        let mut screen = Screen::new(16, 2);
        screen.set_line(0, "Temp: 77.00 F");
        assert_eq!(screen.get_line(0), Some("Temp: 77.00 F   "));
        screen.set_line(1, "a line that is far too long");
        assert_eq!(screen.get_line(1), Some("a line that is f"));
    }

    #[test]
    fn test_unchanged_line_stays_clean() {
        let mut screen = Screen::new(16, 2);
        screen.set_line(0, "Temp: 77.00 F");
        screen.mark_clean(0);
        screen.mark_clean(1);
        screen.set_line(0, "Temp: 77.00 F");
        assert!(!screen.is_dirty());
        screen.set_line(0, "Temp: 77.01 F");
        assert!(screen.is_row_dirty(0));
        assert!(!screen.is_row_dirty(1));
    }

    #[test]
    fn test_geometry_is_capped() {
        let screen = Screen::new(40, 8);
        assert_eq!(screen.cols(), MAX_COLS);
        assert_eq!(screen.rows(), MAX_ROWS);
    }

    #[test]
    fn test_out_of_range_row_ignored() {
        let mut screen = Screen::new(16, 2);
        screen.mark_clean(0);
        screen.mark_clean(1);
        screen.set_line(5, "nope");
        assert!(!screen.is_dirty());
    }
}
