//! HD44780 character LCD in 4-bit mode behind a PCF8574
//!
//! # Backpack wiring
//!
//! | Expander pin | LCD signal |
//! |--------------|------------|
//! | P0           | RS         |
//! | P1           | RW (held low) |
//! | P2           | E          |
//! | P3           | Backlight  |
//! | P4..P7       | D4..D7     |
//!
//! Each nibble goes out as one port write with E high followed by one with
//! E low; the controller latches on the falling edge.

use embedded_hal::delay::DelayNs;
use thermowatch_display::{DisplayBackend, DisplayError, MAX_COLS};
use thermowatch_hal::I2cBus;

use super::pcf8574::Pcf8574;

/// Register select
const PIN_RS: u8 = 1 << 0;
/// Enable strobe
const PIN_E: u8 = 1 << 2;
/// Backlight transistor
const PIN_BACKLIGHT: u8 = 1 << 3;

/// Controller commands
mod cmd {
    pub const CLEAR: u8 = 0x01;
    pub const ENTRY_MODE: u8 = 0x04;
    pub const DISPLAY_CONTROL: u8 = 0x08;
    pub const FUNCTION_SET: u8 = 0x20;
    pub const SET_DDRAM: u8 = 0x80;

    /// Entry mode: cursor moves right
    pub const ENTRY_INCREMENT: u8 = 0x02;
    /// Display control: display on
    pub const DISPLAY_ON: u8 = 0x04;
    /// Function set: two (or more) lines
    pub const TWO_LINE: u8 = 0x08;
}

/// DDRAM start address of each row
const ROW_OFFSETS: [u8; 4] = [0x00, 0x40, 0x14, 0x54];

/// HD44780 LCD driver
pub struct Lcd<B: I2cBus, D: DelayNs> {
    port: Pcf8574<B>,
    delay: D,
    cols: u8,
    rows: u8,
    backlight: bool,
    initialized: bool,
}

impl<B: I2cBus, D: DelayNs> Lcd<B, D> {
    /// Wrap an expander; call `begin` before writing
    pub fn new(port: Pcf8574<B>, delay: D) -> Self {
        Self {
            port,
            delay,
            cols: 16,
            rows: 2,
            backlight: false,
            initialized: false,
        }
    }

    /// Run the 4-bit initialization sequence for a `cols` x `rows` panel,
    /// at most 20x4
    pub fn begin(&mut self, cols: u8, rows: u8) -> Result<(), DisplayError> {
        let cols_ok = (1..=MAX_COLS).contains(&(cols as usize));
        let rows_ok = (1..=ROW_OFFSETS.len()).contains(&(rows as usize));
        if !cols_ok || !rows_ok {
            return Err(DisplayError::InvalidCoordinates);
        }
        self.cols = cols;
        self.rows = rows;

        // Power-on settle
        self.delay.delay_ms(50);
        self.write_port(self.backlight_bits())?;

        // Force 8-bit mode three times, then switch to 4-bit
        self.write_nibble(0x03, 0)?;
        self.delay.delay_us(4_500);
        self.write_nibble(0x03, 0)?;
        self.delay.delay_us(4_500);
        self.write_nibble(0x03, 0)?;
        self.delay.delay_us(150);
        self.write_nibble(0x02, 0)?;

        let lines = if rows > 1 { cmd::TWO_LINE } else { 0 };
        self.command(cmd::FUNCTION_SET | lines)?;
        self.command(cmd::DISPLAY_CONTROL | cmd::DISPLAY_ON)?;
        self.command(cmd::ENTRY_MODE | cmd::ENTRY_INCREMENT)?;
        self.initialized = true;
        self.clear()
    }

    /// Blank the panel and home the cursor
    pub fn clear(&mut self) -> Result<(), DisplayError> {
        self.command(cmd::CLEAR)?;
        // Clear is the one slow command
        self.delay.delay_ms(2);
        Ok(())
    }

    /// Move the cursor to `col`, `row`
    pub fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), DisplayError> {
        if row >= self.rows || col >= self.cols {
            return Err(DisplayError::InvalidCoordinates);
        }
        self.command(cmd::SET_DDRAM | (ROW_OFFSETS[row as usize] + col))
    }

    /// Write text at the cursor; characters outside ASCII print as `?`
    pub fn write_str(&mut self, text: &str) -> Result<(), DisplayError> {
        for ch in text.chars() {
            let byte = if ch.is_ascii() { ch as u8 } else { b'?' };
            self.send(byte, PIN_RS)?;
        }
        Ok(())
    }

    /// Switch the backlight; the cached state only changes once the
    /// expander acknowledged the write
    pub fn set_backlight(&mut self, on: bool) -> Result<(), DisplayError> {
        self.port
            .output(3, on)
            .map_err(|_| DisplayError::Communication)?;
        self.backlight = on;
        Ok(())
    }

    pub fn backlight(&self) -> bool {
        self.backlight
    }

    /// Release the expander
    pub fn into_inner(self) -> Pcf8574<B> {
        self.port
    }

    fn command(&mut self, value: u8) -> Result<(), DisplayError> {
        self.send(value, 0)
    }

    fn send(&mut self, value: u8, mode: u8) -> Result<(), DisplayError> {
        self.write_nibble(value >> 4, mode)?;
        self.write_nibble(value & 0x0F, mode)
    }

    fn write_nibble(&mut self, nibble: u8, mode: u8) -> Result<(), DisplayError> {
        let bits = (nibble << 4) | mode | self.backlight_bits();
        self.write_port(bits | PIN_E)?;
        self.delay.delay_us(1);
        self.write_port(bits)?;
        // Most commands need 37 us to execute
        self.delay.delay_us(50);
        Ok(())
    }

    fn write_port(&mut self, value: u8) -> Result<(), DisplayError> {
        self.port
            .write_port(value)
            .map_err(|_| DisplayError::Communication)
    }

    fn backlight_bits(&self) -> u8 {
        if self.backlight {
            PIN_BACKLIGHT
        } else {
            0
        }
    }
}

impl<B: I2cBus, D: DelayNs> DisplayBackend for Lcd<B, D> {
    fn clear(&mut self) -> Result<(), DisplayError> {
        if !self.initialized {
            return Err(DisplayError::NotInitialized);
        }
        Lcd::clear(self)
    }

    fn draw_text(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError> {
        if !self.initialized {
            return Err(DisplayError::NotInitialized);
        }
        self.set_cursor(col, row)?;
        let room = (self.cols - col) as usize;
        let end = text
            .char_indices()
            .nth(room)
            .map(|(i, _)| i)
            .unwrap_or(text.len());
        self.write_str(&text[..end])
    }

    fn dimensions(&self) -> (u8, u8) {
        (self.cols, self.rows)
    }

    fn is_ready(&self) -> bool {
        self.initialized
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lcd::pcf8574::ADDRESS;
    use crate::mock::{MockBus, NoDelay};
    use std::vec::Vec;

    fn lcd() -> Lcd<MockBus, NoDelay> {
        let bus = MockBus::with_devices(&[ADDRESS]);
        Lcd::new(Pcf8574::new(bus, ADDRESS), NoDelay::default())
    }

    /// Initialized 16x2 panel with the init traffic already discarded
    fn ready_lcd() -> Lcd<MockBus, NoDelay> {
        let mut lcd = lcd();
        lcd.begin(16, 2).unwrap();
        lcd.port.bus_mut().writes.clear();
        lcd
    }

    /// Rebuild the bytes the controller latched (value on each falling E edge)
    fn latched_bytes(port_writes: &[u8]) -> Vec<(bool, u8)> {
        let mut nibbles = Vec::new();
        for pair in port_writes.windows(2) {
            if pair[0] & PIN_E != 0 && pair[1] & PIN_E == 0 {
                nibbles.push((pair[1] & PIN_RS != 0, pair[1] >> 4));
            }
        }
        nibbles
            .chunks(2)
            .filter(|c| c.len() == 2)
            .map(|c| (c[0].0, (c[0].1 << 4) | c[1].1))
            .collect()
    }

    #[test]
    fn test_begin_sequence() {
        let mut lcd = lcd();
        lcd.set_backlight(true).unwrap();
        lcd.begin(16, 2).unwrap();
        assert!(lcd.is_ready());

        let writes = lcd.into_inner().into_inner().bytes_to(ADDRESS);
        // Every write after the backlight switch keeps P3 high
        assert!(writes.iter().all(|b| b & PIN_BACKLIGHT != 0));

        // Four lone reset nibbles precede paired commands
        let strobes: Vec<u8> = writes
            .windows(2)
            .filter(|p| p[0] & PIN_E != 0 && p[1] & PIN_E == 0)
            .map(|p| p[1] >> 4)
            .collect();
        assert_eq!(&strobes[..4], &[0x03, 0x03, 0x03, 0x02]);

        let commands: Vec<u8> = strobes[4..]
            .chunks(2)
            .map(|c| (c[0] << 4) | c[1])
            .collect();
        assert_eq!(commands, vec![0x28, 0x0C, 0x06, 0x01]);
    }

    #[test]
    fn test_draw_text_positions_and_writes() {
        let mut lcd = ready_lcd();
        lcd.draw_text(1, 0, "Hi").unwrap();
        let writes = lcd.into_inner().into_inner().bytes_to(ADDRESS);
        assert_eq!(
            latched_bytes(&writes),
            vec![(false, 0xC0), (true, b'H'), (true, b'i')]
        );
    }

    #[test]
    fn test_draw_text_clips_to_width() {
        let mut lcd = ready_lcd();
        lcd.draw_text(0, 14, "abcdef").unwrap();
        let writes = lcd.into_inner().into_inner().bytes_to(ADDRESS);
        let bytes = latched_bytes(&writes);
        assert_eq!(bytes, vec![(false, 0x80 | 14), (true, b'a'), (true, b'b')]);
    }

    #[test]
    fn test_not_initialized() {
        let mut lcd = lcd();
        assert_eq!(
            DisplayBackend::draw_text(&mut lcd, 0, 0, "x"),
            Err(DisplayError::NotInitialized)
        );
    }

    #[test]
    fn test_cursor_out_of_range() {
        let mut lcd = lcd();
        lcd.begin(16, 2).unwrap();
        assert_eq!(lcd.set_cursor(0, 2), Err(DisplayError::InvalidCoordinates));
        assert_eq!(lcd.set_cursor(16, 0), Err(DisplayError::InvalidCoordinates));
    }

    #[test]
    fn test_non_ascii_replaced() {
        let mut lcd = ready_lcd();
        lcd.write_str("°").unwrap();
        let writes = lcd.into_inner().into_inner().bytes_to(ADDRESS);
        assert_eq!(latched_bytes(&writes), vec![(true, b'?')]);
    }

    #[test]
    fn test_bus_failure_is_communication_error() {
        let mut bus = MockBus::with_devices(&[ADDRESS]);
        bus.fail_all = true;
        let mut lcd = Lcd::new(Pcf8574::new(bus, ADDRESS), NoDelay::default());
        assert_eq!(lcd.begin(16, 2), Err(DisplayError::Communication));
        assert!(!lcd.is_ready());
    }

    #[test]
    fn test_backlight_unchanged_after_failed_write() {
        let mut lcd = ready_lcd();
        lcd.port.bus_mut().fail_all = true;
        assert_eq!(lcd.set_backlight(true), Err(DisplayError::Communication));
        assert!(!lcd.backlight());
        assert_eq!(lcd.port.latch() & PIN_BACKLIGHT, 0);

        lcd.port.bus_mut().fail_all = false;
        lcd.set_backlight(true).unwrap();
        assert!(lcd.backlight());
    }

    #[test]
    fn test_begin_rejects_wide_panel() {
        let mut lcd = lcd();
        assert_eq!(lcd.begin(21, 2), Err(DisplayError::InvalidCoordinates));
        assert_eq!(lcd.begin(16, 5), Err(DisplayError::InvalidCoordinates));
        assert!(!lcd.is_ready());
        lcd.begin(20, 4).unwrap();
        assert!(lcd.set_cursor(19, 3).is_ok());
    }
}
