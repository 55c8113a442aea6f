//! Character LCD over an I2C port expander

pub mod hd44780;
pub mod pcf8574;

pub use hd44780::Lcd;
pub use pcf8574::Pcf8574;
