//! Hardware bring-up
//!
//! Opens the I2C bus, detects the converter and the LCD backpack, and
//! initializes the panel. Any failure here is fatal: the daemon has no
//! useful degraded mode without a sensor or a readout.

use std::path::{Path, PathBuf};

use thermowatch_core::traits::Sampler;
use thermowatch_display::{DisplayError, ScreenRenderer};
use thermowatch_drivers::{detect_adc, AdcDevice, Lcd, Pcf8574, ProbeError};
use thermowatch_hal_linux::{open_bus, Delay, LinuxI2c, OpenError};
use tracing::{debug, info};

use crate::config::HardwareSettings;

/// Status readout stack: renderer over the LCD over the expander
pub type StatusLcd = ScreenRenderer<Lcd<LinuxI2c, Delay>>;

/// Hardware setup errors
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error(transparent)]
    Bus(#[from] OpenError),

    #[error(
        "no ADC found on {bus} (looked for PCF8591 at 0x48 and ADS7830 at 0x4B); \
         check the wiring with `{hint}`"
    )]
    NoAdc { bus: PathBuf, hint: String },

    #[error("ADC input {channel} does not exist on the detected converter ({available} inputs)")]
    AdcChannel { channel: u8, available: u8 },

    #[error(
        "no LCD backpack found on {bus} (looked at 0x27 and 0x3F); \
         check the wiring with `{hint}`"
    )]
    NoLcd { bus: PathBuf, hint: String },

    #[error("LCD initialization failed: {0:?}")]
    Lcd(DisplayError),
}

/// `i2cdetect` invocation that scans `bus`
pub fn i2cdetect_hint(bus: &Path) -> String {
    let number = bus
        .file_name()
        .and_then(|name| name.to_str())
        .and_then(|name| name.strip_prefix("i2c-"))
        .filter(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
        .unwrap_or("1");
    format!("i2cdetect -y {number}")
}

/// Detected and initialized hardware
///
/// Dropping it clears the panel and switches the backlight off.
pub struct Hardware {
    pub adc: AdcDevice<LinuxI2c>,
    pub display: StatusLcd,
}

impl Hardware {
    pub fn open(settings: &HardwareSettings) -> Result<Self, SetupError> {
        let bus = &settings.i2c_bus;
        let hint = i2cdetect_hint(bus);

        // The ADC and the LCD each get their own handle on the same bus;
        // the kernel serializes transfers between them.
        let adc = detect_adc(open_bus(bus)?, settings.adc_channel).map_err(|e| match e {
            ProbeError::NotFound => SetupError::NoAdc {
                bus: bus.clone(),
                hint: hint.clone(),
            },
            ProbeError::InvalidChannel { channel, available } => {
                SetupError::AdcChannel { channel, available }
            }
        })?;
        info!(
            chip = adc.kind().name(),
            address = format_args!("{:#04x}", adc.kind().address()),
            channel = adc.channel(),
            full_scale = adc.full_scale(),
            "ADC detected"
        );

        let port = Pcf8574::detect(open_bus(bus)?).map_err(|_| SetupError::NoLcd {
            bus: bus.clone(),
            hint,
        })?;
        info!(
            address = format_args!("{:#04x}", port.address()),
            "LCD backpack detected"
        );

        let mut lcd = Lcd::new(port, Delay);
        lcd.set_backlight(true).map_err(SetupError::Lcd)?;
        lcd.begin(settings.lcd_columns, settings.lcd_rows)
            .map_err(SetupError::Lcd)?;
        debug!(
            columns = settings.lcd_columns,
            rows = settings.lcd_rows,
            "LCD initialized"
        );

        Ok(Self {
            adc,
            display: ScreenRenderer::new(lcd),
        })
    }
}

impl Drop for Hardware {
    fn drop(&mut self) {
        let lcd = self.display.backend_mut();
        let cleared = lcd.clear();
        let dark = lcd.set_backlight(false);
        debug!(?cleared, ?dark, "LCD released");
    }
}
