//! Daemon configuration
//!
//! Loaded once at startup from a TOML file. Every field has a default, so
//! a missing file yields a working configuration for the stock hat on
//! `/dev/i2c-1` with log-only alerts.
//!
//! ```toml
//! [monitor]
//! unit = "F"
//! poll_interval_ms = 100
//! rail_policy = "reject"
//!
//! [hardware]
//! i2c_bus = "/dev/i2c-1"
//! adc_channel = 0
//! lcd_columns = 16
//! lcd_rows = 2
//!
//! [email]
//! smtp_host = "smtp.example.com"
//! from = "pi@example.com"
//! to = "me@example.com"
//! username = "pi@example.com"
//! ```

mod email;

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thermowatch_core::config::{MonitorConfig, RailPolicy, POLL_INTERVAL_MS};
use thermowatch_core::Unit;
use thermowatch_display::{MAX_COLS, MAX_ROWS};

pub use email::{EmailSettings, SMTP_PASSWORD_ENV};

/// Default configuration file location
pub const DEFAULT_CONFIG_PATH: &str = "/etc/thermowatch/thermowatch.toml";

/// Header bus on Raspberry Pi boards since the B+
pub const DEFAULT_I2C_BUS: &str = "/dev/i2c-1";

/// Inputs on the largest supported converter
const MAX_ADC_CHANNEL: u8 = 8;

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    fn at_path(self, path: &Path) -> Self {
        match self {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        }
    }
}

/// Where the configuration came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    File,
    Defaults,
}

/// Top-level daemon configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DaemonConfig {
    pub monitor: MonitorSettings,
    pub hardware: HardwareSettings,
    /// Email alerts; absent means alerts are only logged
    pub email: Option<EmailSettings>,
}

/// `[monitor]` section
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MonitorSettings {
    pub unit: Unit,
    pub poll_interval_ms: u64,
    pub rail_policy: RailPolicy,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            unit: Unit::Fahrenheit,
            poll_interval_ms: POLL_INTERVAL_MS,
            rail_policy: RailPolicy::Reject,
        }
    }
}

impl MonitorSettings {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Core configuration for a sampler with the given full-scale code
    pub fn monitor_config(&self, full_scale: u16) -> MonitorConfig {
        MonitorConfig {
            unit: self.unit,
            rail_policy: self.rail_policy,
            full_scale,
        }
    }
}

/// `[hardware]` section
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HardwareSettings {
    pub i2c_bus: PathBuf,
    pub adc_channel: u8,
    pub lcd_columns: u8,
    pub lcd_rows: u8,
}

impl Default for HardwareSettings {
    fn default() -> Self {
        Self {
            i2c_bus: PathBuf::from(DEFAULT_I2C_BUS),
            adc_channel: 0,
            lcd_columns: 16,
            lcd_rows: 2,
        }
    }
}

impl DaemonConfig {
    /// Load from `path`; a missing file means defaults
    pub fn load(path: &Path) -> Result<(Self, ConfigSource), ConfigError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Ok((Self::default(), ConfigSource::Defaults));
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let config = Self::from_toml_str(&text).map_err(|e| e.at_path(path))?;
        Ok((config, ConfigSource::File))
    }

    /// Parse and validate TOML text
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: PathBuf::from("<inline>"),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check ranges and addresses
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.monitor.poll_interval_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "monitor.poll_interval_ms",
                reason: "must be greater than zero".into(),
            });
        }

        let hw = &self.hardware;
        if hw.adc_channel >= MAX_ADC_CHANNEL {
            return Err(ConfigError::Invalid {
                field: "hardware.adc_channel",
                reason: format!("{} is out of range 0..{}", hw.adc_channel, MAX_ADC_CHANNEL),
            });
        }
        if hw.lcd_columns == 0 || hw.lcd_columns as usize > MAX_COLS {
            return Err(ConfigError::Invalid {
                field: "hardware.lcd_columns",
                reason: format!("{} is out of range 1..={}", hw.lcd_columns, MAX_COLS),
            });
        }
        if hw.lcd_rows < 2 || hw.lcd_rows as usize > MAX_ROWS {
            return Err(ConfigError::Invalid {
                field: "hardware.lcd_rows",
                reason: format!("{} is out of range 2..={}", hw.lcd_rows, MAX_ROWS),
            });
        }

        if let Some(email) = &self.email {
            email.validate()?;
        }
        Ok(())
    }
}
