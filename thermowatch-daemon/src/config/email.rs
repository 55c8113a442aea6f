//! `[email]` section

use std::time::Duration;

use lettre::message::Mailbox;
use serde::Deserialize;

use super::ConfigError;

/// Environment variable holding the SMTP password
pub const SMTP_PASSWORD_ENV: &str = "THERMOWATCH_SMTP_PASSWORD";

const DEFAULT_SMTP_PORT: u16 = 587;
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// SMTP delivery settings
///
/// The password is never read from the file; see [`SMTP_PASSWORD_ENV`].
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EmailSettings {
    pub smtp_host: String,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_smtp_port() -> u16 {
    DEFAULT_SMTP_PORT
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl EmailSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn sender(&self) -> Result<Mailbox, ConfigError> {
        parse_mailbox("email.from", &self.from)
    }

    pub fn recipient(&self) -> Result<Mailbox, ConfigError> {
        parse_mailbox("email.to", &self.to)
    }

    pub(super) fn validate(&self) -> Result<(), ConfigError> {
        if self.smtp_host.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "email.smtp_host",
                reason: "must not be empty".into(),
            });
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "email.timeout_secs",
                reason: "must be greater than zero".into(),
            });
        }
        self.sender()?;
        self.recipient()?;
        Ok(())
    }
}

fn parse_mailbox(field: &'static str, text: &str) -> Result<Mailbox, ConfigError> {
    text.parse().map_err(|e: lettre::address::AddressError| ConfigError::Invalid {
        field,
        reason: format!("{text:?}: {e}"),
    })
}
