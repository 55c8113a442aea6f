//! Alert notifiers
//!
//! Email when an `[email]` section is configured, otherwise the log.

mod email;
mod log;

pub use email::{EmailError, EmailNotifier};
pub use log::LogNotifier;

use thermowatch_core::traits::Notifier;
use tracing::info;

use crate::config::{EmailSettings, SMTP_PASSWORD_ENV};

/// Build the notifier for this run
///
/// `dry_run` forces the log notifier even when email is configured.
pub fn build_notifier(
    email: Option<&EmailSettings>,
    dry_run: bool,
) -> Result<Box<dyn Notifier>, EmailError> {
    match email {
        Some(settings) if !dry_run => {
            let password = std::env::var(SMTP_PASSWORD_ENV).ok();
            let notifier = EmailNotifier::new(settings, password)?;
            info!(
                host = %settings.smtp_host,
                port = settings.smtp_port,
                to = %settings.to,
                "Email alerts enabled"
            );
            Ok(Box::new(notifier))
        }
        Some(_) => {
            info!("Dry run: alerts will be logged, not emailed");
            Ok(Box::new(LogNotifier::new()))
        }
        None => {
            info!("No [email] section: alerts will be logged only");
            Ok(Box::new(LogNotifier::new()))
        }
    }
}
