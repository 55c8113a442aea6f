//! Email alert delivery via SMTP.
//!
//! Uses the blocking `lettre` transport with STARTTLS. The polling loop
//! calls [`Notifier::send`] inline, so the transport carries a timeout
//! that bounds how long a dead server can hold up a cycle.

use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use thermowatch_core::safety::Alert;
use thermowatch_core::traits::{DeliveryError, Notifier};
use tracing::{info, warn};

use crate::config::{ConfigError, EmailSettings, SMTP_PASSWORD_ENV};

/// Error type for email setup and delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    /// SMTP transport-level failure (authentication, connection, etc.).
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// The recipient or sender address could not be parsed.
    #[error(transparent)]
    Address(#[from] ConfigError),

    /// The MIME message could not be assembled.
    #[error("email build error: {0}")]
    Build(#[from] lettre::error::Error),

    /// A username is configured but the password variable is unset.
    #[error("SMTP username is set but THERMOWATCH_SMTP_PASSWORD is not")]
    MissingPassword,
}

impl EmailError {
    /// Collapse into the core delivery error
    pub fn delivery_error(&self) -> DeliveryError {
        match self {
            EmailError::Transport(e) if e.is_timeout() => DeliveryError::Timeout,
            EmailError::Transport(e) if e.is_permanent() => DeliveryError::Rejected,
            EmailError::Transport(_) => DeliveryError::Transport,
            EmailError::Address(_) | EmailError::Build(_) => DeliveryError::Rejected,
            EmailError::MissingPassword => DeliveryError::Disabled,
        }
    }
}

/// Sends alerts as plain-text email
pub struct EmailNotifier {
    mailer: SmtpTransport,
    from: Mailbox,
    to: Mailbox,
}

impl EmailNotifier {
    /// Build the transport; no connection is made until the first send
    pub fn new(settings: &EmailSettings, password: Option<String>) -> Result<Self, EmailError> {
        let from = settings.sender()?;
        let to = settings.recipient()?;

        let mut builder = SmtpTransport::starttls_relay(&settings.smtp_host)?
            .port(settings.smtp_port)
            .timeout(Some(settings.timeout()));

        match (&settings.username, password) {
            (Some(user), Some(pass)) => {
                builder = builder.credentials(Credentials::new(user.clone(), pass));
            }
            (Some(_), None) => return Err(EmailError::MissingPassword),
            (None, Some(_)) => {
                warn!("{} is set but no SMTP username is configured; ignoring it", SMTP_PASSWORD_ENV);
            }
            (None, None) => {}
        }

        Ok(Self {
            mailer: builder.build(),
            from,
            to,
        })
    }

    fn message(&self, alert: &Alert) -> Result<Message, EmailError> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(alert.subject())
            .header(ContentType::TEXT_PLAIN)
            .body(alert.body().as_str().to_owned())?;
        Ok(message)
    }

    fn deliver(&self, alert: &Alert) -> Result<(), EmailError> {
        let message = self.message(alert)?;
        self.mailer.send(&message)?;
        info!(to = %self.to, reading = %alert.reading, "Alert email sent");
        Ok(())
    }
}

impl Notifier for EmailNotifier {
    fn send(&mut self, alert: &Alert) -> Result<(), DeliveryError> {
        self.deliver(alert).map_err(|e| {
            warn!(error = %e, "Alert email failed");
            e.delivery_error()
        })
    }
}
