//! SMTP mailer implementation using Lettre.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};

use super::{EmailMessage, Mailer};
use crate::config::GatewayConfig;
use crate::error::BookingError;

/// SMTP mailer.
///
/// Sends real emails via an SMTP relay; suitable for production use.
/// A fresh transport is built per send to avoid connection pooling
/// issues, and the blocking send runs on `spawn_blocking`.
#[derive(Clone)]
pub struct SmtpMailer {
    smtp_server: String,
    smtp_port: u16,
    credentials: Credentials,
    from_email: String,
    from_name: String,
}

impl std::fmt::Debug for SmtpMailer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpMailer")
            .field("smtp_server", &self.smtp_server)
            .field("smtp_port", &self.smtp_port)
            .field("from_email", &self.from_email)
            .finish_non_exhaustive()
    }
}

impl SmtpMailer {
    /// Creates a mailer from the gateway configuration.
    #[must_use]
    pub fn from_config(config: &GatewayConfig) -> Self {
        Self::new(
            config.smtp_host.clone(),
            config.smtp_port,
            config.smtp_username.clone(),
            config.smtp_password.clone(),
            config.smtp_from_email.clone(),
            config.smtp_from_name.clone(),
        )
    }

    /// Creates a new SMTP mailer.
    #[must_use]
    pub fn new(
        smtp_server: String,
        smtp_port: u16,
        smtp_username: String,
        smtp_password: String,
        from_email: String,
        from_name: String,
    ) -> Self {
        let credentials = Credentials::new(smtp_username, smtp_password);
        Self {
            smtp_server,
            smtp_port,
            credentials,
            from_email,
            from_name,
        }
    }

    /// Builds an SMTP transport for one send.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Email`] if the relay cannot be resolved.
    fn build_transport(&self) -> Result<SmtpTransport, BookingError> {
        Ok(SmtpTransport::relay(&self.smtp_server)
            .map_err(|e| BookingError::Email(format!("SMTP relay error: {e}")))?
            .port(self.smtp_port)
            .credentials(self.credentials.clone())
            .build())
    }

    fn from_header(&self) -> String {
        format!("{} <{}>", self.from_name, self.from_email)
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), BookingError> {
        let email = Message::builder()
            .from(
                self.from_header()
                    .parse()
                    .map_err(|e| BookingError::Email(format!("invalid from address: {e}")))?,
            )
            .to(message
                .to
                .parse()
                .map_err(|e| BookingError::Email(format!("invalid to address: {e}")))?)
            .subject(&message.subject)
            .header(ContentType::TEXT_HTML)
            .body(message.html.clone())
            .map_err(|e| BookingError::Email(format!("failed to build email: {e}")))?;

        let mailer = self.build_transport()?;

        tokio::task::spawn_blocking(move || {
            mailer
                .send(&email)
                .map(|_| ())
                .map_err(|e| BookingError::Email(format!("failed to send email: {e}")))
        })
        .await
        .map_err(|e| BookingError::Email(format!("email task failed: {e}")))?
    }
}
