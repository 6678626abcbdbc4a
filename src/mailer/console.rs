//! Console mailer for development and testing.

use async_trait::async_trait;
use tracing::info;

use super::{EmailMessage, Mailer};
use crate::error::BookingError;

/// Mailer that logs messages instead of sending them.
///
/// Selected automatically when no SMTP host is configured, so local
/// development never needs a relay.
#[derive(Clone, Debug, Default)]
pub struct ConsoleMailer;

impl ConsoleMailer {
    /// Creates a new console mailer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Mailer for ConsoleMailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), BookingError> {
        info!(
            to = %message.to,
            subject = %message.subject,
            body_bytes = message.html.len(),
            "email (console mode, not sent)"
        );
        Ok(())
    }
}
