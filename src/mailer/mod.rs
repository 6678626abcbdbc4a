//! Outbound email: the mailer seam, template rendering, and the SMTP
//! and console providers.

pub mod console;
pub mod smtp;
pub mod templates;

use std::fmt;

use async_trait::async_trait;

use crate::error::BookingError;

pub use console::ConsoleMailer;
pub use smtp::SmtpMailer;

/// A fully-rendered outbound email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    /// Recipient address.
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// HTML body.
    pub html: String,
}

/// Email dispatch seam.
///
/// The gateway renders templates itself and hands the provider a
/// complete message; providers only transport it.
#[async_trait]
pub trait Mailer: Send + Sync + fmt::Debug {
    /// Dispatches one email.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Email`] when the message cannot be built
    /// or the transport rejects it.
    async fn send(&self, message: &EmailMessage) -> Result<(), BookingError>;
}
