//! Shared fixtures for unit tests.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use tokio::sync::RwLock;

use crate::domain::{Booking, BookingId, BookingKind, BookingStatus, GuestContact};
use crate::error::BookingError;
use crate::mailer::{EmailMessage, Mailer};

/// Mailer that records every message instead of sending it.
///
/// Addresses registered through [`RecordingMailer::failing_for`] fail
/// with an email error, which lets tests exercise partial fan-out
/// failure.
#[derive(Debug, Default)]
pub struct RecordingMailer {
    sent: RwLock<Vec<EmailMessage>>,
    fail_for: Vec<String>,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_for(address: &str) -> Self {
        Self {
            sent: RwLock::new(Vec::new()),
            fail_for: vec![address.to_string()],
        }
    }

    pub async fn sent(&self) -> Vec<EmailMessage> {
        self.sent.read().await.clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), BookingError> {
        if self.fail_for.contains(&message.to) {
            return Err(BookingError::Email(format!(
                "simulated delivery failure to {}",
                message.to
            )));
        }
        self.sent.write().await.push(message.clone());
        Ok(())
    }
}

/// A pending anonymous dahabiya booking with a guest contact attached.
pub fn anonymous_booking() -> Booking {
    Booking {
        id: BookingId::new(),
        booking_reference: "ND-0011223344".to_string(),
        kind: BookingKind::Dahabiya,
        dahabiya_id: Some(uuid::Uuid::new_v4()),
        package_id: None,
        start_date: NaiveDate::from_ymd_opt(2026, 11, 2).unwrap_or_default(),
        end_date: NaiveDate::from_ymd_opt(2026, 11, 6).unwrap_or_default(),
        guests: 2,
        guest_details: vec![],
        total_price: 1200.0,
        user_id: None,
        guest_contact: Some(GuestContact {
            name: "Nour".to_string(),
            email: "nour@example.com".to_string(),
            phone: None,
        }),
        status: BookingStatus::Pending,
        special_requests: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
        user: None,
        item: None,
    }
}
