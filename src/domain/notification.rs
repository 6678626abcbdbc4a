//! Persisted administrator-facing notifications.

use serde::{Deserialize, Serialize};

use super::booking::Booking;

/// Notification type discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationKind {
    /// A new booking was created.
    BookingCreated,
}

impl NotificationKind {
    /// Returns the wire representation (`"BOOKING_CREATED"`).
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::BookingCreated => "BOOKING_CREATED",
        }
    }
}

/// One in-app notification row, targeted at a single administrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminNotification {
    /// Notification type.
    pub kind: NotificationKind,
    /// Short headline.
    pub title: String,
    /// One-line human-readable summary.
    pub message: String,
    /// Structured snapshot of the booking at notification time.
    pub data: serde_json::Value,
    /// The administrator this row is for.
    pub user_id: uuid::Uuid,
    /// Read flag, false on creation.
    pub read: bool,
}

impl AdminNotification {
    /// Builds the creation notification for `booking`, targeted at the
    /// administrator `user_id`.
    #[must_use]
    pub fn booking_created(booking: &Booking, user_id: uuid::Uuid) -> Self {
        let item_name = booking.item_title();
        Self {
            kind: NotificationKind::BookingCreated,
            title: format!("New {} Booking", booking.kind),
            message: format!(
                "{} booked {} for {} guests",
                booking.recipient_name(),
                item_name,
                booking.guests
            ),
            data: serde_json::json!({
                "bookingId": booking.id,
                "bookingReference": booking.booking_reference,
                "customerName": booking.recipient_name(),
                "customerEmail": booking.recipient_email(),
                "bookingType": booking.kind,
                "itemName": item_name,
                "startDate": booking.start_date,
                "endDate": booking.end_date,
                "guests": booking.guests,
                "totalPrice": booking.total_price,
                "status": booking.status,
            }),
            user_id,
            read: false,
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::booking::{BookingKind, BookingStatus};
    use crate::domain::BookingId;
    use chrono::{NaiveDate, Utc};

    fn sample_booking() -> Booking {
        Booking {
            id: BookingId::new(),
            booking_reference: "ND-0011223344".to_string(),
            kind: BookingKind::Dahabiya,
            dahabiya_id: Some(uuid::Uuid::new_v4()),
            package_id: None,
            start_date: NaiveDate::from_ymd_opt(2026, 10, 1).unwrap_or_default(),
            end_date: NaiveDate::from_ymd_opt(2026, 10, 5).unwrap_or_default(),
            guests: 2,
            guest_details: vec![],
            total_price: 500.0,
            user_id: None,
            guest_contact: Some(crate::domain::booking::GuestContact {
                name: "Nour Hassan".to_string(),
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

    #[test]
    fn booking_created_snapshot_carries_reference_and_guest() {
        let booking = sample_booking();
        let admin = uuid::Uuid::new_v4();
        let n = AdminNotification::booking_created(&booking, admin);

        assert_eq!(n.kind, NotificationKind::BookingCreated);
        assert_eq!(n.user_id, admin);
        assert!(!n.read);
        assert!(n.title.contains("DAHABIYA"));
        assert!(n.message.contains("Nour Hassan"));
        assert_eq!(
            n.data.get("bookingReference").and_then(|v| v.as_str()),
            Some("ND-0011223344")
        );
        assert_eq!(n.data.get("guests").and_then(serde_json::Value::as_i64), Some(2));
    }
}
