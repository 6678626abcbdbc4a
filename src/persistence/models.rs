//! Database row models and their domain conversions.

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::domain::{
    Booking, BookingId, BookingKind, BookingStatus, GuestContact, ItemSummary, UserSummary,
};
use crate::error::BookingError;

/// A booking row as selected from the `bookings` table, including the
/// joined user and item projections.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BookingRow {
    /// Booking id.
    pub id: Uuid,
    /// Human-readable reference.
    pub booking_reference: String,
    /// Kind discriminator (`"DAHABIYA"` / `"PACKAGE"`).
    pub booking_type: String,
    /// Dahabiya foreign key.
    pub dahabiya_id: Option<Uuid>,
    /// Package foreign key.
    pub package_id: Option<Uuid>,
    /// First day of the stay.
    pub start_date: NaiveDate,
    /// Last day of the stay.
    pub end_date: NaiveDate,
    /// Head count.
    pub guests: i32,
    /// Guest roster as JSONB.
    pub guest_details: serde_json::Value,
    /// Caller-supplied total price.
    pub total_price: f64,
    /// Owning user, null for anonymous bookings.
    pub user_id: Option<Uuid>,
    /// Anonymous booker identity as JSONB.
    pub guest_contact: Option<serde_json::Value>,
    /// Status discriminator.
    pub status: String,
    /// Free-text requests.
    pub special_requests: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
    /// Joined owner name.
    pub user_name: Option<String>,
    /// Joined owner email.
    pub user_email: Option<String>,
    /// Joined item id (dahabiya or package).
    pub item_id: Option<Uuid>,
    /// Joined item title.
    pub item_title: Option<String>,
    /// Joined item cover image.
    pub item_cover_image: Option<String>,
    /// Joined item price.
    pub item_price: Option<f64>,
}

impl BookingRow {
    /// Converts the row into the domain [`Booking`].
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Persistence`] when the row carries an
    /// unknown kind or status, or malformed JSON payloads.
    pub fn into_booking(self) -> Result<Booking, BookingError> {
        let kind = BookingKind::parse(&self.booking_type).ok_or_else(|| {
            BookingError::Persistence(format!("unknown booking type: {}", self.booking_type))
        })?;
        let status = BookingStatus::parse(&self.status).ok_or_else(|| {
            BookingError::Persistence(format!("unsupported booking status: {}", self.status))
        })?;

        let guest_details = serde_json::from_value(self.guest_details)
            .map_err(|e| BookingError::Persistence(format!("malformed guest details: {e}")))?;

        let guest_contact: Option<GuestContact> = match self.guest_contact {
            Some(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(|e| BookingError::Persistence(format!("malformed guest contact: {e}")))?,
            None => None,
        };

        let user = match (self.user_id, self.user_email) {
            (Some(id), Some(email)) => Some(UserSummary {
                id,
                name: self.user_name,
                email,
            }),
            _ => None,
        };

        let item = match (self.item_id, self.item_title) {
            (Some(id), Some(title)) => Some(ItemSummary {
                id,
                title,
                cover_image: self.item_cover_image,
                price: self.item_price,
            }),
            _ => None,
        };

        Ok(Booking {
            id: BookingId::from_uuid(self.id),
            booking_reference: self.booking_reference,
            kind,
            dahabiya_id: self.dahabiya_id,
            package_id: self.package_id,
            start_date: self.start_date,
            end_date: self.end_date,
            guests: self.guests,
            guest_details,
            total_price: self.total_price,
            user_id: self.user_id,
            guest_contact,
            status,
            special_requests: self.special_requests,
            created_at: self.created_at,
            updated_at: self.updated_at,
            user,
            item,
        })
    }
}
