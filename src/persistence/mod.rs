//! Persistence layer: the booking store seam and its adapters.
//!
//! [`BookingStore`] is the only surface through which the gateway touches
//! storage. [`postgres::PostgresBookingStore`] is the production adapter;
//! [`memory::MemoryBookingStore`] backs tests and local development.

pub mod memory;
pub mod models;
pub mod postgres;

use std::fmt;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{AdminNotification, Booking, BookingDraft, BookingId, BookingStatus, UserRole};
use crate::error::BookingError;

/// Store adapter for bookings, user role lookups, and persisted
/// administrator notifications.
///
/// Every read joins in the minimal user and item projections needed by
/// notification rendering. Store failures surface as
/// [`BookingError::Persistence`]; the adapter does not retry.
#[async_trait]
pub trait BookingStore: Send + Sync + fmt::Debug {
    /// Persists a new booking from a validated draft.
    ///
    /// Generates the booking id and the human-readable reference, and
    /// sets the initial status to [`BookingStatus::Pending`].
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Persistence`] on store failure.
    async fn create(&self, draft: BookingDraft) -> Result<Booking, BookingError>;

    /// Fetches a booking by id, or `None` when the id is unknown.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Persistence`] on store failure.
    async fn get_by_id(&self, id: BookingId) -> Result<Option<Booking>, BookingError>;

    /// Lists a user's bookings, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Persistence`] on store failure.
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Booking>, BookingError>;

    /// Lists all bookings, newest first.
    ///
    /// Administrator use only; callers must enforce the administrator
    /// check before invoking this.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Persistence`] on store failure.
    async fn list_all(&self) -> Result<Vec<Booking>, BookingError>;

    /// Persists a status change and returns the updated booking.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::BookingNotFound`] for an unknown id and
    /// [`BookingError::Persistence`] on store failure.
    async fn update_status(
        &self,
        id: BookingId,
        status: BookingStatus,
    ) -> Result<Booking, BookingError>;

    /// Resolves the role of the given user, or `None` if unknown.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Persistence`] on store failure.
    async fn user_role(&self, user_id: Uuid) -> Result<Option<UserRole>, BookingError>;

    /// Returns the ids of every user holding the administrator role.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Persistence`] on store failure.
    async fn admin_user_ids(&self) -> Result<Vec<Uuid>, BookingError>;

    /// Persists one administrator in-app notification row.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Persistence`] on store failure.
    async fn insert_notification(
        &self,
        notification: AdminNotification,
    ) -> Result<(), BookingError>;
}

/// Generates a human-readable booking reference.
///
/// Format: `ND-` followed by ten uppercase hex characters drawn from a
/// UUID v4, e.g. `ND-3F9A0C12BD`. Distinct from the internal booking id.
#[must_use]
pub fn generate_reference() -> String {
    let hex: String = Uuid::new_v4()
        .simple()
        .to_string()
        .chars()
        .take(10)
        .map(|c| c.to_ascii_uppercase())
        .collect();
    format!("ND-{hex}")
}
