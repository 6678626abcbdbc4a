//! Fully-validated booking creation payload.

use chrono::NaiveDate;

use super::booking::{BookingKind, GuestContact, GuestDetail};

/// A booking creation payload that has passed request validation.
///
/// Produced only by the validation helpers in the booking handlers;
/// consuming code may rely on its invariants: exactly one foreign key is
/// set and agrees with `kind`, dates are ordered, `guests >= 1`,
/// `total_price >= 0`, and anonymous drafts carry a guest contact with a
/// syntactically valid email.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingDraft {
    /// Which kind of item is being booked.
    pub kind: BookingKind,
    /// Booked dahabiya, set iff `kind` is [`BookingKind::Dahabiya`].
    pub dahabiya_id: Option<uuid::Uuid>,
    /// Booked package, set iff `kind` is [`BookingKind::Package`].
    pub package_id: Option<uuid::Uuid>,
    /// First day of the stay.
    pub start_date: NaiveDate,
    /// Last day of the stay, not before `start_date`.
    pub end_date: NaiveDate,
    /// Head count, at least 1.
    pub guests: i32,
    /// Caller-supplied total, non-negative. Not recomputed here.
    pub total_price: f64,
    /// Ordered guest roster; defaults to empty.
    pub guest_details: Vec<GuestDetail>,
    /// Free-text requests.
    pub special_requests: Option<String>,
    /// Owning user; `None` marks an anonymous booking.
    pub user_id: Option<uuid::Uuid>,
    /// Anonymous booker identity, required when `user_id` is `None`.
    pub guest_contact: Option<GuestContact>,
}
