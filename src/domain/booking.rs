//! Booking entity, bookable kinds, and the status state machine.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::BookingId;

/// The two bookable item kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingKind {
    /// A traditional Nile sailing vessel.
    Dahabiya,
    /// A multi-day tour product.
    Package,
}

impl BookingKind {
    /// Returns the wire representation (`"DAHABIYA"` / `"PACKAGE"`).
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Dahabiya => "DAHABIYA",
            Self::Package => "PACKAGE",
        }
    }

    /// Parses the wire representation, returning `None` for unknown kinds.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "DAHABIYA" => Some(Self::Dahabiya),
            "PACKAGE" => Some(Self::Package),
            _ => None,
        }
    }
}

impl fmt::Display for BookingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Booking lifecycle status.
///
/// Only these three statuses are driven by this core. Transitions are
/// monotonic: `Pending` may move to `Confirmed` or `Cancelled`,
/// `Confirmed` may only move to `Cancelled`, and nothing leaves
/// `Cancelled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    /// Initial status of every booking.
    Pending,
    /// Booking confirmed by an administrator.
    Confirmed,
    /// Booking cancelled by the owner or an administrator. Terminal.
    Cancelled,
}

impl BookingStatus {
    /// Returns the wire representation (`"PENDING"`, ...).
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Confirmed => "CONFIRMED",
            Self::Cancelled => "CANCELLED",
        }
    }

    /// Parses the wire representation, returning `None` for unknown or
    /// unsupported statuses.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "PENDING" => Some(Self::Pending),
            "CONFIRMED" => Some(Self::Confirmed),
            "CANCELLED" => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// Whether moving from `self` to `to` is a legal transition.
    ///
    /// Requesting the current status again is not a transition and is
    /// handled upstream as a no-op, so `self == to` returns `false` here.
    #[must_use]
    pub const fn can_transition_to(&self, to: Self) -> bool {
        matches!(
            (self, to),
            (Self::Pending, Self::Confirmed | Self::Cancelled)
                | (Self::Confirmed, Self::Cancelled)
        )
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One guest on the booking roster.
///
/// Every field is optional; the roster length is not required to match
/// the `guests` head count.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GuestDetail {
    /// Full display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Given name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Family name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Contact email.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Contact phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Age in years.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    /// Nationality.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nationality: Option<String>,
    /// Date of birth, `YYYY-MM-DD`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    /// Passport number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passport: Option<String>,
    /// Dietary requirements.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dietary_requirements: Vec<String>,
}

/// Identity of an anonymous (guest) booker.
///
/// Substitutes for the missing user record in notification rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GuestContact {
    /// Guest name.
    pub name: String,
    /// Guest email address.
    pub email: String,
    /// Optional phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Minimal projection of the owning user, joined in on every read for
/// notification rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    /// User identifier.
    pub id: uuid::Uuid,
    /// Display name, if set.
    pub name: Option<String>,
    /// Email address.
    pub email: String,
}

/// Minimal projection of the booked item (dahabiya or package).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemSummary {
    /// Item identifier.
    pub id: uuid::Uuid,
    /// Item title.
    pub title: String,
    /// Cover image URL.
    pub cover_image: Option<String>,
    /// Listed price.
    pub price: Option<f64>,
}

/// The central booking entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    /// Opaque, stable identifier.
    pub id: BookingId,
    /// Human-readable, unique reference (e.g. `ND-3F9A0C12BD`).
    pub booking_reference: String,
    /// Which kind of item was booked.
    #[serde(rename = "type")]
    pub kind: BookingKind,
    /// Booked dahabiya, set iff `kind` is [`BookingKind::Dahabiya`].
    pub dahabiya_id: Option<uuid::Uuid>,
    /// Booked package, set iff `kind` is [`BookingKind::Package`].
    pub package_id: Option<uuid::Uuid>,
    /// First day of the stay.
    pub start_date: NaiveDate,
    /// Last day of the stay. Never precedes `start_date`.
    pub end_date: NaiveDate,
    /// Head count, at least 1.
    pub guests: i32,
    /// Ordered guest roster.
    pub guest_details: Vec<GuestDetail>,
    /// Caller-supplied total. Not recomputed by this core.
    pub total_price: f64,
    /// Owning user; `None` marks an anonymous booking.
    pub user_id: Option<uuid::Uuid>,
    /// Anonymous booker identity, present when `user_id` is `None`.
    pub guest_contact: Option<GuestContact>,
    /// Lifecycle status.
    pub status: BookingStatus,
    /// Free-text requests from the guest.
    pub special_requests: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
    /// Owning user projection, when the booking is not anonymous.
    pub user: Option<UserSummary>,
    /// Booked item projection.
    pub item: Option<ItemSummary>,
}

impl Booking {
    /// Email address notifications for this booking should go to:
    /// the anonymous guest's address when present, else the owner's.
    #[must_use]
    pub fn recipient_email(&self) -> Option<&str> {
        self.guest_contact
            .as_ref()
            .map(|g| g.email.as_str())
            .or_else(|| self.user.as_ref().map(|u| u.email.as_str()))
    }

    /// Display name for the notification recipient.
    #[must_use]
    pub fn recipient_name(&self) -> &str {
        self.guest_contact
            .as_ref()
            .map(|g| g.name.as_str())
            .or_else(|| self.user.as_ref().and_then(|u| u.name.as_deref()))
            .unwrap_or("Guest")
    }

    /// Title of the booked item, when the projection resolved.
    #[must_use]
    pub fn item_title(&self) -> &str {
        self.item.as_ref().map_or("your journey", |i| i.title.as_str())
    }
}
