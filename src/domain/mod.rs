//! Domain layer: booking identity, the booking entity and its status
//! state machine, validated creation drafts, user roles, and persisted
//! administrator notifications.

pub mod booking;
pub mod booking_id;
pub mod draft;
pub mod notification;
pub mod role;

pub use booking::{
    Booking, BookingKind, BookingStatus, GuestContact, GuestDetail, ItemSummary, UserSummary,
};
pub use booking_id::BookingId;
pub use draft::BookingDraft;
pub use notification::{AdminNotification, NotificationKind};
pub use role::UserRole;
