//! In-memory booking store for tests and local development.
//!
//! Mirrors the Postgres adapter's contract over `RwLock<HashMap>`
//! storage. Projections are resolved from the seeded user and item maps.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{BookingStore, generate_reference};
use crate::domain::{
    AdminNotification, Booking, BookingDraft, BookingId, BookingStatus, ItemSummary, UserRole,
    UserSummary,
};
use crate::error::BookingError;

/// A seeded user record.
#[derive(Debug, Clone)]
pub struct MemoryUser {
    /// Display name.
    pub name: Option<String>,
    /// Email address.
    pub email: String,
    /// Role.
    pub role: UserRole,
}

/// In-memory [`BookingStore`] implementation.
#[derive(Debug, Default)]
pub struct MemoryBookingStore {
    bookings: RwLock<HashMap<BookingId, Booking>>,
    users: RwLock<HashMap<Uuid, MemoryUser>>,
    items: RwLock<HashMap<Uuid, ItemSummary>>,
    notifications: RwLock<Vec<AdminNotification>>,
}

impl MemoryBookingStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a user record and returns its id.
    pub async fn add_user(&self, name: Option<&str>, email: &str, role: UserRole) -> Uuid {
        let id = Uuid::new_v4();
        self.users.write().await.insert(
            id,
            MemoryUser {
                name: name.map(ToString::to_string),
                email: email.to_string(),
                role,
            },
        );
        id
    }

    /// Seeds a bookable item (dahabiya or package) and returns its id.
    pub async fn add_item(&self, title: &str, price: Option<f64>) -> Uuid {
        let id = Uuid::new_v4();
        self.items.write().await.insert(
            id,
            ItemSummary {
                id,
                title: title.to_string(),
                cover_image: None,
                price,
            },
        );
        id
    }

    /// Returns all persisted administrator notifications.
    pub async fn notifications(&self) -> Vec<AdminNotification> {
        self.notifications.read().await.clone()
    }

    /// Returns the number of stored bookings.
    pub async fn len(&self) -> usize {
        self.bookings.read().await.len()
    }

    /// Returns `true` when no bookings are stored.
    pub async fn is_empty(&self) -> bool {
        self.bookings.read().await.is_empty()
    }

    async fn user_summary(&self, user_id: Uuid) -> Option<UserSummary> {
        self.users.read().await.get(&user_id).map(|u| UserSummary {
            id: user_id,
            name: u.name.clone(),
            email: u.email.clone(),
        })
    }
}

#[async_trait]
impl BookingStore for MemoryBookingStore {
    async fn create(&self, draft: BookingDraft) -> Result<Booking, BookingError> {
        let now = Utc::now();
        let user = match draft.user_id {
            Some(uid) => self.user_summary(uid).await,
            None => None,
        };
        let item_id = draft.dahabiya_id.or(draft.package_id);
        let item = match item_id {
            Some(iid) => self.items.read().await.get(&iid).cloned(),
            None => None,
        };

        let booking = Booking {
            id: BookingId::new(),
            booking_reference: generate_reference(),
            kind: draft.kind,
            dahabiya_id: draft.dahabiya_id,
            package_id: draft.package_id,
            start_date: draft.start_date,
            end_date: draft.end_date,
            guests: draft.guests,
            guest_details: draft.guest_details,
            total_price: draft.total_price,
            user_id: draft.user_id,
            guest_contact: draft.guest_contact,
            status: BookingStatus::Pending,
            special_requests: draft.special_requests,
            created_at: now,
            updated_at: now,
            user,
            item,
        };

        self.bookings.write().await.insert(booking.id, booking.clone());
        Ok(booking)
    }

    async fn get_by_id(&self, id: BookingId) -> Result<Option<Booking>, BookingError> {
        Ok(self.bookings.read().await.get(&id).cloned())
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Booking>, BookingError> {
        let map = self.bookings.read().await;
        let mut bookings: Vec<Booking> = map
            .values()
            .filter(|b| b.user_id == Some(user_id))
            .cloned()
            .collect();
        bookings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(bookings)
    }

    async fn list_all(&self) -> Result<Vec<Booking>, BookingError> {
        let map = self.bookings.read().await;
        let mut bookings: Vec<Booking> = map.values().cloned().collect();
        bookings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(bookings)
    }

    async fn update_status(
        &self,
        id: BookingId,
        status: BookingStatus,
    ) -> Result<Booking, BookingError> {
        let mut map = self.bookings.write().await;
        let booking = map
            .get_mut(&id)
            .ok_or(BookingError::BookingNotFound(*id.as_uuid()))?;
        booking.status = status;
        booking.updated_at = Utc::now();
        Ok(booking.clone())
    }

    async fn user_role(&self, user_id: Uuid) -> Result<Option<UserRole>, BookingError> {
        Ok(self.users.read().await.get(&user_id).map(|u| u.role))
    }

    async fn admin_user_ids(&self) -> Result<Vec<Uuid>, BookingError> {
        Ok(self
            .users
            .read()
            .await
            .iter()
            .filter(|(_, u)| u.role.is_admin())
            .map(|(id, _)| *id)
            .collect())
    }

    async fn insert_notification(
        &self,
        notification: AdminNotification,
    ) -> Result<(), BookingError> {
        self.notifications.write().await.push(notification);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn draft_for(user_id: Option<Uuid>, item_id: Uuid) -> BookingDraft {
        BookingDraft {
            kind: crate::domain::BookingKind::Dahabiya,
            dahabiya_id: Some(item_id),
            package_id: None,
            start_date: NaiveDate::from_ymd_opt(2026, 10, 1).unwrap_or_default(),
            end_date: NaiveDate::from_ymd_opt(2026, 10, 5).unwrap_or_default(),
            guests: 2,
            total_price: 500.0,
            guest_details: vec![],
            special_requests: None,
            user_id,
            guest_contact: None,
        }
    }

    #[tokio::test]
    async fn create_assigns_pending_and_reference() {
        let store = MemoryBookingStore::new();
        let item = store.add_item("Royal Cleopatra", Some(250.0)).await;
        let user = store
            .add_user(Some("Omar"), "omar@example.com", UserRole::User)
            .await;

        let booking = store.create(draft_for(Some(user), item)).await;
        let Ok(booking) = booking else {
            panic!("create failed");
        };
        assert_eq!(booking.status, BookingStatus::Pending);
        assert!(booking.booking_reference.starts_with("ND-"));
        assert_eq!(booking.item_title(), "Royal Cleopatra");
        assert_eq!(booking.recipient_email(), Some("omar@example.com"));
    }

    #[tokio::test]
    async fn list_by_user_is_newest_first_and_scoped() {
        let store = MemoryBookingStore::new();
        let item = store.add_item("Nile Jewel", None).await;
        let alice = store.add_user(None, "alice@example.com", UserRole::User).await;
        let bob = store.add_user(None, "bob@example.com", UserRole::User).await;

        let first = store.create(draft_for(Some(alice), item)).await.ok();
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        let _other = store.create(draft_for(Some(bob), item)).await.ok();
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        let second = store.create(draft_for(Some(alice), item)).await.ok();

        let (Some(first), Some(second)) = (first, second) else {
            panic!("creates failed");
        };

        let listed = store.list_by_user(alice).await.unwrap_or_default();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed.first().map(|b| b.id), Some(second.id));
        assert_eq!(listed.get(1).map(|b| b.id), Some(first.id));
    }

    #[tokio::test]
    async fn update_status_unknown_id_is_not_found() {
        let store = MemoryBookingStore::new();
        let result = store
            .update_status(BookingId::new(), BookingStatus::Confirmed)
            .await;
        assert!(matches!(result, Err(BookingError::BookingNotFound(_))));
    }

    #[tokio::test]
    async fn admin_user_ids_filters_by_role() {
        let store = MemoryBookingStore::new();
        let admin = store
            .add_user(Some("Admin"), "admin@example.com", UserRole::Admin)
            .await;
        let _user = store.add_user(None, "user@example.com", UserRole::User).await;

        let admins = store.admin_user_ids().await.unwrap_or_default();
        assert_eq!(admins, vec![admin]);
    }
}
