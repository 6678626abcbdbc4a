//! PostgreSQL implementation of the booking store.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use super::models::BookingRow;
use super::{BookingStore, generate_reference};
use crate::domain::{
    AdminNotification, Booking, BookingDraft, BookingId, BookingStatus, UserRole,
};
use crate::error::BookingError;

/// Base projection shared by every booking read: the row plus the owning
/// user and booked item summaries needed for notification rendering.
const BASE_SELECT: &str = "SELECT b.id, b.booking_reference, b.booking_type, b.dahabiya_id, \
     b.package_id, b.start_date, b.end_date, b.guests, b.guest_details, b.total_price, \
     b.user_id, b.guest_contact, b.status, b.special_requests, b.created_at, b.updated_at, \
     u.name AS user_name, u.email AS user_email, \
     COALESCE(d.id, p.id) AS item_id, \
     COALESCE(d.title, p.title) AS item_title, \
     COALESCE(d.cover_image, p.cover_image) AS item_cover_image, \
     COALESCE(d.price, p.price) AS item_price \
     FROM bookings b \
     LEFT JOIN users u ON u.id = b.user_id \
     LEFT JOIN dahabiyas d ON d.id = b.dahabiya_id \
     LEFT JOIN packages p ON p.id = b.package_id";

/// PostgreSQL-backed booking store using `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PostgresBookingStore {
    pool: PgPool,
}

impl PostgresBookingStore {
    /// Creates a new store with the given connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_by_id(&self, id: Uuid) -> Result<Option<Booking>, BookingError> {
        let sql = format!("{BASE_SELECT} WHERE b.id = $1");
        let row = sqlx::query_as::<_, BookingRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| BookingError::Persistence(e.to_string()))?;

        row.map(BookingRow::into_booking).transpose()
    }

    fn rows_into_bookings(rows: Vec<BookingRow>) -> Vec<Booking> {
        // Rows that fail conversion (e.g. a legacy status this core does
        // not drive) are skipped from listings rather than failing the
        // whole read.
        rows.into_iter()
            .filter_map(|row| {
                let id = row.id;
                match row.into_booking() {
                    Ok(booking) => Some(booking),
                    Err(e) => {
                        tracing::warn!(booking_id = %id, error = %e, "skipping unreadable booking row");
                        None
                    }
                }
            })
            .collect()
    }
}

#[async_trait]
impl BookingStore for PostgresBookingStore {
    async fn create(&self, draft: BookingDraft) -> Result<Booking, BookingError> {
        let id = BookingId::new();
        let reference = generate_reference();
        let now = Utc::now();

        let guest_details = serde_json::to_value(&draft.guest_details)
            .map_err(|e| BookingError::Persistence(e.to_string()))?;
        let guest_contact = draft
            .guest_contact
            .as_ref()
            .map(serde_json::to_value)
            .transpose()
            .map_err(|e| BookingError::Persistence(e.to_string()))?;

        sqlx::query(
            "INSERT INTO bookings (id, booking_reference, booking_type, dahabiya_id, package_id, \
             start_date, end_date, guests, guest_details, total_price, user_id, guest_contact, \
             status, special_requests, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $15)",
        )
        .bind(*id.as_uuid())
        .bind(&reference)
        .bind(draft.kind.as_str())
        .bind(draft.dahabiya_id)
        .bind(draft.package_id)
        .bind(draft.start_date)
        .bind(draft.end_date)
        .bind(draft.guests)
        .bind(&guest_details)
        .bind(draft.total_price)
        .bind(draft.user_id)
        .bind(&guest_contact)
        .bind(BookingStatus::Pending.as_str())
        .bind(&draft.special_requests)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| BookingError::Persistence(e.to_string()))?;

        self.fetch_by_id(*id.as_uuid())
            .await?
            .ok_or_else(|| BookingError::Persistence("created booking not readable".to_string()))
    }

    async fn get_by_id(&self, id: BookingId) -> Result<Option<Booking>, BookingError> {
        self.fetch_by_id(*id.as_uuid()).await
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Booking>, BookingError> {
        let sql = format!("{BASE_SELECT} WHERE b.user_id = $1 ORDER BY b.created_at DESC");
        let rows = sqlx::query_as::<_, BookingRow>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| BookingError::Persistence(e.to_string()))?;

        Ok(Self::rows_into_bookings(rows))
    }

    async fn list_all(&self) -> Result<Vec<Booking>, BookingError> {
        let sql = format!("{BASE_SELECT} ORDER BY b.created_at DESC");
        let rows = sqlx::query_as::<_, BookingRow>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| BookingError::Persistence(e.to_string()))?;

        Ok(Self::rows_into_bookings(rows))
    }

    async fn update_status(
        &self,
        id: BookingId,
        status: BookingStatus,
    ) -> Result<Booking, BookingError> {
        let result = sqlx::query("UPDATE bookings SET status = $2, updated_at = $3 WHERE id = $1")
            .bind(*id.as_uuid())
            .bind(status.as_str())
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .map_err(|e| BookingError::Persistence(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(BookingError::BookingNotFound(*id.as_uuid()));
        }

        self.fetch_by_id(*id.as_uuid())
            .await?
            .ok_or(BookingError::BookingNotFound(*id.as_uuid()))
    }

    async fn user_role(&self, user_id: Uuid) -> Result<Option<UserRole>, BookingError> {
        let role = sqlx::query_scalar::<_, String>("SELECT role FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| BookingError::Persistence(e.to_string()))?;

        Ok(role.as_deref().map(UserRole::parse))
    }

    async fn admin_user_ids(&self) -> Result<Vec<Uuid>, BookingError> {
        sqlx::query_scalar::<_, Uuid>("SELECT id FROM users WHERE role = 'ADMIN'")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| BookingError::Persistence(e.to_string()))
    }

    async fn insert_notification(
        &self,
        notification: AdminNotification,
    ) -> Result<(), BookingError> {
        sqlx::query(
            "INSERT INTO notifications (id, type, title, message, data, user_id, read, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(Uuid::new_v4())
        .bind(notification.kind.as_str())
        .bind(&notification.title)
        .bind(&notification.message)
        .bind(&notification.data)
        .bind(notification.user_id)
        .bind(notification.read)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| BookingError::Persistence(e.to_string()))?;

        Ok(())
    }
}
