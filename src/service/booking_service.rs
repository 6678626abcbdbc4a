//! Booking lifecycle service.
//!
//! Owns the ordering guarantee of every mutation: persist first, then
//! dispatch the notification batch. Notification failures are logged and
//! never change the outcome of the booking operation.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{Booking, BookingDraft, BookingId, BookingStatus};
use crate::error::BookingError;
use crate::notifier::NotificationFanout;
use crate::persistence::BookingStore;

/// Orchestrates booking creation, retrieval, and status transitions.
///
/// All handler-facing booking operations go through this service; it
/// enforces the access guard, the status state machine, and the
/// persist-before-notify ordering.
#[derive(Debug, Clone)]
pub struct BookingService {
    store: Arc<dyn BookingStore>,
    fanout: NotificationFanout,
}

impl BookingService {
    /// Creates a new booking service.
    #[must_use]
    pub fn new(store: Arc<dyn BookingStore>, fanout: NotificationFanout) -> Self {
        Self { store, fanout }
    }

    /// Creates a booking from a validated draft and dispatches the
    /// creation notification batch.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Persistence`] when the store rejects the
    /// insert. Notification failures do not fail the creation.
    pub async fn create_booking(&self, draft: BookingDraft) -> Result<Booking, BookingError> {
        let booking = self.store.create(draft).await?;
        tracing::info!(
            booking_id = %booking.id,
            reference = %booking.booking_reference,
            kind = %booking.kind,
            "booking created"
        );

        let report = self.fanout.booking_created(&booking).await;
        if report.failed > 0 {
            tracing::warn!(
                booking_id = %booking.id,
                attempted = report.attempted,
                failed = report.failed,
                "creation notifications partially failed"
            );
        }
        Ok(booking)
    }

    /// Fetches a booking, applying the owner-or-administrator guard.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::BookingNotFound`] for an unknown id, and
    /// also when `caller` identifies a non-administrator who does not own
    /// the booking, so existence cannot be probed. Passing `None` skips
    /// the guard; only trusted internal callers may do so.
    pub async fn get_booking(
        &self,
        id: BookingId,
        caller: Option<Uuid>,
    ) -> Result<Booking, BookingError> {
        let booking = self
            .store
            .get_by_id(id)
            .await?
            .ok_or(BookingError::BookingNotFound(*id.as_uuid()))?;
        self.authorize_access(&booking, caller).await?;
        Ok(booking)
    }

    /// Lists the given user's own bookings, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Persistence`] on store failure.
    pub async fn list_user_bookings(&self, user_id: Uuid) -> Result<Vec<Booking>, BookingError> {
        self.store.list_by_user(user_id).await
    }

    /// Lists every booking, newest first. Administrators only.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Unauthorized`] when the caller is missing
    /// or not an administrator, and [`BookingError::Persistence`] on
    /// store failure.
    pub async fn list_all_bookings(
        &self,
        caller: Option<Uuid>,
    ) -> Result<Vec<Booking>, BookingError> {
        self.require_admin(caller).await?;
        self.store.list_all().await
    }

    /// Applies a status transition and dispatches the matching
    /// notification batch.
    ///
    /// A request for the status the booking already holds is a no-op:
    /// the unchanged booking is returned and no notifications are sent.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Unauthorized`] when the caller is not an
    /// administrator, [`BookingError::BookingNotFound`] for an unknown
    /// id, and [`BookingError::IllegalTransition`] when the state machine
    /// forbids the change.
    pub async fn update_status(
        &self,
        id: BookingId,
        caller: Option<Uuid>,
        target: BookingStatus,
    ) -> Result<Booking, BookingError> {
        self.require_admin(caller).await?;
        self.transition(id, target).await
    }

    /// Cancels a booking on behalf of its owner or an administrator.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::BookingNotFound`] for an unknown id or an
    /// unauthorized caller, and [`BookingError::IllegalTransition`] when
    /// the booking is already cancelled.
    pub async fn cancel_booking(
        &self,
        id: BookingId,
        caller: Option<Uuid>,
    ) -> Result<Booking, BookingError> {
        let booking = self
            .store
            .get_by_id(id)
            .await?
            .ok_or(BookingError::BookingNotFound(*id.as_uuid()))?;
        self.authorize_access(&booking, caller).await?;
        // Cancelling twice is an error, not a no-op: the caller asked for
        // a state change that cannot happen again.
        if booking.status == BookingStatus::Cancelled {
            return Err(BookingError::IllegalTransition {
                from: BookingStatus::Cancelled,
                to: BookingStatus::Cancelled,
            });
        }
        self.transition(booking.id, BookingStatus::Cancelled).await
    }

    /// Verifies that `caller` is a known administrator.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Unauthorized`] when the caller is missing,
    /// unknown, or not an administrator.
    pub async fn require_admin(&self, caller: Option<Uuid>) -> Result<Uuid, BookingError> {
        let caller = caller.ok_or(BookingError::Unauthorized)?;
        let role = self.store.user_role(caller).await?;
        match role {
            Some(role) if role.is_admin() => Ok(caller),
            _ => Err(BookingError::Unauthorized),
        }
    }

    /// Owner-or-administrator access guard.
    ///
    /// Failures surface as not-found rather than unauthorized.
    async fn authorize_access(
        &self,
        booking: &Booking,
        caller: Option<Uuid>,
    ) -> Result<(), BookingError> {
        let Some(caller) = caller else {
            return Ok(());
        };
        if booking.user_id == Some(caller) {
            return Ok(());
        }
        let role = self.store.user_role(caller).await?;
        if role.is_some_and(|r| r.is_admin()) {
            return Ok(());
        }
        Err(BookingError::BookingNotFound(*booking.id.as_uuid()))
    }

    /// Core state machine step: validate, persist, then notify.
    async fn transition(
        &self,
        id: BookingId,
        target: BookingStatus,
    ) -> Result<Booking, BookingError> {
        let current = self
            .store
            .get_by_id(id)
            .await?
            .ok_or(BookingError::BookingNotFound(*id.as_uuid()))?;

        if current.status == target {
            tracing::debug!(booking_id = %id, status = %target, "status unchanged, skipping");
            return Ok(current);
        }
        if !current.status.can_transition_to(target) {
            return Err(BookingError::IllegalTransition {
                from: current.status,
                to: target,
            });
        }

        let updated = self.store.update_status(id, target).await?;
        tracing::info!(
            booking_id = %updated.id,
            reference = %updated.booking_reference,
            from = %current.status,
            to = %updated.status,
            "booking status changed"
        );

        let report = match target {
            BookingStatus::Cancelled => self.fanout.booking_cancelled(&updated).await,
            _ => self.fanout.status_changed(&updated).await,
        };
        if report.failed > 0 {
            tracing::warn!(
                booking_id = %updated.id,
                attempted = report.attempted,
                failed = report.failed,
                "status notifications partially failed"
            );
        }
        Ok(updated)
    }
}
