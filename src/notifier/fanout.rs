//! Best-effort notification batches.
//!
//! Every successful booking mutation triggers exactly one batch here.
//! The batch runs strictly after the mutation is persisted, and nothing
//! in it can fail the booking operation: each action is individually
//! caught and logged, and sibling actions always run.

use std::sync::Arc;

use futures_util::future::join_all;

use crate::domain::{AdminNotification, Booking};
use crate::error::BookingError;
use crate::mailer::templates::{self, RenderedEmail};
use crate::mailer::{EmailMessage, Mailer};
use crate::persistence::BookingStore;

/// Outcome summary of one notification batch.
///
/// Purely observational: callers may log it, but the booking operation's
/// result never depends on it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FanoutReport {
    /// Number of actions attempted.
    pub attempted: usize,
    /// Number of actions that failed.
    pub failed: usize,
}

impl FanoutReport {
    fn record(&mut self, result: &Result<(), BookingError>) {
        self.attempted += 1;
        if result.is_err() {
            self.failed += 1;
        }
    }
}

/// Dispatches booking notifications to the guest, the configured
/// administrator addresses, and the administrators' in-app inboxes.
///
/// The administrator address list is injected at construction time from
/// configuration; business logic never reads the process environment.
#[derive(Debug, Clone)]
pub struct NotificationFanout {
    store: Arc<dyn BookingStore>,
    mailer: Arc<dyn Mailer>,
    admin_addresses: Vec<String>,
}

impl NotificationFanout {
    /// Creates a new fan-out.
    #[must_use]
    pub fn new(
        store: Arc<dyn BookingStore>,
        mailer: Arc<dyn Mailer>,
        admin_addresses: Vec<String>,
    ) -> Self {
        Self {
            store,
            mailer,
            admin_addresses,
        }
    }

    /// Batch for a freshly created booking: guest confirmation, one
    /// alert email per administrator address, and one persisted
    /// notification row per administrator user.
    pub async fn booking_created(&self, booking: &Booking) -> FanoutReport {
        let mut report = FanoutReport::default();
        self.send_guest(booking, templates::guest_confirmation(booking), &mut report)
            .await;
        self.send_admins(templates::admin_alert(booking), &mut report)
            .await;
        self.persist_admin_notifications(booking, &mut report).await;
        report
    }

    /// Batch for a status change that is not a cancellation.
    pub async fn status_changed(&self, booking: &Booking) -> FanoutReport {
        let mut report = FanoutReport::default();
        let rendered = templates::status_update(booking);
        self.send_guest(booking, rendered.clone(), &mut report).await;
        self.send_admins(rendered, &mut report).await;
        report
    }

    /// Batch for a cancellation.
    pub async fn booking_cancelled(&self, booking: &Booking) -> FanoutReport {
        let mut report = FanoutReport::default();
        let rendered = templates::cancellation(booking);
        self.send_guest(booking, rendered.clone(), &mut report).await;
        self.send_admins(rendered, &mut report).await;
        report
    }

    /// Sends the guest-facing email to the anonymous guest's address, or
    /// the owning user's. Skipped with a warning when neither exists.
    async fn send_guest(&self, booking: &Booking, rendered: RenderedEmail, report: &mut FanoutReport) {
        let Some(to) = booking.recipient_email() else {
            tracing::warn!(
                booking_id = %booking.id,
                reference = %booking.booking_reference,
                "no email address available for booking notification"
            );
            return;
        };

        let result = self
            .mailer
            .send(&EmailMessage {
                to: to.to_string(),
                subject: rendered.subject,
                html: rendered.html,
            })
            .await;
        if let Err(e) = &result {
            tracing::error!(
                booking_id = %booking.id,
                to = %to,
                error = %e,
                "failed to send guest email"
            );
        }
        report.record(&result);
    }

    /// Sends one copy of `rendered` to every configured administrator
    /// address. Sends are launched concurrently and awaited collectively;
    /// a failing address never blocks its siblings.
    async fn send_admins(&self, rendered: RenderedEmail, report: &mut FanoutReport) {
        let sends = self.admin_addresses.iter().map(|addr| {
            let message = EmailMessage {
                to: addr.clone(),
                subject: rendered.subject.clone(),
                html: rendered.html.clone(),
            };
            async move { (addr, self.mailer.send(&message).await) }
        });

        for (addr, result) in join_all(sends).await {
            if let Err(e) = &result {
                tracing::error!(to = %addr, error = %e, "failed to send admin email");
            }
            report.record(&result);
        }
    }

    /// Writes one in-app notification row per administrator user,
    /// concurrently. Creation events only.
    async fn persist_admin_notifications(&self, booking: &Booking, report: &mut FanoutReport) {
        let admin_ids = match self.store.admin_user_ids().await {
            Ok(ids) => ids,
            Err(e) => {
                tracing::error!(error = %e, "failed to resolve administrator users");
                report.record(&Err(e));
                return;
            }
        };

        if admin_ids.is_empty() {
            tracing::debug!("no administrator users, skipping in-app notifications");
            return;
        }

        let inserts = admin_ids.into_iter().map(|admin_id| {
            let notification = AdminNotification::booking_created(booking, admin_id);
            async move { (admin_id, self.store.insert_notification(notification).await) }
        });

        for (admin_id, result) in join_all(inserts).await {
            if let Err(e) = &result {
                tracing::error!(
                    user_id = %admin_id,
                    error = %e,
                    "failed to persist admin notification"
                );
            }
            report.record(&result);
        }
    }
}
