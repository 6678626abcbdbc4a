//! Booking email templates.
//!
//! Each renderer produces a subject line and HTML body from the booking
//! and its joined projections. Template selection depends on the booking
//! kind (dahabiya vs. package) and the lifecycle event.

use crate::domain::{Booking, BookingKind};

/// A rendered subject/body pair, not yet addressed to anyone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEmail {
    /// Subject line.
    pub subject: String,
    /// HTML body.
    pub html: String,
}

/// Shared details block used by every template.
fn details_block(booking: &Booking) -> String {
    format!(
        "<ul>\
         <li>Booking Reference: {reference}</li>\
         <li>Journey: {item}</li>\
         <li>Check-in: {start}</li>\
         <li>Check-out: {end}</li>\
         <li>Guests: {guests}</li>\
         <li>Total Price: ${price}</li>\
         <li>Status: {status}</li>\
         </ul>",
        reference = booking.booking_reference,
        item = booking.item_title(),
        start = booking.start_date,
        end = booking.end_date,
        guests = booking.guests,
        price = booking.total_price,
        status = booking.status,
    )
}

/// Guest-facing confirmation for a freshly created booking.
#[must_use]
pub fn guest_confirmation(booking: &Booking) -> RenderedEmail {
    let subject = match booking.kind {
        BookingKind::Package => {
            "Your Sacred Journey Awaits - Package Booking Received".to_string()
        }
        BookingKind::Dahabiya => "Your Sacred Journey Awaits - Booking Received".to_string(),
    };
    let html = format!(
        "<h1>Booking Received</h1>\
         <p>Dear {name},</p>\
         <p>Thank you for your booking. Here are your booking details:</p>\
         {details}\
         <p>Our team will confirm your booking shortly.</p>\
         <p>Thank you for choosing Cleopatra Dahabiyat!</p>",
        name = booking.recipient_name(),
        details = details_block(booking),
    );
    RenderedEmail { subject, html }
}

/// Administrator alert for a freshly created booking.
#[must_use]
pub fn admin_alert(booking: &Booking) -> RenderedEmail {
    let subject = match booking.kind {
        BookingKind::Package => format!(
            "New Package Booking Received - {}",
            booking.booking_reference
        ),
        BookingKind::Dahabiya => format!(
            "New Dahabiya Booking Received - {}",
            booking.booking_reference
        ),
    };
    let html = format!(
        "<h1>New {kind} Booking</h1>\
         <p>{name} booked {item} for {guests} guests.</p>\
         {details}",
        kind = booking.kind,
        name = booking.recipient_name(),
        item = booking.item_title(),
        guests = booking.guests,
        details = details_block(booking),
    );
    RenderedEmail { subject, html }
}

/// Guest-facing notice that the booking status changed.
#[must_use]
pub fn status_update(booking: &Booking) -> RenderedEmail {
    let subject = format!("Booking Update - {}", booking.booking_reference);
    let html = format!(
        "<h1>Booking Update</h1>\
         <p>Dear {name},</p>\
         <p>Your booking for {item} is now <strong>{status}</strong>.</p>\
         {details}",
        name = booking.recipient_name(),
        item = booking.item_title(),
        status = booking.status,
        details = details_block(booking),
    );
    RenderedEmail { subject, html }
}

/// Guest-facing cancellation confirmation.
#[must_use]
pub fn cancellation(booking: &Booking) -> RenderedEmail {
    let subject = format!("Booking Cancelled - {}", booking.booking_reference);
    let html = format!(
        "<h1>Booking Cancellation Confirmation</h1>\
         <p>Dear {name},</p>\
         <p>Your booking has been cancelled. Here are the details of the cancelled booking:</p>\
         {details}\
         <p>We hope to welcome you back soon!</p>",
        name = booking.recipient_name(),
        details = details_block(booking),
    );
    RenderedEmail { subject, html }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{BookingId, BookingStatus, GuestContact};
    use chrono::{NaiveDate, Utc};

    fn booking(kind: BookingKind) -> Booking {
        Booking {
            id: BookingId::new(),
            booking_reference: "ND-DEADBEEF00".to_string(),
            kind,
            dahabiya_id: (kind == BookingKind::Dahabiya).then(uuid::Uuid::new_v4),
            package_id: (kind == BookingKind::Package).then(uuid::Uuid::new_v4),
            start_date: NaiveDate::from_ymd_opt(2026, 9, 10).unwrap_or_default(),
            end_date: NaiveDate::from_ymd_opt(2026, 9, 14).unwrap_or_default(),
            guests: 3,
            guest_details: vec![],
            total_price: 750.0,
            user_id: None,
            guest_contact: Some(GuestContact {
                name: "Layla".to_string(),
                email: "layla@example.com".to_string(),
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
    fn confirmation_subject_depends_on_kind() {
        let dahabiya = guest_confirmation(&booking(BookingKind::Dahabiya));
        let package = guest_confirmation(&booking(BookingKind::Package));
        assert_ne!(dahabiya.subject, package.subject);
        assert!(package.subject.contains("Package"));
    }

    #[test]
    fn admin_alert_carries_reference() {
        let rendered = admin_alert(&booking(BookingKind::Dahabiya));
        assert!(rendered.subject.contains("ND-DEADBEEF00"));
        assert!(rendered.html.contains("3 guests"));
    }

    #[test]
    fn bodies_include_reference_guests_and_price() {
        for rendered in [
            guest_confirmation(&booking(BookingKind::Package)),
            status_update(&booking(BookingKind::Dahabiya)),
            cancellation(&booking(BookingKind::Dahabiya)),
        ] {
            assert!(rendered.html.contains("ND-DEADBEEF00"));
            assert!(rendered.html.contains("Guests: 3"));
            assert!(rendered.html.contains("$750"));
            assert!(rendered.html.contains("Layla"));
        }
    }

    #[test]
    fn cancellation_subject_names_reference() {
        let rendered = cancellation(&booking(BookingKind::Package));
        assert_eq!(rendered.subject, "Booking Cancelled - ND-DEADBEEF00");
    }
}
