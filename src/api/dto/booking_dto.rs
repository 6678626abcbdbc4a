//! Booking request/response DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Booking, GuestDetail};

/// Request body for `POST /bookings`.
///
/// All fields are optional at the wire level; the handler validates them
/// and reports the first offending field by its JSON name.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    /// Booking kind: `"DAHABIYA"` or `"PACKAGE"`.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Dahabiya to book. Required for `DAHABIYA` bookings.
    pub dahabiya_id: Option<uuid::Uuid>,
    /// Package to book. Required for `PACKAGE` bookings.
    pub package_id: Option<uuid::Uuid>,
    /// First day of the stay, `YYYY-MM-DD`.
    pub start_date: Option<String>,
    /// Last day of the stay, `YYYY-MM-DD`.
    pub end_date: Option<String>,
    /// Head count.
    pub guests: Option<i32>,
    /// Total price as quoted to the guest.
    pub total_price: Option<f64>,
    /// Optional guest roster.
    #[serde(default)]
    pub guest_details: Option<Vec<GuestDetail>>,
    /// Free-text requests.
    pub special_requests: Option<String>,
    /// Booker identity for anonymous bookings.
    pub guest_info: Option<GuestInfoDto>,
}

/// Anonymous booker identity as submitted by the client.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GuestInfoDto {
    /// Guest name.
    pub name: Option<String>,
    /// Guest email address.
    pub email: Option<String>,
    /// Guest phone number.
    pub phone: Option<String>,
}

/// Request body for `PATCH /bookings/{id}/status`.
///
/// Unlike the creation request, this body is strict: a status change
/// carries exactly one field, and anything else is rejected rather than
/// silently dropped.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateStatusRequest {
    /// Target status: `"PENDING"`, `"CONFIRMED"`, or `"CANCELLED"`.
    pub status: String,
}

/// Response wrapper for a single booking.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookingResponse {
    /// The booking.
    pub booking: Booking,
}

/// Response wrapper for booking lists.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookingListResponse {
    /// Bookings, newest first.
    pub bookings: Vec<Booking>,
    /// Number of bookings returned.
    pub total: usize,
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn status_update_rejects_unknown_fields() {
        let strict: Result<UpdateStatusRequest, _> =
            serde_json::from_str(r#"{"status":"CONFIRMED","totalPrice":0}"#);
        assert!(strict.is_err());

        let ok: Result<UpdateStatusRequest, _> =
            serde_json::from_str(r#"{"status":"CONFIRMED"}"#);
        assert_eq!(ok.ok().map(|r| r.status), Some("CONFIRMED".to_string()));
    }

    #[test]
    fn creation_request_stays_lenient() {
        // Creation bodies tolerate unknown fields so that older clients
        // keep working; validation names missing fields instead.
        let req: Result<CreateBookingRequest, _> =
            serde_json::from_str(r#"{"type":"DAHABIYA","somethingElse":true}"#);
        assert!(req.is_ok());
    }
}
