//! Booking error types with HTTP status code mapping.
//!
//! [`BookingError`] is the central error type for the gateway. Each variant
//! maps to a specific HTTP status code and structured JSON error response.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::BookingStatus;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 1001,
///     "message": "invalid field endDate: end date is required",
///     "details": null
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code (see code ranges below).
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category          | HTTP Status                  |
/// |-----------|-------------------|------------------------------|
/// | 1000–1999 | Validation / Auth | 400 / 401                    |
/// | 2000–2999 | State / Not Found | 404 Not Found / 409 Conflict |
/// | 3000–3999 | Server            | 500 Internal Server Error    |
#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    /// Request validation failed for a specific field.
    #[error("invalid field {field}: {message}")]
    Validation {
        /// The offending request field.
        field: String,
        /// Constraint that was violated.
        message: String,
    },

    /// Caller lacks the rights for this operation.
    #[error("unauthorized")]
    Unauthorized,

    /// Booking with the given ID was not found.
    ///
    /// Also returned when a caller is not allowed to see a booking, so
    /// that unauthorized reads cannot probe for booking existence.
    #[error("booking not found: {0}")]
    BookingNotFound(uuid::Uuid),

    /// Requested status change is not a legal transition.
    #[error("illegal status transition: {from} -> {to}")]
    IllegalTransition {
        /// Current booking status.
        from: BookingStatus,
        /// Requested target status.
        to: BookingStatus,
    },

    /// Persistence layer failure.
    #[error("persistence error: {0}")]
    Persistence(String),

    /// Email dispatch failure. Only produced inside the notification
    /// fan-out, where it is logged and never surfaced to callers.
    #[error("email error: {0}")]
    Email(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl BookingError {
    /// Convenience constructor for a validation failure.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::Validation { .. } => 1001,
            Self::Unauthorized => 1002,
            Self::BookingNotFound(_) => 2001,
            Self::IllegalTransition { .. } => 2002,
            Self::Persistence(_) => 3001,
            Self::Email(_) => 3002,
            Self::Internal(_) => 3000,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::BookingNotFound(_) => StatusCode::NOT_FOUND,
            Self::IllegalTransition { .. } => StatusCode::CONFLICT,
            Self::Persistence(_) | Self::Email(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for BookingError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                details: None,
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_bad_request() {
        let err = BookingError::validation("endDate", "end date is required");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), 1001);
        assert!(err.to_string().contains("endDate"));
    }

    #[test]
    fn not_found_and_unauthorized_are_distinct() {
        let not_found = BookingError::BookingNotFound(uuid::Uuid::new_v4());
        let unauthorized = BookingError::Unauthorized;
        assert_eq!(not_found.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(unauthorized.status_code(), StatusCode::UNAUTHORIZED);
        assert_ne!(not_found.error_code(), unauthorized.error_code());
    }

    #[test]
    fn illegal_transition_is_conflict() {
        let err = BookingError::IllegalTransition {
            from: BookingStatus::Cancelled,
            to: BookingStatus::Confirmed,
        };
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        assert!(err.to_string().contains("CANCELLED"));
    }
}
