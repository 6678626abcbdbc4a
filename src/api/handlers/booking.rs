//! Booking handlers: create, list, get, update status, cancel.

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use chrono::NaiveDate;

use crate::api::dto::{
    BookingListResponse, BookingResponse, CreateBookingRequest, UpdateStatusRequest,
};
use crate::app_state::AppState;
use crate::domain::{BookingDraft, BookingId, BookingKind, BookingStatus, GuestContact};
use crate::error::{BookingError, ErrorResponse};

/// Header carrying the authenticated caller's user id.
///
/// Populated by the authenticating reverse proxy in front of this
/// gateway; absence marks an anonymous request.
pub const USER_ID_HEADER: &str = "x-user-id";

/// `POST /bookings` — Create a booking.
///
/// # Errors
///
/// Returns [`BookingError::Validation`] naming the first offending field.
#[utoipa::path(
    post,
    path = "/api/v1/bookings",
    tag = "Bookings",
    summary = "Create a booking",
    description = "Creates a PENDING booking for a dahabiya or a package. Anonymous requests must carry guestInfo with a name and a valid email. Notifications are dispatched after the booking is persisted and never fail the request.",
    request_body = CreateBookingRequest,
    responses(
        (status = 201, description = "Booking created", body = BookingResponse),
        (status = 400, description = "Validation failure", body = ErrorResponse),
    )
)]
pub async fn create_booking(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<CreateBookingRequest>,
) -> Result<impl IntoResponse, BookingError> {
    let caller = caller_id(&headers)?;
    let draft = validate_create(req, caller)?;
    let booking = state.booking_service.create_booking(draft).await?;
    Ok((StatusCode::CREATED, Json(BookingResponse { booking })))
}

/// `GET /bookings` — List the caller's own bookings, newest first.
///
/// # Errors
///
/// Returns [`BookingError::Unauthorized`] for anonymous requests.
#[utoipa::path(
    get,
    path = "/api/v1/bookings",
    tag = "Bookings",
    summary = "List own bookings",
    description = "Returns the authenticated caller's bookings, newest first.",
    responses(
        (status = 200, description = "Caller's bookings", body = BookingListResponse),
        (status = 401, description = "Missing caller identity", body = ErrorResponse),
    )
)]
pub async fn list_bookings(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, BookingError> {
    let caller = caller_id(&headers)?.ok_or(BookingError::Unauthorized)?;
    let bookings = state.booking_service.list_user_bookings(caller).await?;
    let total = bookings.len();
    Ok(Json(BookingListResponse { bookings, total }))
}

/// `GET /bookings/all` — List every booking. Administrators only.
///
/// # Errors
///
/// Returns [`BookingError::Unauthorized`] for non-administrator callers.
#[utoipa::path(
    get,
    path = "/api/v1/bookings/all",
    tag = "Bookings",
    summary = "List all bookings",
    description = "Returns every booking, newest first. Requires an administrator caller.",
    responses(
        (status = 200, description = "All bookings", body = BookingListResponse),
        (status = 401, description = "Caller is not an administrator", body = ErrorResponse),
    )
)]
pub async fn list_all_bookings(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, BookingError> {
    let caller = caller_id(&headers)?;
    let bookings = state.booking_service.list_all_bookings(caller).await?;
    let total = bookings.len();
    Ok(Json(BookingListResponse { bookings, total }))
}

/// `GET /bookings/:id` — Get one booking.
///
/// # Errors
///
/// Returns [`BookingError::Unauthorized`] for anonymous requests and
/// [`BookingError::BookingNotFound`] for an unknown id or a caller who
/// may not see the booking.
#[utoipa::path(
    get,
    path = "/api/v1/bookings/{id}",
    tag = "Bookings",
    summary = "Get booking details",
    description = "Returns one booking with its user and item projections. Requires a caller identity; visible only to the owner and administrators, others receive 404.",
    params(
        ("id" = uuid::Uuid, Path, description = "Booking UUID"),
    ),
    responses(
        (status = 200, description = "Booking details", body = BookingResponse),
        (status = 401, description = "Missing caller identity", body = ErrorResponse),
        (status = 404, description = "Booking not found", body = ErrorResponse),
    )
)]
pub async fn get_booking(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<uuid::Uuid>,
) -> Result<impl IntoResponse, BookingError> {
    let caller = caller_id(&headers)?.ok_or(BookingError::Unauthorized)?;
    let booking = state
        .booking_service
        .get_booking(BookingId::from_uuid(id), Some(caller))
        .await?;
    Ok(Json(BookingResponse { booking }))
}

/// `PATCH /bookings/:id/status` — Apply a status transition.
///
/// # Errors
///
/// Returns [`BookingError::Unauthorized`] for non-administrators,
/// [`BookingError::IllegalTransition`] for a forbidden transition, and
/// [`BookingError::BookingNotFound`] for an unknown id.
#[utoipa::path(
    patch,
    path = "/api/v1/bookings/{id}/status",
    tag = "Bookings",
    summary = "Update booking status",
    description = "Moves a booking through its lifecycle. Requires an administrator caller. Requesting the current status is a no-op that sends no notifications.",
    params(
        ("id" = uuid::Uuid, Path, description = "Booking UUID"),
    ),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Updated booking", body = BookingResponse),
        (status = 400, description = "Unknown status value", body = ErrorResponse),
        (status = 401, description = "Caller is not an administrator", body = ErrorResponse),
        (status = 404, description = "Booking not found", body = ErrorResponse),
        (status = 409, description = "Illegal status transition", body = ErrorResponse),
    )
)]
pub async fn update_status(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<uuid::Uuid>,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<impl IntoResponse, BookingError> {
    let caller = caller_id(&headers)?;
    let target = parse_status(&req.status)?;
    let booking = state
        .booking_service
        .update_status(BookingId::from_uuid(id), caller, target)
        .await?;
    Ok(Json(BookingResponse { booking }))
}

/// `DELETE /bookings/:id` — Cancel a booking.
///
/// Cancellation is soft: the booking row stays, its status becomes
/// `CANCELLED`.
///
/// # Errors
///
/// Returns [`BookingError::Unauthorized`] for anonymous requests,
/// [`BookingError::BookingNotFound`] for an unknown id or an
/// unauthorized caller, and [`BookingError::IllegalTransition`] when the
/// booking is already cancelled.
#[utoipa::path(
    delete,
    path = "/api/v1/bookings/{id}",
    tag = "Bookings",
    summary = "Cancel a booking",
    description = "Cancels a booking on behalf of its owner or an administrator. Requires a caller identity. The row is retained with status CANCELLED.",
    params(
        ("id" = uuid::Uuid, Path, description = "Booking UUID"),
    ),
    responses(
        (status = 200, description = "Cancelled booking", body = BookingResponse),
        (status = 401, description = "Missing caller identity", body = ErrorResponse),
        (status = 404, description = "Booking not found", body = ErrorResponse),
        (status = 409, description = "Already cancelled", body = ErrorResponse),
    )
)]
pub async fn cancel_booking(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<uuid::Uuid>,
) -> Result<impl IntoResponse, BookingError> {
    let caller = caller_id(&headers)?.ok_or(BookingError::Unauthorized)?;
    let booking = state
        .booking_service
        .cancel_booking(BookingId::from_uuid(id), Some(caller))
        .await?;
    Ok(Json(BookingResponse { booking }))
}

/// Booking resource routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/bookings", post(create_booking).get(list_bookings))
        .route("/bookings/all", get(list_all_bookings))
        .route(
            "/bookings/{id}",
            get(get_booking).delete(cancel_booking),
        )
        .route("/bookings/{id}/status", patch(update_status))
}

// ── Request Parsing Helpers ─────────────────────────────────────────────

/// Extracts the caller's user id from the identity header.
///
/// # Errors
///
/// Returns [`BookingError::Validation`] when the header is present but
/// not a UUID.
fn caller_id(headers: &HeaderMap) -> Result<Option<uuid::Uuid>, BookingError> {
    let Some(value) = headers.get(USER_ID_HEADER) else {
        return Ok(None);
    };
    let raw = value
        .to_str()
        .map_err(|_| BookingError::validation(USER_ID_HEADER, "must be a UUID"))?;
    raw.parse()
        .map(Some)
        .map_err(|_| BookingError::validation(USER_ID_HEADER, "must be a UUID"))
}

/// Parses a wire status string.
///
/// # Errors
///
/// Returns [`BookingError::Validation`] for unknown statuses.
fn parse_status(raw: &str) -> Result<BookingStatus, BookingError> {
    BookingStatus::parse(raw).ok_or_else(|| {
        BookingError::validation("status", "must be PENDING, CONFIRMED, or CANCELLED")
    })
}

/// Validates a creation request into a [`BookingDraft`].
///
/// Checks run in field order and stop at the first failure, which is
/// reported under the field's JSON name.
///
/// # Errors
///
/// Returns [`BookingError::Validation`] naming the offending field.
fn validate_create(
    req: CreateBookingRequest,
    caller: Option<uuid::Uuid>,
) -> Result<BookingDraft, BookingError> {
    let kind_raw = req
        .kind
        .ok_or_else(|| BookingError::validation("type", "booking type is required"))?;
    let kind = BookingKind::parse(&kind_raw)
        .ok_or_else(|| BookingError::validation("type", "must be DAHABIYA or PACKAGE"))?;

    let (dahabiya_id, package_id) = match kind {
        BookingKind::Dahabiya => {
            if req.package_id.is_some() {
                return Err(BookingError::validation(
                    "packageId",
                    "must not be set for DAHABIYA bookings",
                ));
            }
            let id = req.dahabiya_id.ok_or_else(|| {
                BookingError::validation("dahabiyaId", "dahabiya id is required")
            })?;
            (Some(id), None)
        }
        BookingKind::Package => {
            if req.dahabiya_id.is_some() {
                return Err(BookingError::validation(
                    "dahabiyaId",
                    "must not be set for PACKAGE bookings",
                ));
            }
            let id = req
                .package_id
                .ok_or_else(|| BookingError::validation("packageId", "package id is required"))?;
            (None, Some(id))
        }
    };

    let start_date = parse_date(req.start_date.as_deref(), "startDate", "start date")?;
    let end_date = parse_date(req.end_date.as_deref(), "endDate", "end date")?;
    if end_date < start_date {
        return Err(BookingError::validation(
            "endDate",
            "must not precede startDate",
        ));
    }

    let guests = req
        .guests
        .ok_or_else(|| BookingError::validation("guests", "guest count is required"))?;
    if guests < 1 {
        return Err(BookingError::validation("guests", "must be at least 1"));
    }

    let total_price = req
        .total_price
        .ok_or_else(|| BookingError::validation("totalPrice", "total price is required"))?;
    if !total_price.is_finite() || total_price < 0.0 {
        return Err(BookingError::validation("totalPrice", "must be non-negative"));
    }

    let guest_contact = match caller {
        Some(_) => None,
        None => Some(validate_guest_info(req.guest_info)?),
    };

    Ok(BookingDraft {
        kind,
        dahabiya_id,
        package_id,
        start_date,
        end_date,
        guests,
        total_price,
        guest_details: req.guest_details.unwrap_or_default(),
        special_requests: req.special_requests,
        user_id: caller,
        guest_contact,
    })
}

fn parse_date(
    raw: Option<&str>,
    field: &str,
    label: &str,
) -> Result<NaiveDate, BookingError> {
    let raw =
        raw.ok_or_else(|| BookingError::validation(field, format!("{label} is required")))?;
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| BookingError::validation(field, "must be a YYYY-MM-DD date"))
}

fn validate_guest_info(
    info: Option<crate::api::dto::GuestInfoDto>,
) -> Result<GuestContact, BookingError> {
    let info = info.ok_or_else(|| {
        BookingError::validation("guestInfo", "guest info is required for anonymous bookings")
    })?;
    let name = info
        .name
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| BookingError::validation("guestInfo.name", "guest name is required"))?;
    let email = info
        .email
        .filter(|e| is_valid_email(e))
        .ok_or_else(|| {
            BookingError::validation("guestInfo.email", "a valid guest email is required")
        })?;
    Ok(GuestContact {
        name,
        email,
        phone: info.phone,
    })
}

/// Minimal syntactic email check: one `@` with a non-empty local part
/// and a dotted domain.
fn is_valid_email(email: &str) -> bool {
    let mut parts = email.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        _ => false,
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::api::dto::GuestInfoDto;

    fn full_request() -> CreateBookingRequest {
        CreateBookingRequest {
            kind: Some("DAHABIYA".to_string()),
            dahabiya_id: Some(uuid::Uuid::new_v4()),
            package_id: None,
            start_date: Some("2026-10-01".to_string()),
            end_date: Some("2026-10-05".to_string()),
            guests: Some(2),
            total_price: Some(900.0),
            guest_details: None,
            special_requests: None,
            guest_info: Some(GuestInfoDto {
                name: Some("Nour".to_string()),
                email: Some("nour@example.com".to_string()),
                phone: None,
            }),
        }
    }

    #[test]
    fn valid_anonymous_request_passes() {
        let draft = validate_create(full_request(), None);
        let Ok(draft) = draft else {
            panic!("validation failed");
        };
        assert_eq!(draft.kind, BookingKind::Dahabiya);
        assert!(draft.user_id.is_none());
        assert!(draft.guest_contact.is_some());
    }

    #[test]
    fn missing_end_date_names_the_field() {
        let mut req = full_request();
        req.end_date = None;
        let err = validate_create(req, None);
        let Err(BookingError::Validation { field, .. }) = err else {
            panic!("expected validation error");
        };
        assert_eq!(field, "endDate");
    }

    #[test]
    fn reversed_dates_are_rejected() {
        let mut req = full_request();
        req.start_date = Some("2026-10-05".to_string());
        req.end_date = Some("2026-10-01".to_string());
        let err = validate_create(req, None);
        assert!(matches!(
            err,
            Err(BookingError::Validation { field, .. }) if field == "endDate"
        ));
    }

    #[test]
    fn zero_guests_are_rejected() {
        let mut req = full_request();
        req.guests = Some(0);
        assert!(matches!(
            validate_create(req, None),
            Err(BookingError::Validation { field, .. }) if field == "guests"
        ));
    }

    #[test]
    fn negative_price_is_rejected() {
        let mut req = full_request();
        req.total_price = Some(-1.0);
        assert!(matches!(
            validate_create(req, None),
            Err(BookingError::Validation { field, .. }) if field == "totalPrice"
        ));
    }

    #[test]
    fn package_booking_requires_package_id() {
        let mut req = full_request();
        req.kind = Some("PACKAGE".to_string());
        req.dahabiya_id = None;
        assert!(matches!(
            validate_create(req, None),
            Err(BookingError::Validation { field, .. }) if field == "packageId"
        ));
    }

    #[test]
    fn mismatched_item_id_is_rejected() {
        let mut req = full_request();
        req.package_id = Some(uuid::Uuid::new_v4());
        assert!(matches!(
            validate_create(req, None),
            Err(BookingError::Validation { field, .. }) if field == "packageId"
        ));
    }

    #[test]
    fn anonymous_without_guest_info_is_rejected() {
        let mut req = full_request();
        req.guest_info = None;
        assert!(matches!(
            validate_create(req, None),
            Err(BookingError::Validation { field, .. }) if field == "guestInfo"
        ));
    }

    #[test]
    fn anonymous_with_bad_email_is_rejected() {
        let mut req = full_request();
        req.guest_info = Some(GuestInfoDto {
            name: Some("Nour".to_string()),
            email: Some("not-an-email".to_string()),
            phone: None,
        });
        assert!(matches!(
            validate_create(req, None),
            Err(BookingError::Validation { field, .. }) if field == "guestInfo.email"
        ));
    }

    #[test]
    fn authenticated_request_skips_guest_info() {
        let mut req = full_request();
        req.guest_info = None;
        let caller = uuid::Uuid::new_v4();
        let draft = validate_create(req, Some(caller));
        let Ok(draft) = draft else {
            panic!("validation failed");
        };
        assert_eq!(draft.user_id, Some(caller));
        assert!(draft.guest_contact.is_none());
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let mut req = full_request();
        req.kind = Some("CRUISE".to_string());
        assert!(matches!(
            validate_create(req, None),
            Err(BookingError::Validation { field, .. }) if field == "type"
        ));
    }

    #[test]
    fn email_shapes() {
        assert!(is_valid_email("a@b.co"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("@b.co"));
        assert!(!is_valid_email("a@.co"));
        assert!(!is_valid_email("a@b.co@c.io"));
    }

    #[test]
    fn caller_header_parses_or_rejects() {
        let mut headers = HeaderMap::new();
        assert_eq!(caller_id(&headers).ok(), Some(None));

        let id = uuid::Uuid::new_v4();
        if let Ok(value) = id.to_string().parse() {
            headers.insert(USER_ID_HEADER, value);
        }
        assert_eq!(caller_id(&headers).ok(), Some(Some(id)));

        if let Ok(value) = "not-a-uuid".parse() {
            headers.insert(USER_ID_HEADER, value);
        }
        assert!(caller_id(&headers).is_err());
    }

    #[test]
    fn unknown_status_string_is_rejected() {
        assert!(parse_status("COMPLETED").is_err());
        assert_eq!(parse_status("CONFIRMED").ok(), Some(BookingStatus::Confirmed));
    }

    mod endpoint {
        use std::sync::Arc;

        use super::*;
        use crate::domain::UserRole;
        use crate::notifier::NotificationFanout;
        use crate::persistence::BookingStore;
        use crate::persistence::memory::MemoryBookingStore;
        use crate::service::BookingService;
        use crate::test_util::RecordingMailer;

        async fn state_with_booking() -> (AppState, Arc<MemoryBookingStore>, uuid::Uuid, BookingId)
        {
            let store = Arc::new(MemoryBookingStore::new());
            let owner = store
                .add_user(Some("Omar"), "omar@example.com", UserRole::User)
                .await;
            let item = store.add_item("Princess", None).await;

            let draft = BookingDraft {
                kind: BookingKind::Dahabiya,
                dahabiya_id: Some(item),
                package_id: None,
                start_date: chrono::NaiveDate::from_ymd_opt(2026, 10, 1).unwrap_or_default(),
                end_date: chrono::NaiveDate::from_ymd_opt(2026, 10, 5).unwrap_or_default(),
                guests: 2,
                total_price: 900.0,
                guest_details: vec![],
                special_requests: None,
                user_id: Some(owner),
                guest_contact: None,
            };
            let booking = store.create(draft).await.ok();
            let Some(booking) = booking else {
                panic!("seed booking failed");
            };

            let fanout = NotificationFanout::new(
                Arc::clone(&store) as Arc<dyn BookingStore>,
                Arc::new(RecordingMailer::new()),
                vec!["ops@example.com".to_string()],
            );
            let service = BookingService::new(Arc::clone(&store) as Arc<dyn BookingStore>, fanout);
            let state = AppState {
                booking_service: Arc::new(service),
            };
            (state, store, owner, booking.id)
        }

        fn headers_for(user: uuid::Uuid) -> HeaderMap {
            let mut headers = HeaderMap::new();
            if let Ok(value) = user.to_string().parse() {
                headers.insert(USER_ID_HEADER, value);
            }
            headers
        }

        #[tokio::test]
        async fn headerless_cancel_is_rejected() {
            let (state, store, _owner, id) = state_with_booking().await;

            let result =
                cancel_booking(State(state), HeaderMap::new(), Path(*id.as_uuid())).await;
            let Err(err) = result else {
                panic!("anonymous cancel must not succeed");
            };
            assert!(matches!(err, BookingError::Unauthorized));

            // The booking is untouched.
            let booking = store.get_by_id(id).await.ok().flatten();
            assert_eq!(booking.map(|b| b.status), Some(BookingStatus::Pending));
        }

        #[tokio::test]
        async fn headerless_read_is_rejected() {
            let (state, _store, _owner, id) = state_with_booking().await;

            let result = get_booking(State(state), HeaderMap::new(), Path(*id.as_uuid())).await;
            assert!(matches!(result, Err(BookingError::Unauthorized)));
        }

        #[tokio::test]
        async fn owner_with_header_still_cancels() {
            let (state, store, owner, id) = state_with_booking().await;

            let result =
                cancel_booking(State(state), headers_for(owner), Path(*id.as_uuid())).await;
            assert!(result.is_ok());

            let booking = store.get_by_id(id).await.ok().flatten();
            assert_eq!(booking.map(|b| b.status), Some(BookingStatus::Cancelled));
        }
    }
}
