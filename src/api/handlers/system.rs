//! System endpoints: health check and booking type catalog.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::app_state::AppState;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
struct HealthResponse {
    status: String,
    timestamp: String,
    version: String,
}

/// `GET /health` — Service health status.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    description = "Returns service health status, version, and current timestamp.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    )
)]
pub async fn health_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}

/// Supported booking type info.
#[derive(Debug, Serialize, ToSchema)]
struct BookingTypeInfo {
    booking_type: &'static str,
    description: &'static str,
    id_field: &'static str,
}

/// `GET /config/booking-types` — List supported booking types.
#[utoipa::path(
    get,
    path = "/config/booking-types",
    tag = "System",
    summary = "List supported booking types",
    description = "Returns metadata for every booking type the gateway accepts.",
    responses(
        (status = 200, description = "Booking type catalog", body = Vec<BookingTypeInfo>),
    )
)]
pub async fn booking_types_handler() -> impl IntoResponse {
    let types = vec![
        BookingTypeInfo {
            booking_type: "DAHABIYA",
            description: "Charter of a traditional Nile sailing vessel",
            id_field: "dahabiyaId",
        },
        BookingTypeInfo {
            booking_type: "PACKAGE",
            description: "Multi-day tour package with itinerary and extras",
            id_field: "packageId",
        },
    ];
    (StatusCode::OK, Json(types))
}

/// System routes mounted at the root level (not under /api/v1).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_handler))
        .route("/config/booking-types", get(booking_types_handler))
}
