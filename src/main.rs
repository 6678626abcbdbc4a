//! nile-booking-gateway server entry point.
//!
//! Starts the Axum HTTP server for the booking REST API.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use nile_booking_gateway::api;
use nile_booking_gateway::app_state::AppState;
use nile_booking_gateway::config::GatewayConfig;
use nile_booking_gateway::mailer::{ConsoleMailer, Mailer, SmtpMailer};
use nile_booking_gateway::notifier::NotificationFanout;
use nile_booking_gateway::persistence::BookingStore;
use nile_booking_gateway::persistence::postgres::PostgresBookingStore;
use nile_booking_gateway::service::BookingService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = GatewayConfig::from_env()?;
    tracing::info!(addr = %config.listen_addr, "starting nile-booking-gateway");

    // Build persistence layer
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .min_connections(config.database_min_connections)
        .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
        .connect(&config.database_url)
        .await?;
    sqlx::migrate!("./migrations").run(&pool).await?;
    let store: Arc<dyn BookingStore> = Arc::new(PostgresBookingStore::new(pool));

    // Build mailer: console when no SMTP relay is configured
    let mailer: Arc<dyn Mailer> = if config.smtp_host.is_empty() {
        tracing::warn!("SMTP_HOST not set, emails will be logged instead of sent");
        Arc::new(ConsoleMailer::new())
    } else {
        Arc::new(SmtpMailer::from_config(&config))
    };

    // Build service layer
    let fanout = NotificationFanout::new(
        Arc::clone(&store),
        mailer,
        config.admin_emails.clone(),
    );
    let booking_service = Arc::new(BookingService::new(store, fanout));

    // Build application state
    let app_state = AppState { booking_service };

    // Build router
    let app = Router::new()
        .merge(api::build_router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
