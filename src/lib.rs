//! # nile-booking-gateway
//!
//! REST API gateway for the Nile-cruise booking lifecycle: creation,
//! retrieval, status transitions, and the notification fan-out that
//! follows every mutation.
//!
//! Pricing, availability, and payment live in other services — this
//! gateway records what the caller submits and drives the booking
//! through its lifecycle.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── REST Handlers (api/)
//!     │
//!     ├── BookingService (service/)
//!     ├── NotificationFanout (notifier/)
//!     │
//!     ├── BookingStore (persistence/)
//!     ├── Mailer (mailer/)
//!     │
//!     └── PostgreSQL Persistence
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod mailer;
pub mod notifier;
pub mod persistence;
pub mod service;

#[cfg(test)]
mod test_util;
