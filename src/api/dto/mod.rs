//! Data Transfer Objects for REST request/response serialization.
//!
//! Request DTOs are deliberately loose: every field is optional and
//! validation happens in the handlers, so that a missing field produces
//! a structured validation error naming the field instead of an opaque
//! deserialization failure.

pub mod booking_dto;

pub use booking_dto::*;
