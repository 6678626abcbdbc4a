//! Notification fan-out: guest email, administrator emails, and
//! persisted in-app notifications dispatched after booking mutations.

pub mod fanout;

pub use fanout::{FanoutReport, NotificationFanout};
