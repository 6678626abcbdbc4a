//! User roles as resolved by the store.
//!
//! Authentication itself is external; this core only needs to know
//! whether a caller holds the administrator role.

use serde::{Deserialize, Serialize};

/// Role attached to a user record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    /// Administrator: may read and mutate any booking.
    Admin,
    /// Regular user: may read and cancel only their own bookings.
    User,
}

impl UserRole {
    /// Parses the stored representation; unknown roles map to [`Self::User`].
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "ADMIN" => Self::Admin,
            _ => Self::User,
        }
    }

    /// Returns the stored representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::User => "USER",
        }
    }

    /// Whether this role carries administrator rights.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn unknown_roles_are_not_admin() {
        assert!(!UserRole::parse("MANAGER").is_admin());
        assert!(!UserRole::parse("USER").is_admin());
        assert!(UserRole::parse("ADMIN").is_admin());
    }
}
