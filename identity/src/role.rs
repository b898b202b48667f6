//! Role model and the single role-derivation rule.
//!
//! Registration and profile resolution both go through [`derive_role`], so
//! the role seeded into the backend and the role computed at login agree.

use serde::{Deserialize, Serialize};

/// Application role attached to a domain user.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    User,
}

impl Role {
    /// Read a stored role column. Anything other than `admin`/`user` is `User`.
    #[must_use]
    pub fn from_stored(raw: Option<&str>) -> Self {
        match raw {
            Some("admin") => Self::Admin,
            _ => Self::User,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }

    #[must_use]
    pub fn is_admin(self) -> bool {
        self == Self::Admin
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive comparison against the administrative address.
#[must_use]
pub fn is_admin_email(email: Option<&str>, admin_email: &str) -> bool {
    email.is_some_and(|e| e.to_lowercase() == admin_email.to_lowercase())
}

/// The administrative address overrides whatever role is stored.
#[must_use]
pub fn derive_role(email: Option<&str>, stored: Role, admin_email: &str) -> Role {
    if is_admin_email(email, admin_email) { Role::Admin } else { stored }
}

#[cfg(test)]
#[path = "role_test.rs"]
mod role_test;
