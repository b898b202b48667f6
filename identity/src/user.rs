//! Session, principal, profile row, and the derived domain user.
//!
//! DESIGN
//! ======
//! `Session` and `Principal` belong to the provider and are only ever
//! replaced. `AuthUser` is derived state: it is rebuilt from a `ProfileRow`
//! plus the principal every time the principal changes.

use serde::{Deserialize, Deserializer, Serialize};

use crate::role::{Role, derive_role};

/// Fallback display name when the profile has neither first nor last name.
pub const DEFAULT_DISPLAY_NAME: &str = "User";

/// Provider-level identity tied to a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Opaque provider user id (UUID string).
    pub id: String,
    /// Login email, when the provider knows one.
    #[serde(default)]
    pub email: Option<String>,
}

/// Provider-issued proof of authentication.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    /// Expiry as Unix seconds, if the provider reported one.
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub user: Principal,
}

fn default_token_type() -> String {
    "bearer".to_owned()
}

impl Session {
    /// `true` once `now` (Unix seconds) has reached the expiry.
    #[must_use]
    pub fn is_expired(&self, now: i64) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("access_token", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .field("token_type", &self.token_type)
            .field("expires_at", &self.expires_at)
            .field("user", &self.user)
            .finish()
    }
}

/// A row of the `profiles` table.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRow {
    pub id: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    /// Stored role; non-string values are read as absent.
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub role: Option<String>,
}

fn deserialize_lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        _ => None,
    })
}

/// Application-level user: profile data plus the derived role.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl AuthUser {
    /// Build the domain user for `principal` from its profile row.
    #[must_use]
    pub fn from_profile(principal: &Principal, row: &ProfileRow, admin_email: &str) -> Self {
        let stored = Role::from_stored(row.role.as_deref());
        Self {
            id: principal.id.clone(),
            name: display_name(row.first_name.as_deref(), row.last_name.as_deref()),
            email: principal.email.clone().unwrap_or_default(),
            role: derive_role(principal.email.as_deref(), stored, admin_email),
        }
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// `"{first} {last}"` trimmed, or [`DEFAULT_DISPLAY_NAME`] when that is empty.
#[must_use]
pub fn display_name(first: Option<&str>, last: Option<&str>) -> String {
    let joined = format!("{} {}", first.unwrap_or_default(), last.unwrap_or_default());
    let trimmed = joined.trim();
    if trimmed.is_empty() { DEFAULT_DISPLAY_NAME.to_owned() } else { trimmed.to_owned() }
}

#[cfg(test)]
#[path = "user_test.rs"]
mod user_test;
