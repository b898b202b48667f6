//! Error types for authentication, profile lookup, and configuration.
//!
//! ERROR HANDLING
//! ==============
//! `AuthError` is user-facing: its message ends up in a toast. The other two
//! are operator-facing and only ever reach the log.

/// Failures from the identity provider (sign-in, sign-up, sign-out, session).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// The provider answered and refused the request.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// The request never produced a provider answer.
    #[error("auth request failed: {0}")]
    Transport(String),

    /// The provider answered with a body we could not read.
    #[error("auth response parse failed: {0}")]
    Parse(String),

    /// Persisting or clearing the local session copy failed.
    #[error("session storage failed: {0}")]
    Storage(String),
}

impl AuthError {
    /// Message to show the user, or `fallback` when the provider gave none.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        let message = self.to_string();
        if message.trim().is_empty() { fallback.to_owned() } else { message }
    }
}

/// Failures while reading a row from the profile store.
#[derive(Debug, thiserror::Error)]
pub enum ProfileFetchError {
    #[error("profile request failed: {0}")]
    Request(String),

    #[error("profile request returned status {status}")]
    Status { status: u16, body: String },

    #[error("profile response parse failed: {0}")]
    Parse(String),

    /// An equality lookup on the primary key matched more than one row.
    #[error("expected a single profile row, got {0}")]
    Ambiguous(usize),
}

/// Failures while assembling backend configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("missing configuration: {var} not set")]
    Missing { var: String },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;
