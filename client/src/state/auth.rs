//! Auth state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! `AuthState` mirrors the adapter's latest snapshot into a signal so views
//! re-render on change. `AuthHandle` is the context object components use to
//! read that signal and to call login, register, and logout.

use identity::{AuthError, AuthSnapshot, AuthUser, SessionAdapter};
use leptos::prelude::*;

/// Reported when no adapter could be built (backend not configured, or SSR).
pub const BACKEND_UNAVAILABLE: &str = "authentication backend unavailable";

/// View-facing slice of the adapter snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<AuthUser>,
    pub loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self { user: None, loading: true }
    }
}

impl From<&AuthSnapshot> for AuthState {
    fn from(snapshot: &AuthSnapshot) -> Self {
        Self { user: snapshot.user.clone(), loading: snapshot.loading }
    }
}

impl AuthState {
    /// Settled state with no user, used when the backend is unreachable.
    #[must_use]
    pub fn signed_out() -> Self {
        Self { user: None, loading: false }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        !self.loading && self.user.is_some()
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.is_authenticated() && self.user.as_ref().is_some_and(AuthUser::is_admin)
    }

    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.name.as_str())
    }
}

/// Auth signal plus the adapter behind it, provided once at the app root.
#[derive(Clone)]
pub struct AuthHandle {
    state: RwSignal<AuthState>,
    adapter: Option<SessionAdapter>,
}

impl AuthHandle {
    #[must_use]
    pub fn new(state: RwSignal<AuthState>, adapter: Option<SessionAdapter>) -> Self {
        Self { state, adapter }
    }

    #[must_use]
    pub fn state(&self) -> RwSignal<AuthState> {
        self.state
    }

    fn adapter(&self) -> Result<&SessionAdapter, AuthError> {
        self.adapter
            .as_ref()
            .ok_or_else(|| AuthError::Transport(BACKEND_UNAVAILABLE.to_owned()))
    }

    /// # Errors
    ///
    /// Returns the adapter's error, or [`AuthError::Transport`] without a backend.
    pub async fn login(&self, email: &str, password: &str) -> Result<(), AuthError> {
        self.adapter()?.login(email, password).await
    }

    /// # Errors
    ///
    /// Returns the adapter's error, or [`AuthError::Transport`] without a backend.
    pub async fn register(&self, email: &str, password: &str, first_name: &str, last_name: &str) -> Result<(), AuthError> {
        self.adapter()?.register(email, password, first_name, last_name).await
    }

    pub async fn logout(&self) {
        match &self.adapter {
            Some(adapter) => adapter.logout().await,
            None => tracing::warn!("logout without backend; nothing to do"),
        }
    }
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;
