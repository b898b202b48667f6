//! Collaborator seams: identity provider, profile store, notification surface.
//!
//! DESIGN
//! ======
//! All three are traits so the adapter can be driven by the Supabase client
//! in the browser and by in-memory doubles in tests. Futures are `?Send`:
//! everything runs on the single UI thread.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;

use crate::error::{AuthError, ProfileFetchError};
use crate::role::Role;
use crate::user::{ProfileRow, Session};

// =============================================================================
// EVENTS
// =============================================================================

/// Session lifecycle event kinds pushed by the provider.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthEventKind {
    /// Result of the startup session check.
    InitialSession,
    SignedIn,
    SignedOut,
    TokenRefreshed,
    UserUpdated,
}

impl AuthEventKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InitialSession => "INITIAL_SESSION",
            Self::SignedIn => "SIGNED_IN",
            Self::SignedOut => "SIGNED_OUT",
            Self::TokenRefreshed => "TOKEN_REFRESHED",
            Self::UserUpdated => "USER_UPDATED",
        }
    }
}

/// A provider-pushed session change.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthEvent {
    pub kind: AuthEventKind,
    pub session: Option<Session>,
}

impl AuthEvent {
    #[must_use]
    pub fn new(kind: AuthEventKind, session: Option<Session>) -> Self {
        Self { kind, session }
    }
}

/// Callback registered with [`IdentityProvider::on_auth_state_change`].
pub type AuthListener = Arc<dyn Fn(AuthEvent) + Send + Sync>;

// =============================================================================
// SUBSCRIPTION
// =============================================================================

/// Handle for a registered listener. Dropping it unsubscribes.
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    pub fn new(cancel: impl FnOnce() + Send + Sync + 'static) -> Self {
        Self { cancel: Some(Box::new(cancel)) }
    }

    /// A subscription with nothing to cancel.
    #[must_use]
    pub fn noop() -> Self {
        Self { cancel: None }
    }

    pub fn unsubscribe(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("active", &self.cancel.is_some()).finish()
    }
}

// =============================================================================
// LISTENER SET
// =============================================================================

/// Listener registry shared by provider implementations.
///
/// `emit` calls listeners synchronously while holding the registry lock, the
/// same way hosted-auth SDKs dispatch. A listener that calls back into the
/// registry (subscribing, or triggering another emit) deadlocks.
#[derive(Clone, Default)]
pub struct ListenerSet {
    inner: Arc<ListenerSetInner>,
}

#[derive(Default)]
struct ListenerSetInner {
    next_id: AtomicU64,
    listeners: Mutex<Vec<(u64, AuthListener)>>,
}

impl ListenerSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, listener: AuthListener) -> Subscription {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        self.inner
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, listener));

        let inner = Arc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = inner.upgrade() {
                inner
                    .listeners
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .retain(|(listener_id, _)| *listener_id != id);
            }
        })
    }

    pub fn emit(&self, event: &AuthEvent) {
        let listeners = self
            .inner
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        tracing::debug!(event = event.kind.as_str(), listeners = listeners.len(), "dispatching auth event");
        for (_, listener) in listeners.iter() {
            listener(event.clone());
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// =============================================================================
// TRAITS
// =============================================================================

/// User metadata sent with a sign-up so the backend can seed the profile row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SignUpMetadata {
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
}

/// Hosted identity provider client.
#[async_trait::async_trait(?Send)]
pub trait IdentityProvider: Send + Sync {
    /// Currently stored session, if any.
    ///
    /// # Errors
    ///
    /// Returns an [`AuthError`] if the stored session cannot be read.
    async fn get_session(&self) -> Result<Option<Session>, AuthError>;

    /// Register a session-change listener.
    fn on_auth_state_change(&self, listener: AuthListener) -> Subscription;

    /// Exchange email + password for a session. Emits `SignedIn` on success.
    ///
    /// # Errors
    ///
    /// Returns an [`AuthError`] if the provider rejects the credentials.
    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session, AuthError>;

    /// Create an account. Completion is confirmed out of band (email).
    ///
    /// # Errors
    ///
    /// Returns an [`AuthError`] if the provider rejects the registration.
    async fn sign_up(&self, email: &str, password: &str, metadata: &SignUpMetadata) -> Result<(), AuthError>;

    /// End the current session. Emits `SignedOut` on success.
    ///
    /// # Errors
    ///
    /// Returns an [`AuthError`] if the provider refuses or is unreachable.
    async fn sign_out(&self) -> Result<(), AuthError>;
}

/// Row-per-user profile table.
#[async_trait::async_trait(?Send)]
pub trait ProfileStore: Send + Sync {
    /// Single-row equality lookup by user id. `Ok(None)` when no row matches.
    ///
    /// # Errors
    ///
    /// Returns a [`ProfileFetchError`] on transport, status, or parse failure.
    async fn fetch_profile(&self, user_id: &str) -> Result<Option<ProfileRow>, ProfileFetchError>;
}

/// Fire-and-forget user notifications (toasts).
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

#[cfg(test)]
#[path = "provider_test.rs"]
mod provider_test;
