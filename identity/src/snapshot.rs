//! Published authentication state.

use crate::user::{AuthUser, Principal, Session};

/// Adapter state machine position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthPhase {
    /// Startup; the first session check has not concluded.
    #[default]
    Initializing,
    /// No session, or a session without a usable profile.
    Unauthenticated,
    /// A session is present and its profile lookup is in flight.
    ResolvingProfile,
    /// Session and domain user are both present.
    Authenticated,
}

/// Immutable view of the adapter's state, replaced on every transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthSnapshot {
    pub phase: AuthPhase,
    pub session: Option<Session>,
    pub user: Option<AuthUser>,
    pub loading: bool,
}

impl Default for AuthSnapshot {
    fn default() -> Self {
        Self { phase: AuthPhase::Initializing, session: None, user: None, loading: true }
    }
}

impl AuthSnapshot {
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(AuthUser::is_admin)
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn principal(&self) -> Option<&Principal> {
        self.session.as_ref().map(|s| &s.user)
    }
}

#[cfg(test)]
#[path = "snapshot_test.rs"]
mod snapshot_test;
