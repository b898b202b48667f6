//! Session/identity adapter.
//!
//! ARCHITECTURE
//! ============
//! The provider pushes session events through a listener that only enqueues
//! onto a [`DispatchQueue`]. [`SessionAdapter::run`] drains that queue, moves
//! the state machine, and resolves the profile row for each new principal.
//! Every transition is published as a fresh [`AuthSnapshot`] on a `watch`
//! channel.
//!
//! ```text
//! Initializing ──no session──▶ Unauthenticated ◀──┐
//!      │                             ▲            │ error / no row
//!      └──session──▶ ResolvingProfile ┴──row──▶ Authenticated
//! ```
//!
//! SUPERSESSION
//! ============
//! Each resolution carries the generation it was started under. A newer
//! event bumps the generation and cancels the in-flight lookup; any result
//! that still arrives for an old generation is discarded. When the principal
//! id changes the previous user is cleared right away, so a new session is
//! never paired with the previous user's profile.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::watch;

use crate::config::AuthConfig;
use crate::dispatch::{DEFAULT_DISPATCH_CAPACITY, DispatchQueue};
use crate::error::AuthError;
use crate::provider::{AuthEvent, AuthEventKind, IdentityProvider, Notifier, ProfileStore, SignUpMetadata, Subscription};
use crate::role::{Role, derive_role};
use crate::snapshot::{AuthPhase, AuthSnapshot};
use crate::user::{AuthUser, Principal};

pub const LOGIN_SUCCESS: &str = "Login successful!";
pub const LOGIN_FAILED: &str = "Login failed";
pub const REGISTER_SUCCESS: &str = "Registration successful! Please check your email to verify your account.";
pub const REGISTER_FAILED: &str = "Registration failed";
pub const LOGOUT_SUCCESS: &str = "Logged out successfully";
pub const LOGOUT_FAILED: &str = "Logout failed";

/// Owned authentication state plus the operations that change it.
///
/// Cheap to clone; all clones share one state.
#[derive(Clone)]
pub struct SessionAdapter {
    shared: Arc<Shared>,
}

struct Shared {
    provider: Arc<dyn IdentityProvider>,
    store: Arc<dyn ProfileStore>,
    notifier: Arc<dyn Notifier>,
    admin_email: String,
    state: watch::Sender<AuthSnapshot>,
    generation: AtomicU64,
    queue: DispatchQueue<AuthEvent>,
    subscription: Mutex<Option<Subscription>>,
}

/// A profile lookup bound to the generation and principal it started with.
#[derive(Debug)]
pub(crate) struct Resolution {
    generation: u64,
    principal: Principal,
}

impl SessionAdapter {
    /// Subscribe to `provider` and start in [`AuthPhase::Initializing`].
    ///
    /// Nothing happens until [`SessionAdapter::run`] is polled.
    pub fn new(
        provider: Arc<dyn IdentityProvider>,
        store: Arc<dyn ProfileStore>,
        notifier: Arc<dyn Notifier>,
        config: &AuthConfig,
    ) -> Self {
        let queue = DispatchQueue::new(DEFAULT_DISPATCH_CAPACITY);
        let sink = queue.clone();
        let subscription = provider.on_auth_state_change(Arc::new(move |event: AuthEvent| {
            if !sink.push(event) {
                tracing::debug!("auth event after shutdown ignored");
            }
        }));
        let (state, _) = watch::channel(AuthSnapshot::default());

        Self {
            shared: Arc::new(Shared {
                provider,
                store,
                notifier,
                admin_email: config.admin_email.clone(),
                state,
                generation: AtomicU64::new(0),
                queue,
                subscription: Mutex::new(Some(subscription)),
            }),
        }
    }

    // =========================================================================
    // STATE
    // =========================================================================

    /// Receiver that observes every published snapshot.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AuthSnapshot> {
        self.shared.state.subscribe()
    }

    #[must_use]
    pub fn snapshot(&self) -> AuthSnapshot {
        self.shared.state.borrow().clone()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.shared.state.borrow().is_authenticated()
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.shared.state.borrow().is_admin()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.shared.state.borrow().is_loading()
    }

    /// Provider events delivered but not yet processed by `run`.
    #[must_use]
    pub fn pending_events(&self) -> usize {
        self.shared.queue.len()
    }

    // =========================================================================
    // OPERATIONS
    // =========================================================================

    /// Sign in with email and password.
    ///
    /// The domain user is filled in later, when the provider's `SignedIn`
    /// event is processed by `run`.
    ///
    /// # Errors
    ///
    /// Returns the provider's [`AuthError`] after showing it as an error toast.
    pub async fn login(&self, email: &str, password: &str) -> Result<(), AuthError> {
        tracing::info!(%email, "attempting login");
        match self.shared.provider.sign_in_with_password(email, password).await {
            Ok(_) => {
                self.shared.notifier.success(LOGIN_SUCCESS);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(%email, error = %e, "login rejected");
                self.shared.notifier.error(&e.user_message(LOGIN_FAILED));
                Err(e)
            }
        }
    }

    /// Create an account, seeding the role the profile row should carry.
    ///
    /// # Errors
    ///
    /// Returns the provider's [`AuthError`] after showing it as an error toast.
    pub async fn register(&self, email: &str, password: &str, first_name: &str, last_name: &str) -> Result<(), AuthError> {
        let role = derive_role(Some(email), Role::User, &self.shared.admin_email);
        tracing::info!(%email, role = role.as_str(), "registering");
        let metadata = SignUpMetadata { first_name: first_name.to_owned(), last_name: last_name.to_owned(), role };
        match self.shared.provider.sign_up(email, password, &metadata).await {
            Ok(()) => {
                self.shared.notifier.success(REGISTER_SUCCESS);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(%email, error = %e, "registration rejected");
                self.shared.notifier.error(&e.user_message(REGISTER_FAILED));
                Err(e)
            }
        }
    }

    /// Best-effort sign-out. Failures become an error toast and nothing else.
    pub async fn logout(&self) {
        match self.shared.provider.sign_out().await {
            Ok(()) => self.shared.notifier.success(LOGOUT_SUCCESS),
            Err(e) => {
                tracing::warn!(error = %e, "logout failed");
                self.shared.notifier.error(&e.user_message(LOGOUT_FAILED));
            }
        }
    }

    // =========================================================================
    // DRIVER
    // =========================================================================

    /// Startup session check, then process provider events until shutdown.
    ///
    /// A queued event always wins over an in-flight profile lookup.
    pub async fn run(&self) {
        let initial = match self.shared.provider.get_session().await {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!(error = %e, "startup session check failed; treating as signed out");
                None
            }
        };
        let mut pending = Some(AuthEvent::new(AuthEventKind::InitialSession, initial));

        loop {
            let event = match pending.take() {
                Some(event) => event,
                None => match self.shared.queue.pop().await {
                    Some(event) => event,
                    None => break,
                },
            };

            let Some(resolution) = self.apply_event(event) else {
                continue;
            };

            let resolve = self.resolve(resolution);
            tokio::pin!(resolve);
            tokio::select! {
                biased;
                next = self.shared.queue.pop() => match next {
                    Some(event) => {
                        tracing::debug!(event = event.kind.as_str(), "superseding in-flight profile lookup");
                        pending = Some(event);
                    }
                    None => {
                        resolve.await;
                        break;
                    }
                },
                () = &mut resolve => {}
            }
        }

        tracing::debug!("session adapter stopped");
    }

    /// Unsubscribe from the provider and let `run` finish.
    pub fn shutdown(&self) {
        let subscription = self
            .shared
            .subscription
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        drop(subscription);
        self.shared.queue.close();
    }

    /// Move the state machine for one event. Returns the lookup to perform,
    /// if the event carries a session.
    pub(crate) fn apply_event(&self, event: AuthEvent) -> Option<Resolution> {
        let generation = self.shared.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let kind = event.kind.as_str();

        let Some(session) = event.session else {
            tracing::info!(event = kind, "no session");
            self.shared.state.send_modify(|s| {
                s.phase = AuthPhase::Unauthenticated;
                s.session = None;
                s.user = None;
                s.loading = false;
            });
            return None;
        };

        let principal = session.user.clone();
        tracing::info!(
            event = kind,
            user_id = %principal.id,
            email = principal.email.as_deref().unwrap_or_default(),
            "session present; resolving profile"
        );
        self.shared.state.send_modify(|s| {
            if s.user.as_ref().is_some_and(|u| u.id != principal.id) {
                s.user = None;
            }
            s.phase = AuthPhase::ResolvingProfile;
            s.session = Some(session);
        });
        Some(Resolution { generation, principal })
    }

    /// Fetch the profile row for a resolution and commit it unless a newer
    /// event has arrived since the resolution started. No retry.
    pub(crate) async fn resolve(&self, resolution: Resolution) {
        let Resolution { generation, principal } = resolution;

        let user = match self.shared.store.fetch_profile(&principal.id).await {
            Ok(Some(row)) => Some(AuthUser::from_profile(&principal, &row, &self.shared.admin_email)),
            Ok(None) => {
                tracing::warn!(user_id = %principal.id, "no profile row for user");
                None
            }
            Err(e) => {
                tracing::warn!(user_id = %principal.id, error = %e, "profile fetch failed");
                None
            }
        };

        let role = user.as_ref().map(|u| u.role);
        let committed = self.shared.state.send_if_modified(|s| {
            if self.shared.generation.load(Ordering::SeqCst) != generation {
                return false;
            }
            s.phase = if user.is_some() { AuthPhase::Authenticated } else { AuthPhase::Unauthenticated };
            s.user = user;
            s.loading = false;
            true
        });

        if committed {
            tracing::info!(user_id = %principal.id, role = role.map_or("none", Role::as_str), "profile resolved");
        } else {
            tracing::debug!(user_id = %principal.id, generation, "discarding stale profile resolution");
        }
    }
}

#[cfg(test)]
#[path = "adapter_test.rs"]
mod adapter_test;
