//! In-memory collaborators for adapter tests.

use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::oneshot;

use crate::error::{AuthError, ProfileFetchError};
use crate::provider::{
    AuthEvent, AuthEventKind, AuthListener, IdentityProvider, ListenerSet, Notifier, ProfileStore, SignUpMetadata,
    Subscription,
};
use crate::user::{Principal, ProfileRow, Session};

pub const ADMIN_EMAIL: &str = "eventspark7@gmail.com";

#[must_use]
pub fn session_for(id: &str, email: &str) -> Session {
    Session {
        access_token: format!("access-{id}"),
        refresh_token: format!("refresh-{id}"),
        token_type: "bearer".to_owned(),
        expires_at: None,
        user: Principal { id: id.to_owned(), email: Some(email.to_owned()) },
    }
}

#[must_use]
pub fn profile(id: &str, first: &str, last: &str, role: &str) -> ProfileRow {
    ProfileRow {
        id: id.to_owned(),
        first_name: Some(first.to_owned()),
        last_name: Some(last.to_owned()),
        role: Some(role.to_owned()),
    }
}

/// Poll `cond` between scheduler yields until it holds or a second passes.
pub async fn wait_until(mut cond: impl FnMut() -> bool) {
    tokio::time::timeout(Duration::from_secs(1), async {
        while !cond() {
            tokio::task::yield_now().await;
        }
    })
    .await
    .expect("condition not reached in time");
}

/// Run `fut` on a `LocalSet` so `?Send` futures can be spawned.
pub async fn local<F: Future>(fut: F) -> F::Output {
    tokio::task::LocalSet::new().run_until(fut).await
}

// =============================================================================
// PROVIDER
// =============================================================================

struct Account {
    password: String,
    principal: Principal,
}

/// Identity provider that dispatches events synchronously under its
/// listener lock, like the hosted SDK.
#[derive(Default)]
pub struct MockProvider {
    listeners: ListenerSet,
    session: Mutex<Option<Session>>,
    accounts: Mutex<HashMap<String, Account>>,
    sign_ups: Mutex<Vec<(String, SignUpMetadata)>>,
    sign_out_error: Mutex<Option<AuthError>>,
    get_session_error: Mutex<Option<AuthError>>,
}

impl MockProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_account(self, email: &str, password: &str, id: &str) -> Self {
        self.accounts.lock().unwrap().insert(
            email.to_owned(),
            Account {
                password: password.to_owned(),
                principal: Principal { id: id.to_owned(), email: Some(email.to_owned()) },
            },
        );
        self
    }

    #[must_use]
    pub fn with_session(self, session: Session) -> Self {
        *self.session.lock().unwrap() = Some(session);
        self
    }

    pub fn fail_next_sign_out(&self, err: AuthError) {
        *self.sign_out_error.lock().unwrap() = Some(err);
    }

    pub fn fail_get_session(&self, err: AuthError) {
        *self.get_session_error.lock().unwrap() = Some(err);
    }

    /// Push an event as the provider would (token refresh, external sign-out).
    pub fn emit(&self, kind: AuthEventKind, session: Option<Session>) {
        self.session.lock().unwrap().clone_from(&session);
        self.listeners.emit(&AuthEvent::new(kind, session));
    }

    #[must_use]
    pub fn current_session(&self) -> Option<Session> {
        self.session.lock().unwrap().clone()
    }

    #[must_use]
    pub fn sign_ups(&self) -> Vec<(String, SignUpMetadata)> {
        self.sign_ups.lock().unwrap().clone()
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

#[async_trait::async_trait(?Send)]
impl IdentityProvider for MockProvider {
    async fn get_session(&self) -> Result<Option<Session>, AuthError> {
        if let Some(err) = self.get_session_error.lock().unwrap().take() {
            return Err(err);
        }
        Ok(self.current_session())
    }

    fn on_auth_state_change(&self, listener: AuthListener) -> Subscription {
        self.listeners.add(listener)
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let principal = {
            let accounts = self.accounts.lock().unwrap();
            match accounts.get(email) {
                Some(account) if account.password == password => account.principal.clone(),
                _ => {
                    return Err(AuthError::Rejected { status: 400, message: "Invalid login credentials".to_owned() });
                }
            }
        };
        let session = session_for(&principal.id, principal.email.as_deref().unwrap_or_default());
        self.emit(AuthEventKind::SignedIn, Some(session.clone()));
        Ok(session)
    }

    async fn sign_up(&self, email: &str, _password: &str, metadata: &SignUpMetadata) -> Result<(), AuthError> {
        if self.accounts.lock().unwrap().contains_key(email) {
            return Err(AuthError::Rejected { status: 422, message: "User already registered".to_owned() });
        }
        self.sign_ups.lock().unwrap().push((email.to_owned(), metadata.clone()));
        Ok(())
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        if let Some(err) = self.sign_out_error.lock().unwrap().take() {
            return Err(err);
        }
        self.emit(AuthEventKind::SignedOut, None);
        Ok(())
    }
}

// =============================================================================
// PROFILE STORE
// =============================================================================

/// Profile store whose lookups can be held open until released.
#[derive(Default)]
pub struct MockStore {
    rows: Mutex<HashMap<String, ProfileRow>>,
    failing: Mutex<HashSet<String>>,
    gates: Mutex<HashMap<String, oneshot::Receiver<()>>>,
    calls: Mutex<Vec<String>>,
}

impl MockStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_row(self, row: ProfileRow) -> Self {
        self.rows.lock().unwrap().insert(row.id.clone(), row);
        self
    }

    pub fn fail_for(&self, user_id: &str) {
        self.failing.lock().unwrap().insert(user_id.to_owned());
    }

    /// Hold the next lookup for `user_id` until the returned sender fires.
    pub fn gate(&self, user_id: &str) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().insert(user_id.to_owned(), rx);
        tx
    }

    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait(?Send)]
impl ProfileStore for MockStore {
    async fn fetch_profile(&self, user_id: &str) -> Result<Option<ProfileRow>, ProfileFetchError> {
        self.calls.lock().unwrap().push(user_id.to_owned());
        let gate = self.gates.lock().unwrap().remove(user_id);
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        if self.failing.lock().unwrap().contains(user_id) {
            return Err(ProfileFetchError::Request("connection reset".to_owned()));
        }
        Ok(self.rows.lock().unwrap().get(user_id).cloned())
    }
}

// =============================================================================
// NOTIFIER
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Toast {
    Success(String),
    Error(String),
}

#[derive(Default)]
pub struct RecordingNotifier {
    toasts: Mutex<Vec<Toast>>,
}

impl RecordingNotifier {
    #[must_use]
    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.lock().unwrap().clone()
    }

    #[must_use]
    pub fn errors(&self) -> Vec<String> {
        self.toasts()
            .into_iter()
            .filter_map(|t| match t {
                Toast::Error(m) => Some(m),
                Toast::Success(_) => None,
            })
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn success(&self, message: &str) {
        self.toasts.lock().unwrap().push(Toast::Success(message.to_owned()));
    }

    fn error(&self, message: &str) {
        self.toasts.lock().unwrap().push(Toast::Error(message.to_owned()));
    }
}

/// Provider, store, and notifier handles alongside the adapter under test.
pub struct Harness {
    pub provider: Arc<MockProvider>,
    pub store: Arc<MockStore>,
    pub notifier: Arc<RecordingNotifier>,
    pub adapter: crate::SessionAdapter,
}

#[must_use]
pub fn harness(provider: MockProvider, store: MockStore) -> Harness {
    let provider = Arc::new(provider);
    let store = Arc::new(store);
    let notifier = Arc::new(RecordingNotifier::default());
    let adapter = crate::SessionAdapter::new(
        provider.clone(),
        store.clone(),
        notifier.clone(),
        &crate::AuthConfig { admin_email: ADMIN_EMAIL.to_owned() },
    );
    Harness { provider, store, notifier, adapter }
}
