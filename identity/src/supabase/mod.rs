//! Supabase-backed identity provider and profile store.
//!
//! SYSTEM CONTEXT
//! ==============
//! Talks to two Supabase surfaces over HTTPS: GoTrue (`/auth/v1`) for
//! sessions and PostgREST (`/rest/v1`) for the `profiles` table. The current
//! session is kept as JSON in a [`SessionStorage`] under the same key the
//! hosted JS SDK uses, so a page reload finds it again.
//!
//! EVENT DELIVERY
//! ==============
//! State-changing calls (`sign_in_with_password`, `sign_up` with an
//! auto-confirmed session, `sign_out`) emit on the [`ListenerSet`] before they
//! return, synchronously and under the listener lock. Listeners must not call
//! back into the client.
//!
//! ERROR HANDLING
//! ==============
//! Non-2xx GoTrue answers become [`AuthError::Rejected`] carrying the
//! server's message. Logout treats 401/403/404 as "already signed out" and
//! clears the local session anyway.

mod storage;
mod types;

use std::sync::Arc;

use serde::Serialize;

pub use storage::{MemoryStorage, SessionStorage};
use types::{GoTrueError, TokenResponse};

use crate::config::SupabaseConfig;
use crate::error::{AuthError, ProfileFetchError};
use crate::provider::{
    AuthEvent, AuthEventKind, AuthListener, IdentityProvider, ListenerSet, ProfileStore, SignUpMetadata, Subscription,
};
use crate::user::{Principal, ProfileRow, Session};

/// Source of the current time in Unix seconds.
pub type Clock = fn() -> i64;

/// Wall-clock time in Unix seconds.
#[cfg(target_arch = "wasm32")]
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn unix_now() -> i64 {
    (js_sys::Date::now() / 1000.0) as i64
}

/// Wall-clock time in Unix seconds.
#[cfg(not(target_arch = "wasm32"))]
#[must_use]
pub fn unix_now() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map_or(0, |d| i64::try_from(d.as_secs()).unwrap_or(i64::MAX))
}

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct SignUpBody<'a> {
    email: &'a str,
    password: &'a str,
    data: &'a SignUpMetadata,
}

/// HTTP client for one Supabase project.
pub struct SupabaseClient {
    http: reqwest::Client,
    config: SupabaseConfig,
    storage_key: String,
    storage: Arc<dyn SessionStorage>,
    listeners: ListenerSet,
    clock: Clock,
}

impl SupabaseClient {
    #[must_use]
    pub fn new(config: SupabaseConfig, storage: Arc<dyn SessionStorage>) -> Self {
        let storage_key = config.storage_key();
        Self { http: reqwest::Client::new(), config, storage_key, storage, listeners: ListenerSet::default(), clock: unix_now }
    }

    /// Replace the clock used for expiry checks.
    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{path}", self.config.url)
    }

    fn rest_url(&self, path: &str) -> String {
        format!("{}/rest/v1/{path}", self.config.url)
    }

    fn post(&self, url: String, bearer: &str) -> reqwest::RequestBuilder {
        self.http
            .post(url)
            .header("apikey", &self.config.anon_key)
            .header("Authorization", format!("Bearer {bearer}"))
    }

    // =========================================================================
    // LOCAL SESSION
    // =========================================================================

    /// Stored session, without an expiry check. Unreadable entries are
    /// dropped and reported as absent.
    fn stored_session(&self) -> Result<Option<Session>, AuthError> {
        let Some(raw) = self.storage.get(&self.storage_key)? else {
            return Ok(None);
        };
        match serde_json::from_str::<Session>(&raw) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                tracing::warn!(error = %e, "discarding unreadable stored session");
                self.storage.remove(&self.storage_key)?;
                Ok(None)
            }
        }
    }

    fn persist(&self, session: &Session) -> Result<(), AuthError> {
        let raw = serde_json::to_string(session).map_err(|e| AuthError::Storage(e.to_string()))?;
        self.storage.set(&self.storage_key, &raw)
    }

    fn emit(&self, kind: AuthEventKind, session: Option<Session>) {
        self.listeners.emit(&AuthEvent::new(kind, session));
    }

    /// Build a session from a token grant. `None` when the response carries
    /// no access token (signup awaiting email confirmation).
    fn session_from(&self, token: TokenResponse) -> Result<Option<Session>, AuthError> {
        let Some(access_token) = token.access_token else {
            return Ok(None);
        };
        let user = token
            .user
            .ok_or_else(|| AuthError::Parse("token response without user".to_owned()))?;
        let expires_at = token.expires_at.or_else(|| token.expires_in.map(|ttl| (self.clock)() + ttl));
        Ok(Some(Session {
            access_token,
            refresh_token: token.refresh_token.unwrap_or_default(),
            token_type: token.token_type.unwrap_or_else(|| "bearer".to_owned()),
            expires_at,
            user: Principal { id: user.id, email: user.email },
        }))
    }
}

/// Map a non-success response to [`AuthError::Rejected`].
async fn rejection(response: reqwest::Response) -> AuthError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<GoTrueError>(&body)
        .ok()
        .and_then(GoTrueError::into_message)
        .unwrap_or_default();
    AuthError::Rejected { status, message }
}

async fn read_token(response: reqwest::Response) -> Result<TokenResponse, AuthError> {
    if !response.status().is_success() {
        return Err(rejection(response).await);
    }
    response.json::<TokenResponse>().await.map_err(|e| AuthError::Parse(e.to_string()))
}

fn transport(e: reqwest::Error) -> AuthError {
    AuthError::Transport(e.to_string())
}

#[async_trait::async_trait(?Send)]
impl IdentityProvider for SupabaseClient {
    async fn get_session(&self) -> Result<Option<Session>, AuthError> {
        let Some(session) = self.stored_session()? else {
            return Ok(None);
        };
        if session.is_expired((self.clock)()) {
            tracing::info!(user_id = %session.user.id, "stored session expired");
            self.storage.remove(&self.storage_key)?;
            return Ok(None);
        }
        Ok(Some(session))
    }

    fn on_auth_state_change(&self, listener: AuthListener) -> Subscription {
        self.listeners.add(listener)
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let response = self
            .post(self.auth_url("token?grant_type=password"), &self.config.anon_key)
            .json(&Credentials { email, password })
            .send()
            .await
            .map_err(transport)?;
        let token = read_token(response).await?;
        let session = self
            .session_from(token)?
            .ok_or_else(|| AuthError::Parse("token response without access token".to_owned()))?;

        self.persist(&session)?;
        self.emit(AuthEventKind::SignedIn, Some(session.clone()));
        Ok(session)
    }

    async fn sign_up(&self, email: &str, password: &str, metadata: &SignUpMetadata) -> Result<(), AuthError> {
        let response = self
            .post(self.auth_url("signup"), &self.config.anon_key)
            .json(&SignUpBody { email, password, data: metadata })
            .send()
            .await
            .map_err(transport)?;
        let token = read_token(response).await?;
        let pending_id = token.id.clone();

        match self.session_from(token)? {
            Some(session) => {
                self.persist(&session)?;
                self.emit(AuthEventKind::SignedIn, Some(session));
            }
            None => tracing::debug!(
                %email,
                user_id = pending_id.as_deref().unwrap_or_default(),
                "signup awaiting email confirmation"
            ),
        }
        Ok(())
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        if let Some(session) = self.stored_session()? {
            let response = self
                .post(self.auth_url("logout"), &session.access_token)
                .send()
                .await
                .map_err(transport)?;
            let status = response.status().as_u16();
            if !response.status().is_success() && !matches!(status, 401 | 403 | 404) {
                return Err(rejection(response).await);
            }
        }

        self.storage.remove(&self.storage_key)?;
        self.emit(AuthEventKind::SignedOut, None);
        Ok(())
    }
}

#[async_trait::async_trait(?Send)]
impl ProfileStore for SupabaseClient {
    async fn fetch_profile(&self, user_id: &str) -> Result<Option<ProfileRow>, ProfileFetchError> {
        let bearer = match self.stored_session() {
            Ok(Some(session)) => session.access_token,
            _ => self.config.anon_key.clone(),
        };
        let response = self
            .http
            .get(self.rest_url("profiles"))
            .query(&[("id", format!("eq.{user_id}")), ("select", "*".to_owned())])
            .header("apikey", &self.config.anon_key)
            .header("Authorization", format!("Bearer {bearer}"))
            .send()
            .await
            .map_err(|e| ProfileFetchError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProfileFetchError::Status { status: status.as_u16(), body });
        }

        let mut rows = response
            .json::<Vec<ProfileRow>>()
            .await
            .map_err(|e| ProfileFetchError::Parse(e.to_string()))?;
        match rows.len() {
            0 => Ok(None),
            1 => Ok(rows.pop()),
            n => Err(ProfileFetchError::Ambiguous(n)),
        }
    }
}
