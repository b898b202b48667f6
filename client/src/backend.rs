//! Browser-side wiring of the session adapter.
//!
//! SYSTEM CONTEXT
//! ==============
//! Called once from `App` in the hydrated build. Builds the Supabase client
//! from compile-time configuration, starts the adapter driver, and mirrors
//! every published snapshot into the `AuthState` signal.
//!
//! ERROR HANDLING
//! ==============
//! Missing configuration is logged and leaves the app signed out instead of
//! stuck in its loading state.

use std::sync::Arc;

use identity::{AuthConfig, SessionAdapter, SupabaseClient, SupabaseConfig};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::state::auth::AuthState;
use crate::state::toast::{ToastNotifier, ToastState};
use crate::util::storage::BrowserStorage;

/// Build and start the adapter. `None` when the backend is not configured.
pub fn connect(auth: RwSignal<AuthState>, toasts: RwSignal<ToastState>) -> Option<SessionAdapter> {
    let config = match SupabaseConfig::from_build_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "identity backend not configured");
            auth.set(AuthState::signed_out());
            return None;
        }
    };

    let client = Arc::new(SupabaseClient::new(config, Arc::new(BrowserStorage)));
    let adapter = SessionAdapter::new(client.clone(), client, Arc::new(ToastNotifier::new(toasts)), &AuthConfig::default());

    let driver = adapter.clone();
    spawn_local(async move { driver.run().await });

    let mut snapshots = adapter.subscribe();
    spawn_local(async move {
        loop {
            let state = AuthState::from(&*snapshots.borrow_and_update());
            if auth.try_set(state).is_some() {
                tracing::debug!("auth signal disposed; stopping snapshot mirror");
                break;
            }
            if snapshots.changed().await.is_err() {
                break;
            }
        }
    });

    tracing::info!("session adapter started");
    Some(adapter)
}
