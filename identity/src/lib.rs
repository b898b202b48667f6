//! # identity
//!
//! Session and identity adapter for the EventSpark front-end.
//!
//! The hosted backend (Supabase) owns sessions and the `profiles` table. This
//! crate turns its session lifecycle into a single published [`AuthSnapshot`]
//! and derives the application-level [`AuthUser`] and its [`Role`].
//!
//! SYSTEM CONTEXT
//! ==============
//! `client` builds one [`SessionAdapter`] per page load, drives it with
//! `spawn_local`, and mirrors its snapshots into a Leptos signal. Nothing in
//! here touches the DOM; browser-only pieces plug in through the
//! [`SessionStorage`] and [`Notifier`] traits.

pub mod adapter;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod provider;
pub mod role;
pub mod snapshot;
pub mod supabase;
pub mod user;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use adapter::SessionAdapter;
pub use config::{AuthConfig, SupabaseConfig};
pub use dispatch::DispatchQueue;
pub use error::{AuthError, ConfigError, ProfileFetchError};
pub use provider::{
    AuthEvent, AuthEventKind, AuthListener, IdentityProvider, ListenerSet, Notifier, ProfileStore, SignUpMetadata,
    Subscription,
};
pub use role::{Role, derive_role};
pub use snapshot::{AuthPhase, AuthSnapshot};
pub use supabase::{MemoryStorage, SessionStorage, SupabaseClient};
pub use user::{AuthUser, Principal, ProfileRow, Session, display_name};
