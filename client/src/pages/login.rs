//! Email + password login page.
//!
//! SYSTEM CONTEXT
//! ==============
//! Calls the adapter's `login`. Success and failure toasts come from the
//! adapter; this page only navigates away on success and keeps the form
//! filled in on failure. The provider's message goes to the toast alone; the
//! form shows a short hint from [`failure_hint`].

use identity::AuthError;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::navbar::EVENTS_PATH;
use crate::state::auth::AuthHandle;
use crate::state::nav::NavState;

pub const MISSING_CREDENTIALS: &str = "Enter both email and password.";
pub const CHECK_CREDENTIALS: &str = "Check your email and password and try again.";
pub const CONNECTION_HINT: &str = "Could not reach the server. Try again shortly.";
pub const RETRY_HINT: &str = "Something went wrong. Try again.";

/// Trim the email and require both fields.
///
/// # Errors
///
/// Returns [`MISSING_CREDENTIALS`] when either field is blank.
pub fn validate_login_input(email: &str, password: &str) -> Result<(String, String), &'static str> {
    let email = email.trim();
    if email.is_empty() || password.trim().is_empty() {
        return Err(MISSING_CREDENTIALS);
    }
    Ok((email.to_owned(), password.to_owned()))
}

/// Inline hint shown under the form after a failed sign-in.
#[must_use]
pub fn failure_hint(error: &AuthError) -> &'static str {
    match error {
        AuthError::Rejected { .. } => CHECK_CREDENTIALS,
        AuthError::Transport(_) => CONNECTION_HINT,
        AuthError::Parse(_) | AuthError::Storage(_) => RETRY_HINT,
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = expect_context::<AuthHandle>();
    let nav = expect_context::<RwSignal<NavState>>();
    let navigate = use_navigate();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let (email_value, password_value) = match validate_login_input(&email.get_untracked(), &password.get_untracked()) {
            Ok(pair) => pair,
            Err(message) => {
                info.set(message.to_owned());
                return;
            }
        };

        busy.set(true);
        info.set(String::new());
        let auth = auth.clone();
        let navigate = navigate.clone();
        spawn_local(async move {
            match auth.login(&email_value, &password_value).await {
                Ok(()) => navigate(EVENTS_PATH, NavigateOptions::default()),
                Err(e) => info.set(failure_hint(&e).to_owned()),
            }
            busy.set(false);
        });
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Welcome back"</h1>
                <p class="login-card__subtitle">"Sign in to manage your events"</p>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="email"
                        placeholder="you@example.com"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Signing in..." } else { "Login" }}
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
                <div class="login-divider"></div>
                <p class="login-card__subtitle">
                    "No account yet? "
                    <button class="login-link" type="button" on:click=move |_| nav.update(NavState::open_sign_up)>
                        "Sign Up"
                    </button>
                </p>
            </div>
        </div>
    }
}

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;
