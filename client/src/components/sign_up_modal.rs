//! Account registration dialog.
//!
//! DESIGN
//! ======
//! Field checks happen here before any request; server-side rejections come
//! back through the adapter, which also raises the toast. The dialog closes
//! only on success and otherwise keeps the entered values and shows a short
//! hint inline.

use identity::AuthError;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::pages::login::{CONNECTION_HINT, RETRY_HINT};
use crate::state::auth::AuthHandle;

pub const MIN_PASSWORD_LEN: usize = 6;
pub const MISSING_FIELDS: &str = "Please fill in all fields.";
pub const PASSWORD_TOO_SHORT: &str = "Password must be at least 6 characters.";
pub const CHECK_DETAILS: &str = "Check your details and try again.";

/// Inline hint after a failed registration; the toast carries the reason.
#[must_use]
pub fn registration_hint(error: &AuthError) -> &'static str {
    match error {
        AuthError::Rejected { .. } => CHECK_DETAILS,
        AuthError::Transport(_) => CONNECTION_HINT,
        AuthError::Parse(_) | AuthError::Storage(_) => RETRY_HINT,
    }
}

/// Validated registration input. Names and email are trimmed; the password
/// is kept as typed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignUpForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

/// # Errors
///
/// Returns the message to show when a field is blank or the password is short.
pub fn validate_sign_up(first_name: &str, last_name: &str, email: &str, password: &str) -> Result<SignUpForm, &'static str> {
    let (first_name, last_name, email) = (first_name.trim(), last_name.trim(), email.trim());
    if first_name.is_empty() || last_name.is_empty() || email.is_empty() || password.trim().is_empty() {
        return Err(MISSING_FIELDS);
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(PASSWORD_TOO_SHORT);
    }
    Ok(SignUpForm {
        first_name: first_name.to_owned(),
        last_name: last_name.to_owned(),
        email: email.to_owned(),
        password: password.to_owned(),
    })
}

#[component]
pub fn SignUpModal(on_close: Callback<()>) -> impl IntoView {
    let auth = expect_context::<AuthHandle>();

    let first_name = RwSignal::new(String::new());
    let last_name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let form = match validate_sign_up(
            &first_name.get_untracked(),
            &last_name.get_untracked(),
            &email.get_untracked(),
            &password.get_untracked(),
        ) {
            Ok(form) => form,
            Err(message) => {
                error.set(Some(message.to_owned()));
                return;
            }
        };

        busy.set(true);
        error.set(None);
        let auth = auth.clone();
        spawn_local(async move {
            match auth.register(&form.email, &form.password, &form.first_name, &form.last_name).await {
                Ok(()) => on_close.run(()),
                Err(e) => error.set(Some(registration_hint(&e).to_owned())),
            }
            busy.set(false);
        });
    };

    let on_keydown = Callback::new(move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() == "Escape" {
            ev.prevent_default();
            on_close.run(());
        }
    });

    view! {
        <div class="dialog-backdrop" on:click=move |_| on_close.run(())>
            <div
                class="dialog dialog--sign-up"
                role="dialog"
                tabindex="0"
                on:click=move |ev| ev.stop_propagation()
                on:keydown=move |ev| on_keydown.run(ev)
            >
                <h2>"Create an account"</h2>
                <form class="dialog__form" on:submit=on_submit>
                    <div class="dialog__row">
                        <input
                            class="dialog__input"
                            type="text"
                            placeholder="First name"
                            prop:value=move || first_name.get()
                            on:input=move |ev| first_name.set(event_target_value(&ev))
                        />
                        <input
                            class="dialog__input"
                            type="text"
                            placeholder="Last name"
                            prop:value=move || last_name.get()
                            on:input=move |ev| last_name.set(event_target_value(&ev))
                        />
                    </div>
                    <input
                        class="dialog__input"
                        type="email"
                        placeholder="you@example.com"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <input
                        class="dialog__input"
                        type="password"
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <Show when=move || error.get().is_some()>
                        <p class="dialog__error">{move || error.get().unwrap_or_default()}</p>
                    </Show>
                    <div class="dialog__actions">
                        <button class="btn" type="button" on:click=move |_| on_close.run(())>
                            "Cancel"
                        </button>
                        <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                            {move || if busy.get() { "Creating account..." } else { "Sign Up" }}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}

#[cfg(test)]
#[path = "sign_up_modal_test.rs"]
mod sign_up_modal_test;
