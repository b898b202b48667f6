//! Toast notifications.
//!
//! SYSTEM CONTEXT
//! ==============
//! `ToastNotifier` is the browser's implementation of the identity crate's
//! `Notifier` seam: every adapter success or failure message lands here and
//! is rendered by the `Toaster` component.
//!
//! TRADE-OFFS
//! ==========
//! Auto-dismiss timers only run in the hydrated build. Server-rendered and
//! test toasts stay until dismissed explicitly.

use identity::Notifier;
use leptos::prelude::*;

/// How long a toast stays visible in the browser.
pub const TOAST_TTL_MS: u32 = 4_000;

/// Oldest toasts are dropped beyond this many.
pub const MAX_TOASTS: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            Self::Success => "toast toast--success",
            Self::Error => "toast toast--error",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}

/// Visible toasts, oldest first.
#[derive(Clone, Debug, Default)]
pub struct ToastState {
    next_id: u64,
    pub toasts: Vec<Toast>,
}

impl ToastState {
    /// Append a toast and return its id.
    pub fn push(&mut self, kind: ToastKind, message: &str) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.toasts.push(Toast { id, kind, message: message.to_owned() });
        if self.toasts.len() > MAX_TOASTS {
            let excess = self.toasts.len() - MAX_TOASTS;
            self.toasts.drain(..excess);
        }
        id
    }

    /// Remove a toast. Returns `false` if it was already gone.
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|t| t.id != id);
        self.toasts.len() != before
    }
}

/// [`Notifier`] that pushes onto a toast signal.
#[derive(Clone, Copy)]
pub struct ToastNotifier {
    toasts: RwSignal<ToastState>,
}

impl ToastNotifier {
    #[must_use]
    pub fn new(toasts: RwSignal<ToastState>) -> Self {
        Self { toasts }
    }

    fn show(&self, kind: ToastKind, message: &str) {
        let Some(id) = self.toasts.try_update(|s| s.push(kind, message)) else {
            tracing::debug!(message, "toast signal disposed; dropping toast");
            return;
        };

        #[cfg(feature = "hydrate")]
        {
            let toasts = self.toasts;
            leptos::task::spawn_local(async move {
                gloo_timers::future::TimeoutFuture::new(TOAST_TTL_MS).await;
                toasts.try_update(|s| s.dismiss(id));
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = id;
        }
    }
}

impl Notifier for ToastNotifier {
    fn success(&self, message: &str) {
        self.show(ToastKind::Success, message);
    }

    fn error(&self, message: &str) {
        self.show(ToastKind::Error, message);
    }
}

#[cfg(test)]
#[path = "toast_test.rs"]
mod toast_test;
