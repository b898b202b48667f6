//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components read shared state from Leptos context (`AuthHandle`,
//! `RwSignal<NavState>`, `RwSignal<ToastState>`) and keep their decision
//! logic in plain functions next to the view.

pub mod navbar;
pub mod notifications;
pub mod sign_up_modal;
pub mod toaster;
