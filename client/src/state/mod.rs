//! Reactive application state shared through Leptos context.
//!
//! DESIGN
//! ======
//! Each module holds a plain `Clone` struct that components wrap in an
//! `RwSignal`. Transitions are methods on the struct so they can be tested
//! without a reactive runtime.

pub mod auth;
pub mod nav;
pub mod toast;
