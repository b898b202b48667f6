//! # client
//!
//! Leptos + WASM front-end shell for EventSpark.
//!
//! Renders the navigation bar, login page, sign-up modal, and toast stack on
//! top of the `identity` crate's session adapter. The same components are
//! rendered on the server (`ssr`) and hydrated in the browser (`hydrate`).
//!
//! SYSTEM CONTEXT
//! ==============
//! Only the hydrated build talks to the identity backend. During SSR the
//! auth state stays in its initial loading form, which is also the first
//! frame the browser renders, so hydration markup matches.

pub mod app;
#[cfg(feature = "hydrate")]
pub mod backend;
pub mod components;
pub mod pages;
pub mod state;
pub mod util;

/// Browser entry point: install logging, then hydrate the server markup.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
