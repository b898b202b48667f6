//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns from page and component
//! logic. Each has a no-op or fixed fallback for SSR and native tests.

pub mod storage;
pub mod viewport;
