//! Persistence seam for the current session.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use crate::error::AuthError;

/// String key/value store holding the serialized session.
///
/// The browser client backs this with `localStorage`.
pub trait SessionStorage: Send + Sync {
    /// # Errors
    ///
    /// Returns [`AuthError::Storage`] if the backing store is unavailable.
    fn get(&self, key: &str) -> Result<Option<String>, AuthError>;

    /// # Errors
    ///
    /// Returns [`AuthError::Storage`] if the value cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), AuthError>;

    /// # Errors
    ///
    /// Returns [`AuthError::Storage`] if the value cannot be removed.
    fn remove(&self, key: &str) -> Result<(), AuthError>;
}

/// Process-local storage, for SSR and tests.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, AuthError> {
        Ok(self.items.lock().unwrap_or_else(PoisonError::into_inner).get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AuthError> {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), AuthError> {
        self.items.lock().unwrap_or_else(PoisonError::into_inner).remove(key);
        Ok(())
    }
}
