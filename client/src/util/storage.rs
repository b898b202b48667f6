//! `localStorage`-backed session storage.
//!
//! TRADE-OFFS
//! ==========
//! Outside the hydrated build there is no browser storage: reads find
//! nothing and writes fail with [`AuthError::Storage`], so a session never
//! silently persists on the server.

use identity::{AuthError, SessionStorage};

/// Session storage over `window.localStorage`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

#[cfg(feature = "hydrate")]
fn local_storage() -> Result<web_sys::Storage, AuthError> {
    web_sys::window()
        .ok_or_else(|| AuthError::Storage("no window".to_owned()))?
        .local_storage()
        .ok()
        .flatten()
        .ok_or_else(|| AuthError::Storage("localStorage unavailable".to_owned()))
}

#[cfg(feature = "hydrate")]
impl SessionStorage for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>, AuthError> {
        local_storage()?
            .get_item(key)
            .map_err(|_| AuthError::Storage(format!("read {key} failed")))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AuthError> {
        local_storage()?
            .set_item(key, value)
            .map_err(|_| AuthError::Storage(format!("write {key} failed")))
    }

    fn remove(&self, key: &str) -> Result<(), AuthError> {
        local_storage()?
            .remove_item(key)
            .map_err(|_| AuthError::Storage(format!("remove {key} failed")))
    }
}

#[cfg(not(feature = "hydrate"))]
impl SessionStorage for BrowserStorage {
    fn get(&self, _key: &str) -> Result<Option<String>, AuthError> {
        Ok(None)
    }

    fn set(&self, key: &str, _value: &str) -> Result<(), AuthError> {
        Err(AuthError::Storage(format!("no browser storage for {key}")))
    }

    fn remove(&self, _key: &str) -> Result<(), AuthError> {
        Ok(())
    }
}

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;
