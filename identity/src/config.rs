//! Backend and authorization configuration.
//!
//! The administrative address is a constant. Supabase coordinates come from
//! the environment: at runtime for native callers, at compile time for the
//! WASM bundle (which has no process environment).

use crate::error::ConfigError;

/// Address that is always granted the admin role.
pub const DEFAULT_ADMIN_EMAIL: &str = "eventspark7@gmail.com";

pub const SUPABASE_URL_VAR: &str = "SUPABASE_URL";
pub const SUPABASE_ANON_KEY_VAR: &str = "SUPABASE_ANON_KEY";

/// Authorization rules applied when building the domain user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthConfig {
    pub admin_email: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self { admin_email: DEFAULT_ADMIN_EMAIL.to_owned() }
    }
}

/// Project URL and public anon key for the hosted backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupabaseConfig {
    pub url: String,
    pub anon_key: String,
}

impl SupabaseConfig {
    /// Validate and normalize explicit values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] for blank values and
    /// [`ConfigError::Invalid`] for a URL without an http(s) scheme.
    pub fn new(url: &str, anon_key: &str) -> Result<Self, ConfigError> {
        let url = url.trim().trim_end_matches('/');
        let anon_key = anon_key.trim();
        if url.is_empty() {
            return Err(ConfigError::Missing { var: SUPABASE_URL_VAR.into() });
        }
        if anon_key.is_empty() {
            return Err(ConfigError::Missing { var: SUPABASE_ANON_KEY_VAR.into() });
        }
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(ConfigError::Invalid(format!("{SUPABASE_URL_VAR} must be an http(s) URL: {url}")));
        }
        Ok(Self { url: url.to_owned(), anon_key: anon_key.to_owned() })
    }

    /// Read `SUPABASE_URL` and `SUPABASE_ANON_KEY` from the process environment.
    ///
    /// # Errors
    ///
    /// Same as [`SupabaseConfig::new`], plus `Missing` for unset variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let url = std::env::var(SUPABASE_URL_VAR).map_err(|_| ConfigError::Missing { var: SUPABASE_URL_VAR.into() })?;
        let key = std::env::var(SUPABASE_ANON_KEY_VAR)
            .map_err(|_| ConfigError::Missing { var: SUPABASE_ANON_KEY_VAR.into() })?;
        Self::new(&url, &key)
    }

    /// Values captured from the build environment (`option_env!`).
    ///
    /// # Errors
    ///
    /// Same as [`SupabaseConfig::new`].
    pub fn from_build_env() -> Result<Self, ConfigError> {
        Self::new(option_env!("SUPABASE_URL").unwrap_or_default(), option_env!("SUPABASE_ANON_KEY").unwrap_or_default())
    }

    /// Storage key for the persisted session, following the `sb-<ref>-auth-token`
    /// convention so sessions written by other Supabase clients are picked up.
    #[must_use]
    pub fn storage_key(&self) -> String {
        let host = self.url.split("://").nth(1).unwrap_or(&self.url);
        let project_ref = host.split(['.', ':', '/']).next().unwrap_or(host);
        format!("sb-{project_ref}-auth-token")
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
