//! GoTrue wire types.
//!
//! Only the fields the adapter needs are modelled; everything else in the
//! responses is ignored.

use serde::Deserialize;

/// Body of `/token` and (when auto-confirm is on) `/signup` responses.
///
/// With email confirmation enabled, `/signup` answers with the bare user
/// object instead, whose id lands in `id` here.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct TokenResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub expires_at: Option<i64>,
    #[serde(default)]
    pub user: Option<GoTrueUser>,
    #[serde(default)]
    pub id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GoTrueUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Error body. GoTrue versions disagree on the field name.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct GoTrueError {
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl GoTrueError {
    /// First non-blank message in `msg`, `message`, `error_description`, `error` order.
    pub fn into_message(self) -> Option<String> {
        [self.msg, self.message, self.error_description, self.error]
            .into_iter()
            .flatten()
            .find(|m| !m.trim().is_empty())
    }
}
