//! Microsoft identity platform v2.0 wire types.
//!
//! Device authorization (RFC 8628) and token endpoint responses, plus the
//! Graph `/me` profile used to name the signed-in account.

use assistant_domain::Account;
use serde::Deserialize;

pub(super) const DEVICE_CODE_GRANT: &str = "urn:ietf:params:oauth:grant-type:device_code";
pub(super) const REFRESH_GRANT: &str = "refresh_token";

/// Response of `{authority}/oauth2/v2.0/devicecode`
#[derive(Debug, Clone, Deserialize)]
pub(super) struct DeviceCodeResponse {
    pub device_code: String,
    pub user_code: String,
    pub verification_uri: String,
    pub expires_in: u64,
    #[serde(default = "default_interval")]
    pub interval: u64,
    #[serde(default)]
    pub message: Option<String>,
}

fn default_interval() -> u64 {
    5
}

/// Successful response of `{authority}/oauth2/v2.0/token`
#[derive(Debug, Clone, Deserialize)]
pub(super) struct TokenResponse {
    pub access_token: String,
    pub expires_in: u64,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// Error response of both endpoints
#[derive(Debug, Clone, Deserialize)]
pub(super) struct TokenErrorResponse {
    pub error: String,
    #[serde(default)]
    pub error_description: Option<String>,
}

impl TokenErrorResponse {
    /// First line of the description, falling back to the error code.
    pub fn summary(&self) -> String {
        self.error_description
            .as_deref()
            .and_then(|d| d.lines().next())
            .filter(|line| !line.trim().is_empty())
            .unwrap_or(self.error.as_str())
            .to_string()
    }
}

/// What to do after a token poll came back with an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum PollStep {
    /// The user has not finished yet.
    Pending,
    /// Keep polling, 5 seconds slower.
    SlowDown,
    /// Stop with this reason.
    Failed(String),
}

pub(super) fn classify_poll_error(error: &TokenErrorResponse) -> PollStep {
    match error.error.as_str() {
        "authorization_pending" => PollStep::Pending,
        "slow_down" => PollStep::SlowDown,
        "authorization_declined" => PollStep::Failed("The sign-in request was declined".into()),
        "expired_token" => PollStep::Failed("The sign-in code expired".into()),
        _ => PollStep::Failed(error.summary()),
    }
}

/// Graph `/me` profile
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct GraphProfile {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub user_principal_name: Option<String>,
    #[serde(default)]
    pub mail: Option<String>,
}

impl GraphProfile {
    pub fn into_account(self) -> Account {
        let username = self
            .user_principal_name
            .or(self.mail)
            .unwrap_or_else(|| "unknown".to_string());
        Account {
            username,
            display_name: self.display_name,
            home_account_id: self.id,
        }
    }
}
