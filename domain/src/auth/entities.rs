//! Authentication entities

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle of the signed-in user as seen by the identity adapter.
///
/// ```text
/// Unauthenticated ──login──▶ Authenticating ──ok──▶ Authenticated
///        ▲                         │                     │
///        └────────── failure ──────┘     logout / refresh failure
///        ▲                                               │
///        └───────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthState {
    #[default]
    Unauthenticated,
    Authenticating,
    Authenticated,
}

impl std::fmt::Display for AuthState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            AuthState::Unauthenticated => "signed out",
            AuthState::Authenticating => "signing in",
            AuthState::Authenticated => "signed in",
        };
        f.write_str(s)
    }
}

/// The signed-in account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Login name (usually the UPN / e-mail address).
    pub username: String,
    pub display_name: Option<String>,
    /// Stable identifier issued by the identity provider.
    pub home_account_id: Option<String>,
}

impl Account {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            display_name: None,
            home_account_id: None,
        }
    }

    /// Display name when known, otherwise the username.
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.username)
    }
}

/// Opaque bearer token.
///
/// `Debug` is redacted so tokens never end up in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn secret(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

/// Token and account state produced by a successful login.
#[derive(Clone)]
pub struct AuthSession {
    pub account: Account,
    pub access_token: AccessToken,
    pub expires_at: DateTime<Utc>,
    pub refresh_token: Option<String>,
}

impl AuthSession {
    /// Whether the access token is still usable at `now`, keeping `skew`
    /// in reserve for the request that will carry it.
    pub fn is_valid_at(&self, now: DateTime<Utc>, skew: Duration) -> bool {
        now + skew < self.expires_at
    }
}

impl std::fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSession")
            .field("account", &self.account)
            .field("access_token", &self.access_token)
            .field("expires_at", &self.expires_at)
            .field("has_refresh_token", &self.refresh_token.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_expiring_at(expires_at: DateTime<Utc>) -> AuthSession {
        AuthSession {
            account: Account::new("jane@contoso.com"),
            access_token: AccessToken::new("secret-token"),
            expires_at,
            refresh_token: None,
        }
    }

    #[test]
    fn test_default_state_is_unauthenticated() {
        assert_eq!(AuthState::default(), AuthState::Unauthenticated);
        assert_eq!(AuthState::Authenticating.to_string(), "signing in");
    }

    #[test]
    fn test_token_debug_is_redacted() {
        let session = session_expiring_at(Utc::now());
        let debug = format!("{:?}", session);
        assert!(!debug.contains("secret-token"));
        assert!(debug.contains("redacted"));
    }

    #[test]
    fn test_validity_respects_skew() {
        let now = Utc::now();
        let session = session_expiring_at(now + Duration::seconds(30));
        assert!(session.is_valid_at(now, Duration::zero()));
        assert!(!session.is_valid_at(now, Duration::seconds(60)));
    }

    #[test]
    fn test_account_label_prefers_display_name() {
        let mut account = Account::new("jane@contoso.com");
        assert_eq!(account.label(), "jane@contoso.com");
        account.display_name = Some("Jane Doe".to_string());
        assert_eq!(account.label(), "Jane Doe");
    }
}
