//! Identity port
//!
//! Defines the interactive authentication capability the assistant needs.
//! A browser target would implement it with a popup flow; the terminal
//! adapter uses the OAuth device authorization grant.

use assistant_domain::{AccessToken, Account, AuthState, ErrorKind};
use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during identity operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Called before [`InteractiveAuth::initialize`] completed.
    #[error("Identity client is not initialized")]
    NotReady,

    /// No signed-in account; the expected state before the first login.
    #[error("No account found")]
    NoAccount,

    /// The interactive prompt could not be shown. User-correctable.
    #[error("Login prompt blocked: {0}")]
    LoginBlocked(String),

    #[error("Login failed: {0}")]
    LoginFailed(String),

    #[error("Token acquisition failed: {0}")]
    TokenAcquisition(String),

    #[error("Logout failed: {0}")]
    LogoutFailed(String),

    #[error("Identity error: {0}")]
    Other(String),
}

impl AuthError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::NotReady | AuthError::NoAccount => ErrorKind::NotAuthenticated,
            AuthError::LoginBlocked(_) => ErrorKind::LoginBlocked,
            AuthError::LoginFailed(_) => ErrorKind::LoginFailed,
            AuthError::TokenAcquisition(_) => ErrorKind::TokenAcquisitionFailed,
            AuthError::LogoutFailed(_) | AuthError::Other(_) => ErrorKind::Unknown,
        }
    }

    /// The "nobody is signed in" condition callers treat as a state, not a failure.
    pub fn is_no_account(&self) -> bool {
        matches!(self, AuthError::NoAccount)
    }
}

/// Interactive authentication capability
///
/// Implementations own the session cache. Every method except
/// [`initialize`](Self::initialize) and [`is_ready`](Self::is_ready) must
/// fail with [`AuthError::NotReady`] until initialization has completed.
#[async_trait]
pub trait InteractiveAuth: Send + Sync {
    /// Prepare the client (endpoint discovery, cache setup). Idempotent.
    async fn initialize(&self) -> Result<(), AuthError>;

    fn is_ready(&self) -> bool;

    /// Run the interactive sign-in and return the signed-in account.
    async fn login(&self) -> Result<Account, AuthError>;

    /// Sign out. A no-op when nobody is signed in.
    async fn logout(&self) -> Result<(), AuthError>;

    /// Return a valid access token without user interaction.
    ///
    /// Fails with [`AuthError::NoAccount`] when nobody is signed in.
    async fn get_token(&self) -> Result<AccessToken, AuthError>;

    async fn state(&self) -> AuthState;

    async fn account(&self) -> Option<Account>;
}
