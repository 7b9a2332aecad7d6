//! Domain error types

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Classification shared by every failure the assistant can observe.
///
/// Adapters map their concrete errors onto one of these kinds so the
/// orchestration and display layers can decide how to react without
/// knowing which collaborator failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// No signed-in account, or the identity client is not ready yet.
    NotAuthenticated,
    /// The interactive login prompt could not be presented.
    LoginBlocked,
    /// Interactive login was attempted and failed.
    LoginFailed,
    /// Silent token acquisition failed for an existing account.
    TokenAcquisitionFailed,
    SearchFailed,
    CompletionFailed,
    Unknown,
}

impl ErrorKind {
    /// Whether this kind means "ask the user to sign in" rather than
    /// "report an error".
    pub fn needs_login(&self) -> bool {
        matches!(self, ErrorKind::NotAuthenticated)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::NotAuthenticated => "not_authenticated",
            ErrorKind::LoginBlocked => "login_blocked",
            ErrorKind::LoginFailed => "login_failed",
            ErrorKind::TokenAcquisitionFailed => "token_acquisition_failed",
            ErrorKind::SearchFailed => "search_failed",
            ErrorKind::CompletionFailed => "completion_failed",
            ErrorKind::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Domain-level errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid query: {0}")]
    InvalidQuery(String),
}

impl DomainError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::InvalidQuery(_) => ErrorKind::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_not_authenticated_needs_login() {
        assert!(ErrorKind::NotAuthenticated.needs_login());
        assert!(!ErrorKind::LoginBlocked.needs_login());
        assert!(!ErrorKind::TokenAcquisitionFailed.needs_login());
        assert!(!ErrorKind::SearchFailed.needs_login());
    }

    #[test]
    fn test_kind_serializes_snake_case() {
        let json = serde_json::to_string(&ErrorKind::TokenAcquisitionFailed).unwrap();
        assert_eq!(json, "\"token_acquisition_failed\"");
        assert_eq!(ErrorKind::SearchFailed.to_string(), "search_failed");
    }

    #[test]
    fn test_invalid_query_display() {
        let error = DomainError::InvalidQuery("empty".to_string());
        assert_eq!(error.to_string(), "Invalid query: empty");
    }
}
