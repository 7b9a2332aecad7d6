//! Login prompt port
//!
//! The identity adapter hands the verification instructions of a device
//! code login to this port; the presentation layer decides how to show them.

use thiserror::Error;

/// What the user must do to complete a device code login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceCodeChallenge {
    pub verification_uri: String,
    pub user_code: String,
    /// Ready-made instruction text from the identity provider.
    pub message: String,
    pub expires_in_secs: u64,
}

/// The prompt could not be shown (e.g. no interactive terminal).
#[derive(Error, Debug, Clone)]
#[error("{0}")]
pub struct LoginPromptError(pub String);

/// Presents a device code challenge to the user
pub trait LoginPrompt: Send + Sync {
    fn present(&self, challenge: &DeviceCodeChallenge) -> Result<(), LoginPromptError>;

    /// Called once the login finished, successfully or not.
    fn finished(&self, _success: bool) {}
}
