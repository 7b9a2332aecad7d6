//! Completion port
//!
//! The client side of the completion proxy: sends a query plus its
//! document context and receives the generated answer.

use assistant_domain::ErrorKind;
use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur while calling the completion backend
#[derive(Error, Debug)]
pub enum CompletionError {
    #[error("Completion request failed: {0}")]
    Transport(String),

    /// The backend reports failures with a generic body, so only the
    /// status and a snippet are available.
    #[error("Completion backend returned HTTP {status}: {snippet}")]
    Status { status: u16, snippet: String },

    #[error("Malformed completion response: {0}")]
    Decode(String),
}

impl CompletionError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::CompletionFailed
    }
}

/// Completion backend
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, query: &str, context: &str) -> Result<String, CompletionError>;
}
