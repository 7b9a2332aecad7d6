//! Language model port
//!
//! Used by the completion proxy to reach the hosted chat-completion API.

use assistant_domain::{ErrorKind, Message};
use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur while calling the hosted model
#[derive(Error, Debug)]
pub enum LanguageModelError {
    #[error("Language model is not configured: {0}")]
    NotConfigured(String),

    #[error("Language model request failed: {0}")]
    Transport(String),

    #[error("Language model returned HTTP {status}: {snippet}")]
    Status { status: u16, snippet: String },

    #[error("Malformed language model response: {0}")]
    Decode(String),
}

impl LanguageModelError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::CompletionFailed
    }
}

/// One chat completion request
#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Hosted chat-completion API
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Returns the first choice's text. A choice without content yields an
    /// empty string rather than an error.
    async fn chat(&self, request: ChatRequest) -> Result<String, LanguageModelError>;
}
