//! Use case parameters.
//!
//! These are set once at startup from the loaded configuration and never
//! change for the lifetime of the process.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Sampling parameters the completion backend sends with every request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionParams {
    /// Provider model identifier.
    pub model: String,
    pub temperature: f32,
    /// Maximum answer length in tokens.
    pub max_tokens: u32,
}

impl Default for CompletionParams {
    fn default() -> Self {
        Self {
            model: "gpt-4".to_string(),
            temperature: 0.7,
            max_tokens: 1000,
        }
    }
}

impl CompletionParams {
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

/// Limits applied to a single orchestration turn.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnParams {
    /// Upper bound for search + completion together. `None` waits forever.
    pub timeout: Option<Duration>,
}

impl TurnParams {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}
