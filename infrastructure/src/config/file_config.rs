//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! Conversion helpers turn them into the application-layer parameter types.

use assistant_application::{CompletionParams, TurnParams};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error)]
pub enum ConfigValidationError {
    #[error("behavior.timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("behavior.request_timeout_seconds cannot be 0")]
    InvalidRequestTimeout,

    #[error("llm.temperature must be between 0 and 2 (got {0})")]
    InvalidTemperature(f32),

    #[error("llm.max_tokens cannot be 0")]
    InvalidMaxTokens,

    #[error("search.page_size cannot be 0")]
    InvalidPageSize,

    #[error("{field} must be an http(s) URL (got {value:?})")]
    InvalidUrl { field: &'static str, value: String },
}

/// Completion proxy location as seen by the client
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileApiConfig {
    /// Base URL of the server exposing `POST /api/chat`
    pub base_url: String,
}

impl Default for FileApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
        }
    }
}

/// Identity provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileIdentityConfig {
    /// Application (client) id registered with the identity provider
    pub client_id: String,
    /// Directory tenant; `common` accepts any work or school account
    pub tenant_id: String,
    /// Full authority URL. Derived from `tenant_id` when unset.
    pub authority: Option<String>,
    pub redirect_uri: String,
    /// Defaults to `redirect_uri`
    pub post_logout_redirect_uri: Option<String>,
    pub scopes: Vec<String>,
}

impl Default for FileIdentityConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            tenant_id: "common".to_string(),
            authority: None,
            redirect_uri: "http://localhost:3000".to_string(),
            post_logout_redirect_uri: None,
            scopes: vec![
                "User.Read".to_string(),
                "Files.Read.All".to_string(),
                "Sites.Read.All".to_string(),
            ],
        }
    }
}

impl FileIdentityConfig {
    pub fn authority(&self) -> String {
        self.authority
            .clone()
            .unwrap_or_else(|| format!("https://login.microsoftonline.com/{}", self.tenant_id))
    }

    pub fn post_logout_redirect_uri(&self) -> &str {
        self.post_logout_redirect_uri
            .as_deref()
            .unwrap_or(&self.redirect_uri)
    }
}

/// Document index settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSearchConfig {
    pub graph_base_url: String,
    /// Number of hits requested per query
    pub page_size: u32,
}

impl Default for FileSearchConfig {
    fn default() -> Self {
        Self {
            graph_base_url: "https://graph.microsoft.com/v1.0".to_string(),
            page_size: 5,
        }
    }
}

/// Hosted language model settings (used by the completion server only)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLlmConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for FileLlmConfig {
    fn default() -> Self {
        let params = CompletionParams::default();
        Self {
            api_key: None,
            base_url: "https://api.openai.com/v1".to_string(),
            model: params.model,
            temperature: params.temperature,
            max_tokens: params.max_tokens,
        }
    }
}

impl FileLlmConfig {
    pub fn completion_params(&self) -> CompletionParams {
        CompletionParams::default()
            .with_model(self.model.clone())
            .with_temperature(self.temperature)
            .with_max_tokens(self.max_tokens)
    }
}

/// Completion server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileServerConfig {
    pub bind: String,
    /// Browser origin allowed by CORS. Any origin when unset.
    pub allowed_origin: Option<String>,
}

impl Default for FileServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:7071".to_string(),
            allowed_origin: None,
        }
    }
}

/// Raw behavior configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBehaviorConfig {
    /// Upper bound for one question turn. Unlimited when unset.
    pub timeout_seconds: Option<u64>,
    /// Timeout applied to each outgoing HTTP request
    pub request_timeout_seconds: u64,
}

impl Default for FileBehaviorConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: None,
            request_timeout_seconds: 60,
        }
    }
}

impl FileBehaviorConfig {
    pub fn turn_params(&self) -> TurnParams {
        match self.timeout_seconds {
            Some(secs) => TurnParams::default().with_timeout(Duration::from_secs(secs)),
            None => TurnParams::default(),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

/// Raw REPL configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileReplConfig {
    /// Show progress indicators
    pub show_progress: bool,
    /// Path to history file
    pub history_file: Option<String>,
}

impl Default for FileReplConfig {
    fn default() -> Self {
        Self {
            show_progress: true,
            history_file: None,
        }
    }
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub api: FileApiConfig,
    pub identity: FileIdentityConfig,
    pub search: FileSearchConfig,
    pub llm: FileLlmConfig,
    pub server: FileServerConfig,
    pub behavior: FileBehaviorConfig,
    pub repl: FileReplConfig,
}

impl FileConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if let Some(0) = self.behavior.timeout_seconds {
            return Err(ConfigValidationError::InvalidTimeout);
        }
        if self.behavior.request_timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidRequestTimeout);
        }
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(ConfigValidationError::InvalidTemperature(
                self.llm.temperature,
            ));
        }
        if self.llm.max_tokens == 0 {
            return Err(ConfigValidationError::InvalidMaxTokens);
        }
        if self.search.page_size == 0 {
            return Err(ConfigValidationError::InvalidPageSize);
        }

        check_url("api.base_url", &self.api.base_url)?;
        check_url("search.graph_base_url", &self.search.graph_base_url)?;
        check_url("llm.base_url", &self.llm.base_url)?;
        check_url("identity.authority", &self.identity.authority())?;

        Ok(())
    }
}

fn check_url(field: &'static str, value: &str) -> Result<(), ConfigValidationError> {
    let trimmed = value.trim();
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigValidationError::InvalidUrl {
            field,
            value: value.to_string(),
        })
    }
}
