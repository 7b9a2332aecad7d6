//! Application layer for doc-assistant
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{CompletionParams, TurnParams};
pub use ports::{
    completion::{CompletionClient, CompletionError},
    document_search::{DocumentSearch, SearchError},
    identity::{AuthError, InteractiveAuth},
    language_model::{ChatRequest, LanguageModel, LanguageModelError},
    login_prompt::{DeviceCodeChallenge, LoginPrompt, LoginPromptError},
    progress::{NoProgress, TurnProgress},
};
pub use use_cases::ask_documents::{AskDocumentsUseCase, TurnOutcome};
pub use use_cases::auth_controller::{AuthController, AuthStatus};
pub use use_cases::proxy_completion::{ProxyCompletionError, ProxyCompletionUseCase};
