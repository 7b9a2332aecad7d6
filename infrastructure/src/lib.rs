//! Infrastructure layer for doc-assistant
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod completion;
pub mod config;
pub mod graph;
pub mod http;
pub mod identity;
pub mod llm;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use completion::HttpCompletionClient;
pub use config::{
    ConfigLoader, ConfigValidationError, FileApiConfig, FileBehaviorConfig, FileConfig,
    FileIdentityConfig, FileLlmConfig, FileReplConfig, FileSearchConfig, FileServerConfig,
};
pub use graph::GraphDocumentSearch;
pub use identity::{DeviceCodeIdentityProvider, IdentitySettings};
pub use llm::OpenAiChatModel;
