//! Configuration file loading for doc-assistant
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment: `DOC_ASSISTANT_<SECTION>__<KEY>` and `OPENAI_API_KEY`
//! 2. `--config <path>` specified file
//! 3. Project root: `./doc-assistant.toml` or `./.doc-assistant.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/doc-assistant/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileApiConfig, FileBehaviorConfig, FileConfig, FileIdentityConfig,
    FileLlmConfig, FileReplConfig, FileSearchConfig, FileServerConfig,
};
pub use loader::ConfigLoader;
