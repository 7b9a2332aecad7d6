//! Presentation layer for doc-assistant
//!
//! This crate contains CLI definitions, output formatters, progress
//! reporters, the interactive chat interface, and the HTTP server that
//! exposes the completion proxy.

pub mod auth;
pub mod chat;
pub mod cli;
pub mod config;
pub mod http;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use auth::TerminalLoginPrompt;
pub use chat::{ChatRepl, InterruptWatch};
pub use cli::commands::{Cli, OutputFormat};
pub use config::ReplConfig;
pub use http::{AppState, cors_layer, create_router};
pub use output::console::ConsoleFormatter;
pub use progress::reporter::{SimpleProgress, SpinnerProgress};
