//! Domain layer for doc-assistant
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Conversation
//!
//! An append-only transcript that starts with a synthetic system message.
//! Each user turn adds exactly one `user` and one `assistant` message.
//!
//! ## Grounding
//!
//! Documents returned by the search index are flattened into a single
//! context string which the completion backend embeds in its system prompt.

pub mod auth;
pub mod conversation;
pub mod core;
pub mod document;
pub mod prompt;
pub mod util;

// Re-export commonly used types
pub use auth::entities::{AccessToken, Account, AuthSession, AuthState};
pub use conversation::entities::{Conversation, Message, Role};
pub use core::{
    error::{DomainError, ErrorKind},
    query::Query,
};
pub use document::{context::assemble_context, entities::Document};
pub use prompt::PromptTemplate;
