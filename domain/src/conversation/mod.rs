//! Conversation domain.
//!
//! - [`entities::Message`]: a single immutable chat message
//! - [`entities::Conversation`]: the append-only transcript of a session

pub mod entities;
