//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod ask_documents;
pub mod auth_controller;
pub mod proxy_completion;
