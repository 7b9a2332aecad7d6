//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod completion;
pub mod document_search;
pub mod identity;
pub mod language_model;
pub mod login_prompt;
pub mod progress;
