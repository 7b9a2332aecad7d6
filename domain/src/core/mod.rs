//! Core domain concepts shared across all subdomains.
//!
//! - [`query::Query`]: a validated question about the user's documents
//! - [`error::ErrorKind`]: the user-facing error taxonomy
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod query;
