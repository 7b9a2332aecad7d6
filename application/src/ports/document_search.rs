//! Document search port
//!
//! Queries the document index for excerpts relevant to a question.

use assistant_domain::{AccessToken, Document, ErrorKind};
use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during a search call
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Search request failed: {0}")]
    Transport(String),

    #[error("Search returned HTTP {status}: {snippet}")]
    Status { status: u16, snippet: String },

    #[error("Malformed search response: {0}")]
    Malformed(String),
}

impl SearchError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::SearchFailed
    }
}

/// Document index search
///
/// Returns documents in the order supplied by the index. Errors propagate
/// unchanged; adapters never substitute fallback results.
#[async_trait]
pub trait DocumentSearch: Send + Sync {
    async fn search(&self, query: &str, token: &AccessToken)
    -> Result<Vec<Document>, SearchError>;
}
