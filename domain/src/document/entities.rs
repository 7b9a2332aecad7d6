//! Document entities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A document returned by the search index for a single query.
///
/// Documents live only for the orchestration call that produced them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub name: String,
    /// Text excerpt from the index; empty when the hit had no summary.
    pub content: String,
    pub last_modified: Option<DateTime<Utc>>,
}

impl Document {
    pub fn new(id: impl Into<String>, name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            content: content.into(),
            last_modified: None,
        }
    }

    pub fn with_last_modified(mut self, at: DateTime<Utc>) -> Self {
        self.last_modified = Some(at);
        self
    }

    /// The `"<name>:\n<content>"` block used in the context string.
    pub fn context_block(&self) -> String {
        format!("{}:\n{}", self.name, self.content)
    }
}
