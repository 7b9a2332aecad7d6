//! Query value object

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// A question about the user's documents (Value Object)
///
/// Always non-empty after trimming. The original text is kept as typed so
/// it can be appended to the conversation verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Query {
    text: String,
}

impl Query {
    /// Try to create a new query, rejecting blank input
    pub fn new(text: impl Into<String>) -> Result<Self, DomainError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(DomainError::InvalidQuery(
                "query cannot be empty".to_string(),
            ));
        }
        Ok(Self { text })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

impl TryFrom<String> for Query {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Query::new(value)
    }
}

impl TryFrom<&str> for Query {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Query::new(value)
    }
}

impl From<Query> for String {
    fn from(query: Query) -> Self {
        query.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_keeps_raw_text() {
        let q = Query::new("  vacation policy ").unwrap();
        assert_eq!(q.as_str(), "  vacation policy ");
    }

    #[test]
    fn test_blank_query_rejected() {
        assert!(Query::new("").is_err());
        assert!(Query::new(" \t\n").is_err());
    }

    #[test]
    fn test_query_try_from_str() {
        let q: Query = "expense limits".try_into().unwrap();
        assert_eq!(q.to_string(), "expense limits");
    }

    #[test]
    fn test_query_deserialize_rejects_blank() {
        let ok: Result<Query, _> = serde_json::from_str("\"hello\"");
        assert!(ok.is_ok());
        let blank: Result<Query, _> = serde_json::from_str("\"   \"");
        assert!(blank.is_err());
    }
}
