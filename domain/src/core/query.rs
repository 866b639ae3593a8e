//! Query value object

use serde::{Deserialize, Serialize};

/// The strategic question driving a whole deliberation (Value Object)
///
/// Immutable once created. Every stage of the pipeline (router, departments,
/// executives, sovereign) reads the same query text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Query {
    text: String,
}

impl Query {
    /// Create a new query
    ///
    /// # Panics
    /// Panics if the text is empty or only whitespace
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        assert!(!text.trim().is_empty(), "Query cannot be empty");
        Self { text }
    }

    /// Try to create a new query, returning None if blank
    pub fn try_new(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            None
        } else {
            Some(Self { text })
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}

impl From<&str> for Query {
    fn from(s: &str) -> Self {
        Query::new(s)
    }
}

impl From<String> for Query {
    fn from(s: String) -> Self {
        Query::new(s)
    }
}
