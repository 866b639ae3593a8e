//! Context provider port
//!
//! Scoped knowledge lookup feeding the department drafts.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContextError {
    #[error("Failed to read context '{path}': {message}")]
    Io { path: String, message: String },

    #[error("Other error: {0}")]
    Other(String),
}

/// Knowledge lookup scoped by department name
#[async_trait]
pub trait ContextProvider: Send + Sync {
    /// Context text relevant to `query` for the given `scope`
    async fn lookup(&self, query: &str, scope: &str) -> Result<String, ContextError>;
}
