//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Department '{department}' needs exactly 3 workers, got {count}")]
    WorkerCount { department: String, count: usize },

    #[error("Council needs exactly 3 executives, got {0}")]
    ExecutiveCount(usize),

    #[error("Invalid router transition: {from} -> {to}")]
    InvalidTransition {
        from: &'static str,
        to: &'static str,
    },

    #[error("Retry policy needs at least one attempt")]
    ZeroAttempts,
}
