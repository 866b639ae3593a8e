//! Provider binding port
//!
//! The composition root decides which model sits in which seat. Use cases
//! only ask for the provider of a seat while the council is assembled.

use super::reasoning_provider::ReasoningProvider;
use std::fmt;
use std::sync::Arc;

/// A position in the council that issues reasoning calls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Seat<'a> {
    Router,
    /// 0-based worker index inside a department
    Worker { department: &'a str, index: usize },
    DepartmentHead { department: &'a str },
    Executive { label: &'a str },
    Sovereign,
}

impl fmt::Display for Seat<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Seat::Router => write!(f, "router"),
            Seat::Worker { department, index } => {
                write!(f, "{} worker {}", department, index + 1)
            }
            Seat::DepartmentHead { department } => write!(f, "{} head", department),
            Seat::Executive { label } => write!(f, "executive {}", label),
            Seat::Sovereign => write!(f, "sovereign"),
        }
    }
}

/// Resolves the provider bound to a seat
pub trait ProviderLookup: Send + Sync {
    fn provider_for(&self, seat: Seat<'_>) -> Arc<dyn ReasoningProvider>;
}
