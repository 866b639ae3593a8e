//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod context_provider;
pub mod progress;
pub mod provider_lookup;
pub mod reasoning_provider;
pub mod retry_observer;
