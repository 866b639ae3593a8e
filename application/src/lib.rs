//! Application layer for sovereign-council
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod retry;
pub mod use_cases;

// Re-export commonly used types
pub use config::{
    CouncilConfig, CouncilRoster, DEFAULT_EXCERPT_CHARS, DEFAULT_MAX_CONCURRENT_REVIEWS,
    DepartmentProfile, ExecutiveProfile, ReviewParams,
};
pub use ports::{
    context_provider::{ContextError, ContextProvider},
    progress::{NoProgress, ProgressNotifier},
    provider_lookup::{ProviderLookup, Seat},
    reasoning_provider::{ProviderError, ReasoningProvider, ask},
    retry_observer::{RetryNotice, RetryObserver, TracingRetryObserver},
};
pub use retry::{RetryError, RetryExecutor};
pub use use_cases::council::{COUNCIL_SIZE, CouncilError, ExecutiveAgent, MacroCouncil};
pub use use_cases::deliberation::{
    CouncilOutcome, DeepLaneReport, Deliberation, DeliberationError, DeliberationOutcome,
};
pub use use_cases::department::{Department, DepartmentError, Worker};
pub use use_cases::router::{Router, RouterError};
pub use use_cases::sovereign::{Sovereign, SovereignError};
