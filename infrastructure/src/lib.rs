//! Infrastructure layer for sovereign-council
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod context;
pub mod providers;

// Re-export commonly used types
pub use config::{ConfigLoader, ConfigValidationError, FileConfig};
pub use context::{COMPANY_BRIEFING, DirectoryContextProvider, StaticContextProvider};
pub use providers::{OpenAiCompatibleProvider, ProviderRegistry};

use council_application::ContextProvider;
use std::sync::Arc;

/// The context source named by `[context]`
pub fn context_provider(config: &FileConfig) -> Arc<dyn ContextProvider> {
    match &config.context.dir {
        Some(dir) => Arc::new(DirectoryContextProvider::new(dir)),
        None => Arc::new(StaticContextProvider::default()),
    }
}
