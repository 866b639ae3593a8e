//! Configuration file loading for sovereign-council
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `COUNCIL_*` environment variables (`__` separates nested keys)
//! 2. `--config <path>` specified file
//! 3. Project root: `./council.toml` or `./.council.toml`
//! 4. Global: `~/.config/sovereign-council/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, DEFAULT_API_KEY_ENV, DEFAULT_BASE_URL, DEFAULT_MODEL, FileConfig,
    FileContextConfig, FileDebateConfig, FileDepartmentConfig, FileExecutiveConfig,
    FileProviderConfig, FileRetryConfig, FileReviewConfig, FileRouterConfig, FileSovereignConfig,
    FileWorkerConfig,
};
pub use loader::{ConfigLoader, ENV_PREFIX};
