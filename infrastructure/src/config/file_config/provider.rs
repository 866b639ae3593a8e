//! Provider configuration from TOML (`[provider]` section)
//!
//! Every seat talks to the same OpenAI-compatible endpoint; only the model
//! id differs per seat.
//!
//! ```toml
//! [provider]
//! base_url = "https://openrouter.ai/api/v1"
//! api_key_env = "OPENROUTER_API_KEY"
//! default_model = "meta-llama/llama-3.3-70b-instruct:free"
//! max_tokens = 2000
//! timeout_seconds = 120
//! ```

use council_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_API_KEY_ENV: &str = "OPENROUTER_API_KEY";
pub const DEFAULT_MODEL: &str = "meta-llama/llama-3.3-70b-instruct:free";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    /// Base URL of the OpenAI-compatible API
    pub base_url: String,
    /// Environment variable holding the bearer key
    pub api_key_env: String,
    /// Direct API key (not recommended, use the env var instead)
    pub api_key: Option<String>,
    /// Model used by any seat without an explicit model
    pub default_model: String,
    /// Completion budget per call
    pub max_tokens: u32,
    /// Sampling temperature; provider default when unset
    pub temperature: Option<f64>,
    /// Per-request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for FileProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            api_key: None,
            default_model: DEFAULT_MODEL.to_string(),
            max_tokens: 2000,
            temperature: None,
            timeout_seconds: 120,
        }
    }
}

impl FileProviderConfig {
    /// The direct key if configured, otherwise the value of `api_key_env`.
    /// Empty values count as missing.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var(&self.api_key_env).ok())
            .filter(|key| !key.trim().is_empty())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub(super) fn validate(&self, issues: &mut Vec<ConfigIssue>) {
        if self.resolve_api_key().is_none() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::MissingApiKey,
                format!(
                    "provider: no API key, set {} or provider.api_key",
                    self.api_key_env
                ),
            ));
        }
        if self.default_model.trim().is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::EmptyModel,
                "provider.default_model cannot be empty",
            ));
        }
        if self.timeout_seconds == 0 {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::UnknownValue,
                "provider.timeout_seconds is 0, every request will time out",
            ));
        }
    }
}
