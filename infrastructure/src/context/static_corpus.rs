//! Fixed-corpus context provider

use async_trait::async_trait;
use council_application::{ContextError, ContextProvider};
use std::collections::HashMap;
use tracing::debug;

/// Company briefing every department sees when no context directory is
/// configured.
pub const COMPANY_BRIEFING: &str = "\
[CONFIDENTIAL COMPANY DATA]
1. Financials: Current burn rate is $50k/month. Cash runway: 18 months.
2. Growth: User base grew 15% last Q, but churn is high (5%) in Enterprise sector.
3. Tech: The legacy servers are crashing daily. Migration to AWS is approved but paused due to cost.
4. Strategy: CEO wants to focus on \"Product-Led Growth\" in 2025.
5. Personnel: Hiring freeze is active for all non-engineering roles.";

/// Returns the same text for every query, optionally overridden per scope.
#[derive(Debug, Clone)]
pub struct StaticContextProvider {
    common: String,
    scoped: HashMap<String, String>,
}

impl Default for StaticContextProvider {
    fn default() -> Self {
        Self::new(COMPANY_BRIEFING)
    }
}

impl StaticContextProvider {
    pub fn new(common: impl Into<String>) -> Self {
        Self {
            common: common.into(),
            scoped: HashMap::new(),
        }
    }

    /// Replace the common text for one scope (matched case-insensitively)
    pub fn with_scope(mut self, scope: &str, text: impl Into<String>) -> Self {
        self.scoped.insert(scope.to_lowercase(), text.into());
        self
    }
}

#[async_trait]
impl ContextProvider for StaticContextProvider {
    async fn lookup(&self, _query: &str, scope: &str) -> Result<String, ContextError> {
        debug!("Static context lookup for {}", scope);
        Ok(self
            .scoped
            .get(&scope.to_lowercase())
            .unwrap_or(&self.common)
            .clone())
    }
}
