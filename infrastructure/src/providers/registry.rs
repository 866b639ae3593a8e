//! Seat-to-provider binding
//!
//! Each seat resolves to a model id through [`FileConfig::model_for`]; one
//! provider is built per distinct model id and shared by every seat that
//! names it.

use super::openai_compatible::OpenAiCompatibleProvider;
use crate::config::FileConfig;
use council_application::{ProviderError, ProviderLookup, ReasoningProvider, Seat};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

pub struct ProviderRegistry {
    config: FileConfig,
    providers: HashMap<String, Arc<dyn ReasoningProvider>>,
    default: Arc<dyn ReasoningProvider>,
}

impl ProviderRegistry {
    /// Build one provider per distinct model id with `make`
    pub fn build<F>(config: &FileConfig, mut make: F) -> Self
    where
        F: FnMut(&str) -> Arc<dyn ReasoningProvider>,
    {
        let default = make(&config.provider.default_model);
        let mut providers = HashMap::new();
        providers.insert(config.provider.default_model.clone(), default.clone());
        for model in config.distinct_models() {
            if !providers.contains_key(model) {
                providers.insert(model.to_string(), make(model));
            }
        }
        info!("Bound {} distinct models", providers.len());

        Self {
            config: config.clone(),
            providers,
            default,
        }
    }

    /// Every model behind the `[provider]` OpenAI-compatible endpoint
    pub fn openai_compatible(config: &FileConfig) -> Result<Self, ProviderError> {
        let http = OpenAiCompatibleProvider::http_client(config.provider.timeout())?;
        Ok(Self::build(config, |model| {
            Arc::new(OpenAiCompatibleProvider::from_config(
                &config.provider,
                model,
                http.clone(),
            ))
        }))
    }

    /// Model ids with a bound provider, sorted
    pub fn models(&self) -> Vec<&str> {
        let mut models: Vec<&str> = self.providers.keys().map(String::as_str).collect();
        models.sort_unstable();
        models
    }
}

impl ProviderLookup for ProviderRegistry {
    fn provider_for(&self, seat: Seat<'_>) -> Arc<dyn ReasoningProvider> {
        let model = self.config.model_for(seat);
        debug!("Seat {} -> {}", seat, model);
        self.providers
            .get(model)
            .cloned()
            .unwrap_or_else(|| self.default.clone())
    }
}
