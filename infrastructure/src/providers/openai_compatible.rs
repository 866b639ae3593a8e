//! OpenAI-compatible chat completion provider
//!
//! Works against any `/chat/completions` endpoint (OpenRouter, Ollama,
//! vLLM, OpenAI itself). One instance per model id; the HTTP client is
//! shared.

use super::codec;
use crate::config::FileProviderConfig;
use async_trait::async_trait;
use council_application::{ProviderError, ReasoningProvider};
use council_domain::{ReasoningRequest, ReasoningResponse};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct OpenAiCompatibleProvider {
    model: String,
    base_url: String,
    api_key: Option<String>,
    max_tokens: u32,
    temperature: Option<f64>,
    http: reqwest::Client,
}

impl OpenAiCompatibleProvider {
    pub fn new(
        model: impl Into<String>,
        base_url: impl Into<String>,
        api_key: Option<String>,
        http: reqwest::Client,
    ) -> Self {
        Self {
            model: model.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
            max_tokens: 2000,
            temperature: None,
            http,
        }
    }

    /// Provider for `model` using the endpoint settings of `[provider]`
    pub fn from_config(config: &FileProviderConfig, model: &str, http: reqwest::Client) -> Self {
        Self::new(model, &config.base_url, config.resolve_api_key(), http)
            .with_max_tokens(config.max_tokens)
            .with_temperature(config.temperature)
    }

    /// HTTP client with a per-request timeout
    pub fn http_client(timeout: Duration) -> Result<reqwest::Client, ProviderError> {
        reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProviderError::Transport(e.to_string()))
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: Option<f64>) -> Self {
        self.temperature = temperature;
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    fn chat_request(&self, request: &ReasoningRequest) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: Some(codec::system_prompt(request)),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: Some(codec::user_prompt(request)),
                },
            ],
            max_tokens: Some(self.max_tokens),
            temperature: self.temperature,
        }
    }

    async fn complete(&self, body: &ChatCompletionRequest) -> Result<String, ProviderError> {
        let mut builder = self.http.post(self.endpoint()).json(body);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await.map_err(transport_error)?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Other(format!("invalid completion payload: {}", e)))?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| ProviderError::Other("empty completion".to_string()))
    }
}

fn transport_error(e: reqwest::Error) -> ProviderError {
    if e.is_timeout() {
        ProviderError::Timeout
    } else {
        ProviderError::Transport(e.to_string())
    }
}

#[async_trait]
impl ReasoningProvider for OpenAiCompatibleProvider {
    fn name(&self) -> &str {
        &self.model
    }

    async fn invoke(&self, request: &ReasoningRequest) -> Result<ReasoningResponse, ProviderError> {
        debug!("{} call to {}", request.kind, self.model);
        let content = self.complete(&self.chat_request(request)).await?;
        Ok(codec::decode(request, &content))
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}
