//! Reasoning provider port
//!
//! Defines the interface for remote text-generation calls. Every call is a
//! single stateless request, so any call may be retried.

use async_trait::async_trait;
use council_domain::{ReasoningRequest, ReasoningResponse, Signature, SignatureError};
use thiserror::Error;

/// Errors that can occur during a reasoning call
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Provider returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error(transparent)]
    MissingField(#[from] SignatureError),

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

/// A remote text-generation capability
///
/// This port defines how the application layer talks to models.
/// Implementations (adapters) live in the infrastructure layer and are bound
/// to workers and roles at composition time.
#[async_trait]
pub trait ReasoningProvider: Send + Sync {
    /// Identifier used in logs (usually the model id)
    fn name(&self) -> &str;

    /// Answer one request with every declared output field
    async fn invoke(&self, request: &ReasoningRequest) -> Result<ReasoningResponse, ProviderError>;
}

/// Lower a typed signature into a request, invoke, and lift the response.
///
/// A response missing a required field surfaces as
/// [`ProviderError::MissingField`] so the surrounding retry treats it like
/// any other failed attempt.
pub async fn ask<S>(
    provider: &dyn ReasoningProvider,
    signature: &S,
) -> Result<S::Output, ProviderError>
where
    S: Signature + Sync,
{
    let request = signature.to_request();
    let response = provider.invoke(&request).await?;
    Ok(S::parse(&response)?)
}
