//! Router use case
//!
//! Decides whether a query deserves the full council.

use crate::ports::reasoning_provider::{ProviderError, ReasoningProvider, ask};
use crate::retry::{RetryError, RetryExecutor};
use council_domain::signature::AssessComplexity;
use council_domain::{DomainError, Query, RouterState, RoutingDecision};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum RouterError {
    #[error("Classification failed: {0}")]
    Classification(#[from] RetryError<ProviderError>),

    #[error(transparent)]
    State(#[from] DomainError),
}

/// Classifies queries into the fast or deep lane. Holds no per-query state.
pub struct Router {
    provider: Arc<dyn ReasoningProvider>,
    retry: RetryExecutor,
}

impl Router {
    pub fn new(provider: Arc<dyn ReasoningProvider>, retry: RetryExecutor) -> Self {
        Self { provider, retry }
    }

    /// Classify `query`. With `force_deep` no provider call is made and the
    /// manual override decision is returned.
    pub async fn classify(
        &self,
        query: &Query,
        force_deep: bool,
    ) -> Result<RoutingDecision, RouterError> {
        let state = RouterState::default();

        let state = if force_deep {
            info!("Router: manual override to deep lane");
            state.decide(RoutingDecision::manual_override())?
        } else {
            let state = state.begin()?;
            let call = AssessComplexity {
                query: query.text().to_string(),
            };
            let complexity = self
                .retry
                .execute("router classification", || ask(self.provider.as_ref(), &call))
                .await?;
            state.decide(RoutingDecision::from_score(
                complexity.score,
                complexity.reasoning,
            ))?
        };

        let decision = state
            .into_decision()
            .ok_or(DomainError::InvalidTransition {
                from: "classifying",
                to: "decided",
            })?;
        info!(
            "Router: score {:.1} -> {}",
            decision.score(),
            decision.route().as_str()
        );
        Ok(decision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::ScriptedProvider;
    use council_domain::{CallKind, RetryPolicy, Route};
    use std::time::Duration;

    fn router(provider: Arc<ScriptedProvider>) -> Router {
        let policy = RetryPolicy::new(3, Duration::from_millis(1)).unwrap();
        Router::new(provider, RetryExecutor::new(policy))
    }

    #[tokio::test]
    async fn test_high_score_goes_deep() {
        let provider = Arc::new(ScriptedProvider::new("router").with_score("7.5"));
        let decision = router(provider.clone())
            .classify(&Query::new("Should we pause the AWS migration?"), false)
            .await
            .unwrap();
        assert_eq!(decision.route(), Route::DeepLane);
        assert_eq!(decision.score(), 7.5);
        assert_eq!(provider.count(CallKind::Classification), 1);
        assert_eq!(
            provider.requests()[0].input("query"),
            Some("Should we pause the AWS migration?")
        );
    }

    #[tokio::test]
    async fn test_threshold_is_fast() {
        let provider = Arc::new(ScriptedProvider::new("router").with_score("4.0"));
        let decision = router(provider)
            .classify(&Query::new("What is our burn rate?"), false)
            .await
            .unwrap();
        assert_eq!(decision.route(), Route::FastLane);
    }

    #[tokio::test]
    async fn test_unparseable_score_defaults_deep() {
        let provider = Arc::new(ScriptedProvider::new("router").with_score("high"));
        let decision = router(provider)
            .classify(&Query::new("Hello"), false)
            .await
            .unwrap();
        assert_eq!(decision.score(), 5.0);
        assert_eq!(decision.route(), Route::DeepLane);
    }

    #[tokio::test]
    async fn test_force_deep_skips_provider() {
        let provider = Arc::new(ScriptedProvider::new("router").with_score("1"));
        let decision = router(provider.clone())
            .classify(&Query::new("Hi"), true)
            .await
            .unwrap();
        assert_eq!(decision, RoutingDecision::manual_override());
        assert_eq!(decision.reasoning(), "manual override");
        assert!(provider.requests().is_empty());
    }

    #[tokio::test]
    async fn test_transient_failure_is_retried() {
        let provider = Arc::new(ScriptedProvider::new("router").failing_first(2));
        let decision = router(provider.clone())
            .classify(&Query::new("Expand to Europe?"), false)
            .await
            .unwrap();
        assert_eq!(decision.route(), Route::DeepLane);
        assert_eq!(provider.count(CallKind::Classification), 3);
    }

    #[tokio::test]
    async fn test_exhausted_classification_is_fatal() {
        let provider =
            Arc::new(ScriptedProvider::new("router").failing_on(CallKind::Classification));
        let err = router(provider)
            .classify(&Query::new("Expand to Europe?"), false)
            .await
            .unwrap_err();
        match err {
            RouterError::Classification(retry) => assert_eq!(retry.attempts(), 3),
            other => panic!("unexpected error: {other}"),
        }
    }
}
