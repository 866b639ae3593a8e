//! Sovereign use case
//!
//! The final arbiter. Stateless: the persona is chosen per call, so one
//! debate can be judged under several lenses.

use crate::ports::reasoning_provider::{ProviderError, ReasoningProvider, ask};
use crate::retry::{RetryError, RetryExecutor};
use council_domain::signature::SovereignJudgement;
use council_domain::{DebateRecord, Persona, Query, Verdict};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum SovereignError {
    #[error("Debate is incomplete: {positions} of {arguments} executives have rebutted")]
    IncompleteDebate { positions: usize, arguments: usize },

    #[error("Verdict failed: {0}")]
    Call(#[from] RetryError<ProviderError>),
}

pub struct Sovereign {
    provider: Arc<dyn ReasoningProvider>,
    retry: RetryExecutor,
}

impl Sovereign {
    pub fn new(provider: Arc<dyn ReasoningProvider>, retry: RetryExecutor) -> Self {
        Self { provider, retry }
    }

    /// Weigh every executive's argument and latest rebuttal under `persona`
    pub async fn judge(
        &self,
        query: &Query,
        persona: &Persona,
        record: &DebateRecord,
    ) -> Result<Verdict, SovereignError> {
        let positions = record.positions();
        if !record.is_complete() {
            return Err(SovereignError::IncompleteDebate {
                positions: positions.len(),
                arguments: record.arguments.len(),
            });
        }

        info!("Sovereign: judging as {}", persona);
        let call = SovereignJudgement {
            query: query.text().to_string(),
            persona: persona.directive().to_string(),
            positions,
        };
        let verdict = self
            .retry
            .execute("sovereign verdict", || ask(self.provider.as_ref(), &call))
            .await?;
        Ok(verdict)
    }
}
