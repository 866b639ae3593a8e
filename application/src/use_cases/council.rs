//! Macro council use case
//!
//! Three executives, one per department, argue over the query:
//!
//! - **Openings**: every executive states a position, all in parallel.
//! - **Rebuttals**: for each round, every executive answers the other two.
//!
//! Every opening exists before the first rebuttal is requested. How a
//! rebuttal round sees the transcript depends on [`TurnOrder`]:
//! simultaneous speakers share one snapshot taken at the start of the round,
//! round-robin speakers each see every turn appended before theirs.

use crate::ports::progress::ProgressNotifier;
use crate::ports::reasoning_provider::{ProviderError, ReasoningProvider, ask};
use crate::retry::{RetryError, RetryExecutor};
use council_domain::signature::{OpeningStatement, RebutOpponents};
use council_domain::{
    Argument, DebateRecord, DebateSettings, DepartmentReport, DomainError, Query, Rebuttal,
    Stage, Transcript, Turn, TurnKind, TurnOrder,
};
use futures::future::try_join_all;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

pub const COUNCIL_SIZE: usize = 3;

const SCOPE: &str = "council";

#[derive(Error, Debug)]
pub enum CouncilError {
    #[error("{executive} opening failed: {source}")]
    Opening {
        executive: String,
        source: RetryError<ProviderError>,
    },

    #[error("{executive} rebuttal in round {round} failed: {source}")]
    Rebuttal {
        executive: String,
        round: u32,
        source: RetryError<ProviderError>,
    },
}

impl CouncilError {
    /// Label of the executive whose call failed
    pub fn executive(&self) -> &str {
        match self {
            CouncilError::Opening { executive, .. } | CouncilError::Rebuttal { executive, .. } => {
                executive
            }
        }
    }
}

/// A department's representative in the macro council
pub struct ExecutiveAgent {
    label: String,
    role: String,
    department: String,
    provider: Arc<dyn ReasoningProvider>,
    retry: RetryExecutor,
}

impl ExecutiveAgent {
    pub fn new(
        label: impl Into<String>,
        role: impl Into<String>,
        department: impl Into<String>,
        provider: Arc<dyn ReasoningProvider>,
        retry: RetryExecutor,
    ) -> Self {
        Self {
            label: label.into(),
            role: role.into(),
            department: department.into(),
            provider,
            retry,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn department(&self) -> &str {
        &self.department
    }

    /// Argue for the department's KPI; `report` is absent in council-only runs
    pub async fn give_opening(
        &self,
        query: &Query,
        report: Option<&DepartmentReport>,
    ) -> Result<Argument, RetryError<ProviderError>> {
        let call = OpeningStatement {
            role: self.role.clone(),
            query: query.text().to_string(),
            micro_report: report.map(|r| r.final_text.clone()),
        };
        let label = format!("{} opening", self.label);
        let text = self
            .retry
            .execute(&label, || ask(self.provider.as_ref(), &call))
            .await?;
        Ok(Argument::new(&self.label, text))
    }

    /// Answer the other executives' statements
    pub async fn give_rebuttal(
        &self,
        my_argument: &str,
        opponent_summary: &str,
        round: u32,
    ) -> Result<Rebuttal, RetryError<ProviderError>> {
        let call = RebutOpponents {
            role: self.role.clone(),
            my_argument: my_argument.to_string(),
            opponent_arguments: opponent_summary.to_string(),
        };
        let label = format!("{} rebuttal (round {})", self.label, round);
        let text = self
            .retry
            .execute(&label, || ask(self.provider.as_ref(), &call))
            .await?;
        Ok(Rebuttal::new(&self.label, round, text))
    }
}

pub struct MacroCouncil {
    executives: Vec<ExecutiveAgent>,
    settings: DebateSettings,
}

impl MacroCouncil {
    /// Executives speak in the given order. Exactly three are required.
    pub fn new(
        executives: Vec<ExecutiveAgent>,
        settings: DebateSettings,
    ) -> Result<Self, DomainError> {
        if executives.len() != COUNCIL_SIZE {
            return Err(DomainError::ExecutiveCount(executives.len()));
        }
        Ok(Self {
            executives,
            settings,
        })
    }

    pub fn executives(&self) -> &[ExecutiveAgent] {
        &self.executives
    }

    pub fn settings(&self) -> &DebateSettings {
        &self.settings
    }

    /// Run openings then every rebuttal round.
    ///
    /// Each executive receives the report whose department name matches its
    /// own; with `reports` empty the debate runs on the raw query.
    pub async fn debate(
        &self,
        query: &Query,
        reports: &[DepartmentReport],
        progress: &dyn ProgressNotifier,
    ) -> Result<DebateRecord, CouncilError> {
        info!(
            "Macro council: {} round(s), {} order",
            self.settings.rounds, self.settings.turn_order
        );

        let arguments = self.openings(query, reports, progress).await?;
        let mut transcript = Transcript::new();
        transcript.append_round(
            arguments
                .iter()
                .map(|a| Turn::opening(&a.executive, &a.text)),
        );

        for round in 1..=self.settings.rounds.max(1) {
            progress.on_stage_start(Stage::Rebuttal, SCOPE, self.executives.len());
            match self.settings.turn_order {
                TurnOrder::Simultaneous => {
                    self.simultaneous_round(&arguments, &mut transcript, round, progress)
                        .await?
                }
                TurnOrder::RoundRobin => {
                    self.round_robin_round(&arguments, &mut transcript, round, progress)
                        .await?
                }
            }
            progress.on_stage_complete(Stage::Rebuttal, SCOPE);
        }

        let rebuttals = self
            .executives
            .iter()
            .filter_map(|exec| {
                transcript
                    .latest_from(&exec.label)
                    .filter(|turn| turn.kind == TurnKind::Rebuttal)
                    .map(|turn| Rebuttal::new(&exec.label, turn.round, &turn.text))
            })
            .collect();

        Ok(DebateRecord {
            arguments,
            rebuttals,
            transcript,
        })
    }

    async fn openings(
        &self,
        query: &Query,
        reports: &[DepartmentReport],
        progress: &dyn ProgressNotifier,
    ) -> Result<Vec<Argument>, CouncilError> {
        progress.on_stage_start(Stage::Opening, SCOPE, self.executives.len());

        let arguments = try_join_all(self.executives.iter().map(|exec| async move {
            let report = reports.iter().find(|r| r.department == exec.department);
            let result = exec.give_opening(query, report).await;
            progress.on_task_complete(Stage::Opening, SCOPE, &exec.label, result.is_ok());
            result.map_err(|source| CouncilError::Opening {
                executive: exec.label.clone(),
                source,
            })
        }))
        .await?;

        progress.on_stage_complete(Stage::Opening, SCOPE);
        Ok(arguments)
    }

    /// All speakers answer the same snapshot; the round lands in the
    /// transcript only once every speaker has finished.
    async fn simultaneous_round(
        &self,
        arguments: &[Argument],
        transcript: &mut Transcript,
        round: u32,
        progress: &dyn ProgressNotifier,
    ) -> Result<(), CouncilError> {
        let snapshot = transcript.clone();
        let snapshot = &snapshot;

        let rebuttals = try_join_all(self.executives.iter().zip(arguments).map(
            |(exec, argument)| async move {
                let summary = snapshot.opponent_summary(&exec.label);
                let result = exec.give_rebuttal(&argument.text, &summary, round).await;
                progress.on_task_complete(Stage::Rebuttal, SCOPE, &exec.label, result.is_ok());
                result.map_err(|source| CouncilError::Rebuttal {
                    executive: exec.label.clone(),
                    round,
                    source,
                })
            },
        ))
        .await?;

        transcript.append_round(
            rebuttals
                .into_iter()
                .map(|r| Turn::rebuttal(r.executive, r.round, r.text)),
        );
        debug!("Macro council: round {} appended", round);
        Ok(())
    }

    /// Speakers go one after another, each seeing the turns before theirs.
    async fn round_robin_round(
        &self,
        arguments: &[Argument],
        transcript: &mut Transcript,
        round: u32,
        progress: &dyn ProgressNotifier,
    ) -> Result<(), CouncilError> {
        for (exec, argument) in self.executives.iter().zip(arguments) {
            let summary = transcript.opponent_summary(&exec.label);
            let result = exec.give_rebuttal(&argument.text, &summary, round).await;
            progress.on_task_complete(Stage::Rebuttal, SCOPE, &exec.label, result.is_ok());
            let rebuttal = result.map_err(|source| CouncilError::Rebuttal {
                executive: exec.label.clone(),
                round,
                source,
            })?;
            transcript.push(Turn::rebuttal(rebuttal.executive, rebuttal.round, rebuttal.text));
        }
        Ok(())
    }
}
