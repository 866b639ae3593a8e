//! Deliberation use case
//!
//! The caller-facing entry point. Composes the router, the three
//! departments, the macro council and the sovereign:
//!
//! ```text
//! Router ─┬─ FAST_LANE ─▶ RoutingDecision
//!         └─ DEEP_LANE ─▶ Departments (concurrent) ─▶ MacroCouncil ─▶ Sovereign ─▶ Verdict
//! ```

use crate::config::{CouncilConfig, CouncilRoster};
use crate::ports::context_provider::ContextProvider;
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::ports::provider_lookup::{ProviderLookup, Seat};
use crate::retry::RetryExecutor;
use crate::use_cases::council::{CouncilError, ExecutiveAgent, MacroCouncil};
use crate::use_cases::department::{Department, DepartmentError};
use crate::use_cases::router::{Router, RouterError};
use crate::use_cases::sovereign::{Sovereign, SovereignError};
use chrono::{DateTime, Utc};
use council_domain::{
    DebateRecord, DepartmentReport, DomainError, Persona, Query, Route, RoutingDecision, Stage,
    Verdict,
};
use futures::future::try_join_all;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Errors that can occur during a deliberation, named by failing stage
#[derive(Error, Debug)]
pub enum DeliberationError {
    #[error("Routing failed: {0}")]
    Routing(#[from] RouterError),

    #[error("Department '{department}' failed: {source}")]
    Department {
        department: String,
        source: DepartmentError,
    },

    #[error("Executive '{executive}' failed: {source}")]
    Council {
        executive: String,
        source: CouncilError,
    },

    #[error("Sovereign failed: {0}")]
    Sovereign(#[from] SovereignError),

    #[error("Task in '{scope}' failed: {message}")]
    TaskFailed { scope: String, message: String },
}

impl DeliberationError {
    fn from_department(department: &str, error: DepartmentError) -> Self {
        match error {
            DepartmentError::TaskFailed(message) => DeliberationError::TaskFailed {
                scope: department.to_string(),
                message,
            },
            source => DeliberationError::Department {
                department: department.to_string(),
                source,
            },
        }
    }
}

impl From<CouncilError> for DeliberationError {
    fn from(source: CouncilError) -> Self {
        DeliberationError::Council {
            executive: source.executive().to_string(),
            source,
        }
    }
}

/// Council debate and verdict, with or without department reports
#[derive(Debug, Clone, Serialize)]
pub struct CouncilOutcome {
    pub persona: Persona,
    pub debate: DebateRecord,
    pub verdict: Verdict,
}

/// Everything a deep-lane run produced
#[derive(Debug, Clone, Serialize)]
pub struct DeepLaneReport {
    pub decision: RoutingDecision,
    /// In roster order
    pub reports: Vec<DepartmentReport>,
    pub council: CouncilOutcome,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "lane", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeliberationOutcome {
    /// Simple query; answered by the classification alone
    FastLane(RoutingDecision),
    DeepLane(Box<DeepLaneReport>),
}

impl DeliberationOutcome {
    pub fn decision(&self) -> &RoutingDecision {
        match self {
            DeliberationOutcome::FastLane(decision) => decision,
            DeliberationOutcome::DeepLane(report) => &report.decision,
        }
    }

    pub fn verdict(&self) -> Option<&Verdict> {
        match self {
            DeliberationOutcome::FastLane(_) => None,
            DeliberationOutcome::DeepLane(report) => Some(&report.council.verdict),
        }
    }
}

pub struct Deliberation {
    router: Router,
    departments: Vec<Department>,
    council: MacroCouncil,
    sovereign: Sovereign,
}

impl Deliberation {
    pub fn new(
        router: Router,
        departments: Vec<Department>,
        council: MacroCouncil,
        sovereign: Sovereign,
    ) -> Self {
        Self {
            router,
            departments,
            council,
            sovereign,
        }
    }

    /// Build the whole council from a roster, binding each seat's provider.
    pub fn assemble(
        roster: &CouncilRoster,
        config: &CouncilConfig,
        providers: &dyn ProviderLookup,
        context: Arc<dyn ContextProvider>,
        retry: RetryExecutor,
    ) -> Result<Self, DomainError> {
        let router = Router::new(providers.provider_for(Seat::Router), retry.clone());

        let mut departments = Vec::with_capacity(roster.departments().len());
        let mut executives = Vec::with_capacity(roster.departments().len());
        for profile in roster.departments() {
            let workers = profile
                .worker_roles
                .iter()
                .enumerate()
                .map(|(index, role)| {
                    let seat = Seat::Worker {
                        department: &profile.name,
                        index,
                    };
                    (role.clone(), providers.provider_for(seat))
                })
                .collect();
            departments.push(Department::new(
                &profile.name,
                &profile.goal,
                workers,
                providers.provider_for(Seat::DepartmentHead {
                    department: &profile.name,
                }),
                context.clone(),
                retry.clone(),
                *config.review(),
            )?);
            executives.push(ExecutiveAgent::new(
                &profile.executive.label,
                &profile.executive.role,
                &profile.name,
                providers.provider_for(Seat::Executive {
                    label: &profile.executive.label,
                }),
                retry.clone(),
            ));
        }

        let council = MacroCouncil::new(executives, *config.debate())?;
        let sovereign = Sovereign::new(providers.provider_for(Seat::Sovereign), retry);

        Ok(Self::new(router, departments, council, sovereign))
    }

    pub fn departments(&self) -> &[Department] {
        &self.departments
    }

    pub fn council(&self) -> &MacroCouncil {
        &self.council
    }

    /// Route `query`, then run the full council when it lands in the deep lane
    pub async fn route_and_deliberate(
        &self,
        query: &Query,
        persona: &Persona,
        force_deep: bool,
    ) -> Result<DeliberationOutcome, DeliberationError> {
        self.route_and_deliberate_with_progress(query, persona, force_deep, &NoProgress)
            .await
    }

    pub async fn route_and_deliberate_with_progress(
        &self,
        query: &Query,
        persona: &Persona,
        force_deep: bool,
        progress: &dyn ProgressNotifier,
    ) -> Result<DeliberationOutcome, DeliberationError> {
        let started_at = Utc::now();
        let decision = self.classify_with_progress(query, force_deep, progress).await?;

        if decision.route() == Route::FastLane {
            info!("Fast lane: skipping the council");
            return Ok(DeliberationOutcome::FastLane(decision));
        }

        let reports = self.run_departments(query, progress).await?;
        let council = self.run_council(query, persona, &reports, progress).await?;

        Ok(DeliberationOutcome::DeepLane(Box::new(DeepLaneReport {
            decision,
            reports,
            council,
            started_at,
            finished_at: Utc::now(),
        })))
    }

    /// Skip routing and the departments; debate the raw query
    pub async fn convene_council(
        &self,
        query: &Query,
        persona: &Persona,
    ) -> Result<CouncilOutcome, DeliberationError> {
        self.convene_council_with_progress(query, persona, &NoProgress)
            .await
    }

    pub async fn convene_council_with_progress(
        &self,
        query: &Query,
        persona: &Persona,
        progress: &dyn ProgressNotifier,
    ) -> Result<CouncilOutcome, DeliberationError> {
        info!("Convening the council without department reports");
        self.run_council(query, persona, &[], progress).await
    }

    /// Only the router decision
    pub async fn classify(
        &self,
        query: &Query,
        force_deep: bool,
    ) -> Result<RoutingDecision, DeliberationError> {
        self.classify_with_progress(query, force_deep, &NoProgress)
            .await
    }

    pub async fn classify_with_progress(
        &self,
        query: &Query,
        force_deep: bool,
        progress: &dyn ProgressNotifier,
    ) -> Result<RoutingDecision, DeliberationError> {
        progress.on_stage_start(Stage::Routing, "router", 1);
        let result = self.router.classify(query, force_deep).await;
        progress.on_task_complete(Stage::Routing, "router", "classification", result.is_ok());
        let decision = result?;
        progress.on_stage_complete(Stage::Routing, "router");
        progress.on_route_decided(&decision);
        Ok(decision)
    }

    /// All departments concurrently; reports come back in roster order
    async fn run_departments(
        &self,
        query: &Query,
        progress: &dyn ProgressNotifier,
    ) -> Result<Vec<DepartmentReport>, DeliberationError> {
        info!("Deep lane: convening {} departments", self.departments.len());
        try_join_all(self.departments.iter().map(|department| async move {
            department
                .deliberate(query, progress)
                .await
                .map_err(|e| DeliberationError::from_department(department.name(), e))
        }))
        .await
    }

    async fn run_council(
        &self,
        query: &Query,
        persona: &Persona,
        reports: &[DepartmentReport],
        progress: &dyn ProgressNotifier,
    ) -> Result<CouncilOutcome, DeliberationError> {
        let debate = self.council.debate(query, reports, progress).await?;

        progress.on_stage_start(Stage::Verdict, "sovereign", 1);
        let result = self.sovereign.judge(query, persona, &debate).await;
        progress.on_task_complete(Stage::Verdict, "sovereign", persona.name(), result.is_ok());
        let verdict = result?;
        progress.on_stage_complete(Stage::Verdict, "sovereign");

        Ok(CouncilOutcome {
            persona: persona.clone(),
            debate,
            verdict,
        })
    }
}
