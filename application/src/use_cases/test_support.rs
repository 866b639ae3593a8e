//! Scripted collaborators shared by the use case tests.

use crate::ports::context_provider::{ContextError, ContextProvider};
use crate::ports::progress::ProgressNotifier;
use crate::ports::provider_lookup::{ProviderLookup, Seat};
use crate::ports::reasoning_provider::{ProviderError, ReasoningProvider};
use async_trait::async_trait;
use council_domain::{CallKind, ReasoningRequest, ReasoningResponse, Stage};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

/// Answers every call kind with text derived from its inputs.
///
/// - drafts: `"{name} draft"`
/// - syntheses: `"{name} report <{report_data}>"`
/// - openings: `"{role} opening"` (plus `" with report"` when one was given)
/// - rebuttals: `"{role} rebuts [{opponent_arguments}]"`
/// - verdict reasoning: every `*_position` input joined by `" || "`
pub(crate) struct ScriptedProvider {
    name: String,
    score: String,
    fail_first: AtomicU32,
    always_fail: Option<CallKind>,
    requests: Mutex<Vec<ReasoningRequest>>,
}

impl ScriptedProvider {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            score: "7.5".to_string(),
            fail_first: AtomicU32::new(0),
            always_fail: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Raw value returned for `complexity_score` and review `score`
    pub fn with_score(mut self, score: &str) -> Self {
        self.score = score.to_string();
        self
    }

    /// Fail the first `n` calls with a transport error
    pub fn failing_first(self, n: u32) -> Self {
        self.fail_first.store(n, Ordering::SeqCst);
        self
    }

    /// Fail every call of one kind
    pub fn failing_on(mut self, kind: CallKind) -> Self {
        self.always_fail = Some(kind);
        self
    }

    pub fn requests(&self) -> Vec<ReasoningRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn count(&self, kind: CallKind) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.kind == kind)
            .count()
    }

    fn respond(&self, request: &ReasoningRequest) -> ReasoningResponse {
        let input = |name: &str| request.input(name).unwrap_or_default().to_string();
        let response = ReasoningResponse::new();
        match request.kind {
            CallKind::Classification => response
                .with_field("complexity_score", &self.score)
                .with_field("reasoning", "scripted"),
            CallKind::Draft => response.with_field("draft_answer", format!("{} draft", self.name)),
            CallKind::Review => response
                .with_field("score", &self.score)
                .with_field("critique", format!("{} critique", self.name)),
            CallKind::Synthesis => response.with_field(
                "final_answer",
                format!("{} report <{}>", self.name, input("report_data")),
            ),
            CallKind::Opening => {
                let suffix = if request.input("micro_report").is_some() {
                    " with report"
                } else {
                    ""
                };
                response.with_field("argument", format!("{} opening{}", input("role"), suffix))
            }
            CallKind::Rebuttal => response.with_field(
                "rebuttal",
                format!("{} rebuts [{}]", input("role"), input("opponent_arguments")),
            ),
            CallKind::Verdict => {
                let positions: Vec<_> = request
                    .inputs
                    .iter()
                    .filter(|f| f.name.ends_with("_position"))
                    .map(|f| f.value.clone())
                    .collect();
                response
                    .with_field("internal_thought_process", positions.join(" || "))
                    .with_field("final_decision", format!("{} decides", self.name))
            }
        }
    }
}

#[async_trait]
impl ReasoningProvider for ScriptedProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn invoke(&self, request: &ReasoningRequest) -> Result<ReasoningResponse, ProviderError> {
        self.requests.lock().unwrap().push(request.clone());
        if self.always_fail == Some(request.kind) {
            return Err(ProviderError::Transport(format!("{} unavailable", self.name)));
        }
        let remaining = self.fail_first.load(Ordering::SeqCst);
        if remaining > 0 {
            self.fail_first.store(remaining - 1, Ordering::SeqCst);
            return Err(ProviderError::Transport("connection reset".to_string()));
        }
        Ok(self.respond(request))
    }
}

/// Puts the same provider in every seat
pub(crate) struct SingleProvider(pub Arc<ScriptedProvider>);

impl ProviderLookup for SingleProvider {
    fn provider_for(&self, _seat: Seat<'_>) -> Arc<dyn ReasoningProvider> {
        self.0.clone()
    }
}

/// Returns `"context for {scope}"` and records each lookup
#[derive(Default)]
pub(crate) struct RecordingContext {
    pub scopes: Mutex<Vec<String>>,
}

#[async_trait]
impl ContextProvider for RecordingContext {
    async fn lookup(&self, _query: &str, scope: &str) -> Result<String, ContextError> {
        self.scopes.lock().unwrap().push(scope.to_string());
        Ok(format!("context for {}", scope))
    }
}

/// Records stage starts as `"{scope}:{stage}"`
#[derive(Default)]
pub(crate) struct RecordingProgress {
    pub started: Mutex<Vec<String>>,
    pub completed_tasks: Mutex<Vec<(Stage, bool)>>,
}

impl ProgressNotifier for RecordingProgress {
    fn on_stage_start(&self, stage: Stage, scope: &str, _total_tasks: usize) {
        self.started
            .lock()
            .unwrap()
            .push(format!("{}:{}", scope, stage.as_str()));
    }

    fn on_task_complete(&self, stage: Stage, _scope: &str, _task: &str, success: bool) {
        self.completed_tasks.lock().unwrap().push((stage, success));
    }

    fn on_stage_complete(&self, _stage: Stage, _scope: &str) {}
}
