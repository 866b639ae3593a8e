//! Department use case
//!
//! One micro-council run:
//!
//! 1. **Context**: one lookup scoped by department name
//! 2. **Drafting**: three workers answer in parallel
//! 3. **Review**: six cross-peer reviews, bounded by a semaphore
//! 4. **Synthesis**: the head merges scored excerpts into the report
//!
//! Each stage is a hard barrier. An exhausted retry anywhere aborts the
//! department and drops its in-flight siblings.

use crate::config::ReviewParams;
use crate::ports::context_provider::{ContextError, ContextProvider};
use crate::ports::progress::ProgressNotifier;
use crate::ports::reasoning_provider::{ProviderError, ReasoningProvider, ask};
use crate::retry::{RetryError, RetryExecutor};
use council_domain::signature::{DraftAnswer, ReviewDraft, SynthesizeReport};
use council_domain::{
    DepartmentReport, DomainError, Draft, PeerReview, Query, Stage, WORKERS_PER_DEPARTMENT,
    WorkerId, review_assignments, score_drafts, synthesis_payload,
};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum DepartmentError {
    #[error("Context lookup failed: {0}")]
    Context(#[source] RetryError<ContextError>),

    #[error("{worker} draft failed: {source}")]
    Draft {
        worker: WorkerId,
        source: RetryError<ProviderError>,
    },

    #[error("{reviewer} review of {target} failed: {source}")]
    Review {
        reviewer: WorkerId,
        target: WorkerId,
        source: RetryError<ProviderError>,
    },

    #[error("Synthesis failed: {0}")]
    Synthesis(#[source] RetryError<ProviderError>),

    #[error("Task failed: {0}")]
    TaskFailed(String),
}

/// A worker bound to its provider for one department
#[derive(Clone)]
pub struct Worker {
    id: WorkerId,
    role: String,
    provider: Arc<dyn ReasoningProvider>,
}

impl Worker {
    pub fn new(
        id: WorkerId,
        role: impl Into<String>,
        provider: Arc<dyn ReasoningProvider>,
    ) -> Self {
        Self {
            id,
            role: role.into(),
            provider,
        }
    }

    pub fn id(&self) -> WorkerId {
        self.id
    }

    pub fn role(&self) -> &str {
        &self.role
    }
}

pub struct Department {
    name: String,
    goal: String,
    workers: Vec<Worker>,
    head: Arc<dyn ReasoningProvider>,
    context: Arc<dyn ContextProvider>,
    retry: RetryExecutor,
    review: ReviewParams,
}

impl Department {
    /// Fails unless exactly three workers are given; worker ids follow
    /// their position.
    pub fn new(
        name: impl Into<String>,
        goal: impl Into<String>,
        workers: Vec<(String, Arc<dyn ReasoningProvider>)>,
        head: Arc<dyn ReasoningProvider>,
        context: Arc<dyn ContextProvider>,
        retry: RetryExecutor,
        review: ReviewParams,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        if workers.len() != WORKERS_PER_DEPARTMENT {
            return Err(DomainError::WorkerCount {
                department: name,
                count: workers.len(),
            });
        }
        let workers = workers
            .into_iter()
            .enumerate()
            .map(|(i, (role, provider))| Worker::new(WorkerId::new(i), role, provider))
            .collect();
        Ok(Self {
            name,
            goal: goal.into(),
            workers,
            head,
            context,
            retry,
            review,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn goal(&self) -> &str {
        &self.goal
    }

    pub fn workers(&self) -> &[Worker] {
        &self.workers
    }

    /// Run the full micro-council for `query`
    pub async fn deliberate(
        &self,
        query: &Query,
        progress: &dyn ProgressNotifier,
    ) -> Result<DepartmentReport, DepartmentError> {
        info!("Department {}: convening", self.name);

        let context = self.stage_context(query, progress).await?;
        let drafts = self.stage_drafting(query, &context, progress).await?;
        let reviews = self.stage_review(&drafts, progress).await?;
        let final_text = self
            .stage_synthesis(query, &drafts, &reviews, progress)
            .await?;

        info!("Department {}: report ready", self.name);
        Ok(
            DepartmentReport::new(&self.name, &self.goal, final_text)
                .with_deliberation(drafts, reviews),
        )
    }

    async fn stage_context(
        &self,
        query: &Query,
        progress: &dyn ProgressNotifier,
    ) -> Result<String, DepartmentError> {
        progress.on_stage_start(Stage::Context, &self.name, 1);
        let label = format!("{} context lookup", self.name);
        let result = self
            .retry
            .execute(&label, || self.context.lookup(query.text(), &self.name))
            .await;
        progress.on_task_complete(Stage::Context, &self.name, "context", result.is_ok());
        let context = result.map_err(DepartmentError::Context)?;
        debug!("Department {}: {} chars of context", self.name, context.len());
        progress.on_stage_complete(Stage::Context, &self.name);
        Ok(context)
    }

    /// Drafts in worker order
    async fn stage_drafting(
        &self,
        query: &Query,
        context: &str,
        progress: &dyn ProgressNotifier,
    ) -> Result<Vec<Draft>, DepartmentError> {
        progress.on_stage_start(Stage::Drafting, &self.name, self.workers.len());

        let mut join_set = JoinSet::new();
        for worker in &self.workers {
            let provider = Arc::clone(&worker.provider);
            let retry = self.retry.clone();
            let id = worker.id;
            let label = format!("{}/{} draft", self.name, id);
            let call = DraftAnswer {
                department_goal: self.goal.clone(),
                rag_context: context.to_string(),
                query: query.text().to_string(),
            };

            join_set.spawn(async move {
                let result = retry
                    .execute(&label, || ask(provider.as_ref(), &call))
                    .await;
                (id, result)
            });
        }

        let mut slots: Vec<Option<Draft>> = vec![None; self.workers.len()];
        while let Some(joined) = join_set.join_next().await {
            let (id, result) = joined.map_err(|e| DepartmentError::TaskFailed(e.to_string()))?;
            let task = id.label();
            match result {
                Ok(text) => {
                    debug!("Department {}: {} drafted", self.name, id);
                    progress.on_task_complete(Stage::Drafting, &self.name, &task, true);
                    slots[id.index()] = Some(Draft::new(id, text));
                }
                Err(source) => {
                    warn!("Department {}: {} draft failed: {}", self.name, id, source);
                    progress.on_task_complete(Stage::Drafting, &self.name, &task, false);
                    return Err(DepartmentError::Draft { worker: id, source });
                }
            }
        }

        progress.on_stage_complete(Stage::Drafting, &self.name);
        Ok(slots.into_iter().flatten().collect())
    }

    /// Reviews grouped by target, reviewers ascending
    async fn stage_review(
        &self,
        drafts: &[Draft],
        progress: &dyn ProgressNotifier,
    ) -> Result<Vec<PeerReview>, DepartmentError> {
        let assignments = review_assignments();
        progress.on_stage_start(Stage::Review, &self.name, assignments.len());

        let permits = Arc::new(Semaphore::new(self.review.max_concurrent.max(1)));
        let mut join_set = JoinSet::new();

        for (slot, assignment) in assignments.iter().enumerate() {
            let reviewer = assignment.reviewer;
            let target = assignment.target;
            let provider = Arc::clone(&self.workers[reviewer.index()].provider);
            let retry = self.retry.clone();
            let permits = Arc::clone(&permits);
            let label = format!("{}/{} review of {}", self.name, reviewer, target);
            let call = ReviewDraft {
                department_goal: self.goal.clone(),
                proposal_text: drafts[target.index()].text.clone(),
            };

            join_set.spawn(async move {
                // The semaphore is never closed, so acquisition cannot fail.
                let _permit = permits.acquire_owned().await.ok();
                let result = retry
                    .execute(&label, || ask(provider.as_ref(), &call))
                    .await;
                (slot, reviewer, target, result)
            });
        }

        let mut slots: Vec<Option<PeerReview>> = vec![None; assignments.len()];
        while let Some(joined) = join_set.join_next().await {
            let (slot, reviewer, target, result) =
                joined.map_err(|e| DepartmentError::TaskFailed(e.to_string()))?;
            let task = format!("{} -> {}", reviewer, target);
            match result {
                Ok(outcome) => {
                    progress.on_task_complete(Stage::Review, &self.name, &task, true);
                    slots[slot] = Some(PeerReview::new(
                        reviewer,
                        target,
                        outcome.score,
                        outcome.critique,
                    ));
                }
                Err(source) => {
                    warn!(
                        "Department {}: {} review of {} failed: {}",
                        self.name, reviewer, target, source
                    );
                    progress.on_task_complete(Stage::Review, &self.name, &task, false);
                    return Err(DepartmentError::Review {
                        reviewer,
                        target,
                        source,
                    });
                }
            }
        }

        progress.on_stage_complete(Stage::Review, &self.name);
        Ok(slots.into_iter().flatten().collect())
    }

    async fn stage_synthesis(
        &self,
        query: &Query,
        drafts: &[Draft],
        reviews: &[PeerReview],
        progress: &dyn ProgressNotifier,
    ) -> Result<String, DepartmentError> {
        progress.on_stage_start(Stage::Synthesis, &self.name, 1);

        let scored = score_drafts(drafts, reviews);
        for entry in &scored {
            debug!(
                "Department {}: {} averaged {:.2}",
                self.name, entry.draft.author, entry.average
            );
        }
        let call = SynthesizeReport {
            department_goal: self.goal.clone(),
            query: query.text().to_string(),
            report_data: synthesis_payload(&scored, self.review.excerpt_chars),
        };

        let label = format!("{} synthesis", self.name);
        let result = self
            .retry
            .execute(&label, || ask(self.head.as_ref(), &call))
            .await;
        progress.on_task_complete(Stage::Synthesis, &self.name, "head", result.is_ok());
        let text = result.map_err(DepartmentError::Synthesis)?;

        progress.on_stage_complete(Stage::Synthesis, &self.name);
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::progress::NoProgress;
    use crate::use_cases::test_support::{RecordingContext, RecordingProgress, ScriptedProvider};
    use async_trait::async_trait;
    use council_domain::{CallKind, ReasoningRequest, ReasoningResponse, RetryPolicy};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn fast_retry() -> RetryExecutor {
        RetryExecutor::new(RetryPolicy::new(3, Duration::from_millis(1)).unwrap())
    }

    fn department(
        workers: &[Arc<ScriptedProvider>; 3],
        head: Arc<ScriptedProvider>,
        context: Arc<RecordingContext>,
    ) -> Department {
        let workers = workers
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let provider: Arc<dyn ReasoningProvider> = p.clone();
                (format!("Analyst {}", i + 1), provider)
            })
            .collect();
        Department::new(
            "Finance",
            "Maximize ROI",
            workers,
            head,
            context,
            fast_retry(),
            ReviewParams::default(),
        )
        .unwrap()
    }

    fn workers(scores: [&str; 3]) -> [Arc<ScriptedProvider>; 3] {
        [0usize, 1, 2].map(|i| {
            Arc::new(ScriptedProvider::new(&format!("w{}", i + 1)).with_score(scores[i]))
        })
    }

    #[tokio::test]
    async fn test_full_run_produces_report() {
        let workers = workers(["6", "8", "10/10"]);
        let head = Arc::new(ScriptedProvider::new("head"));
        let context = Arc::new(RecordingContext::default());
        let dept = department(&workers, head.clone(), context.clone());

        let report = dept
            .deliberate(&Query::new("Should we pause the AWS migration?"), &NoProgress)
            .await
            .unwrap();

        assert_eq!(report.department, "Finance");
        assert_eq!(report.goal, "Maximize ROI");
        assert_eq!(report.drafts.len(), 3);
        assert_eq!(report.reviews.len(), 6);
        assert_eq!(*context.scopes.lock().unwrap(), vec!["Finance".to_string()]);

        // Draft 1 is scored by w2 and w3, draft 2 by w1 and w3, draft 3 by w1 and w2.
        assert_eq!(
            report.final_text,
            "head report <[DRAFT 1]: w1 draft (Avg: 9.00)\n\
             [DRAFT 2]: w2 draft (Avg: 8.00)\n\
             [DRAFT 3]: w3 draft (Avg: 7.00)>"
        );
    }

    #[tokio::test]
    async fn test_each_draft_gets_two_peer_reviews() {
        let workers = workers(["7", "7", "7"]);
        let dept = department(
            &workers,
            Arc::new(ScriptedProvider::new("head")),
            Arc::new(RecordingContext::default()),
        );

        let report = dept.deliberate(&Query::new("Q"), &NoProgress).await.unwrap();

        assert!(report.reviews.iter().all(|r| !r.is_self_review()));
        for id in (0..3).map(WorkerId::new) {
            assert_eq!(report.reviews_of(id).count(), 2);
        }
        for worker in &workers {
            assert_eq!(worker.count(CallKind::Draft), 1);
            assert_eq!(worker.count(CallKind::Review), 2);
        }
    }

    #[tokio::test]
    async fn test_reviewer_sees_target_draft() {
        let workers = workers(["7", "7", "7"]);
        let dept = department(
            &workers,
            Arc::new(ScriptedProvider::new("head")),
            Arc::new(RecordingContext::default()),
        );
        dept.deliberate(&Query::new("Q"), &NoProgress).await.unwrap();

        let mut proposals: Vec<String> = workers[0]
            .requests()
            .iter()
            .filter(|r| r.kind == CallKind::Review)
            .filter_map(|r| r.input("proposal_text").map(str::to_string))
            .collect();
        proposals.sort();
        assert_eq!(proposals, vec!["w2 draft".to_string(), "w3 draft".to_string()]);
    }

    #[tokio::test]
    async fn test_drafts_receive_context_and_goal() {
        let workers = workers(["7", "7", "7"]);
        let dept = department(
            &workers,
            Arc::new(ScriptedProvider::new("head")),
            Arc::new(RecordingContext::default()),
        );
        dept.deliberate(&Query::new("Cut costs?"), &NoProgress)
            .await
            .unwrap();

        let draft = workers[1]
            .requests()
            .into_iter()
            .find(|r| r.kind == CallKind::Draft)
            .unwrap();
        assert_eq!(draft.input("rag_context"), Some("context for Finance"));
        assert_eq!(draft.input("department_goal"), Some("Maximize ROI"));
        assert_eq!(draft.input("query"), Some("Cut costs?"));
    }

    #[tokio::test]
    async fn test_unreadable_scores_count_as_neutral() {
        let workers = workers(["great", "great", "great"]);
        let dept = department(
            &workers,
            Arc::new(ScriptedProvider::new("head")),
            Arc::new(RecordingContext::default()),
        );
        let report = dept.deliberate(&Query::new("Q"), &NoProgress).await.unwrap();
        assert!(report.reviews.iter().all(|r| r.score == 5.0));
        assert!(report.final_text.contains("(Avg: 5.00)"));
    }

    #[tokio::test]
    async fn test_exhausted_draft_aborts_department() {
        let workers = [
            Arc::new(ScriptedProvider::new("w1")),
            Arc::new(ScriptedProvider::new("w2").failing_on(CallKind::Draft)),
            Arc::new(ScriptedProvider::new("w3")),
        ];
        let head = Arc::new(ScriptedProvider::new("head"));
        let dept = department(&workers, head.clone(), Arc::new(RecordingContext::default()));

        let err = dept
            .deliberate(&Query::new("Q"), &NoProgress)
            .await
            .unwrap_err();

        match err {
            DepartmentError::Draft { worker, source } => {
                assert_eq!(worker, WorkerId::new(1));
                assert_eq!(source.attempts(), 3);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(workers[1].count(CallKind::Draft), 3);
        assert!(head.requests().is_empty());
    }

    #[tokio::test]
    async fn test_transient_synthesis_failure_recovers() {
        let workers = workers(["7", "7", "7"]);
        let dept = department(
            &workers,
            Arc::new(ScriptedProvider::new("head").failing_first(1)),
            Arc::new(RecordingContext::default()),
        );
        let report = dept.deliberate(&Query::new("Q"), &NoProgress).await.unwrap();
        assert!(report.final_text.starts_with("head report"));
    }

    #[tokio::test]
    async fn test_progress_stage_order() {
        let workers = workers(["7", "7", "7"]);
        let dept = department(
            &workers,
            Arc::new(ScriptedProvider::new("head")),
            Arc::new(RecordingContext::default()),
        );
        let progress = RecordingProgress::default();
        dept.deliberate(&Query::new("Q"), &progress).await.unwrap();

        assert_eq!(
            *progress.started.lock().unwrap(),
            vec![
                "Finance:context",
                "Finance:drafting",
                "Finance:review",
                "Finance:synthesis"
            ]
        );
        // 1 context + 3 drafts + 6 reviews + 1 synthesis
        assert_eq!(progress.completed_tasks.lock().unwrap().len(), 11);
    }

    #[tokio::test]
    async fn test_exhausted_context_lookup_aborts_before_drafting() {
        let workers = workers(["7", "7", "7"]);
        let head = Arc::new(ScriptedProvider::new("head"));
        let context = Arc::new(FailingContext::default());
        let dept = Department::new(
            "Finance",
            "Maximize ROI",
            workers
                .iter()
                .map(|p| {
                    let provider: Arc<dyn ReasoningProvider> = p.clone();
                    ("Analyst".to_string(), provider)
                })
                .collect(),
            head.clone(),
            context.clone(),
            fast_retry(),
            ReviewParams::default(),
        )
        .unwrap();

        let err = dept
            .deliberate(&Query::new("Q"), &NoProgress)
            .await
            .unwrap_err();

        match err {
            DepartmentError::Context(source) => assert_eq!(source.attempts(), 3),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(context.calls.load(Ordering::SeqCst), 3);
        for worker in &workers {
            assert!(worker.requests().is_empty());
        }
        assert!(head.requests().is_empty());
    }

    #[tokio::test]
    async fn test_exhausted_review_skips_synthesis() {
        let workers = [
            Arc::new(ScriptedProvider::new("w1")),
            Arc::new(ScriptedProvider::new("w2")),
            Arc::new(ScriptedProvider::new("w3").failing_on(CallKind::Review)),
        ];
        let head = Arc::new(ScriptedProvider::new("head"));
        let dept = department(&workers, head.clone(), Arc::new(RecordingContext::default()));

        let err = dept
            .deliberate(&Query::new("Q"), &NoProgress)
            .await
            .unwrap_err();

        match err {
            DepartmentError::Review {
                reviewer, source, ..
            } => {
                assert_eq!(reviewer, WorkerId::new(2));
                assert_eq!(source.attempts(), 3);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(head.requests().is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_fan_out_respects_concurrency_bounds() {
        assert_eq!(peak_in_flight(ReviewParams::default()).await, (3, 6));
        assert_eq!(
            peak_in_flight(ReviewParams::default().with_max_concurrent(2)).await,
            (3, 2)
        );
    }

    /// Peak simultaneous (draft, review) calls over one deliberation
    async fn peak_in_flight(review: ReviewParams) -> (usize, usize) {
        let drafts = Arc::new(Gauge::default());
        let reviews = Arc::new(Gauge::default());
        let workers = (0..3)
            .map(|i| {
                let provider: Arc<dyn ReasoningProvider> = Arc::new(SlowProvider {
                    inner: ScriptedProvider::new(&format!("w{}", i + 1)),
                    drafts: drafts.clone(),
                    reviews: reviews.clone(),
                });
                (format!("Analyst {}", i + 1), provider)
            })
            .collect();
        let dept = Department::new(
            "Finance",
            "Maximize ROI",
            workers,
            Arc::new(ScriptedProvider::new("head")),
            Arc::new(RecordingContext::default()),
            fast_retry(),
            review,
        )
        .unwrap();

        dept.deliberate(&Query::new("Q"), &NoProgress).await.unwrap();
        (drafts.peak(), reviews.peak())
    }

    #[derive(Default)]
    struct Gauge {
        current: AtomicUsize,
        peak: AtomicUsize,
    }

    impl Gauge {
        fn enter(&self) {
            let now = self.current.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
        }

        fn leave(&self) {
            self.current.fetch_sub(1, Ordering::SeqCst);
        }

        fn peak(&self) -> usize {
            self.peak.load(Ordering::SeqCst)
        }
    }

    /// Holds each draft and review call open for 50 ms
    struct SlowProvider {
        inner: ScriptedProvider,
        drafts: Arc<Gauge>,
        reviews: Arc<Gauge>,
    }

    #[async_trait]
    impl ReasoningProvider for SlowProvider {
        fn name(&self) -> &str {
            self.inner.name()
        }

        async fn invoke(
            &self,
            request: &ReasoningRequest,
        ) -> Result<ReasoningResponse, ProviderError> {
            let gauge = match request.kind {
                CallKind::Draft => Some(&self.drafts),
                CallKind::Review => Some(&self.reviews),
                _ => None,
            };
            if let Some(gauge) = gauge {
                gauge.enter();
                tokio::time::sleep(Duration::from_millis(50)).await;
                gauge.leave();
            }
            self.inner.invoke(request).await
        }
    }

    /// Fails every lookup
    #[derive(Default)]
    struct FailingContext {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ContextProvider for FailingContext {
        async fn lookup(&self, _query: &str, _scope: &str) -> Result<String, ContextError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(ContextError::Other("index offline".to_string()))
        }
    }

    #[test]
    fn test_rejects_wrong_worker_count() {
        let provider: Arc<dyn ReasoningProvider> = Arc::new(ScriptedProvider::new("w"));
        let result = Department::new(
            "Tech",
            "System Stability",
            vec![("a".to_string(), provider.clone())],
            provider,
            Arc::new(RecordingContext::default()),
            fast_retry(),
            ReviewParams::default(),
        );
        assert!(matches!(
            result,
            Err(DomainError::WorkerCount { count: 1, .. })
        ));
    }
}
