//! Progress notification port
//!
//! Defines the interface for reporting progress during a deliberation.

use council_domain::{RoutingDecision, Stage};

/// Callback for progress updates during a deliberation
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (console, log lines, etc.)
///
/// `scope` names who runs the stage: a department name, `"council"` or
/// `"sovereign"`. Departments run concurrently, so calls for different
/// scopes interleave.
pub trait ProgressNotifier: Send + Sync {
    /// Called when a stage starts
    fn on_stage_start(&self, stage: Stage, scope: &str, total_tasks: usize);

    /// Called when a task completes within a stage
    fn on_task_complete(&self, stage: Stage, scope: &str, task: &str, success: bool);

    /// Called when a stage completes
    fn on_stage_complete(&self, stage: Stage, scope: &str);

    /// Called once the router has picked a lane
    fn on_route_decided(&self, _decision: &RoutingDecision) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_stage_start(&self, _stage: Stage, _scope: &str, _total_tasks: usize) {}
    fn on_task_complete(&self, _stage: Stage, _scope: &str, _task: &str, _success: bool) {}
    fn on_stage_complete(&self, _stage: Stage, _scope: &str) {}
}
