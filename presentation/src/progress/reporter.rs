//! Progress reporting for deliberations

use colored::Colorize;
use council_application::{ProgressNotifier, RetryNotice, RetryObserver};
use council_domain::{RoutingDecision, Stage};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::collections::HashMap;
use std::sync::Mutex;

fn bar_key(stage: Stage, scope: &str) -> String {
    format!("{}:{}", scope, stage.as_str())
}

fn stage_title(stage: Stage, scope: &str) -> String {
    format!("{} {}", scope, stage.display_name())
}

/// Reports progress with one bar per running stage.
///
/// Departments deliberate concurrently, so several bars can be live at once.
pub struct ProgressReporter {
    multi: MultiProgress,
    bars: Mutex<HashMap<String, ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            bars: Mutex::new(HashMap::new()),
        }
    }

    fn stage_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .map(|style| style.progress_chars("=>-"))
            .unwrap_or_else(|_| ProgressStyle::default_bar())
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_stage_start(&self, stage: Stage, scope: &str, total_tasks: usize) {
        let pb = self.multi.add(ProgressBar::new(total_tasks as u64));
        pb.set_style(Self::stage_style());
        pb.set_prefix(stage_title(stage, scope));
        pb.set_message("Starting...");

        if let Ok(mut bars) = self.bars.lock() {
            bars.insert(bar_key(stage, scope), pb);
        }
    }

    fn on_task_complete(&self, stage: Stage, scope: &str, task: &str, success: bool) {
        let Ok(bars) = self.bars.lock() else {
            return;
        };
        if let Some(pb) = bars.get(&bar_key(stage, scope)) {
            let status = if success {
                format!("{} {}", "v".green(), task)
            } else {
                format!("{} {}", "x".red(), task)
            };
            pb.set_message(status);
            pb.inc(1);
        }
    }

    fn on_stage_complete(&self, stage: Stage, scope: &str) {
        let pb = match self.bars.lock() {
            Ok(mut bars) => bars.remove(&bar_key(stage, scope)),
            Err(_) => None,
        };
        if let Some(pb) = pb {
            pb.finish_with_message(format!("{}", "done".green()));
        }
    }

    fn on_route_decided(&self, decision: &RoutingDecision) {
        let _ = self.multi.println(format!(
            "{} {} ({:.1}/10): {}",
            "Route:".cyan().bold(),
            decision.route(),
            decision.score(),
            decision.reasoning()
        ));
    }
}

impl RetryObserver for ProgressReporter {
    fn on_retry(&self, notice: &RetryNotice<'_>) {
        let _ = self.multi.println(format!(
            "{} {} failed (attempt {}), retrying in {:.1}s: {}",
            "!".yellow().bold(),
            notice.operation,
            notice.attempt + 1,
            notice.delay.as_secs_f64(),
            notice.error
        ));
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_stage_start(&self, stage: Stage, scope: &str, total_tasks: usize) {
        println!(
            "{} {} ({} tasks)",
            "->".cyan(),
            stage_title(stage, scope).bold(),
            total_tasks
        );
    }

    fn on_task_complete(&self, _stage: Stage, scope: &str, task: &str, success: bool) {
        if success {
            println!("  {} {} {}", "v".green(), scope, task);
        } else {
            println!("  {} {} {} (failed)", "x".red(), scope, task);
        }
    }

    fn on_stage_complete(&self, _stage: Stage, _scope: &str) {}

    fn on_route_decided(&self, decision: &RoutingDecision) {
        println!(
            "{} {} ({:.1}/10)",
            "Route:".cyan().bold(),
            decision.route(),
            decision.score()
        );
    }
}

impl RetryObserver for SimpleProgress {
    fn on_retry(&self, notice: &RetryNotice<'_>) {
        println!(
            "  {} {} failed (attempt {}), retrying in {:.1}s",
            "!".yellow(),
            notice.operation,
            notice.attempt + 1,
            notice.delay.as_secs_f64()
        );
    }
}
