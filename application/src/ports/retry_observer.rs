//! Retry notification port

use std::time::Duration;
use tracing::warn;

/// One failed attempt that will be retried
#[derive(Debug, Clone)]
pub struct RetryNotice<'a> {
    /// Label of the wrapped operation, e.g. `"Finance/Worker 2 draft"`
    pub operation: &'a str,
    /// 0-based index of the attempt that failed
    pub attempt: u32,
    /// Wait before the next attempt
    pub delay: Duration,
    pub error: String,
}

/// Advisory sink for retry events. Must not fail or block.
pub trait RetryObserver: Send + Sync {
    fn on_retry(&self, notice: &RetryNotice<'_>);
}

/// Logs every retry at warn level
pub struct TracingRetryObserver;

impl RetryObserver for TracingRetryObserver {
    fn on_retry(&self, notice: &RetryNotice<'_>) {
        warn!(
            "{} failed on attempt {}: {} (retrying in {:?})",
            notice.operation,
            notice.attempt + 1,
            notice.error,
            notice.delay
        );
    }
}
