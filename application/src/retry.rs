//! Bounded retry with exponential backoff
//!
//! Every provider and context call in a deliberation runs through
//! [`RetryExecutor::execute`].

use crate::ports::retry_observer::{RetryNotice, RetryObserver, TracingRetryObserver};
use council_domain::RetryPolicy;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// The operation failed on every attempt
#[derive(Error, Debug)]
pub enum RetryError<E>
where
    E: fmt::Debug + fmt::Display,
{
    #[error("{operation} failed after {attempts} attempts: {last}")]
    Exhausted {
        operation: String,
        attempts: u32,
        last: E,
    },
}

impl<E> RetryError<E>
where
    E: fmt::Debug + fmt::Display,
{
    pub fn attempts(&self) -> u32 {
        match self {
            RetryError::Exhausted { attempts, .. } => *attempts,
        }
    }

    /// The cause of the final failed attempt
    pub fn last(&self) -> &E {
        match self {
            RetryError::Exhausted { last, .. } => last,
        }
    }

    pub fn operation(&self) -> &str {
        match self {
            RetryError::Exhausted { operation, .. } => operation,
        }
    }
}

/// Runs fallible async operations under a [`RetryPolicy`]
#[derive(Clone)]
pub struct RetryExecutor {
    policy: RetryPolicy,
    observer: Arc<dyn RetryObserver>,
}

impl Default for RetryExecutor {
    fn default() -> Self {
        Self::new(RetryPolicy::default())
    }
}

impl fmt::Debug for RetryExecutor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryExecutor")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl RetryExecutor {
    /// Executor that reports retries through `tracing`
    pub fn new(policy: RetryPolicy) -> Self {
        Self {
            policy,
            observer: Arc::new(TracingRetryObserver),
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn RetryObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Run `operation` until it succeeds or the policy runs out of attempts.
    ///
    /// After the failed attempt `n` (0-based) the executor waits
    /// `base_delay * 2^n`. No wait follows the final attempt.
    pub async fn execute<T, E, F, Fut>(
        &self,
        label: &str,
        mut operation: F,
    ) -> Result<T, RetryError<E>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: fmt::Debug + fmt::Display,
    {
        let mut attempt = 0u32;
        loop {
            match operation().await {
                Ok(value) => {
                    if attempt > 0 {
                        debug!("{} succeeded on attempt {}", label, attempt + 1);
                    }
                    return Ok(value);
                }
                Err(error) => {
                    if !self.policy.should_retry(attempt) {
                        return Err(RetryError::Exhausted {
                            operation: label.to_string(),
                            attempts: attempt + 1,
                            last: error,
                        });
                    }
                    let delay = self.policy.delay_for(attempt);
                    self.observer.on_retry(&RetryNotice {
                        operation: label,
                        attempt,
                        delay,
                        error: error.to_string(),
                    });
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}
