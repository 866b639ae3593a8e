//! Retry policy value object
//!
//! Pure backoff arithmetic; the executor that sleeps and re-invokes lives in
//! the application layer.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay: DEFAULT_BASE_DELAY,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Result<Self, DomainError> {
        if max_attempts == 0 {
            return Err(DomainError::ZeroAttempts);
        }
        Ok(Self {
            max_attempts,
            base_delay,
        })
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn base_delay(&self) -> Duration {
        self.base_delay
    }

    /// Wait after the failed attempt with 0-based index `attempt`:
    /// `base_delay * 2^attempt`, saturating.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 2u32.checked_pow(attempt).unwrap_or(u32::MAX);
        self.base_delay.saturating_mul(factor)
    }

    /// Whether another attempt follows the failed attempt `attempt`
    pub fn should_retry(&self, attempt: u32) -> bool {
        attempt + 1 < self.max_attempts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts(), 3);
        assert_eq!(policy.base_delay(), Duration::from_secs(1));
    }

    #[test]
    fn test_exponential_delays() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_for(0), Duration::from_secs(1));
        assert_eq!(policy.delay_for(1), Duration::from_secs(2));
        assert_eq!(policy.delay_for(2), Duration::from_secs(4));
    }

    #[test]
    fn test_should_retry() {
        let policy = RetryPolicy::default();
        assert!(policy.should_retry(0));
        assert!(policy.should_retry(1));
        assert!(!policy.should_retry(2));
    }

    #[test]
    fn test_zero_attempts_rejected() {
        assert_eq!(
            RetryPolicy::new(0, Duration::from_millis(10)),
            Err(DomainError::ZeroAttempts)
        );
    }

    #[test]
    fn test_delay_saturates() {
        let policy = RetryPolicy::new(50, Duration::from_secs(1)).unwrap();
        assert_eq!(policy.delay_for(40), Duration::from_secs(1).saturating_mul(u32::MAX));
    }
}
