//! Council configuration container.
//!
//! Built once by the composition root and handed to every use case. Only
//! the per-call persona can be overridden after construction.

use council_domain::{DebateSettings, Persona, RetryPolicy, TurnOrder};

pub const DEFAULT_MAX_CONCURRENT_REVIEWS: usize = 6;
pub const DEFAULT_EXCERPT_CHARS: usize = 150;

/// Peer review bounds for a department
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewParams {
    /// Reviews in flight at once (at least 1)
    pub max_concurrent: usize,
    /// Characters of each draft shown to the department head
    pub excerpt_chars: usize,
}

impl Default for ReviewParams {
    fn default() -> Self {
        Self {
            max_concurrent: DEFAULT_MAX_CONCURRENT_REVIEWS,
            excerpt_chars: DEFAULT_EXCERPT_CHARS,
        }
    }
}

impl ReviewParams {
    pub fn with_max_concurrent(mut self, max_concurrent: usize) -> Self {
        self.max_concurrent = max_concurrent.max(1);
        self
    }

    pub fn with_excerpt_chars(mut self, excerpt_chars: usize) -> Self {
        self.excerpt_chars = excerpt_chars;
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct CouncilConfig {
    retry: RetryPolicy,
    review: ReviewParams,
    debate: DebateSettings,
    persona: Persona,
}

impl CouncilConfig {
    pub fn new(
        retry: RetryPolicy,
        review: ReviewParams,
        debate: DebateSettings,
        persona: Persona,
    ) -> Self {
        Self {
            retry,
            review,
            debate,
            persona,
        }
    }

    // ==================== Accessors ====================

    pub fn retry(&self) -> &RetryPolicy {
        &self.retry
    }

    pub fn review(&self) -> &ReviewParams {
        &self.review
    }

    pub fn debate(&self) -> &DebateSettings {
        &self.debate
    }

    /// Persona used when the caller does not pass one
    pub fn persona(&self) -> &Persona {
        &self.persona
    }

    // ==================== Builder Methods ====================

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_review(mut self, review: ReviewParams) -> Self {
        self.review = review;
        self
    }

    /// Set the rebuttal round count (raised to 1 if zero)
    pub fn with_rounds(mut self, rounds: u32) -> Self {
        self.debate = self.debate.with_rounds(rounds);
        self
    }

    pub fn with_turn_order(mut self, turn_order: TurnOrder) -> Self {
        self.debate = self.debate.with_turn_order(turn_order);
        self
    }

    pub fn with_persona(mut self, persona: Persona) -> Self {
        self.persona = persona;
        self
    }
}
