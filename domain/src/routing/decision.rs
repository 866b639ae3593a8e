//! Routing decision value objects

use serde::{Deserialize, Serialize};

/// Scores strictly above this go to the deep lane; 4.0 itself stays fast.
pub const DEEP_LANE_THRESHOLD: f64 = 4.0;

/// Score reported when the caller forces the deep lane.
pub const MANUAL_OVERRIDE_SCORE: f64 = 10.0;

/// Reasoning text reported when the caller forces the deep lane.
pub const MANUAL_OVERRIDE_REASONING: &str = "manual override";

/// Which pipeline a query is sent down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Route {
    /// Lightweight answer, no council
    FastLane,
    /// Departments, executive debate and sovereign verdict
    DeepLane,
}

impl Route {
    pub fn as_str(&self) -> &'static str {
        match self {
            Route::FastLane => "FAST_LANE",
            Route::DeepLane => "DEEP_LANE",
        }
    }

    /// Apply the lane rule: `DEEP_LANE if score > 4 else FAST_LANE`
    pub fn for_score(score: f64) -> Self {
        if score > DEEP_LANE_THRESHOLD {
            Route::DeepLane
        } else {
            Route::FastLane
        }
    }

    pub fn is_deep(&self) -> bool {
        matches!(self, Route::DeepLane)
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of classifying one query. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingDecision {
    route: Route,
    score: f64,
    reasoning: String,
}

impl RoutingDecision {
    /// Build a decision from a complexity score, clamped into `[1, 10]`.
    pub fn from_score(score: f64, reasoning: impl Into<String>) -> Self {
        let score = score.clamp(1.0, 10.0);
        Self {
            route: Route::for_score(score),
            score,
            reasoning: reasoning.into(),
        }
    }

    /// The forced deep-lane decision; does not depend on the query.
    pub fn manual_override() -> Self {
        Self {
            route: Route::DeepLane,
            score: MANUAL_OVERRIDE_SCORE,
            reasoning: MANUAL_OVERRIDE_REASONING.to_string(),
        }
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn reasoning(&self) -> &str {
        &self.reasoning
    }

    pub fn is_manual_override(&self) -> bool {
        self.route == Route::DeepLane
            && self.score == MANUAL_OVERRIDE_SCORE
            && self.reasoning == MANUAL_OVERRIDE_REASONING
    }
}
