//! Router state machine
//!
//! ```text
//! Idle ──begin──▶ Classifying ──decide──▶ Decided(RoutingDecision)
//!   └─────────────── decide (manual override) ──────▶ Decided
//! ```
//!
//! `Decided` is terminal for a query; a new query starts from a fresh `Idle`.

use super::decision::RoutingDecision;
use crate::core::error::DomainError;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum RouterState {
    #[default]
    Idle,
    Classifying,
    Decided(RoutingDecision),
}

impl RouterState {
    pub fn as_str(&self) -> &'static str {
        match self {
            RouterState::Idle => "idle",
            RouterState::Classifying => "classifying",
            RouterState::Decided(_) => "decided",
        }
    }

    /// `Idle → Classifying`
    pub fn begin(self) -> Result<Self, DomainError> {
        match self {
            RouterState::Idle => Ok(RouterState::Classifying),
            other => Err(DomainError::InvalidTransition {
                from: other.as_str(),
                to: "classifying",
            }),
        }
    }

    /// `Classifying → Decided`, or `Idle → Decided` for the manual override.
    pub fn decide(self, decision: RoutingDecision) -> Result<Self, DomainError> {
        match self {
            RouterState::Classifying => Ok(RouterState::Decided(decision)),
            RouterState::Idle if decision.is_manual_override() => {
                Ok(RouterState::Decided(decision))
            }
            other => Err(DomainError::InvalidTransition {
                from: other.as_str(),
                to: "decided",
            }),
        }
    }

    pub fn decision(&self) -> Option<&RoutingDecision> {
        match self {
            RouterState::Decided(decision) => Some(decision),
            _ => None,
        }
    }

    pub fn into_decision(self) -> Option<RoutingDecision> {
        match self {
            RouterState::Decided(decision) => Some(decision),
            _ => None,
        }
    }
}
