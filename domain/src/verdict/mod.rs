//! Sovereign verdict domain.

pub mod persona;

pub use persona::{Persona, PersonaPreset};

use serde::{Deserialize, Serialize};

/// Terminal artifact of one deep-lane run. Never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub internal_reasoning: String,
    pub final_decision: String,
}

impl Verdict {
    pub fn new(internal_reasoning: impl Into<String>, final_decision: impl Into<String>) -> Self {
        Self {
            internal_reasoning: internal_reasoning.into(),
            final_decision: final_decision.into(),
        }
    }
}
