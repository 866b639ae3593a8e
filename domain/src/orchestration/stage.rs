//! Deliberation stages

use serde::{Deserialize, Serialize};

/// A step of one deliberation, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Router classification
    Routing,
    /// Department context lookups
    Context,
    /// Workers drafting in parallel
    Drafting,
    /// Cross-peer review
    Review,
    /// Department head synthesis
    Synthesis,
    /// Executive opening arguments
    Opening,
    /// Executive rebuttals
    Rebuttal,
    /// Sovereign arbitration
    Verdict,
}

impl Stage {
    pub const ALL: [Stage; 8] = [
        Stage::Routing,
        Stage::Context,
        Stage::Drafting,
        Stage::Review,
        Stage::Synthesis,
        Stage::Opening,
        Stage::Rebuttal,
        Stage::Verdict,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Stage::Routing => "routing",
            Stage::Context => "context",
            Stage::Drafting => "drafting",
            Stage::Review => "review",
            Stage::Synthesis => "synthesis",
            Stage::Opening => "opening",
            Stage::Rebuttal => "rebuttal",
            Stage::Verdict => "verdict",
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Stage::Routing => "Routing",
            Stage::Context => "Context Lookup",
            Stage::Drafting => "Drafting",
            Stage::Review => "Peer Review",
            Stage::Synthesis => "Department Synthesis",
            Stage::Opening => "Opening Arguments",
            Stage::Rebuttal => "Rebuttals",
            Stage::Verdict => "Sovereign Verdict",
        }
    }

    /// Stages that run inside a department
    pub fn is_departmental(&self) -> bool {
        matches!(
            self,
            Stage::Context | Stage::Drafting | Stage::Review | Stage::Synthesis
        )
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_order() {
        assert_eq!(Stage::ALL.first(), Some(&Stage::Routing));
        assert_eq!(Stage::ALL.last(), Some(&Stage::Verdict));
    }

    #[test]
    fn test_departmental_stages() {
        let departmental: Vec<_> = Stage::ALL.iter().filter(|s| s.is_departmental()).collect();
        assert_eq!(departmental.len(), 4);
        assert!(!Stage::Opening.is_departmental());
    }

    #[test]
    fn test_serialize_snake_case() {
        let json = serde_json::to_string(&Stage::Rebuttal).unwrap();
        assert_eq!(json, "\"rebuttal\"");
    }
}
