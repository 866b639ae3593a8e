//! Executive statements and the record of a finished debate.

use super::transcript::Transcript;
use serde::{Deserialize, Serialize};

/// An executive's opening position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Argument {
    pub executive: String,
    pub text: String,
}

impl Argument {
    pub fn new(executive: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            executive: executive.into(),
            text: text.into(),
        }
    }
}

/// A counter-argument written after reading the peers' statements
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rebuttal {
    pub executive: String,
    pub round: u32,
    pub text: String,
}

impl Rebuttal {
    pub fn new(executive: impl Into<String>, round: u32, text: impl Into<String>) -> Self {
        Self {
            executive: executive.into(),
            round,
            text: text.into(),
        }
    }
}

/// One executive's stance as handed to the sovereign
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub executive: String,
    pub argument: String,
    pub rebuttal: String,
}

impl Position {
    /// `"Argument: {a} | Rebuttal: {r}"`
    pub fn render(&self) -> String {
        format!("Argument: {} | Rebuttal: {}", self.argument, self.rebuttal)
    }
}

/// Everything the macro council produced
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebateRecord {
    /// Openings in speaking order
    pub arguments: Vec<Argument>,
    /// Each executive's last rebuttal, in speaking order
    pub rebuttals: Vec<Rebuttal>,
    pub transcript: Transcript,
}

impl DebateRecord {
    /// Pair each argument with the same executive's final rebuttal.
    ///
    /// Executives without a rebuttal are left out; a complete debate has one
    /// position per executive.
    pub fn positions(&self) -> Vec<Position> {
        self.arguments
            .iter()
            .filter_map(|arg| {
                self.rebuttals
                    .iter()
                    .find(|r| r.executive == arg.executive)
                    .map(|r| Position {
                        executive: arg.executive.clone(),
                        argument: arg.text.clone(),
                        rebuttal: r.text.clone(),
                    })
            })
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        !self.arguments.is_empty() && self.positions().len() == self.arguments.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_render() {
        let p = Position {
            executive: "CFO".to_string(),
            argument: "Pause it".to_string(),
            rebuttal: "Growth can wait".to_string(),
        };
        assert_eq!(p.render(), "Argument: Pause it | Rebuttal: Growth can wait");
    }

    #[test]
    fn test_positions_pair_by_executive() {
        let record = DebateRecord {
            arguments: vec![Argument::new("CFO", "a1"), Argument::new("CMO", "a2")],
            rebuttals: vec![Rebuttal::new("CMO", 2, "r2"), Rebuttal::new("CFO", 2, "r1")],
            transcript: Transcript::new(),
        };
        let positions = record.positions();
        assert_eq!(positions[0].executive, "CFO");
        assert_eq!(positions[0].rebuttal, "r1");
        assert_eq!(positions[1].rebuttal, "r2");
        assert!(record.is_complete());
    }

    #[test]
    fn test_incomplete_without_rebuttals() {
        let record = DebateRecord {
            arguments: vec![Argument::new("CFO", "a1")],
            rebuttals: vec![],
            transcript: Transcript::new(),
        };
        assert!(!record.is_complete());
    }
}
