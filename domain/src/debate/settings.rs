//! Debate settings (rounds and turn order)

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How speakers within one rebuttal round see each other
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnOrder {
    /// All executives speak in parallel against the snapshot taken at the
    /// start of the round; their turns are appended at the round boundary.
    #[default]
    Simultaneous,
    /// Executives speak one after another and each sees the turns already
    /// given in the same round.
    RoundRobin,
}

impl TurnOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            TurnOrder::Simultaneous => "simultaneous",
            TurnOrder::RoundRobin => "round_robin",
        }
    }
}

impl FromStr for TurnOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "simultaneous" | "parallel" => Ok(TurnOrder::Simultaneous),
            "round_robin" | "sequential" => Ok(TurnOrder::RoundRobin),
            other => Err(format!("unknown turn order: {}", other)),
        }
    }
}

impl std::fmt::Display for TurnOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebateSettings {
    /// Rebuttal rounds after the openings (at least 1)
    pub rounds: u32,
    pub turn_order: TurnOrder,
}

impl Default for DebateSettings {
    fn default() -> Self {
        Self {
            rounds: 1,
            turn_order: TurnOrder::default(),
        }
    }
}

impl DebateSettings {
    pub fn with_rounds(mut self, rounds: u32) -> Self {
        self.rounds = rounds.max(1);
        self
    }

    pub fn with_turn_order(mut self, turn_order: TurnOrder) -> Self {
        self.turn_order = turn_order;
        self
    }
}
