//! Debate transcript: the only shared, growing state of a council meeting.
//!
//! Turns are appended strictly in speaking order. Readers take a
//! [`Transcript::opponent_summary`] by value, so a speaker always argues
//! against a frozen snapshot of its peers' statements.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnKind {
    Opening,
    Rebuttal,
}

impl TurnKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TurnKind::Opening => "opening",
            TurnKind::Rebuttal => "rebuttal",
        }
    }
}

/// One statement by one executive
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    /// Executive label, e.g. "CFO"
    pub speaker: String,
    pub kind: TurnKind,
    /// 0 for openings, 1.. for rebuttal rounds
    pub round: u32,
    pub text: String,
}

impl Turn {
    pub fn opening(speaker: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            speaker: speaker.into(),
            kind: TurnKind::Opening,
            round: 0,
            text: text.into(),
        }
    }

    pub fn rebuttal(speaker: impl Into<String>, round: u32, text: impl Into<String>) -> Self {
        Self {
            speaker: speaker.into(),
            kind: TurnKind::Rebuttal,
            round,
            text: text.into(),
        }
    }
}

/// Append-only record of every turn
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    /// Append a buffered round. `turns` must already be in speaking order.
    pub fn append_round(&mut self, turns: impl IntoIterator<Item = Turn>) {
        self.turns.extend(turns);
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Latest statement of `speaker` (its opening if it has not rebutted yet)
    pub fn latest_from(&self, speaker: &str) -> Option<&Turn> {
        self.turns.iter().rev().find(|t| t.speaker == speaker)
    }

    /// Every statement not made by `speaker`, joined as
    /// `"{label}: {text} | {label}: {text}"` in speaking order.
    pub fn opponent_summary(&self, speaker: &str) -> String {
        self.turns
            .iter()
            .filter(|t| t.speaker != speaker)
            .map(|t| format!("{}: {}", t.speaker, t.text))
            .collect::<Vec<_>>()
            .join(" | ")
    }

    /// Human-readable dump, one block per turn
    pub fn render(&self) -> String {
        self.turns
            .iter()
            .map(|t| match t.kind {
                TurnKind::Opening => format!("[{} opening]:\n{}", t.speaker, t.text),
                TurnKind::Rebuttal => {
                    format!("[{} rebuttal, round {}]:\n{}", t.speaker, t.round, t.text)
                }
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opened() -> Transcript {
        let mut t = Transcript::new();
        t.append_round([
            Turn::opening("CFO", "Save cash"),
            Turn::opening("CMO", "Grow users"),
            Turn::opening("CTO", "Fix servers"),
        ]);
        t
    }

    #[test]
    fn test_opponent_summary_round_one_format() {
        let t = opened();
        assert_eq!(t.opponent_summary("CFO"), "CMO: Grow users | CTO: Fix servers");
        assert_eq!(t.opponent_summary("CMO"), "CFO: Save cash | CTO: Fix servers");
        assert_eq!(t.opponent_summary("CTO"), "CFO: Save cash | CMO: Grow users");
    }

    #[test]
    fn test_summary_never_contains_own_statements() {
        let mut t = opened();
        t.push(Turn::rebuttal("CFO", 1, "Growth is reckless"));
        let summary = t.opponent_summary("CFO");
        assert!(!summary.contains("Save cash"));
        assert!(!summary.contains("reckless"));
        assert!(t.opponent_summary("CMO").contains("CFO: Growth is reckless"));
    }

    #[test]
    fn test_latest_from_prefers_rebuttal() {
        let mut t = opened();
        assert_eq!(t.latest_from("CTO").unwrap().kind, TurnKind::Opening);
        t.push(Turn::rebuttal("CTO", 1, "Stability first"));
        let latest = t.latest_from("CTO").unwrap();
        assert_eq!(latest.text, "Stability first");
        assert!(t.latest_from("CEO").is_none());
    }

    #[test]
    fn test_render_labels_turns() {
        let mut t = opened();
        t.push(Turn::rebuttal("CMO", 1, "No"));
        let rendered = t.render();
        assert!(rendered.starts_with("[CFO opening]:\nSave cash"));
        assert!(rendered.ends_with("[CMO rebuttal, round 1]:\nNo"));
    }
}
