//! Score parsing and aggregation for peer reviews and routing.
//!
//! One parsing rule is used everywhere a provider returns a numeric score:
//!
//! 1. Trim surrounding whitespace.
//! 2. Keep only the text before the first `/`, so `"7/10"` reads as `7`.
//! 3. Parse what remains as `f64`; anything non-numeric or non-finite
//!    becomes [`NEUTRAL_SCORE`].
//! 4. Clamp into `[1, 10]`.

use super::entities::{Draft, PeerReview, WorkerId};
use crate::core::string::excerpt;

/// Fallback for scores that cannot be read as a number.
pub const NEUTRAL_SCORE: f64 = 5.0;

pub const MIN_SCORE: f64 = 1.0;
pub const MAX_SCORE: f64 = 10.0;

/// Parse a provider's score field. Never fails.
///
/// ```
/// use council_domain::department::scoring::parse_score;
///
/// assert_eq!(parse_score("7.5"), 7.5);
/// assert_eq!(parse_score(" 8/10 "), 8.0);
/// assert_eq!(parse_score("excellent"), 5.0);
/// assert_eq!(parse_score("12"), 10.0);
/// ```
pub fn parse_score(raw: &str) -> f64 {
    let numerator = raw.trim().split('/').next().unwrap_or_default().trim();
    match numerator.parse::<f64>() {
        Ok(score) if score.is_finite() => score.clamp(MIN_SCORE, MAX_SCORE),
        _ => NEUTRAL_SCORE,
    }
}

/// Arithmetic mean; [`NEUTRAL_SCORE`] for an empty slice.
pub fn average(scores: &[f64]) -> f64 {
    if scores.is_empty() {
        return NEUTRAL_SCORE;
    }
    scores.iter().sum::<f64>() / scores.len() as f64
}

/// A draft together with the mean of its peer scores
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredDraft<'a> {
    pub draft: &'a Draft,
    pub average: f64,
}

/// Pair every draft with the average of the reviews that targeted it.
pub fn score_drafts<'a>(drafts: &'a [Draft], reviews: &[PeerReview]) -> Vec<ScoredDraft<'a>> {
    drafts
        .iter()
        .map(|draft| ScoredDraft {
            draft,
            average: average_for(draft.author, reviews),
        })
        .collect()
}

/// Render the boss's input: one line per draft with an excerpt and its average.
pub fn synthesis_payload(scored: &[ScoredDraft<'_>], excerpt_chars: usize) -> String {
    scored
        .iter()
        .map(|s| {
            format!(
                "[DRAFT {}]: {} (Avg: {:.2})",
                s.draft.author.index() + 1,
                excerpt(&s.draft.text, excerpt_chars),
                s.average
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Mean of the scores given to one author's draft
pub fn average_for(author: WorkerId, reviews: &[PeerReview]) -> f64 {
    let scores: Vec<f64> = reviews
        .iter()
        .filter(|r| r.target == author)
        .map(|r| r.score)
        .collect();
    average(&scores)
}
