//! Department entities: workers' drafts, peer reviews and the final report.

use serde::{Deserialize, Serialize};

/// Stable identity of a worker inside one department invocation (0, 1 or 2).
///
/// Drafts are keyed by their author's id, so the id doubles as the draft id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkerId(usize);

impl WorkerId {
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(&self) -> usize {
        self.0
    }

    /// One-based label used in prompts and output ("Worker 1").
    pub fn label(&self) -> String {
        format!("Worker {}", self.0 + 1)
    }
}

impl std::fmt::Display for WorkerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A worker's answer. Produced once per worker per invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Draft {
    pub author: WorkerId,
    pub text: String,
}

impl Draft {
    pub fn new(author: WorkerId, text: impl Into<String>) -> Self {
        Self {
            author,
            text: text.into(),
        }
    }
}

/// One worker's assessment of a colleague's draft
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeerReview {
    pub reviewer: WorkerId,
    /// Author of the reviewed draft
    pub target: WorkerId,
    /// Score in `[1, 10]`
    pub score: f64,
    pub critique: String,
}

impl PeerReview {
    pub fn new(
        reviewer: WorkerId,
        target: WorkerId,
        score: f64,
        critique: impl Into<String>,
    ) -> Self {
        Self {
            reviewer,
            target,
            score,
            critique: critique.into(),
        }
    }

    pub fn is_self_review(&self) -> bool {
        self.reviewer == self.target
    }
}

/// Synthesized output of one department, handed upward to its executive
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepartmentReport {
    pub department: String,
    pub goal: String,
    pub final_text: String,
    /// Drafts in worker order
    #[serde(default)]
    pub drafts: Vec<Draft>,
    /// Reviews grouped by target, reviewers ascending
    #[serde(default)]
    pub reviews: Vec<PeerReview>,
}

impl DepartmentReport {
    pub fn new(
        department: impl Into<String>,
        goal: impl Into<String>,
        final_text: impl Into<String>,
    ) -> Self {
        Self {
            department: department.into(),
            goal: goal.into(),
            final_text: final_text.into(),
            drafts: Vec::new(),
            reviews: Vec::new(),
        }
    }

    pub fn with_deliberation(mut self, drafts: Vec<Draft>, reviews: Vec<PeerReview>) -> Self {
        self.drafts = drafts;
        self.reviews = reviews;
        self
    }

    /// Reviews that targeted the given worker's draft
    pub fn reviews_of(&self, author: WorkerId) -> impl Iterator<Item = &PeerReview> {
        self.reviews.iter().filter(move |r| r.target == author)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_worker_label_is_one_based() {
        assert_eq!(WorkerId::new(0).label(), "Worker 1");
        assert_eq!(WorkerId::new(2).to_string(), "Worker 3");
    }

    #[test]
    fn test_self_review_detection() {
        let w0 = WorkerId::new(0);
        let w1 = WorkerId::new(1);
        assert!(PeerReview::new(w0, w0, 5.0, "").is_self_review());
        assert!(!PeerReview::new(w1, w0, 5.0, "").is_self_review());
    }

    #[test]
    fn test_reviews_of_filters_by_target() {
        let (w0, w1, w2) = (WorkerId::new(0), WorkerId::new(1), WorkerId::new(2));
        let report = DepartmentReport::new("Finance", "Maximize ROI", "Cut spend")
            .with_deliberation(
                vec![Draft::new(w0, "a"), Draft::new(w1, "b"), Draft::new(w2, "c")],
                vec![
                    PeerReview::new(w1, w0, 7.0, "ok"),
                    PeerReview::new(w2, w0, 9.0, "good"),
                    PeerReview::new(w0, w1, 3.0, "weak"),
                ],
            );
        assert_eq!(report.reviews_of(w0).count(), 2);
        assert_eq!(report.reviews_of(w1).count(), 1);
        assert_eq!(report.reviews_of(w2).count(), 0);
    }
}
