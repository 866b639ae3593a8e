//! Cross-peer review assignments.
//!
//! Each worker reviews the other two drafts and never its own:
//!
//! | Draft of | Reviewed by |
//! |----------|-------------|
//! | Worker 1 | Worker 2, Worker 3 |
//! | Worker 2 | Worker 1, Worker 3 |
//! | Worker 3 | Worker 1, Worker 2 |

use super::entities::WorkerId;

pub const WORKERS_PER_DEPARTMENT: usize = 3;

/// Reviews each draft receives
pub const REVIEWS_PER_DRAFT: usize = WORKERS_PER_DEPARTMENT - 1;

/// One review call: `reviewer` scores the draft written by `target`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReviewAssignment {
    pub reviewer: WorkerId,
    pub target: WorkerId,
}

/// The two reviewers of `target`'s draft, ascending.
pub fn reviewers_of(target: WorkerId) -> [WorkerId; REVIEWS_PER_DRAFT] {
    let peers = match target.index() {
        0 => [1, 2],
        1 => [0, 2],
        _ => [0, 1],
    };
    peers.map(WorkerId::new)
}

/// All review calls for one department, grouped by target in worker order.
pub fn review_assignments() -> Vec<ReviewAssignment> {
    (0..WORKERS_PER_DEPARTMENT)
        .map(WorkerId::new)
        .flat_map(|target| {
            reviewers_of(target)
                .into_iter()
                .map(move |reviewer| ReviewAssignment { reviewer, target })
        })
        .collect()
}
