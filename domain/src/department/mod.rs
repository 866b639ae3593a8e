//! Department (micro-council) domain: three workers, cross-peer review and
//! deterministic score aggregation.

pub mod entities;
pub mod peer_map;
pub mod scoring;

pub use entities::{DepartmentReport, Draft, PeerReview, WorkerId};
pub use peer_map::{
    REVIEWS_PER_DRAFT, ReviewAssignment, WORKERS_PER_DEPARTMENT, review_assignments, reviewers_of,
};
pub use scoring::{
    NEUTRAL_SCORE, ScoredDraft, average, average_for, parse_score, score_drafts, synthesis_payload,
};
