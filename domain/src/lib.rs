//! Domain layer for sovereign-council
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Lanes
//!
//! Every query is scored for strategic complexity by the router:
//!
//! - **Fast lane** (score ≤ 4): answered by the classification alone
//! - **Deep lane** (score > 4): escalated through the full council
//!
//! ## Council hierarchy
//!
//! - **Department**: three workers draft, review each other twice over and
//!   hand scored excerpts to a department head for synthesis
//! - **Macro council**: one executive per department argues for its KPI,
//!   then rebuts the other two over one or more rounds
//! - **Sovereign**: weighs every position under a persona and issues the
//!   final verdict

pub mod config;
pub mod core;
pub mod debate;
pub mod department;
pub mod orchestration;
pub mod retry;
pub mod routing;
pub mod signature;
pub mod verdict;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
pub use core::{error::DomainError, query::Query, string::excerpt};
pub use debate::{
    Argument, DebateRecord, DebateSettings, Position, Rebuttal, Transcript, Turn, TurnKind,
    TurnOrder,
};
pub use department::{
    DepartmentReport, Draft, NEUTRAL_SCORE, PeerReview, REVIEWS_PER_DRAFT, ReviewAssignment,
    ScoredDraft, WORKERS_PER_DEPARTMENT, WorkerId, average, average_for, parse_score,
    review_assignments, reviewers_of, score_drafts, synthesis_payload,
};
pub use orchestration::Stage;
pub use retry::RetryPolicy;
pub use routing::{Route, RouterState, RoutingDecision};
pub use signature::{
    CallKind, FieldSpec, InputField, ReasoningRequest, ReasoningResponse, Signature,
    SignatureError,
};
pub use verdict::{Persona, PersonaPreset, Verdict};
