//! Application-level configuration.
//!
//! - [`CouncilConfig`]: tuning knobs shared by every use case (retry policy,
//!   review bounds, debate settings, default persona)
//! - [`CouncilRoster`]: who sits on the council (departments, goals,
//!   executives, worker roles)

pub mod council_config;
pub mod roster;

pub use council_config::{
    CouncilConfig, DEFAULT_EXCERPT_CHARS, DEFAULT_MAX_CONCURRENT_REVIEWS, ReviewParams,
};
pub use roster::{CouncilRoster, DepartmentProfile, ExecutiveProfile};
