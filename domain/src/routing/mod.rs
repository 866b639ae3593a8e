//! Query routing: lane rule, decisions and the router state machine.

pub mod decision;
pub mod state;

pub use decision::{
    DEEP_LANE_THRESHOLD, MANUAL_OVERRIDE_REASONING, MANUAL_OVERRIDE_SCORE, Route,
    RoutingDecision,
};
pub use state::RouterState;
