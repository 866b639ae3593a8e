//! Deliberation orchestration vocabulary

pub mod stage;

pub use stage::Stage;
