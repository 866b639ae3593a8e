//! Macro-council debate domain: arguments, rebuttals and the shared transcript.

pub mod entities;
pub mod settings;
pub mod transcript;

pub use entities::{Argument, DebateRecord, Position, Rebuttal};
pub use settings::{DebateSettings, TurnOrder};
pub use transcript::{Transcript, Turn, TurnKind};
