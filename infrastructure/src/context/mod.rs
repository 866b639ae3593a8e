//! Context lookup adapters
//!
//! Implementations of the [`ContextProvider`] port that feed department
//! drafts.
//!
//! # Components
//!
//! - [`StaticContextProvider`] - A fixed corpus shared by every department
//! - [`DirectoryContextProvider`] - Markdown files per department scope
//!
//! [`ContextProvider`]: council_application::ContextProvider

mod directory;
mod static_corpus;

pub use directory::DirectoryContextProvider;
pub use static_corpus::{COMPANY_BRIEFING, StaticContextProvider};
