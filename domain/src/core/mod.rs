//! Core domain concepts shared across all subdomains.
//!
//! - [`query::Query`] - the strategic question posed to the council
//! - [`error::DomainError`] - domain-level errors
//! - [`string`] - text helpers (UTF-8 safe excerpts)

pub mod error;
pub mod query;
pub mod string;
