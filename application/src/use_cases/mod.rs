//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod council;
pub mod deliberation;
pub mod department;
pub mod router;
pub mod sovereign;

#[cfg(test)]
pub(crate) mod test_support;
