//! Provider exchange records.
//!
//! [`ReasoningRequest`] and [`ReasoningResponse`] are the only stringly-typed
//! shapes in the system; they exist at the provider boundary. Call sites build
//! requests from typed [`Signature`](super::Signature) records.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Which orchestration step issued a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallKind {
    Classification,
    Draft,
    Review,
    Synthesis,
    Opening,
    Rebuttal,
    Verdict,
}

impl CallKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CallKind::Classification => "classification",
            CallKind::Draft => "draft",
            CallKind::Review => "review",
            CallKind::Synthesis => "synthesis",
            CallKind::Opening => "opening",
            CallKind::Rebuttal => "rebuttal",
            CallKind::Verdict => "verdict",
        }
    }
}

impl std::fmt::Display for CallKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Declared output field of a signature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    pub description: &'static str,
}

impl FieldSpec {
    pub const fn new(name: &'static str, description: &'static str) -> Self {
        Self { name, description }
    }
}

/// Named input value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputField {
    pub name: String,
    pub value: String,
}

impl InputField {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// What a reasoning provider is asked to do
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReasoningRequest {
    pub kind: CallKind,
    pub instructions: &'static str,
    /// Inputs in declaration order
    pub inputs: Vec<InputField>,
    pub outputs: &'static [FieldSpec],
}

impl ReasoningRequest {
    pub fn input(&self, name: &str) -> Option<&str> {
        self.inputs
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.value.as_str())
    }

    pub fn output_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.outputs.iter().map(|f| f.name)
    }
}

/// What a reasoning provider returned: output field name → text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReasoningResponse {
    fields: BTreeMap<String, String>,
}

impl ReasoningResponse {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Field value, or [`SignatureError::MissingField`] when absent.
    pub fn require(&self, kind: CallKind, name: &str) -> Result<&str, SignatureError> {
        self.field(name).ok_or_else(|| SignatureError::MissingField {
            kind,
            field: name.to_string(),
        })
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// A response that does not satisfy its signature
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SignatureError {
    #[error("{kind} response is missing field '{field}'")]
    MissingField { kind: CallKind, field: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_reports_kind_and_field() {
        let response = ReasoningResponse::new().with_field("argument", "Cut costs");
        assert_eq!(
            response.require(CallKind::Opening, "argument").unwrap(),
            "Cut costs"
        );
        let err = response.require(CallKind::Rebuttal, "rebuttal").unwrap_err();
        assert_eq!(err.to_string(), "rebuttal response is missing field 'rebuttal'");
    }

    #[test]
    fn test_request_input_lookup() {
        const OUT: &[FieldSpec] = &[FieldSpec::new("argument", "Primary argument")];
        let request = ReasoningRequest {
            kind: CallKind::Opening,
            instructions: "Argue.",
            inputs: vec![InputField::new("role", "CFO"), InputField::new("query", "Q?")],
            outputs: OUT,
        };
        assert_eq!(request.input("role"), Some("CFO"));
        assert_eq!(request.input("missing"), None);
        assert_eq!(request.output_names().collect::<Vec<_>>(), vec!["argument"]);
    }
}
