//! The seven call kinds of a deliberation.

use super::Signature;
use super::request::{CallKind, FieldSpec, InputField, ReasoningResponse, SignatureError};
use crate::debate::Position;
use crate::department::scoring::{NEUTRAL_SCORE, parse_score};
use crate::verdict::Verdict;

// ==================== Router ====================

/// Score a query's strategic complexity
#[derive(Debug, Clone)]
pub struct AssessComplexity {
    pub query: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Complexity {
    /// Parsed and clamped; [`NEUTRAL_SCORE`] when unreadable
    pub score: f64,
    pub reasoning: String,
}

impl Signature for AssessComplexity {
    type Output = Complexity;

    const KIND: CallKind = CallKind::Classification;
    const INSTRUCTIONS: &'static str =
        "Analyze the query complexity to route it to the correct processing pipeline.";
    const OUTPUTS: &'static [FieldSpec] = &[
        FieldSpec::new(
            "complexity_score",
            "A score between 1.0 (Trivial) and 10.0 (Highly Strategic)",
        ),
        FieldSpec::new("reasoning", "Brief justification for the score"),
    ];

    fn inputs(&self) -> Vec<InputField> {
        vec![InputField::new("query", &self.query)]
    }

    fn parse(response: &ReasoningResponse) -> Result<Self::Output, SignatureError> {
        let score = response
            .field("complexity_score")
            .map(parse_score)
            .unwrap_or(NEUTRAL_SCORE);
        let reasoning = response.require(Self::KIND, "reasoning")?.trim().to_string();
        Ok(Complexity { score, reasoning })
    }
}

// ==================== Department ====================

/// A worker's draft answer, grounded in the department's context
#[derive(Debug, Clone)]
pub struct DraftAnswer {
    pub department_goal: String,
    pub rag_context: String,
    pub query: String,
}

impl Signature for DraftAnswer {
    type Output = String;

    const KIND: CallKind = CallKind::Draft;
    const INSTRUCTIONS: &'static str = "You are a specialized employee. Use the RAG Context to \
        answer based on your Department Goal.";
    const OUTPUTS: &'static [FieldSpec] = &[FieldSpec::new(
        "draft_answer",
        "Detailed answer based on context",
    )];

    fn inputs(&self) -> Vec<InputField> {
        vec![
            InputField::new("department_goal", &self.department_goal),
            InputField::new("rag_context", &self.rag_context),
            InputField::new("query", &self.query),
        ]
    }

    fn parse(response: &ReasoningResponse) -> Result<Self::Output, SignatureError> {
        Ok(response.require(Self::KIND, "draft_answer")?.trim().to_string())
    }
}

/// One colleague scoring another's draft
#[derive(Debug, Clone)]
pub struct ReviewDraft {
    pub department_goal: String,
    pub proposal_text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReviewOutcome {
    pub score: f64,
    pub critique: String,
}

impl Signature for ReviewDraft {
    type Output = ReviewOutcome;

    const KIND: CallKind = CallKind::Review;
    const INSTRUCTIONS: &'static str = "Review a colleague's draft strictly. Rate 1-10.";
    const OUTPUTS: &'static [FieldSpec] = &[
        FieldSpec::new("score", "Score 1-10 (float)"),
        FieldSpec::new("critique", "Short critique"),
    ];

    fn inputs(&self) -> Vec<InputField> {
        vec![
            InputField::new("department_goal", &self.department_goal),
            InputField::new("proposal_text", &self.proposal_text),
        ]
    }

    fn parse(response: &ReasoningResponse) -> Result<Self::Output, SignatureError> {
        let score = response
            .field("score")
            .map(parse_score)
            .unwrap_or(NEUTRAL_SCORE);
        let critique = response.require(Self::KIND, "critique")?.trim().to_string();
        Ok(ReviewOutcome { score, critique })
    }
}

/// The department head's synthesis of the scored drafts
#[derive(Debug, Clone)]
pub struct SynthesizeReport {
    pub department_goal: String,
    pub query: String,
    pub report_data: String,
}

impl Signature for SynthesizeReport {
    type Output = String;

    const KIND: CallKind = CallKind::Synthesis;
    const INSTRUCTIONS: &'static str = "Synthesize the department's final answer based on the \
        3 drafts and their ratings.";
    const OUTPUTS: &'static [FieldSpec] = &[FieldSpec::new(
        "final_answer",
        "The department's final report",
    )];

    fn inputs(&self) -> Vec<InputField> {
        vec![
            InputField::new("department_goal", &self.department_goal),
            InputField::new("query", &self.query),
            InputField::new("report_data", &self.report_data),
        ]
    }

    fn parse(response: &ReasoningResponse) -> Result<Self::Output, SignatureError> {
        Ok(response.require(Self::KIND, "final_answer")?.trim().to_string())
    }
}

// ==================== Macro council ====================

/// An executive's opening argument
#[derive(Debug, Clone)]
pub struct OpeningStatement {
    pub role: String,
    pub query: String,
    /// The executive's department report; absent in council-only runs
    pub micro_report: Option<String>,
}

impl Signature for OpeningStatement {
    type Output = String;

    const KIND: CallKind = CallKind::Opening;
    const INSTRUCTIONS: &'static str = "You are a C-Level Executive. Read your team's report. \
        Argue FIERCELY for your department's KPI using the data provided.";
    const OUTPUTS: &'static [FieldSpec] = &[FieldSpec::new(
        "argument",
        "Primary argument (Max 3 sentences)",
    )];

    fn inputs(&self) -> Vec<InputField> {
        let mut inputs = vec![
            InputField::new("role", &self.role),
            InputField::new("query", &self.query),
        ];
        if let Some(report) = &self.micro_report {
            inputs.push(InputField::new("micro_report", report));
        }
        inputs
    }

    fn parse(response: &ReasoningResponse) -> Result<Self::Output, SignatureError> {
        Ok(response.require(Self::KIND, "argument")?.trim().to_string())
    }
}

/// An executive's answer to the other two chiefs
#[derive(Debug, Clone)]
pub struct RebutOpponents {
    pub role: String,
    pub my_argument: String,
    pub opponent_arguments: String,
}

impl Signature for RebutOpponents {
    type Output = String;

    const KIND: CallKind = CallKind::Rebuttal;
    const INSTRUCTIONS: &'static str = "You are a C-Level Executive. Read the arguments from the \
        other two chiefs. Destroy their logic if it threatens your department.";
    const OUTPUTS: &'static [FieldSpec] = &[FieldSpec::new("rebuttal", "Counter-argument")];

    fn inputs(&self) -> Vec<InputField> {
        vec![
            InputField::new("role", &self.role),
            InputField::new("my_argument", &self.my_argument),
            InputField::new("opponent_arguments", &self.opponent_arguments),
        ]
    }

    fn parse(response: &ReasoningResponse) -> Result<Self::Output, SignatureError> {
        Ok(response.require(Self::KIND, "rebuttal")?.trim().to_string())
    }
}

// ==================== Sovereign ====================

/// The final arbitration over every executive position
#[derive(Debug, Clone)]
pub struct SovereignJudgement {
    pub query: String,
    pub persona: String,
    /// One per executive, in speaking order
    pub positions: Vec<Position>,
}

impl SovereignJudgement {
    /// Input field name for one executive, e.g. `cfo_position`
    pub fn position_field(label: &str) -> String {
        let slug: String = label
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect();
        format!("{}_position", slug)
    }
}

impl Signature for SovereignJudgement {
    type Output = Verdict;

    const KIND: CallKind = CallKind::Verdict;
    const INSTRUCTIONS: &'static str = "You are THE SOVEREIGN. \
        1. Analyze the triangular conflict between the departments. \
        2. Evaluate the rebuttals based on your Persona Strategy. \
        3. Synthesize a final verdict.";
    const OUTPUTS: &'static [FieldSpec] = &[
        FieldSpec::new(
            "internal_thought_process",
            "Deep analysis showing your reasoning",
        ),
        FieldSpec::new("final_decision", "Final directive"),
    ];

    fn inputs(&self) -> Vec<InputField> {
        let mut inputs = vec![
            InputField::new("query", &self.query),
            InputField::new("persona", &self.persona),
        ];
        inputs.extend(
            self.positions
                .iter()
                .map(|p| InputField::new(Self::position_field(&p.executive), p.render())),
        );
        inputs
    }

    fn parse(response: &ReasoningResponse) -> Result<Self::Output, SignatureError> {
        let reasoning = response.require(Self::KIND, "internal_thought_process")?;
        let decision = response.require(Self::KIND, "final_decision")?;
        Ok(Verdict::new(reasoning.trim(), decision.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complexity_parses_score_and_defaults() {
        let response = ReasoningResponse::new()
            .with_field("complexity_score", "7.5")
            .with_field("reasoning", " multi-department trade-off ");
        let out = AssessComplexity::parse(&response).unwrap();
        assert_eq!(out.score, 7.5);
        assert_eq!(out.reasoning, "multi-department trade-off");

        let garbled = ReasoningResponse::new()
            .with_field("complexity_score", "very high")
            .with_field("reasoning", "x");
        assert_eq!(AssessComplexity::parse(&garbled).unwrap().score, NEUTRAL_SCORE);

        let missing_score = ReasoningResponse::new().with_field("reasoning", "x");
        assert_eq!(
            AssessComplexity::parse(&missing_score).unwrap().score,
            NEUTRAL_SCORE
        );
    }

    #[test]
    fn test_complexity_requires_reasoning() {
        let response = ReasoningResponse::new().with_field("complexity_score", "3");
        assert!(matches!(
            AssessComplexity::parse(&response),
            Err(SignatureError::MissingField { kind: CallKind::Classification, .. })
        ));
    }

    #[test]
    fn test_review_score_fraction() {
        let response = ReasoningResponse::new()
            .with_field("score", "8/10")
            .with_field("critique", "Solid numbers");
        let out = ReviewDraft::parse(&response).unwrap();
        assert_eq!(out.score, 8.0);
        assert_eq!(out.critique, "Solid numbers");
    }

    #[test]
    fn test_opening_omits_absent_report() {
        let with = OpeningStatement {
            role: "CFO".into(),
            query: "Q".into(),
            micro_report: Some("Report".into()),
        }
        .to_request();
        assert_eq!(with.input("micro_report"), Some("Report"));

        let without = OpeningStatement {
            role: "CFO".into(),
            query: "Q".into(),
            micro_report: None,
        }
        .to_request();
        assert_eq!(without.input("micro_report"), None);
        assert_eq!(without.kind, CallKind::Opening);
    }

    #[test]
    fn test_sovereign_inputs_and_parse() {
        let call = SovereignJudgement {
            query: "Pause AWS?".into(),
            persona: "Save cash".into(),
            positions: vec![
                Position {
                    executive: "CFO".into(),
                    argument: "a".into(),
                    rebuttal: "b".into(),
                },
                Position {
                    executive: "Head of Growth".into(),
                    argument: "c".into(),
                    rebuttal: "d".into(),
                },
            ],
        };
        let request = call.to_request();
        assert_eq!(request.input("cfo_position"), Some("Argument: a | Rebuttal: b"));
        assert_eq!(
            request.input("head_of_growth_position"),
            Some("Argument: c | Rebuttal: d")
        );

        let response = ReasoningResponse::new()
            .with_field("internal_thought_process", "Cash is king")
            .with_field("final_decision", "Pause the migration");
        let verdict = SovereignJudgement::parse(&response).unwrap();
        assert_eq!(verdict.internal_reasoning, "Cash is king");
        assert_eq!(verdict.final_decision, "Pause the migration");
    }
}
