//! Typed call signatures.
//!
//! Every provider call kind has its own input record implementing
//! [`Signature`]. The record knows how to lower itself into a
//! [`ReasoningRequest`] and how to lift a [`ReasoningResponse`] back into a
//! typed output, so orchestration code never touches field names.
//!
//! | Record | Inputs | Outputs |
//! |--------|--------|---------|
//! | [`AssessComplexity`] | query | complexity_score, reasoning |
//! | [`DraftAnswer`] | department_goal, rag_context, query | draft_answer |
//! | [`ReviewDraft`] | department_goal, proposal_text | score, critique |
//! | [`SynthesizeReport`] | department_goal, query, report_data | final_answer |
//! | [`OpeningStatement`] | role, query, micro_report? | argument |
//! | [`RebutOpponents`] | role, my_argument, opponent_arguments | rebuttal |
//! | [`SovereignJudgement`] | query, persona, `<label>_position`… | internal_thought_process, final_decision |

pub mod calls;
pub mod request;

pub use calls::{
    AssessComplexity, Complexity, DraftAnswer, OpeningStatement, RebutOpponents, ReviewDraft,
    ReviewOutcome, SovereignJudgement, SynthesizeReport,
};
pub use request::{
    CallKind, FieldSpec, InputField, ReasoningRequest, ReasoningResponse, SignatureError,
};

/// A typed provider call
pub trait Signature {
    type Output;

    const KIND: CallKind;
    const INSTRUCTIONS: &'static str;
    const OUTPUTS: &'static [FieldSpec];

    fn inputs(&self) -> Vec<InputField>;

    fn parse(response: &ReasoningResponse) -> Result<Self::Output, SignatureError>;

    fn to_request(&self) -> ReasoningRequest {
        ReasoningRequest {
            kind: Self::KIND,
            instructions: Self::INSTRUCTIONS,
            inputs: self.inputs(),
            outputs: Self::OUTPUTS,
        }
    }
}
