//! Field-marker prompt codec
//!
//! Structured fields travel through a plain chat completion as sections
//! introduced by `[[ ## name ## ]]` markers. Requests are rendered into a
//! system prompt that declares the fields and a user prompt holding the
//! input sections; completions are split back on the same markers.

use council_domain::{ReasoningRequest, ReasoningResponse};
use std::fmt::Write as _;

const OPEN: &str = "[[ ##";
const CLOSE: &str = "## ]]";
const COMPLETED: &str = "completed";

pub fn marker(name: &str) -> String {
    format!("{} {} {}", OPEN, name, CLOSE)
}

/// The system prompt: instructions, field declarations and the layout the
/// model must answer in
pub fn system_prompt(request: &ReasoningRequest) -> String {
    let mut prompt = String::new();
    let _ = writeln!(prompt, "{}", request.instructions);

    prompt.push_str("\nYour input fields are:\n");
    for (i, input) in request.inputs.iter().enumerate() {
        let _ = writeln!(prompt, "{}. `{}`", i + 1, input.name);
    }
    prompt.push_str("Your output fields are:\n");
    for (i, output) in request.outputs.iter().enumerate() {
        let _ = writeln!(prompt, "{}. `{}`: {}", i + 1, output.name, output.description);
    }

    prompt.push_str(
        "\nAll interactions will be structured in the following way, \
         with the appropriate values filled in.\n\n",
    );
    for input in &request.inputs {
        let _ = writeln!(prompt, "{}\n{{{}}}\n", marker(&input.name), input.name);
    }
    for output in request.outputs {
        let _ = writeln!(prompt, "{}\n{{{}}}\n", marker(output.name), output.name);
    }
    prompt.push_str(&marker(COMPLETED));
    prompt
}

/// The user prompt: one section per input, then the answer reminder
pub fn user_prompt(request: &ReasoningRequest) -> String {
    let mut prompt = String::new();
    for input in &request.inputs {
        let _ = writeln!(prompt, "{}\n{}\n", marker(&input.name), input.value);
    }

    let fields: Vec<String> = request
        .output_names()
        .map(|name| format!("`{}`", marker(name)))
        .collect();
    let _ = write!(
        prompt,
        "Respond with the corresponding output fields, starting with the field {}, \
         and then ending with the marker for `{}`.",
        fields.join(", then "),
        marker(COMPLETED)
    );
    prompt
}

/// Split a completion into the request's declared output fields.
///
/// Undeclared sections are ignored and the first occurrence of a field
/// wins. A completion without any marker is taken whole when exactly one
/// output is declared. Missing fields are left for the signature to reject.
pub fn decode(request: &ReasoningRequest, completion: &str) -> ReasoningResponse {
    let mut response = ReasoningResponse::new();
    let sections = sections(completion);

    if sections.is_empty() {
        if let [only] = request.outputs {
            let text = completion.trim();
            if !text.is_empty() {
                response.insert(only.name, text);
            }
        }
        return response;
    }

    for (name, value) in sections {
        let declared = request.output_names().any(|n| n == name);
        if declared && response.field(name).is_none() {
            response.insert(name, value.trim());
        }
    }
    response
}

fn sections(text: &str) -> Vec<(&str, &str)> {
    let mut found = Vec::new();
    let mut rest = text;
    let mut current: Option<&str> = None;
    while let Some((start, name, end)) = next_marker(rest) {
        if let Some(open) = current {
            found.push((open, &rest[..start]));
        }
        current = Some(name);
        rest = &rest[end..];
    }
    if let Some(open) = current {
        found.push((open, rest));
    }
    found
}

/// `(marker start, field name, marker end)` of the next marker in `text`
fn next_marker(text: &str) -> Option<(usize, &str, usize)> {
    let start = text.find(OPEN)?;
    let name_start = start + OPEN.len();
    let name_len = text[name_start..].find(CLOSE)?;
    let name = text[name_start..name_start + name_len].trim();
    Some((start, name, name_start + name_len + CLOSE.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use council_domain::Signature;
    use council_domain::signature::{AssessComplexity, DraftAnswer, ReviewDraft};

    fn review_request() -> ReasoningRequest {
        ReviewDraft {
            department_goal: "Maximize ROI".to_string(),
            proposal_text: "Pause the migration".to_string(),
        }
        .to_request()
    }

    #[test]
    fn test_prompts_carry_markers() {
        let request = review_request();
        let system = system_prompt(&request);
        assert!(system.starts_with(request.instructions));
        assert!(system.contains("1. `department_goal`"));
        assert!(system.contains("[[ ## score ## ]]"));
        assert!(system.ends_with("[[ ## completed ## ]]"));

        let user = user_prompt(&request);
        assert!(user.contains("[[ ## proposal_text ## ]]\nPause the migration\n"));
        assert!(user.contains("`[[ ## score ## ]]`, then `[[ ## critique ## ]]`"));
    }

    #[test]
    fn test_decode_sections() {
        let completion = "\
[[ ## score ## ]]
7/10

[[ ## critique ## ]]
Ignores churn.
Needs numbers.

[[ ## completed ## ]]";
        let response = decode(&review_request(), completion);
        assert_eq!(response.field("score"), Some("7/10"));
        assert_eq!(response.field("critique"), Some("Ignores churn.\nNeeds numbers."));
        assert_eq!(response.len(), 2);
    }

    #[test]
    fn test_decode_inline_marker_and_preamble() {
        let completion = "Sure! [[ ## score ## ]] 9 [[ ## critique ## ]] Solid.";
        let response = decode(&review_request(), completion);
        assert_eq!(response.field("score"), Some("9"));
        assert_eq!(response.field("critique"), Some("Solid."));
    }

    #[test]
    fn test_first_occurrence_wins_and_unknown_ignored() {
        let completion = "[[ ## score ## ]]\n6\n[[ ## verdict ## ]]\nno\n[[ ## score ## ]]\n10";
        let response = decode(&review_request(), completion);
        assert_eq!(response.field("score"), Some("6"));
        assert_eq!(response.field("verdict"), None);
        assert_eq!(response.field("critique"), None);
    }

    #[test]
    fn test_bare_completion_fills_single_output() {
        let request = DraftAnswer {
            department_goal: "Maximize ROI".to_string(),
            rag_context: String::new(),
            query: "Pause AWS?".to_string(),
        }
        .to_request();
        let response = decode(&request, "  Pause it for a quarter.  ");
        assert_eq!(response.field("draft_answer"), Some("Pause it for a quarter."));
    }

    #[test]
    fn test_bare_completion_with_two_outputs_is_empty() {
        let request = AssessComplexity {
            query: "Hi".to_string(),
        }
        .to_request();
        let response = decode(&request, "7");
        assert!(response.is_empty());
    }
}
