//! Console output formatter for deliberation outcomes

use colored::Colorize;
use council_application::{CouncilOutcome, DeliberationOutcome};
use council_domain::{
    DebateRecord, DepartmentReport, OutputFormat, Route, RoutingDecision, TurnKind, average_for,
};

/// Formats deliberation outcomes for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Render `outcome` in the requested format
    pub fn render(query: &str, outcome: &DeliberationOutcome, format: OutputFormat) -> String {
        match format {
            OutputFormat::Full => Self::format(query, outcome),
            OutputFormat::Verdict => Self::format_verdict_only(outcome),
            OutputFormat::Json => Self::format_json(outcome),
        }
    }

    /// Render a council-only run in the requested format
    pub fn render_council(query: &str, council: &CouncilOutcome, format: OutputFormat) -> String {
        match format {
            OutputFormat::Full => {
                let mut output = Self::header("Sovereign Council");
                output.push('\n');
                output.push_str(&Self::query_line(query));
                output.push_str(&Self::council_sections(council));
                output.push_str(&Self::footer());
                output
            }
            OutputFormat::Verdict => format!("{}\n", council.verdict.final_decision),
            OutputFormat::Json => {
                serde_json::to_string_pretty(council).unwrap_or_else(|_| "{}".to_string())
            }
        }
    }

    /// Format the complete outcome
    pub fn format(query: &str, outcome: &DeliberationOutcome) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Sovereign Council"));
        output.push('\n');
        output.push_str(&Self::query_line(query));

        output.push_str(&Self::section_header("Routing"));
        output.push_str(&Self::route_lines(outcome.decision()));

        match outcome {
            DeliberationOutcome::FastLane(_) => {
                output.push_str(&format!(
                    "\n{}\n",
                    "Fast lane: the council was not convened.".dimmed()
                ));
            }
            DeliberationOutcome::DeepLane(report) => {
                output.push_str(&Self::section_header("Department Reports"));
                for department in &report.reports {
                    output.push_str(&Self::department(department));
                }
                output.push_str(&Self::council_sections(&report.council));

                let elapsed = report.finished_at - report.started_at;
                output.push_str(&format!(
                    "\n{} {:.1}s\n",
                    "Deliberation time:".dimmed(),
                    elapsed.num_milliseconds() as f64 / 1000.0
                ));
            }
        }

        output.push_str(&Self::footer());
        output
    }

    /// Format as JSON
    pub fn format_json(outcome: &DeliberationOutcome) -> String {
        serde_json::to_string_pretty(outcome).unwrap_or_else(|_| "{}".to_string())
    }

    /// The sovereign's decision, or the routing line for the fast lane
    pub fn format_verdict_only(outcome: &DeliberationOutcome) -> String {
        match outcome.verdict() {
            Some(verdict) => format!("{}\n", verdict.final_decision),
            None => Self::format_route(outcome.decision()),
        }
    }

    /// Render a route-only run in the requested format
    pub fn render_route(decision: &RoutingDecision, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(decision).unwrap_or_else(|_| "{}".to_string())
            }
            _ => Self::format_route(decision),
        }
    }

    /// Routing decision alone (`--route-only`)
    pub fn format_route(decision: &RoutingDecision) -> String {
        Self::route_lines(decision)
    }

    fn route_lines(decision: &RoutingDecision) -> String {
        let lane = match decision.route() {
            Route::FastLane => decision.route().to_string().green().bold(),
            Route::DeepLane => decision.route().to_string().yellow().bold(),
        };
        format!(
            "{} {} (complexity {:.1}/10)\n{} {}\n",
            "Route:".cyan().bold(),
            lane,
            decision.score(),
            "Reasoning:".cyan().bold(),
            decision.reasoning()
        )
    }

    fn department(report: &DepartmentReport) -> String {
        let mut output = format!(
            "\n{}\n{} {}\n",
            format!("── {} ──", report.department).yellow().bold(),
            "Goal:".dimmed(),
            report.goal
        );
        for draft in &report.drafts {
            output.push_str(&format!(
                "  {} avg {:.2}\n",
                draft.author.label(),
                average_for(draft.author, &report.reviews)
            ));
        }
        output.push_str(&format!("\n{}\n", report.final_text));
        output
    }

    fn council_sections(council: &CouncilOutcome) -> String {
        let mut output = Self::section_header("Macro Council");
        output.push_str(&Self::debate(&council.debate));

        output.push_str(&Self::section_header("Sovereign Verdict"));
        output.push_str(&format!(
            "\n{} {}\n\n{}\n{}\n\n{}\n{}\n",
            "Persona:".cyan().bold(),
            council.persona,
            "Internal reasoning:".dimmed(),
            Self::indent(&council.verdict.internal_reasoning, "  "),
            "Decision:".green().bold(),
            council.verdict.final_decision
        ));
        output
    }

    fn debate(debate: &DebateRecord) -> String {
        let mut output = String::new();
        for turn in debate.transcript.turns() {
            let title = match turn.kind {
                TurnKind::Opening => format!("── {} opening ──", turn.speaker),
                TurnKind::Rebuttal => {
                    format!("── {} rebuttal (round {}) ──", turn.speaker, turn.round)
                }
            };
            output.push_str(&format!("\n{}\n{}\n", title.yellow().bold(), turn.text));
        }
        output
    }

    fn query_line(query: &str) -> String {
        format!("{} {}\n", "Query:".cyan().bold(), query)
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
