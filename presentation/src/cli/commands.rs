//! CLI command definitions

use clap::Parser;
use council_domain::{OutputFormat, Persona, PersonaPreset};
use std::path::PathBuf;

/// CLI arguments for sovereign-council
#[derive(Parser, Debug)]
#[command(name = "sovereign-council")]
#[command(author, version, about = "Hierarchical multi-agent council that deliberates and rules")]
#[command(long_about = r#"
Sovereign Council routes a strategic question through a hierarchy of models.

1. Router: scores the query; simple questions stop at the FAST_LANE
2. Departments: Finance, Growth and Tech each draft, peer-review and
   synthesize a report with three workers
3. Macro council: the CFO, CMO and CTO argue and rebut each other
4. Sovereign: weighs every position under a persona and rules

Configuration files are loaded from (in priority order):
1. COUNCIL_* environment variables
2. --config <path>       Explicit config file
3. ./council.toml        Project-level config
4. ~/.config/sovereign-council/config.toml   Global config

Example:
  sovereign-council "Should we pause the AWS migration to save cash?"
  sovereign-council --deep --persona wartime "Hire two more SREs?"
  sovereign-council --route-only "What is our burn rate?"
"#)]
pub struct Cli {
    /// The question to put before the council
    pub query: Option<String>,

    /// Skip the router and always convene the full council
    #[arg(long)]
    pub deep: bool,

    /// Only classify the query and print the routing decision
    #[arg(long, conflicts_with_all = ["deep", "council_only"])]
    pub route_only: bool,

    /// Skip the departments and debate the raw query
    #[arg(long)]
    pub council_only: bool,

    /// Strategic lens of the sovereign
    #[arg(long, value_name = "PERSONA")]
    pub persona: Option<PersonaPreset>,

    /// Free-form persona directive (overrides --persona)
    #[arg(long, value_name = "TEXT")]
    pub persona_text: Option<String>,

    /// Rebuttal rounds after the openings
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    pub rounds: Option<u32>,

    /// Output format: full, verdict or json
    #[arg(short, long, default_value = "full")]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Also write diagnostic logs to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Persona chosen on the command line, if any
    pub fn persona_override(&self) -> Option<Persona> {
        match (&self.persona_text, self.persona) {
            (Some(text), _) if !text.trim().is_empty() => Some(Persona::custom(text)),
            (_, Some(preset)) => Some(preset.into()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults() {
        let cli = Cli::try_parse_from(["sovereign-council", "Pause AWS?"]).unwrap();
        assert_eq!(cli.query.as_deref(), Some("Pause AWS?"));
        assert!(!cli.deep);
        assert_eq!(cli.output, OutputFormat::Full);
        assert!(cli.persona_override().is_none());
        assert!(cli.rounds.is_none());
    }

    #[test]
    fn test_parse_full_flags() {
        let cli = Cli::try_parse_from([
            "sovereign-council",
            "--deep",
            "--persona",
            "wartime",
            "--rounds",
            "2",
            "-o",
            "json",
            "-vv",
            "Pause AWS?",
        ])
        .unwrap();
        assert!(cli.deep);
        assert_eq!(cli.persona, Some(PersonaPreset::Wartime));
        assert_eq!(cli.rounds, Some(2));
        assert_eq!(cli.output, OutputFormat::Json);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_persona_text_wins() {
        let cli = Cli::try_parse_from([
            "sovereign-council",
            "--persona",
            "visionary",
            "--persona-text",
            "Think in decades.",
            "q",
        ])
        .unwrap();
        assert_eq!(
            cli.persona_override().unwrap().directive(),
            "Think in decades."
        );
    }

    #[test]
    fn test_rejects_zero_rounds_and_unknown_persona() {
        assert!(Cli::try_parse_from(["sovereign-council", "--rounds", "0", "q"]).is_err());
        assert!(Cli::try_parse_from(["sovereign-council", "--persona", "pirate", "q"]).is_err());
    }

    #[test]
    fn test_route_only_conflicts_with_deep() {
        assert!(Cli::try_parse_from(["sovereign-council", "--route-only", "--deep", "q"]).is_err());
    }
}
