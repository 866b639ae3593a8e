//! Deliberation settings from TOML
//!
//! `[retry]`, `[router]`, `[sovereign]`, `[debate]`, `[review]` and
//! `[context]` sections.
//!
//! ```toml
//! [retry]
//! max_attempts = 3
//! base_delay_ms = 1000
//!
//! [sovereign]
//! persona = "wartime"
//!
//! [debate]
//! rounds = 2
//! turn_order = "round_robin"
//! ```

use council_application::{DEFAULT_EXCERPT_CHARS, DEFAULT_MAX_CONCURRENT_REVIEWS, ReviewParams};
use council_domain::{
    ConfigIssue, ConfigIssueCode, DebateSettings, Persona, PersonaPreset, RetryPolicy, TurnOrder,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// `[retry]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRetryConfig {
    pub max_attempts: u32,
    /// Delay after the first failure; doubled after each further failure
    pub base_delay_ms: u64,
}

impl Default for FileRetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 1000,
        }
    }
}

impl FileRetryConfig {
    /// Parse into a policy, falling back to the default on invalid values.
    pub fn to_policy(&self) -> (RetryPolicy, Vec<ConfigIssue>) {
        match RetryPolicy::new(self.max_attempts, Duration::from_millis(self.base_delay_ms)) {
            Ok(policy) => (policy, Vec::new()),
            Err(_) => (
                RetryPolicy::default(),
                vec![ConfigIssue::error(
                    ConfigIssueCode::ZeroAttempts,
                    "retry.max_attempts must be at least 1",
                )],
            ),
        }
    }
}

/// `[router]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRouterConfig {
    /// Classification model; `provider.default_model` when unset
    pub model: Option<String>,
}

/// `[sovereign]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSovereignConfig {
    /// Verdict model; `provider.default_model` when unset
    pub model: Option<String>,
    /// Preset name: "balanced", "wartime" or "visionary"
    pub persona: String,
    /// Free-form directive; overrides `persona` when present
    pub persona_text: Option<String>,
}

impl Default for FileSovereignConfig {
    fn default() -> Self {
        Self {
            model: None,
            persona: PersonaPreset::Balanced.as_str().to_string(),
            persona_text: None,
        }
    }
}

impl FileSovereignConfig {
    pub fn to_persona(&self) -> (Persona, Vec<ConfigIssue>) {
        if let Some(text) = self.persona_text.as_deref().filter(|t| !t.trim().is_empty()) {
            return (Persona::custom(text), Vec::new());
        }
        match self.persona.parse::<PersonaPreset>() {
            Ok(preset) => (preset.into(), Vec::new()),
            Err(e) => (
                Persona::default(),
                vec![ConfigIssue::warning(
                    ConfigIssueCode::UnknownPersona,
                    format!("sovereign.persona: {}, falling back to 'balanced'", e),
                )],
            ),
        }
    }
}

/// `[debate]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDebateConfig {
    /// Rebuttal rounds after the openings
    pub rounds: u32,
    /// "simultaneous" or "round_robin"
    pub turn_order: String,
}

impl Default for FileDebateConfig {
    fn default() -> Self {
        Self {
            rounds: 1,
            turn_order: TurnOrder::default().as_str().to_string(),
        }
    }
}

impl FileDebateConfig {
    pub fn to_settings(&self) -> (DebateSettings, Vec<ConfigIssue>) {
        let mut issues = Vec::new();
        if self.rounds == 0 {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::ZeroRounds,
                "debate.rounds is 0, running one rebuttal round",
            ));
        }
        let turn_order = self.turn_order.parse().unwrap_or_else(|e| {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::UnknownValue,
                format!("debate.turn_order: {}, falling back to 'simultaneous'", e),
            ));
            TurnOrder::default()
        });
        let settings = DebateSettings::default()
            .with_rounds(self.rounds)
            .with_turn_order(turn_order);
        (settings, issues)
    }
}

/// `[review]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileReviewConfig {
    /// Peer reviews in flight per department
    pub max_concurrent: usize,
    /// Characters of each draft handed to the department head
    pub excerpt_chars: usize,
}

impl Default for FileReviewConfig {
    fn default() -> Self {
        Self {
            max_concurrent: DEFAULT_MAX_CONCURRENT_REVIEWS,
            excerpt_chars: DEFAULT_EXCERPT_CHARS,
        }
    }
}

impl FileReviewConfig {
    pub fn to_params(&self) -> (ReviewParams, Vec<ConfigIssue>) {
        let mut issues = Vec::new();
        if self.max_concurrent == 0 {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::ZeroConcurrency,
                "review.max_concurrent is 0, running reviews one at a time",
            ));
        }
        if self.excerpt_chars == 0 {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::EmptyExcerpt,
                "review.excerpt_chars is 0, the department head sees no draft text",
            ));
        }
        let params = ReviewParams::default()
            .with_max_concurrent(self.max_concurrent)
            .with_excerpt_chars(self.excerpt_chars);
        (params, issues)
    }
}

/// `[context]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileContextConfig {
    /// Directory of `<scope>.md` files; the built-in corpus when unset
    pub dir: Option<PathBuf>,
}

impl FileContextConfig {
    pub(super) fn validate(&self, issues: &mut Vec<ConfigIssue>) {
        if let Some(dir) = &self.dir
            && !dir.is_dir()
        {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::MissingContextDir,
                format!("context.dir: '{}' is not a directory", dir.display()),
            ));
        }
    }
}
