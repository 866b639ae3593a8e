//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into application types
//! once validation passes.

mod council;
mod departments;
mod provider;

pub use council::{
    FileContextConfig, FileDebateConfig, FileRetryConfig, FileReviewConfig, FileRouterConfig,
    FileSovereignConfig,
};
pub use departments::{FileDepartmentConfig, FileExecutiveConfig, FileWorkerConfig};
pub use provider::{DEFAULT_API_KEY_ENV, DEFAULT_BASE_URL, DEFAULT_MODEL, FileProviderConfig};

use council_application::{COUNCIL_SIZE, CouncilConfig, CouncilRoster, Seat};
use council_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fatal configuration issues found at startup
#[derive(Debug, Error)]
#[error("invalid configuration: {}", render(.0))]
pub struct ConfigValidationError(pub Vec<ConfigIssue>);

fn render(issues: &[ConfigIssue]) -> String {
    issues
        .iter()
        .map(|i| i.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// OpenAI-compatible endpoint shared by every seat
    pub provider: FileProviderConfig,
    pub retry: FileRetryConfig,
    pub router: FileRouterConfig,
    pub sovereign: FileSovereignConfig,
    pub debate: FileDebateConfig,
    pub review: FileReviewConfig,
    pub context: FileContextConfig,
    /// Speaking order of the macro council
    pub departments: Vec<FileDepartmentConfig>,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            provider: FileProviderConfig::default(),
            retry: FileRetryConfig::default(),
            router: FileRouterConfig::default(),
            sovereign: FileSovereignConfig::default(),
            debate: FileDebateConfig::default(),
            review: FileReviewConfig::default(),
            context: FileContextConfig::default(),
            departments: FileDepartmentConfig::builtin_roster(),
        }
    }
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Errors abort startup; warnings describe a fallback that was applied.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        self.provider.validate(&mut issues);
        for (path, model) in [
            ("router.model", &self.router.model),
            ("sovereign.model", &self.sovereign.model),
        ] {
            if model.as_deref().is_some_and(|m| m.trim().is_empty()) {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::EmptyModel,
                    format!("{} cannot be empty", path),
                ));
            }
        }
        issues.extend(self.retry.to_policy().1);
        issues.extend(self.sovereign.to_persona().1);
        issues.extend(self.debate.to_settings().1);
        issues.extend(self.review.to_params().1);
        self.context.validate(&mut issues);
        departments::validate(&self.departments, COUNCIL_SIZE, &mut issues);

        issues
    }

    /// Split issues into fatal errors and warnings; errors fail the load
    pub fn validated(&self) -> Result<Vec<ConfigIssue>, ConfigValidationError> {
        let (errors, warnings): (Vec<_>, Vec<_>) =
            self.validate().into_iter().partition(|i| i.is_error());
        if errors.is_empty() {
            Ok(warnings)
        } else {
            Err(ConfigValidationError(errors))
        }
    }

    /// Tuning knobs for the use cases; invalid values fall back to defaults
    pub fn to_council_config(&self) -> CouncilConfig {
        CouncilConfig::new(
            self.retry.to_policy().0,
            self.review.to_params().0,
            self.debate.to_settings().0,
            self.sovereign.to_persona().0,
        )
    }

    pub fn to_roster(&self) -> CouncilRoster {
        departments::to_roster(&self.departments)
    }

    /// Model id bound to a seat, falling back to `provider.default_model`
    pub fn model_for(&self, seat: Seat<'_>) -> &str {
        let explicit = match seat {
            Seat::Router => self.router.model.as_deref(),
            Seat::Sovereign => self.sovereign.model.as_deref(),
            Seat::Worker { department, index } => self
                .department(department)
                .and_then(|d| d.worker_model(index)),
            Seat::DepartmentHead { department } => self
                .department(department)
                .and_then(|d| d.head_model.as_deref()),
            Seat::Executive { label } => self
                .departments
                .iter()
                .find(|d| d.executive.label == label)
                .and_then(|d| d.executive.model.as_deref()),
        };
        explicit.unwrap_or(&self.provider.default_model)
    }

    /// Every distinct model id the council may call, default first
    pub fn distinct_models(&self) -> Vec<&str> {
        let mut models = vec![self.provider.default_model.as_str()];
        let seats = self
            .router
            .model
            .iter()
            .chain(self.sovereign.model.iter())
            .chain(self.departments.iter().flat_map(|d| {
                d.head_model
                    .iter()
                    .chain(d.executive.model.iter())
                    .chain(d.workers.iter().filter_map(|w| w.model.as_ref()))
            }));
        for model in seats {
            if !models.contains(&model.as_str()) {
                models.push(model);
            }
        }
        models
    }

    fn department(&self, name: &str) -> Option<&FileDepartmentConfig> {
        self.departments.iter().find(|d| d.name == name)
    }
}
