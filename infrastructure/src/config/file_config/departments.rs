//! Department roster from TOML (`[[departments]]` array)
//!
//! ```toml
//! [[departments]]
//! name = "Finance"
//! goal = "Maximize ROI"
//! head_model = "meta-llama/llama-3.3-70b-instruct:free"
//! workers = [
//!     { model = "mistralai/mistral-7b-instruct:free" },
//!     { model = "meta-llama/llama-3.2-3b-instruct:free" },
//!     { role = "Skeptical Auditor", model = "meta-llama/llama-3.3-70b-instruct:free" },
//! ]
//!
//! [departments.executive]
//! label = "CFO"
//! model = "mistralai/mistral-small-3.1-24b-instruct:free"
//! ```
//!
//! A configured `[[departments]]` array replaces the built-in roster as a
//! whole.

use council_application::{CouncilRoster, DepartmentProfile, ExecutiveProfile};
use council_domain::signature::SovereignJudgement;
use council_domain::{ConfigIssue, ConfigIssueCode, WORKERS_PER_DEPARTMENT};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

const WORKER_MODELS: [&str; 3] = [
    "mistralai/mistral-7b-instruct:free",
    "meta-llama/llama-3.2-3b-instruct:free",
    "meta-llama/llama-3.3-70b-instruct:free",
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileWorkerConfig {
    /// Role label; `"{department} Analyst {n}"` when unset
    pub role: Option<String>,
    pub model: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileExecutiveConfig {
    /// Speaker label, e.g. "CFO"
    pub label: String,
    /// Role text for the model; the label when unset
    pub role: Option<String>,
    pub model: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDepartmentConfig {
    pub name: String,
    pub goal: String,
    /// Model of the department head that synthesizes the report
    pub head_model: Option<String>,
    pub workers: Vec<FileWorkerConfig>,
    pub executive: FileExecutiveConfig,
}

impl FileDepartmentConfig {
    fn builtin(name: &str, goal: &str, label: &str, executive_model: &str) -> Self {
        Self {
            name: name.to_string(),
            goal: goal.to_string(),
            head_model: None,
            workers: WORKER_MODELS
                .iter()
                .map(|model| FileWorkerConfig {
                    role: None,
                    model: Some(model.to_string()),
                })
                .collect(),
            executive: FileExecutiveConfig {
                label: label.to_string(),
                role: None,
                model: Some(executive_model.to_string()),
            },
        }
    }

    /// Finance (CFO), Growth (CMO) and Tech (CTO)
    pub fn builtin_roster() -> Vec<Self> {
        vec![
            Self::builtin(
                "Finance",
                "Maximize ROI",
                "CFO",
                "mistralai/mistral-small-3.1-24b-instruct:free",
            ),
            Self::builtin(
                "Growth",
                "Maximize User Base",
                "CMO",
                "nousresearch/hermes-3-llama-3.1-405b:free",
            ),
            Self::builtin(
                "Tech",
                "System Stability",
                "CTO",
                "meta-llama/llama-3.3-70b-instruct:free",
            ),
        ]
    }

    pub fn worker_model(&self, index: usize) -> Option<&str> {
        self.workers.get(index).and_then(|w| w.model.as_deref())
    }

    pub fn to_profile(&self) -> DepartmentProfile {
        let mut executive = ExecutiveProfile::new(&self.executive.label);
        if let Some(role) = &self.executive.role {
            executive = executive.with_role(role);
        }
        let roles = self
            .workers
            .iter()
            .enumerate()
            .map(|(i, w)| {
                w.role
                    .clone()
                    .unwrap_or_else(|| format!("{} Analyst {}", self.name, i + 1))
            })
            .collect();
        DepartmentProfile::new(&self.name, &self.goal, executive).with_worker_roles(roles)
    }

    /// Every model id this department names, with its config path
    fn models(&self, index: usize) -> Vec<(String, &Option<String>)> {
        let mut models = vec![
            (format!("departments[{}].head_model", index), &self.head_model),
            (
                format!("departments[{}].executive.model", index),
                &self.executive.model,
            ),
        ];
        for (w, worker) in self.workers.iter().enumerate() {
            models.push((
                format!("departments[{}].workers[{}].model", index, w),
                &worker.model,
            ));
        }
        models
    }
}

pub fn to_roster(departments: &[FileDepartmentConfig]) -> CouncilRoster {
    CouncilRoster::new(departments.iter().map(|d| d.to_profile()).collect())
}

pub(super) fn validate(
    departments: &[FileDepartmentConfig],
    expected: usize,
    issues: &mut Vec<ConfigIssue>,
) {
    if departments.len() != expected {
        issues.push(ConfigIssue::error(
            ConfigIssueCode::DepartmentCount,
            format!(
                "departments: expected {} departments, found {}",
                expected,
                departments.len()
            ),
        ));
    }

    let mut names = HashSet::new();
    let mut labels = HashSet::new();
    for (i, dept) in departments.iter().enumerate() {
        if dept.workers.len() != WORKERS_PER_DEPARTMENT {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::WorkerCount,
                format!(
                    "departments[{}] ({}): expected {} workers, found {}",
                    i,
                    dept.name,
                    WORKERS_PER_DEPARTMENT,
                    dept.workers.len()
                ),
            ));
        }
        if dept.name.trim().is_empty() || !names.insert(dept.name.to_lowercase()) {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::DuplicateName,
                format!(
                    "departments[{}]: name '{}' is empty or already used",
                    i, dept.name
                ),
            ));
        }
        // Labels become verdict input names, so they must stay distinct as slugs.
        let field = SovereignJudgement::position_field(&dept.executive.label);
        if dept.executive.label.trim().is_empty() || !labels.insert(field) {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::DuplicateName,
                format!(
                    "departments[{}].executive.label '{}' is empty or already used",
                    i, dept.executive.label
                ),
            ));
        }
        for (path, model) in dept.models(i) {
            if model.as_deref().is_some_and(|m| m.trim().is_empty()) {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::EmptyModel,
                    format!("{} cannot be empty", path),
                ));
            }
        }
    }
}
