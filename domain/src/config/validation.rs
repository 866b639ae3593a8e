//! Configuration validation issues.
//!
//! Loading a configuration file never fails on its own; instead the
//! infrastructure layer inspects the merged values and reports a list of
//! [`ConfigIssue`]s. Any [`Severity::Error`] aborts startup; warnings are
//! logged and the run continues.

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: the configuration works but may not behave as expected.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// The API key environment variable is unset or empty.
    MissingApiKey,
    /// A provider model identifier is empty.
    EmptyModel,
    /// The council roster does not have exactly three departments.
    DepartmentCount,
    /// A department does not have exactly three workers.
    WorkerCount,
    /// Two departments share a name or an executive label.
    DuplicateName,
    /// `retry.max_attempts` is zero.
    ZeroAttempts,
    /// `debate.rounds` is zero; it is raised to one.
    ZeroRounds,
    /// `review.max_concurrent` is zero.
    ZeroConcurrency,
    /// `review.excerpt_chars` is zero; drafts reach the boss empty.
    EmptyExcerpt,
    /// The configured persona name is not a known preset.
    UnknownPersona,
    /// The context directory does not exist.
    MissingContextDir,
    /// An unrecognised enum value such as a turn order.
    UnknownValue,
}

/// A detected issue in the configuration.
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl std::fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let level = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{}: {}", level, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_set_severity() {
        let e = ConfigIssue::error(ConfigIssueCode::ZeroAttempts, "retry.max_attempts is 0");
        assert!(e.is_error());
        let w = ConfigIssue::warning(ConfigIssueCode::ZeroRounds, "debate.rounds is 0");
        assert!(!w.is_error());
        assert_eq!(w.to_string(), "warning: debate.rounds is 0");
    }
}
