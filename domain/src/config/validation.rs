//! Structured configuration issues.
//!
//! Configuration validation collects every problem it finds instead of
//! stopping at the first one. Each issue carries a [`Severity`]: errors stop
//! a session from being built, warnings are reported and ignored.

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the session cannot be built.
    Error,
    /// Non-fatal: the session runs but may not behave as expected.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// A string field did not parse into its enum.
    InvalidEnumValue {
        field: String,
        value: String,
        valid_values: Vec<String>,
    },
    /// No participants are configured.
    EmptyRoster,
    /// Two participants share a name.
    DuplicateParticipant { name: String },
    /// A name is referenced (graph, initial speaker) but not in the roster.
    UnknownParticipant { field: String, name: String },
    /// Nobody may follow this participant under the configured policy.
    DeadEnd { name: String },
    /// A transition graph is configured while the mode is unrestricted.
    IgnoredTransitionGraph,
    /// A numeric limit is out of range.
    InvalidLimit { field: String, value: usize },
}

/// A detected issue in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
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
    fn test_constructors() {
        let issue = ConfigIssue::error(ConfigIssueCode::EmptyRoster, "no participants");
        assert!(issue.is_error());
        assert_eq!(issue.to_string(), "error: no participants");

        let issue = ConfigIssue::warning(
            ConfigIssueCode::DeadEnd {
                name: "lecturer".to_string(),
            },
            "nobody may follow lecturer",
        );
        assert!(!issue.is_error());
        assert_eq!(issue.to_string(), "warning: nobody may follow lecturer");
    }
}
