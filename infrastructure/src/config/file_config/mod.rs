//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod output;
mod participants;
mod session;
mod transitions;

pub use output::FileOutputConfig;
pub use participants::{FileCoordinatorConfig, FileParticipantConfig};
pub use session::FileSessionConfig;
pub use transitions::FileTransitionsConfig;

use roundtable_domain::{
    ConfigIssue, ConfigIssueCode, ParticipantId, TransitionMode, TransitionPolicy,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// Re-export OutputFormat from domain for convenience
pub use roundtable_domain::OutputFormat as FileOutputFormat;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Turn loop limits and speaker selection
    pub session: FileSessionConfig,
    /// Who may speak after whom
    pub transitions: FileTransitionsConfig,
    /// The roster, in speaking order
    pub participants: Vec<FileParticipantConfig>,
    /// Who proposes the next speaker when `speaker_selection = "coordinator"`
    pub coordinator: FileCoordinatorConfig,
    /// Console and transcript output
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Names of the configured participants, in roster order.
    pub fn participant_names(&self) -> Vec<&str> {
        self.participants.iter().map(|p| p.name.as_str()).collect()
    }

    /// Validate the entire configuration, returning all detected issues.
    ///
    /// This is the single entry point for config validation. It checks:
    /// 1. Enum parse failures (speaker_selection, transitions.mode, human_input_mode)
    /// 2. Zero limits
    /// 3. Roster problems (empty, duplicate or blank names)
    /// 4. Names referenced by the graph or initial_speaker but missing from the roster
    /// 5. A graph configured while the mode is unrestricted
    /// 6. Dead ends: participants nobody may follow
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        // 1. Enum parse validation
        issues.extend(self.session.parse_speaker_selection().1);
        let (mode, mode_issues) = self.transitions.parse_mode();
        issues.extend(mode_issues);
        for participant in &self.participants {
            issues.extend(participant.parse_human_input_mode().1);
        }

        // 2. Limits
        issues.extend(self.session.to_session_config().1);

        // 3. Roster
        if self.participants.is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::EmptyRoster,
                "participants: at least one participant is required",
            ));
        }
        let mut seen = HashSet::new();
        for name in self.participant_names() {
            if !ParticipantId::new(name).is_valid() {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::UnknownParticipant {
                        field: "participants.name".to_string(),
                        name: name.to_string(),
                    },
                    format!("participants: invalid name '{}'", name),
                ));
            } else if !seen.insert(name) {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::DuplicateParticipant {
                        name: name.to_string(),
                    },
                    format!("participants: '{}' is defined more than once", name),
                ));
            }
        }

        // 4. Unknown references
        let mut reported = HashSet::new();
        for (field, name) in self.transitions.referenced_names() {
            if !seen.contains(name) && reported.insert(name) {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::UnknownParticipant {
                        field: field.clone(),
                        name: name.to_string(),
                    },
                    format!("{}: '{}' is not a configured participant", field, name),
                ));
            }
        }
        if let Some(initial) = &self.session.initial_speaker
            && !seen.contains(initial.as_str())
        {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::UnknownParticipant {
                    field: "session.initial_speaker".to_string(),
                    name: initial.clone(),
                },
                format!(
                    "session.initial_speaker: '{}' is not a configured participant",
                    initial
                ),
            ));
        }

        // 5. Ignored graph
        if mode == TransitionMode::Unrestricted && !self.transitions.graph.is_empty() {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::IgnoredTransitionGraph,
                "transitions.graph is ignored because transitions.mode is 'unrestricted'",
            ));
        }

        // 6. Dead ends (only meaningful once everything above is sound)
        if !issues.iter().any(ConfigIssue::is_error)
            && let Ok(policy) = self.transition_policy()
        {
            for name in policy.dead_ends() {
                issues.push(ConfigIssue::warning(
                    ConfigIssueCode::DeadEnd {
                        name: name.to_string(),
                    },
                    format!(
                        "transitions: nobody may speak after '{}'; a session reaching it will stop",
                        name
                    ),
                ));
            }
        }

        issues
    }

    /// Build the transition policy described by `[transitions]` over the roster.
    ///
    /// The graph is dropped in unrestricted mode.
    pub fn transition_policy(&self) -> Result<TransitionPolicy, roundtable_domain::DomainError> {
        let roster = self
            .participants
            .iter()
            .map(|p| ParticipantId::new(p.name.as_str()))
            .collect();
        let mode = self.transitions.parse_mode().0;
        let graph = match mode {
            TransitionMode::Unrestricted => Default::default(),
            _ => self.transitions.to_graph(),
        };

        Ok(TransitionPolicy::new(roster, mode, graph)?
            .with_allow_repeat_speaker(self.transitions.allow_repeat_speaker))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roundtable_domain::{OutputFormat, Severity};

    const SAMPLE: &str = r#"
[session]
max_rounds = 12
speaker_selection = "round_robin"
initial_speaker = "tutor"

[transitions]
mode = "disallowed"

[transitions.graph]
tutor = ["programmer"]

[[participants]]
name = "student"
description = "Learner"
human_input_mode = "always"

[[participants]]
name = "tutor"
description = "Helps"
replies = ["Let's begin."]

[[participants]]
name = "programmer"
description = "Writes code"

[output]
format = "plain"
"#;

    #[test]
    fn test_deserialize_full_config() {
        let config: FileConfig = toml::from_str(SAMPLE).unwrap();

        assert_eq!(config.session.max_rounds, 12);
        assert!(config.session.send_introductions);
        assert_eq!(config.session.initial_speaker.as_deref(), Some("tutor"));
        assert_eq!(config.participant_names(), vec!["student", "tutor", "programmer"]);
        assert_eq!(config.participants[1].replies, vec!["Let's begin."]);
        assert_eq!(config.coordinator.name, "coordinator");
        assert_eq!(config.output.format, Some(OutputFormat::Plain));
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_policy_from_config() {
        let config: FileConfig = toml::from_str(SAMPLE).unwrap();
        let policy = config.transition_policy().unwrap();

        let after_tutor: Vec<_> = policy
            .eligible_next(&ParticipantId::new("tutor"))
            .into_iter()
            .map(|id| id.to_string())
            .collect();
        assert_eq!(after_tutor, vec!["student"]);
    }

    #[test]
    fn test_default_config() {
        let config = FileConfig::default();
        assert!(config.participants.is_empty());
        assert_eq!(config.session.max_rounds, 40);
        assert_eq!(config.transitions.mode, "unrestricted");
        assert!(config.output.color);
    }

    #[test]
    fn test_validate_empty_roster() {
        let issues = FileConfig::default().validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code, ConfigIssueCode::EmptyRoster);
        assert_eq!(issues[0].severity, Severity::Error);
    }

    #[test]
    fn test_validate_collects_all_issues() {
        let toml_str = r#"
[session]
initial_speaker = "ghost"

[transitions]
mode = "allowed"

[transitions.graph]
a = ["b", "nobody"]

[[participants]]
name = "a"

[[participants]]
name = "a"

[[participants]]
name = "b"
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let codes: Vec<_> = config.validate().into_iter().map(|i| i.code).collect();

        assert!(codes.contains(&ConfigIssueCode::DuplicateParticipant {
            name: "a".to_string()
        }));
        assert!(codes.contains(&ConfigIssueCode::UnknownParticipant {
            field: "transitions.graph.a".to_string(),
            name: "nobody".to_string()
        }));
        assert!(codes.contains(&ConfigIssueCode::UnknownParticipant {
            field: "session.initial_speaker".to_string(),
            name: "ghost".to_string()
        }));
    }

    #[test]
    fn test_validate_reports_dead_ends() {
        let toml_str = r#"
[transitions]
mode = "allowed"

[transitions.graph]
a = ["b"]

[[participants]]
name = "a"

[[participants]]
name = "b"
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let issues = config.validate();

        assert_eq!(issues.len(), 1);
        assert_eq!(
            issues[0].code,
            ConfigIssueCode::DeadEnd {
                name: "b".to_string()
            }
        );
        assert!(!issues[0].is_error());
    }

    #[test]
    fn test_graph_ignored_when_unrestricted() {
        let toml_str = r#"
[transitions.graph]
a = ["b"]

[[participants]]
name = "a"

[[participants]]
name = "b"
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let issues = config.validate();

        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code, ConfigIssueCode::IgnoredTransitionGraph);
        assert!(config.transition_policy().unwrap().graph().is_empty());
    }
}
