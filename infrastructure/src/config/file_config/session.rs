//! Session configuration from TOML (`[session]` section)

use roundtable_application::SessionConfig;
use roundtable_domain::{ConfigIssue, ConfigIssueCode, SpeakerSelectionMethod};
use serde::{Deserialize, Serialize};

/// Raw session configuration from TOML
///
/// # Example
///
/// ```toml
/// [session]
/// max_rounds = 40
/// send_introductions = true
/// max_selection_attempts = 3
/// max_turn_attempts = 2
/// speaker_selection = "coordinator"   # "coordinator", "round_robin", "random"
/// seed = 7                            # only used by "random"
/// initial_speaker = "tutor"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSessionConfig {
    pub max_rounds: usize,
    pub send_introductions: bool,
    pub max_selection_attempts: usize,
    pub max_turn_attempts: usize,
    /// Speaker selection strategy name
    pub speaker_selection: String,
    /// Seed for random selection; entropy when absent
    pub seed: Option<u64>,
    /// Who the seed message is attributed to; first participant when absent
    pub initial_speaker: Option<String>,
}

impl Default for FileSessionConfig {
    fn default() -> Self {
        let defaults = SessionConfig::default();
        Self {
            max_rounds: defaults.max_rounds,
            send_introductions: defaults.send_introductions,
            max_selection_attempts: defaults.max_selection_attempts,
            max_turn_attempts: defaults.max_turn_attempts,
            speaker_selection: SpeakerSelectionMethod::default().as_str().to_string(),
            seed: None,
            initial_speaker: None,
        }
    }
}

impl FileSessionConfig {
    /// Parse speaker_selection, falling back to the coordinator with a warning.
    pub fn parse_speaker_selection(&self) -> (SpeakerSelectionMethod, Vec<ConfigIssue>) {
        match self.speaker_selection.parse::<SpeakerSelectionMethod>() {
            Ok(method) => (method, vec![]),
            Err(_) => {
                let fallback = SpeakerSelectionMethod::default();
                let issue = ConfigIssue::warning(
                    ConfigIssueCode::InvalidEnumValue {
                        field: "session.speaker_selection".to_string(),
                        value: self.speaker_selection.clone(),
                        valid_values: vec![
                            "coordinator".to_string(),
                            "round_robin".to_string(),
                            "random".to_string(),
                        ],
                    },
                    format!(
                        "session.speaker_selection: unknown value '{}', falling back to '{}'",
                        self.speaker_selection, fallback
                    ),
                );
                (fallback, vec![issue])
            }
        }
    }

    /// Convert to the application-level [`SessionConfig`].
    ///
    /// Zero limits are reported as errors.
    pub fn to_session_config(&self) -> (SessionConfig, Vec<ConfigIssue>) {
        let config = SessionConfig::default()
            .with_max_rounds(self.max_rounds)
            .with_send_introductions(self.send_introductions)
            .with_max_selection_attempts(self.max_selection_attempts)
            .with_max_turn_attempts(self.max_turn_attempts);

        let issues = [
            ("session.max_rounds", self.max_rounds),
            ("session.max_selection_attempts", self.max_selection_attempts),
            ("session.max_turn_attempts", self.max_turn_attempts),
        ]
        .into_iter()
        .filter(|(_, value)| *value == 0)
        .map(|(field, value)| {
            ConfigIssue::error(
                ConfigIssueCode::InvalidLimit {
                    field: field.to_string(),
                    value,
                },
                format!("{}: must be at least 1", field),
            )
        })
        .collect();

        (config, issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_session_config() {
        let (config, issues) = FileSessionConfig::default().to_session_config();
        assert_eq!(config, SessionConfig::default());
        assert!(issues.is_empty());
    }

    #[test]
    fn test_parse_speaker_selection_aliases() {
        let config = FileSessionConfig {
            speaker_selection: "round-robin".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.parse_speaker_selection().0,
            SpeakerSelectionMethod::RoundRobin
        );
    }

    #[test]
    fn test_unknown_speaker_selection_warns() {
        let config = FileSessionConfig {
            speaker_selection: "loudest".to_string(),
            ..Default::default()
        };
        let (method, issues) = config.parse_speaker_selection();
        assert_eq!(method, SpeakerSelectionMethod::Coordinator);
        assert_eq!(issues.len(), 1);
        assert!(!issues[0].is_error());
    }

    #[test]
    fn test_zero_limit_is_error() {
        let config = FileSessionConfig {
            max_rounds: 0,
            ..Default::default()
        };
        let (_, issues) = config.to_session_config();
        assert_eq!(issues.len(), 1);
        assert!(issues[0].is_error());
        assert!(issues[0].message.contains("session.max_rounds"));
    }
}
