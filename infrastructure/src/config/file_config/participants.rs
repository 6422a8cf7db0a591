//! Participant configuration from TOML (`[[participants]]` and `[coordinator]`)

use roundtable_domain::{ConfigIssue, ConfigIssueCode, HumanInputMode, ParticipantProfile};
use serde::{Deserialize, Serialize};

/// One `[[participants]]` entry
///
/// # Example
///
/// ```toml
/// [[participants]]
/// name = "student"
/// description = "A learner working through math problems."
/// human_input_mode = "always"    # "always" or "never"
///
/// [[participants]]
/// name = "tutor"
/// description = "Explains solutions step by step."
/// replies = ["Let's look at the problem together."]
/// ```
///
/// A participant with `human_input_mode = "never"` and no `replies` has its
/// turns typed in by a person as well.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileParticipantConfig {
    pub name: String,
    pub description: String,
    pub human_input_mode: String,
    /// Scripted replies, used in order and then repeated
    pub replies: Vec<String>,
}

impl Default for FileParticipantConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            human_input_mode: HumanInputMode::default().as_str().to_string(),
            replies: Vec::new(),
        }
    }
}

impl FileParticipantConfig {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            ..Default::default()
        }
    }

    pub fn with_human_input_mode(mut self, mode: HumanInputMode) -> Self {
        self.human_input_mode = mode.as_str().to_string();
        self
    }

    pub fn with_replies<I, T>(mut self, replies: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.replies = replies.into_iter().map(Into::into).collect();
        self
    }

    /// Parse human_input_mode, falling back to `never` with a warning.
    pub fn parse_human_input_mode(&self) -> (HumanInputMode, Vec<ConfigIssue>) {
        match self.human_input_mode.parse::<HumanInputMode>() {
            Ok(mode) => (mode, vec![]),
            Err(_) => {
                let issue = ConfigIssue::warning(
                    ConfigIssueCode::InvalidEnumValue {
                        field: format!("participants.{}.human_input_mode", self.name),
                        value: self.human_input_mode.clone(),
                        valid_values: vec!["always".to_string(), "never".to_string()],
                    },
                    format!(
                        "participants.{}.human_input_mode: unknown value '{}', falling back to 'never'",
                        self.name, self.human_input_mode
                    ),
                );
                (HumanInputMode::default(), vec![issue])
            }
        }
    }

    pub fn to_profile(&self) -> ParticipantProfile {
        ParticipantProfile::new(self.name.as_str(), self.description.as_str())
            .with_human_input_mode(self.parse_human_input_mode().0)
    }
}

/// The `[coordinator]` section: who proposes the next speaker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCoordinatorConfig {
    pub name: String,
    pub description: String,
}

impl Default for FileCoordinatorConfig {
    fn default() -> Self {
        Self {
            name: "coordinator".to_string(),
            description: "Chooses who speaks next.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_profile() {
        let config = FileParticipantConfig::new("student", "learner")
            .with_human_input_mode(HumanInputMode::Always);
        let profile = config.to_profile();

        assert_eq!(profile.id.as_str(), "student");
        assert!(profile.requires_external_input());
    }

    #[test]
    fn test_unknown_human_input_mode_warns() {
        let config = FileParticipantConfig {
            human_input_mode: "sometimes".to_string(),
            ..FileParticipantConfig::new("tutor", "")
        };
        let (mode, issues) = config.parse_human_input_mode();

        assert_eq!(mode, HumanInputMode::Never);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("participants.tutor.human_input_mode"));
    }
}
