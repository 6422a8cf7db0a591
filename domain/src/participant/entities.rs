//! Participant entities.

use super::value_objects::ParticipantId;
use serde::{Deserialize, Serialize};

/// Whether a participant's turns are supplied by a human.
///
/// - `Always`: every turn suspends the session until external input arrives
/// - `Never`: the participant produces its own replies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HumanInputMode {
    Always,
    #[default]
    Never,
}

impl HumanInputMode {
    pub fn requires_external_input(&self) -> bool {
        matches!(self, HumanInputMode::Always)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HumanInputMode::Always => "always",
            HumanInputMode::Never => "never",
        }
    }
}

impl std::fmt::Display for HumanInputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for HumanInputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "always" => Ok(HumanInputMode::Always),
            "never" => Ok(HumanInputMode::Never),
            _ => Err(format!(
                "Unknown human input mode: {}. Valid: always, never",
                s
            )),
        }
    }
}

/// Static description of a participant (Entity)
///
/// The profile is what the scheduler knows about a participant without
/// invoking it: its name, the persona description used for introductions
/// and speaker selection, and whether its turns come from a human.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantProfile {
    pub id: ParticipantId,
    pub description: String,
    #[serde(default)]
    pub human_input_mode: HumanInputMode,
}

impl ParticipantProfile {
    pub fn new(id: impl Into<ParticipantId>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            human_input_mode: HumanInputMode::Never,
        }
    }

    pub fn with_human_input_mode(mut self, mode: HumanInputMode) -> Self {
        self.human_input_mode = mode;
        self
    }

    pub fn requires_external_input(&self) -> bool {
        self.human_input_mode.requires_external_input()
    }

    /// Text appended to the transcript when introductions are enabled.
    pub fn introduction(&self) -> String {
        let description = self.description.trim();
        if description.is_empty() {
            format!("{} has joined the conversation.", self.id)
        } else {
            format!("{}: {}", self.id, description)
        }
    }
}
