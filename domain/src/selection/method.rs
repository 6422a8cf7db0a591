//! Speaker selection methods.

use serde::{Deserialize, Serialize};

/// How the next speaker is chosen among the eligible candidates.
///
/// Whatever the method, the transition policy has the final word: a choice
/// outside the eligible set is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeakerSelectionMethod {
    /// A coordinator participant proposes the next speaker.
    #[default]
    Coordinator,
    /// The next eligible participant after the current one, in roster order.
    RoundRobin,
    /// A uniformly random eligible participant from a seeded source.
    Random,
}

impl SpeakerSelectionMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpeakerSelectionMethod::Coordinator => "coordinator",
            SpeakerSelectionMethod::RoundRobin => "round_robin",
            SpeakerSelectionMethod::Random => "random",
        }
    }
}

impl std::fmt::Display for SpeakerSelectionMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SpeakerSelectionMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "coordinator" | "auto" => Ok(SpeakerSelectionMethod::Coordinator),
            "round_robin" => Ok(SpeakerSelectionMethod::RoundRobin),
            "random" => Ok(SpeakerSelectionMethod::Random),
            _ => Err(format!(
                "Unknown speaker selection method: {}. Valid: coordinator, round_robin, random",
                s
            )),
        }
    }
}
