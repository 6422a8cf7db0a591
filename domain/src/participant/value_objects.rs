//! Participant value objects.

use serde::{Deserialize, Serialize};

/// Unique name of a participant.
///
/// Stable for the lifetime of a session; used as the node identity in the
/// transition graph and as the sender/recipient identity on messages.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(String);

impl ParticipantId {
    /// Creates a ParticipantId from an existing string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// A name is usable when it is non-empty and has no surrounding whitespace.
    pub fn is_valid(&self) -> bool {
        !self.0.is_empty() && self.0.trim() == self.0
    }
}

impl From<&str> for ParticipantId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ParticipantId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&String> for ParticipantId {
    fn from(s: &String) -> Self {
        Self::new(s.as_str())
    }
}

impl std::fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_participant_id_display() {
        let id = ParticipantId::new("tutor");
        assert_eq!(id.to_string(), "tutor");
        assert_eq!(id.as_str(), "tutor");
    }

    #[test]
    fn test_participant_id_validity() {
        assert!(ParticipantId::new("learner_model").is_valid());
        assert!(!ParticipantId::new("").is_valid());
        assert!(!ParticipantId::new(" tutor").is_valid());
    }

    #[test]
    fn test_participant_id_serializes_as_string() {
        let json = serde_json::to_string(&ParticipantId::new("student")).unwrap();
        assert_eq!(json, "\"student\"");
    }
}
