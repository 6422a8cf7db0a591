//! Domain error types

use crate::participant::value_objects::ParticipantId;
use thiserror::Error;

/// Domain-level configuration errors.
///
/// These are detected while building a roster or a transition policy,
/// before any session starts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("No participants configured")]
    EmptyRoster,

    #[error("Duplicate participant name: {0}")]
    DuplicateParticipant(ParticipantId),

    #[error("Transition graph references unknown participant '{participant}' (under '{source_id}')")]
    UnknownTransitionTarget {
        source_id: ParticipantId,
        participant: ParticipantId,
    },

    #[error("Unknown participant: {0}")]
    UnknownParticipant(ParticipantId),

    #[error("Invalid participant name: {0:?}")]
    InvalidParticipantName(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl DomainError {
    /// Check if this error was caused by a reference to a participant
    /// that is missing from the roster.
    pub fn is_unknown_participant(&self) -> bool {
        matches!(
            self,
            DomainError::UnknownParticipant(_) | DomainError::UnknownTransitionTarget { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_target_display() {
        let error = DomainError::UnknownTransitionTarget {
            source_id: ParticipantId::new("tutor"),
            participant: ParticipantId::new("ghost"),
        };
        assert_eq!(
            error.to_string(),
            "Transition graph references unknown participant 'ghost' (under 'tutor')"
        );
    }

    #[test]
    fn test_is_unknown_participant_check() {
        assert!(DomainError::UnknownParticipant(ParticipantId::new("x")).is_unknown_participant());
        assert!(!DomainError::EmptyRoster.is_unknown_participant());
        assert!(!DomainError::InvalidConfiguration("x".to_string()).is_unknown_participant());
    }
}
