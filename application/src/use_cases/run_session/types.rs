//! Type definitions for the RunSession use case.

use roundtable_domain::{DomainError, ParticipantId, TerminationReason, Transcript};
use thiserror::Error;

/// Errors returned before a session starts.
///
/// Everything that goes wrong once the turn loop is running ends the session
/// with a [`TerminationReason`] instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RunSessionError {
    #[error("Invalid configuration: {0}")]
    Configuration(#[from] DomainError),
}

/// Input for the RunSession use case
#[derive(Debug, Clone)]
pub struct RunSessionInput {
    /// Who the seed message is attributed to
    pub initial_speaker: ParticipantId,
    /// Seed message content, committed as round 0
    pub initial_content: String,
}

impl RunSessionInput {
    pub fn new(initial_speaker: impl Into<ParticipantId>, initial_content: impl Into<String>) -> Self {
        Self {
            initial_speaker: initial_speaker.into(),
            initial_content: initial_content.into(),
        }
    }
}

/// Result of a session that ran to a terminal state
#[derive(Debug, Clone)]
pub struct SessionOutcome {
    pub reason: TerminationReason,
    /// Completed turns, error turns included
    pub rounds: usize,
    pub transcript: Transcript,
}
