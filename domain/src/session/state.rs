//! Session state machine.
//!
//! ```text
//! AwaitingTurn(s) ──select──▶ InvokingParticipant(n) ──reply──▶ TurnComplete(n)
//!        │                          │                              │
//!        │ no eligible / rejected   │ needs human                  │ round += 1
//!        ▼                          ▼                              ▼
//!   Terminated(reason)   AwaitingExternalInput(n) ──resolve──▶ TurnComplete(n)
//!                                                                  │
//!                                     max rounds / cancel ◀────────┴──▶ AwaitingTurn(n)
//! ```

use crate::participant::value_objects::ParticipantId;
use serde::{Deserialize, Serialize};

/// Why a session stopped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "reason")]
pub enum TerminationReason {
    /// The round counter reached the configured maximum.
    MaxRoundsReached { rounds: usize },
    /// The transition policy leaves nobody to follow `after`.
    NoEligibleSpeaker { after: ParticipantId },
    /// Every selection attempt proposed a speaker the policy rejects.
    SelectionFailed {
        after: ParticipantId,
        attempts: usize,
        detail: String,
    },
    /// The session was cancelled by an external signal.
    Cancelled,
    /// The turn loop stopped without reaching a termination of its own.
    Aborted { detail: String },
}

impl TerminationReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            TerminationReason::MaxRoundsReached { .. } => "max_rounds_reached",
            TerminationReason::NoEligibleSpeaker { .. } => "no_eligible_speaker",
            TerminationReason::SelectionFailed { .. } => "selection_failed",
            TerminationReason::Cancelled => "cancelled",
            TerminationReason::Aborted { .. } => "aborted",
        }
    }

    /// Human-readable explanation, shown to users when a session ends.
    pub fn description(&self) -> String {
        match self {
            TerminationReason::MaxRoundsReached { rounds } => {
                format!("Maximum number of rounds reached ({})", rounds)
            }
            TerminationReason::NoEligibleSpeaker { after } => {
                format!("No participant is allowed to speak after {}", after)
            }
            TerminationReason::SelectionFailed {
                after,
                attempts,
                detail,
            } => format!(
                "Could not select a speaker after {} ({} attempts): {}",
                after, attempts, detail
            ),
            TerminationReason::Cancelled => "Session cancelled".to_string(),
            TerminationReason::Aborted { detail } => {
                format!("Session loop stopped unexpectedly: {}", detail)
            }
        }
    }

    /// Whether the session ran to its configured end rather than stopping early.
    pub fn is_normal(&self) -> bool {
        matches!(self, TerminationReason::MaxRoundsReached { .. })
    }
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Turn loop state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "state", content = "value")]
pub enum TurnState {
    /// The participant that just acted (or the seed speaker) waits for a successor.
    AwaitingTurn(ParticipantId),
    InvokingParticipant(ParticipantId),
    /// Suspended until the input broker is resolved.
    AwaitingExternalInput(ParticipantId),
    TurnComplete(ParticipantId),
    Terminated(TerminationReason),
}

impl TurnState {
    pub fn as_str(&self) -> &'static str {
        match self {
            TurnState::AwaitingTurn(_) => "awaiting_turn",
            TurnState::InvokingParticipant(_) => "invoking_participant",
            TurnState::AwaitingExternalInput(_) => "awaiting_external_input",
            TurnState::TurnComplete(_) => "turn_complete",
            TurnState::Terminated(_) => "terminated",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, TurnState::Terminated(_))
    }

    pub fn speaker(&self) -> Option<&ParticipantId> {
        match self {
            TurnState::AwaitingTurn(id)
            | TurnState::InvokingParticipant(id)
            | TurnState::AwaitingExternalInput(id)
            | TurnState::TurnComplete(id) => Some(id),
            TurnState::Terminated(_) => None,
        }
    }

    /// Whether the state machine permits moving from `self` to `next`.
    pub fn can_transition_to(&self, next: &TurnState) -> bool {
        use TurnState::*;

        match (self, next) {
            (Terminated(_), _) => false,
            (_, Terminated(_)) => true,
            (AwaitingTurn(_), InvokingParticipant(_)) => true,
            (InvokingParticipant(a), AwaitingExternalInput(b)) => a == b,
            (InvokingParticipant(a), TurnComplete(b)) => a == b,
            (AwaitingExternalInput(a), TurnComplete(b)) => a == b,
            (TurnComplete(a), AwaitingTurn(b)) => a == b,
            _ => false,
        }
    }
}

/// Snapshot of a session for status queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStatus {
    /// Completed turns so far (the seed message is round 0).
    pub round: usize,
    pub current_speaker: ParticipantId,
    pub state: TurnState,
}

impl SessionStatus {
    pub fn starting(initial_speaker: ParticipantId) -> Self {
        Self {
            round: 0,
            current_speaker: initial_speaker.clone(),
            state: TurnState::AwaitingTurn(initial_speaker),
        }
    }

    pub fn terminated(&self) -> bool {
        self.state.is_terminal()
    }

    pub fn reason(&self) -> Option<&TerminationReason> {
        match &self.state {
            TurnState::Terminated(reason) => Some(reason),
            _ => None,
        }
    }

    pub fn is_awaiting_input(&self) -> bool {
        matches!(self.state, TurnState::AwaitingExternalInput(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(name: &str) -> ParticipantId {
        ParticipantId::new(name)
    }

    #[test]
    fn test_valid_transitions() {
        let a = id("a");
        let b = id("b");

        assert!(TurnState::AwaitingTurn(a.clone())
            .can_transition_to(&TurnState::InvokingParticipant(b.clone())));
        assert!(TurnState::InvokingParticipant(b.clone())
            .can_transition_to(&TurnState::AwaitingExternalInput(b.clone())));
        assert!(TurnState::AwaitingExternalInput(b.clone())
            .can_transition_to(&TurnState::TurnComplete(b.clone())));
        assert!(TurnState::TurnComplete(b.clone())
            .can_transition_to(&TurnState::AwaitingTurn(b.clone())));
        assert!(TurnState::AwaitingExternalInput(b.clone())
            .can_transition_to(&TurnState::Terminated(TerminationReason::Cancelled)));
    }

    #[test]
    fn test_invalid_transitions() {
        let a = id("a");
        let b = id("b");

        // Input must be attributed to the participant that was invoked
        assert!(!TurnState::InvokingParticipant(a.clone())
            .can_transition_to(&TurnState::AwaitingExternalInput(b.clone())));
        // Cannot skip invocation
        assert!(!TurnState::AwaitingTurn(a.clone())
            .can_transition_to(&TurnState::TurnComplete(a.clone())));
        // Terminated is terminal
        assert!(!TurnState::Terminated(TerminationReason::Cancelled)
            .can_transition_to(&TurnState::AwaitingTurn(a)));
    }

    #[test]
    fn test_reason_descriptions() {
        assert_eq!(
            TerminationReason::MaxRoundsReached { rounds: 3 }.to_string(),
            "Maximum number of rounds reached (3)"
        );
        assert_eq!(
            TerminationReason::NoEligibleSpeaker { after: id("teacher") }.to_string(),
            "No participant is allowed to speak after teacher"
        );
        assert!(TerminationReason::MaxRoundsReached { rounds: 1 }.is_normal());
        assert!(!TerminationReason::Cancelled.is_normal());
        assert_eq!(
            TerminationReason::Aborted {
                detail: "participant panicked".to_string()
            }
            .to_string(),
            "Session loop stopped unexpectedly: participant panicked"
        );
    }

    #[test]
    fn test_status_accessors() {
        let mut status = SessionStatus::starting(id("tutor"));
        assert_eq!(status.round, 0);
        assert!(!status.terminated());
        assert!(status.reason().is_none());

        status.state = TurnState::AwaitingExternalInput(id("student"));
        assert!(status.is_awaiting_input());

        status.state = TurnState::Terminated(TerminationReason::Cancelled);
        assert!(status.terminated());
        assert_eq!(status.reason(), Some(&TerminationReason::Cancelled));
    }
}
