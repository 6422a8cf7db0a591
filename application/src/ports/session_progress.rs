//! Session progress notification port
//!
//! Defines the interface for reporting turn-loop progress (speaker chosen,
//! waiting for a human, turn failed, session ended). Unlike transcript
//! observers, these callbacks describe what the scheduler is doing rather
//! than what was said.

use super::participant::ParticipantError;
use crate::use_cases::run_session::PendingInput;
use roundtable_domain::{Message, ParticipantId, TerminationReason};

/// Callback for progress updates during a session
///
/// Implementations live in the presentation layer (spinners, status lines).
pub trait SessionProgressNotifier: Send + Sync {
    /// Called once, after the seed message is committed
    fn on_session_start(&self, _initial_speaker: &ParticipantId, _roster_size: usize) {}

    /// Called when the next speaker has been chosen and is about to be invoked
    fn on_speaker_selected(&self, _speaker: &ParticipantId, _round: usize) {}

    /// Called when a speaker proposal was rejected
    fn on_selection_rejected(&self, _proposal: &str, _eligible: &[ParticipantId]) {}

    /// Called when the session suspends waiting for external input
    fn on_input_requested(&self, _request: &PendingInput) {}

    /// Called when a participant invocation fails (before any retry)
    fn on_turn_failed(&self, _speaker: &ParticipantId, _attempt: usize, _error: &ParticipantError) {
    }

    /// Called after a turn's message is committed
    fn on_turn_complete(&self, _message: &Message, _round: usize) {}

    /// Called once when the session reaches a terminal state
    fn on_session_terminated(&self, _reason: &TerminationReason, _rounds: usize) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoSessionProgress;

impl SessionProgressNotifier for NoSessionProgress {}
