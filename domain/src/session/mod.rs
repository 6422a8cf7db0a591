//! Conversation session domain.
//!
//! - [`state::TurnState`] — the turn loop state machine
//! - [`state::TerminationReason`] — why a session stopped
//! - [`state::SessionStatus`] — round, current speaker and state snapshot

pub mod state;
