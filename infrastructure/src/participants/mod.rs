//! Participant adapters
//!
//! Implementations of the [`Participant`](roundtable_application::Participant)
//! and [`Coordinator`](roundtable_application::Coordinator) ports that need no
//! model backend: canned replies, human stand-ins, and a coordinator that
//! follows who the last speaker addressed.

mod human;
mod mention_coordinator;
mod scripted;

pub use human::HumanParticipant;
pub use mention_coordinator::MentionCoordinator;
pub use scripted::ScriptedParticipant;
