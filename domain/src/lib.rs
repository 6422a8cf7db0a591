//! Domain layer for roundtable
//!
//! This crate contains the core business logic, entities, and value objects
//! of the conversation scheduler. It has no dependencies on async runtimes,
//! infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Transcript
//!
//! The append-only conversation history. Every committed [`Message`] gets a
//! sequence number equal to its position, so numbering never has gaps.
//!
//! ## Transition Policy
//!
//! A static "who may speak after whom" graph over the roster, read in one of
//! three modes (allowed / disallowed / unrestricted). The policy is the sole
//! authority on speaker eligibility: any proposal outside
//! [`TransitionPolicy::eligible_next`] is rejected.
//!
//! ## Session State
//!
//! The [`TurnState`] machine driven by the application layer's turn loop,
//! and the [`TerminationReason`] carried by every finished session.

pub mod config;
pub mod core;
pub mod participant;
pub mod policy;
pub mod prompt;
pub mod selection;
pub mod session;
pub mod transcript;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
pub use crate::core::error::DomainError;
pub use participant::{
    entities::{HumanInputMode, ParticipantProfile},
    value_objects::ParticipantId,
};
pub use policy::transition::{TransitionGraph, TransitionMode, TransitionPolicy};
pub use prompt::PromptTemplate;
pub use selection::{Proposal, SpeakerSelectionMethod, first_mention, parse_proposal};
pub use session::state::{SessionStatus, TerminationReason, TurnState};
pub use transcript::{
    entities::{Message, MessageDraft, MessageKind, Recipient, Sender},
    history::Transcript,
};
