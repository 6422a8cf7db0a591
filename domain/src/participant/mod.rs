//! Participant domain.
//!
//! - [`value_objects::ParticipantId`] — unique participant name
//! - [`entities::ParticipantProfile`] — name, persona description and input mode
//! - [`entities::HumanInputMode`] — whether turns are supplied by a human

pub mod entities;
pub mod value_objects;
