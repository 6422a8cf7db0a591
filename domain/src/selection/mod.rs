//! Speaker selection domain.
//!
//! - [`method::SpeakerSelectionMethod`] — coordinator, round-robin or random
//! - [`parsing::parse_proposal`] — map a coordinator's free-text reply to a name

pub mod method;
pub mod parsing;

pub use method::SpeakerSelectionMethod;
pub use parsing::{Proposal, first_mention, parse_proposal};
