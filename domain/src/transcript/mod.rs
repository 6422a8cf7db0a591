//! Transcript domain.
//!
//! - [`entities::Message`] — a committed, immutable message with a sequence number
//! - [`entities::MessageDraft`] — a message waiting to be committed
//! - [`history::Transcript`] — the append-only conversation log

pub mod entities;
pub mod history;
