//! Append-only conversation history.

use super::entities::{Message, MessageDraft, MessageKind};
use crate::participant::value_objects::ParticipantId;

/// Ordered, append-only log of committed messages.
///
/// Sequence numbers start at 0 and equal the message's index, so they are
/// strictly increasing with no gaps. Nothing is ever mutated or removed.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commit a draft, assigning the next sequence number.
    pub fn append(&mut self, draft: MessageDraft) -> &Message {
        let seq = self.messages.len() as u64;
        self.messages.push(Message::commit(seq, draft));
        &self.messages[self.messages.len() - 1]
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn get(&self, seq: u64) -> Option<&Message> {
        usize::try_from(seq).ok().and_then(|i| self.messages.get(i))
    }

    /// Number of completed participant turns (error turns included).
    pub fn turn_count(&self) -> usize {
        self.messages
            .iter()
            .filter(|m| matches!(m.kind(), MessageKind::Turn | MessageKind::Error))
            .count()
    }

    /// Messages authored by one participant, in order.
    pub fn by_participant<'a>(
        &'a self,
        id: &'a ParticipantId,
    ) -> impl Iterator<Item = &'a Message> + 'a {
        self.messages.iter().filter(move |m| m.is_from(id))
    }
}
