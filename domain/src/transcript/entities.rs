//! Transcript message entities

use crate::participant::value_objects::ParticipantId;
use serde::{Deserialize, Serialize};

/// Who authored a message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type", content = "name")]
pub enum Sender {
    /// Authored by the scheduler itself (introductions, error notices).
    System,
    Participant(ParticipantId),
}

impl Sender {
    pub fn participant(&self) -> Option<&ParticipantId> {
        match self {
            Sender::System => None,
            Sender::Participant(id) => Some(id),
        }
    }

    pub fn is_system(&self) -> bool {
        matches!(self, Sender::System)
    }
}

impl From<ParticipantId> for Sender {
    fn from(id: ParticipantId) -> Self {
        Sender::Participant(id)
    }
}

impl std::fmt::Display for Sender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sender::System => write!(f, "System"),
            Sender::Participant(id) => write!(f, "{}", id),
        }
    }
}

/// Who a message is addressed to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type", content = "name")]
pub enum Recipient {
    /// Visible to every participant (the group chat default).
    #[default]
    Broadcast,
    Participant(ParticipantId),
}

impl std::fmt::Display for Recipient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Recipient::Broadcast => write!(f, "all"),
            Recipient::Participant(id) => write!(f, "{}", id),
        }
    }
}

/// Why a message is in the transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    /// A participant description posted before the first turn.
    Introduction,
    /// The externally supplied message that starts the session (round 0).
    Seed,
    /// A participant's completed turn.
    Turn,
    /// A system notice recording a turn that could not be completed.
    Error,
}

impl MessageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageKind::Introduction => "introduction",
            MessageKind::Seed => "seed",
            MessageKind::Turn => "turn",
            MessageKind::Error => "error",
        }
    }
}

/// A message that has not been committed to a transcript yet.
///
/// Only the [`Transcript`](super::history::Transcript) turns a draft into a
/// [`Message`], which is where the sequence number gets assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageDraft {
    pub sender: Sender,
    pub recipient: Recipient,
    pub kind: MessageKind,
    pub round: usize,
    pub content: String,
}

impl MessageDraft {
    pub fn turn(speaker: ParticipantId, round: usize, content: impl Into<String>) -> Self {
        Self {
            sender: Sender::Participant(speaker),
            recipient: Recipient::Broadcast,
            kind: MessageKind::Turn,
            round,
            content: content.into(),
        }
    }

    pub fn seed(speaker: ParticipantId, content: impl Into<String>) -> Self {
        Self {
            sender: Sender::Participant(speaker),
            recipient: Recipient::Broadcast,
            kind: MessageKind::Seed,
            round: 0,
            content: content.into(),
        }
    }

    pub fn introduction(content: impl Into<String>) -> Self {
        Self {
            sender: Sender::System,
            recipient: Recipient::Broadcast,
            kind: MessageKind::Introduction,
            round: 0,
            content: content.into(),
        }
    }

    pub fn error(round: usize, content: impl Into<String>) -> Self {
        Self {
            sender: Sender::System,
            recipient: Recipient::Broadcast,
            kind: MessageKind::Error,
            round,
            content: content.into(),
        }
    }

    pub fn to(mut self, recipient: Recipient) -> Self {
        self.recipient = recipient;
        self
    }
}

/// A committed transcript message (Entity)
///
/// Immutable: fields are only readable once the transcript has assigned the
/// sequence number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    seq: u64,
    round: usize,
    sender: Sender,
    recipient: Recipient,
    kind: MessageKind,
    content: String,
}

impl Message {
    pub(crate) fn commit(seq: u64, draft: MessageDraft) -> Self {
        Self {
            seq,
            round: draft.round,
            sender: draft.sender,
            recipient: draft.recipient,
            kind: draft.kind,
            content: draft.content,
        }
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn round(&self) -> usize {
        self.round
    }

    pub fn sender(&self) -> &Sender {
        &self.sender
    }

    pub fn recipient(&self) -> &Recipient {
        &self.recipient
    }

    pub fn kind(&self) -> MessageKind {
        self.kind
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Whether this message was authored by the given participant.
    pub fn is_from(&self, id: &ParticipantId) -> bool {
        self.sender.participant() == Some(id)
    }
}
