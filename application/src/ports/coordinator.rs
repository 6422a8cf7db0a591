//! Coordinator port
//!
//! The coordinator is the distinguished participant that proposes who should
//! speak next. It only proposes: the session validates every proposal against
//! the transition policy and rejects anything outside the eligible set.
//!
//! # Flow
//!
//! ```text
//! eligible_next(current) = {tutor, teacher}
//!        ↓
//! Coordinator::propose_next(request)  →  "motivator"
//!        ↓
//! rejected (not eligible), retry with rejected = ["motivator"]
//!        ↓
//! Coordinator::propose_next(request)  →  "teacher"   ✓
//! ```

use super::participant::ParticipantError;
use async_trait::async_trait;
use roundtable_domain::{Message, ParticipantId, ParticipantProfile};

/// Everything a coordinator needs to make a proposal.
#[derive(Debug)]
pub struct SelectionRequest<'a> {
    pub transcript: &'a [Message],
    /// The participant that just spoke.
    pub current: &'a ParticipantId,
    /// Profiles of the participants the policy allows next, in roster order.
    pub candidates: &'a [ParticipantProfile],
    /// Earlier proposals for this turn that were not accepted.
    pub rejected: &'a [String],
    /// 1-based attempt number for this turn.
    pub attempt: usize,
    /// Role descriptions, see [`PromptTemplate::select_speaker_system`](roundtable_domain::PromptTemplate::select_speaker_system).
    pub system_prompt: String,
    /// Final instruction naming the eligible roles.
    pub prompt: String,
}

/// Port for the participant that proposes the next speaker.
#[async_trait]
pub trait Coordinator: Send + Sync {
    fn id(&self) -> &ParticipantId;

    /// Return a free-text answer naming the next speaker.
    async fn propose_next(&self, request: &SelectionRequest<'_>) -> Result<String, ParticipantError>;
}
