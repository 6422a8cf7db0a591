//! Speaker selection strategies.
//!
//! A strategy only proposes. The session checks every proposal against
//! `TransitionPolicy::eligible_next` before accepting it.

use crate::ports::coordinator::{Coordinator, SelectionRequest};
use crate::ports::participant::ParticipantError;
use async_trait::async_trait;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use roundtable_domain::{
    Message, ParticipantId, ParticipantProfile, PromptTemplate, Proposal, SpeakerSelectionMethod,
    parse_proposal,
};
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Why a selection attempt produced no acceptable speaker.
#[derive(Error, Debug, Clone)]
pub enum SelectionError {
    #[error("No candidates to choose from")]
    NoCandidates,

    #[error("Proposal {0:?} does not name a participant")]
    Unrecognized(String),

    #[error("Proposal {reply:?} is ambiguous between [{}]", join(.candidates))]
    Ambiguous {
        reply: String,
        candidates: Vec<ParticipantId>,
    },

    #[error("{proposed} may not speak next (eligible: [{}])", join(.eligible))]
    InvalidSelection {
        proposed: ParticipantId,
        eligible: Vec<ParticipantId>,
    },

    #[error("Coordinator failed: {0}")]
    Coordinator(#[from] ParticipantError),
}

impl SelectionError {
    /// The proposal text to report back to the coordinator on retry.
    pub fn rejected_proposal(&self) -> Option<String> {
        match self {
            SelectionError::Unrecognized(reply) | SelectionError::Ambiguous { reply, .. } => {
                let reply = reply.trim();
                (!reply.is_empty()).then(|| reply.to_string())
            }
            SelectionError::InvalidSelection { proposed, .. } => Some(proposed.to_string()),
            SelectionError::NoCandidates | SelectionError::Coordinator(_) => None,
        }
    }
}

fn join(ids: &[ParticipantId]) -> String {
    ids.iter().map(|id| id.as_str()).collect::<Vec<_>>().join(", ")
}

/// Inputs to one selection attempt.
#[derive(Debug)]
pub struct SelectionContext<'a> {
    pub transcript: &'a [Message],
    /// The participant that just spoke
    pub current: &'a ParticipantId,
    /// Full roster, in roster order
    pub roster: &'a [ParticipantId],
    /// Participants the policy allows next, in roster order
    pub eligible: &'a [ParticipantProfile],
    /// Proposals already rejected this turn
    pub rejected: &'a [String],
    /// 1-based
    pub attempt: usize,
}

/// Pluggable next-speaker strategy.
#[async_trait]
pub trait SpeakerSelector: Send + Sync {
    fn method(&self) -> SpeakerSelectionMethod;

    async fn propose(&self, context: &SelectionContext<'_>) -> Result<ParticipantId, SelectionError>;
}

/// Picks the next eligible participant after the current one in roster order.
#[derive(Debug, Default, Clone, Copy)]
pub struct RoundRobinSelector;

impl RoundRobinSelector {
    fn pick(context: &SelectionContext<'_>) -> Option<ParticipantId> {
        let is_eligible = |id: &ParticipantId| context.eligible.iter().any(|p| &p.id == id);
        let len = context.roster.len();
        let start = context
            .roster
            .iter()
            .position(|id| id == context.current)
            .map(|i| i + 1)
            .unwrap_or(0);

        (0..len)
            .map(|offset| &context.roster[(start + offset) % len])
            .find(|id| is_eligible(id))
            .cloned()
            .or_else(|| context.eligible.first().map(|p| p.id.clone()))
    }
}

#[async_trait]
impl SpeakerSelector for RoundRobinSelector {
    fn method(&self) -> SpeakerSelectionMethod {
        SpeakerSelectionMethod::RoundRobin
    }

    async fn propose(&self, context: &SelectionContext<'_>) -> Result<ParticipantId, SelectionError> {
        Self::pick(context).ok_or(SelectionError::NoCandidates)
    }
}

/// Picks uniformly among eligible participants.
pub struct RandomSelector {
    rng: Mutex<StdRng>,
}

impl RandomSelector {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Reproducible selection for tests and replays.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for RandomSelector {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SpeakerSelector for RandomSelector {
    fn method(&self) -> SpeakerSelectionMethod {
        SpeakerSelectionMethod::Random
    }

    async fn propose(&self, context: &SelectionContext<'_>) -> Result<ParticipantId, SelectionError> {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        context
            .eligible
            .choose(&mut *rng)
            .map(|p| p.id.clone())
            .ok_or(SelectionError::NoCandidates)
    }
}

/// Asks a coordinator participant and parses its free-text answer.
///
/// Answers are matched against the whole roster, so naming an ineligible
/// participant surfaces as [`SelectionError::InvalidSelection`] upstream and
/// is fed back to the coordinator on the next attempt.
pub struct CoordinatorSelector {
    coordinator: Arc<dyn Coordinator>,
}

impl CoordinatorSelector {
    pub fn new(coordinator: Arc<dyn Coordinator>) -> Self {
        Self { coordinator }
    }
}

#[async_trait]
impl SpeakerSelector for CoordinatorSelector {
    fn method(&self) -> SpeakerSelectionMethod {
        SpeakerSelectionMethod::Coordinator
    }

    async fn propose(&self, context: &SelectionContext<'_>) -> Result<ParticipantId, SelectionError> {
        if context.eligible.is_empty() {
            return Err(SelectionError::NoCandidates);
        }

        let request = SelectionRequest {
            transcript: context.transcript,
            current: context.current,
            candidates: context.eligible,
            rejected: context.rejected,
            attempt: context.attempt,
            system_prompt: PromptTemplate::select_speaker_system(context.eligible),
            prompt: PromptTemplate::select_speaker_prompt(context.eligible, context.rejected),
        };
        let reply = self.coordinator.propose_next(&request).await?;

        match parse_proposal(&reply, context.roster) {
            Proposal::Named(id) => Ok(id),
            Proposal::Ambiguous(candidates) => Err(SelectionError::Ambiguous { reply, candidates }),
            Proposal::Unrecognized => Err(SelectionError::Unrecognized(reply)),
        }
    }
}
