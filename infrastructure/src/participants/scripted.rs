use async_trait::async_trait;
use roundtable_application::{Participant, ParticipantError, Reply};
use roundtable_domain::{Message, ParticipantProfile};
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::trace;

/// A participant that answers from a fixed list of replies.
///
/// Replies are used in order and then repeated from the start.
pub struct ScriptedParticipant {
    profile: ParticipantProfile,
    replies: Vec<String>,
    next: AtomicUsize,
}

impl ScriptedParticipant {
    pub fn new(profile: ParticipantProfile, replies: Vec<String>) -> Self {
        Self {
            profile,
            replies,
            next: AtomicUsize::new(0),
        }
    }

    /// Number of replies produced so far.
    pub fn turns_taken(&self) -> usize {
        self.next.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl Participant for ScriptedParticipant {
    fn profile(&self) -> &ParticipantProfile {
        &self.profile
    }

    async fn respond(&self, transcript: &[Message]) -> Result<Reply, ParticipantError> {
        if self.replies.is_empty() {
            return Err(ParticipantError::Other(format!(
                "{} has no scripted replies",
                self.profile.id
            )));
        }

        let turn = self.next.fetch_add(1, Ordering::Relaxed);
        let content = &self.replies[turn % self.replies.len()];
        trace!(
            "{} replies with script line {} after {} messages",
            self.profile.id,
            turn % self.replies.len(),
            transcript.len()
        );
        Ok(Reply::message(content.clone()))
    }
}
