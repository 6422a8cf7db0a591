//! Participant port
//!
//! Defines the black-box contract every conversation participant fulfils:
//! "given the transcript so far, produce the next message".
//!
//! Implementations (scripted agents, LLM-backed agents, humans) live in the
//! infrastructure layer or in the wiring process. The session only holds
//! shared references to them.

use async_trait::async_trait;
use roundtable_domain::{Message, ParticipantId, ParticipantProfile, Recipient};
use thiserror::Error;

/// Errors a participant invocation can raise.
///
/// The session treats every variant as a recoverable turn failure: it is
/// logged, retried up to `max_turn_attempts`, then recorded as an error turn.
#[derive(Error, Debug, Clone)]
pub enum ParticipantError {
    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Timeout")]
    Timeout,

    #[error("Invalid reply: {0}")]
    InvalidReply(String),

    #[error("Other error: {0}")]
    Other(String),
}

/// What a participant produced for its turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// The participant's message for this turn.
    Message { content: String, recipient: Recipient },
    /// The participant cannot answer by itself; a human must supply the content.
    RequiresExternalInput,
}

impl Reply {
    /// A broadcast reply.
    pub fn message(content: impl Into<String>) -> Self {
        Reply::Message {
            content: content.into(),
            recipient: Recipient::Broadcast,
        }
    }

    /// A reply addressed to one participant.
    pub fn to(recipient: ParticipantId, content: impl Into<String>) -> Self {
        Reply::Message {
            content: content.into(),
            recipient: Recipient::Participant(recipient),
        }
    }
}

/// A conversation participant.
#[async_trait]
pub trait Participant: Send + Sync {
    /// Name, description and human input mode.
    fn profile(&self) -> &ParticipantProfile;

    fn id(&self) -> &ParticipantId {
        &self.profile().id
    }

    /// When true the session does not invoke [`respond`](Self::respond) at
    /// all and waits on the input broker instead.
    fn requires_external_input(&self) -> bool {
        self.profile().requires_external_input()
    }

    /// Produce the next message given the full transcript so far.
    async fn respond(&self, transcript: &[Message]) -> Result<Reply, ParticipantError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use roundtable_domain::HumanInputMode;

    struct Echo {
        profile: ParticipantProfile,
    }

    #[async_trait]
    impl Participant for Echo {
        fn profile(&self) -> &ParticipantProfile {
            &self.profile
        }

        async fn respond(&self, transcript: &[Message]) -> Result<Reply, ParticipantError> {
            let last = transcript
                .last()
                .ok_or_else(|| ParticipantError::InvalidReply("empty transcript".to_string()))?;
            Ok(Reply::message(last.content()))
        }
    }

    #[test]
    fn test_reply_constructors() {
        assert_eq!(
            Reply::message("hi"),
            Reply::Message {
                content: "hi".to_string(),
                recipient: Recipient::Broadcast
            }
        );
        assert!(matches!(
            Reply::to(ParticipantId::new("student"), "hi"),
            Reply::Message { recipient: Recipient::Participant(_), .. }
        ));
    }

    #[test]
    fn test_default_methods_follow_profile() {
        let echo = Echo {
            profile: ParticipantProfile::new("student", "learner")
                .with_human_input_mode(HumanInputMode::Always),
        };
        assert_eq!(echo.id().as_str(), "student");
        assert!(echo.requires_external_input());
    }

    #[tokio::test]
    async fn test_respond_error_on_empty_transcript() {
        let echo = Echo {
            profile: ParticipantProfile::new("echo", ""),
        };
        let err = echo.respond(&[]).await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid reply: empty transcript");
    }
}
