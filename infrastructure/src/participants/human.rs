use async_trait::async_trait;
use roundtable_application::{Participant, ParticipantError, Reply};
use roundtable_domain::{Message, ParticipantProfile};

/// A participant whose every turn is typed in through the input broker.
pub struct HumanParticipant {
    profile: ParticipantProfile,
}

impl HumanParticipant {
    pub fn new(profile: ParticipantProfile) -> Self {
        Self { profile }
    }
}

#[async_trait]
impl Participant for HumanParticipant {
    fn profile(&self) -> &ParticipantProfile {
        &self.profile
    }

    async fn respond(&self, _transcript: &[Message]) -> Result<Reply, ParticipantError> {
        Ok(Reply::RequiresExternalInput)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roundtable_domain::HumanInputMode;

    #[tokio::test]
    async fn test_human_always_defers_to_external_input() {
        let human = HumanParticipant::new(
            ParticipantProfile::new("student", "Learner")
                .with_human_input_mode(HumanInputMode::Always),
        );
        assert!(human.requires_external_input());
        assert_eq!(human.respond(&[]).await.unwrap(), Reply::RequiresExternalInput);
    }

    #[tokio::test]
    async fn test_unscripted_never_mode_still_asks_for_input() {
        let human = HumanParticipant::new(ParticipantProfile::new("programmer", ""));
        assert!(!human.requires_external_input());
        assert_eq!(human.respond(&[]).await.unwrap(), Reply::RequiresExternalInput);
    }
}
