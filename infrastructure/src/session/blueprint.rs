use crate::config::{ConfigError, FileConfig, FileParticipantConfig};
use crate::participants::{HumanParticipant, MentionCoordinator, ScriptedParticipant};
use roundtable_application::{
    CoordinatorSelector, Participant, RandomSelector, Roster, RoundRobinSelector,
    RunSessionUseCase, SpeakerSelector,
};
use roundtable_domain::{ConfigIssue, ParticipantId, SpeakerSelectionMethod};
use std::sync::Arc;
use tracing::{debug, warn};

/// Everything needed to start a session, built from one [`FileConfig`].
pub struct SessionBlueprint {
    pub use_case: RunSessionUseCase,
    /// Who the seed message is attributed to
    pub initial_speaker: ParticipantId,
    /// Non-fatal configuration issues, already logged
    pub warnings: Vec<ConfigIssue>,
}

impl SessionBlueprint {
    /// Validate `config` and assemble the session.
    ///
    /// Any error-severity issue aborts with [`ConfigError::Invalid`] listing
    /// all of them.
    pub fn from_config(config: &FileConfig) -> Result<Self, ConfigError> {
        let (errors, warnings): (Vec<_>, Vec<_>) =
            config.validate().into_iter().partition(ConfigIssue::is_error);
        if !errors.is_empty() {
            return Err(ConfigError::Invalid(errors));
        }
        for issue in &warnings {
            warn!("{}", issue);
        }

        let roster = Roster::new(config.participants.iter().map(build_participant).collect())?;
        let policy = Arc::new(config.transition_policy()?);
        let selector = build_selector(config);
        let (session_config, _) = config.session.to_session_config();

        let initial_speaker = config
            .session
            .initial_speaker
            .as_deref()
            .or_else(|| config.participants.first().map(|p| p.name.as_str()))
            .map(ParticipantId::new)
            .ok_or(roundtable_domain::DomainError::EmptyRoster)?;

        debug!(
            "Assembled session: {} participants, {} transitions, {} selection",
            roster.len(),
            policy.mode(),
            selector.method()
        );

        let use_case = RunSessionUseCase::new(roster, policy, selector)?.with_config(session_config);

        Ok(Self {
            use_case,
            initial_speaker,
            warnings,
        })
    }
}

/// Humans and unscripted participants type their turns; the rest use their script.
fn build_participant(config: &FileParticipantConfig) -> Arc<dyn Participant> {
    let profile = config.to_profile();
    if profile.requires_external_input() || config.replies.is_empty() {
        Arc::new(HumanParticipant::new(profile))
    } else {
        Arc::new(ScriptedParticipant::new(profile, config.replies.clone()))
    }
}

fn build_selector(config: &FileConfig) -> Arc<dyn SpeakerSelector> {
    match config.session.parse_speaker_selection().0 {
        SpeakerSelectionMethod::Coordinator => Arc::new(CoordinatorSelector::new(Arc::new(
            MentionCoordinator::new(config.coordinator.name.as_str()),
        ))),
        SpeakerSelectionMethod::RoundRobin => Arc::new(RoundRobinSelector),
        SpeakerSelectionMethod::Random => match config.session.seed {
            Some(seed) => Arc::new(RandomSelector::seeded(seed)),
            None => Arc::new(RandomSelector::new()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Preset;
    use roundtable_application::RunSessionInput;
    use roundtable_domain::{ConfigIssueCode, MessageKind, TerminationReason, TransitionMode};

    fn scripted_pair() -> FileConfig {
        toml::from_str(
            r#"
[session]
max_rounds = 4
send_introductions = false
speaker_selection = "round_robin"

[[participants]]
name = "tutor"
replies = ["Hello student"]

[[participants]]
name = "student"
replies = ["Hi tutor"]
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_invalid_config_lists_errors() {
        let mut config = scripted_pair();
        config.session.max_rounds = 0;
        config.session.initial_speaker = Some("ghost".to_string());

        let Err(ConfigError::Invalid(issues)) = SessionBlueprint::from_config(&config) else {
            panic!("expected invalid configuration");
        };
        assert_eq!(issues.len(), 2);
        assert!(issues.iter().all(ConfigIssue::is_error));
    }

    #[test]
    fn test_initial_speaker_defaults_to_first_participant() {
        let blueprint = SessionBlueprint::from_config(&scripted_pair()).unwrap();
        assert_eq!(blueprint.initial_speaker.as_str(), "tutor");
        assert!(blueprint.warnings.is_empty());
        assert_eq!(blueprint.use_case.config().max_rounds, 4);
    }

    #[test]
    fn test_unscripted_participants_wait_for_input() {
        let config = Preset::TutorMath.file_config(TransitionMode::Disallowed);
        let blueprint = SessionBlueprint::from_config(&config).unwrap();

        assert_eq!(blueprint.initial_speaker.as_str(), "tutor");
        assert_eq!(blueprint.use_case.roster().len(), 11);
        let student = blueprint
            .use_case
            .roster()
            .get(&ParticipantId::new("student"))
            .unwrap();
        assert!(student.requires_external_input());
    }

    #[test]
    fn test_unknown_selection_is_a_warning() {
        let mut config = scripted_pair();
        config.session.speaker_selection = "loudest".to_string();

        let blueprint = SessionBlueprint::from_config(&config).unwrap();
        assert_eq!(blueprint.warnings.len(), 1);
        assert!(matches!(
            blueprint.warnings[0].code,
            ConfigIssueCode::InvalidEnumValue { .. }
        ));
    }

    #[tokio::test]
    async fn test_scripted_session_runs_to_max_rounds() {
        let blueprint = SessionBlueprint::from_config(&scripted_pair()).unwrap();

        let outcome = blueprint
            .use_case
            .run(RunSessionInput::new(blueprint.initial_speaker.clone(), "Let's start"))
            .await
            .unwrap();

        assert_eq!(outcome.reason, TerminationReason::MaxRoundsReached { rounds: 4 });
        let turns: Vec<_> = outcome
            .transcript
            .messages()
            .iter()
            .filter(|m| m.kind() == MessageKind::Turn)
            .map(|m| (m.sender().to_string(), m.content().to_string()))
            .collect();
        assert_eq!(
            turns,
            vec![
                ("student".to_string(), "Hi tutor".to_string()),
                ("tutor".to_string(), "Hello student".to_string()),
                ("student".to_string(), "Hi tutor".to_string()),
                ("tutor".to_string(), "Hello student".to_string()),
            ]
        );
    }
}
