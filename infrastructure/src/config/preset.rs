//! Built-in session presets
//!
//! A preset is a complete [`FileConfig`] that config files and environment
//! variables can still override (see [`ConfigLoader::load_over`](super::ConfigLoader::load_over)).

use super::error::ConfigError;
use super::file_config::{FileConfig, FileParticipantConfig, FileTransitionsConfig};
use roundtable_domain::{HumanInputMode, TransitionMode};
use std::collections::BTreeMap;

/// Built-in presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Adaptive math tutoring with eleven roles
    TutorMath,
}

impl Preset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::TutorMath => "tutor-math",
        }
    }

    pub fn all() -> &'static [Preset] {
        &[Preset::TutorMath]
    }

    /// The preset's configuration with the transition graph for `mode`.
    pub fn file_config(&self, mode: TransitionMode) -> FileConfig {
        match self {
            Preset::TutorMath => tutor_math::file_config(mode),
        }
    }
}

impl std::fmt::Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Preset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "tutor-math" | "tutor" => Ok(Preset::TutorMath),
            _ => Err(ConfigError::UnknownPreset(s.to_string())),
        }
    }
}

fn graph(edges: &[(&str, &[&str])]) -> BTreeMap<String, Vec<String>> {
    edges
        .iter()
        .map(|(from, to)| {
            (
                from.to_string(),
                to.iter().map(|name| name.to_string()).collect(),
            )
        })
        .collect()
}

mod tutor_math {
    use super::*;

    const STUDENT: &str = "student";
    const KNOWLEDGE_TRACER: &str = "knowledge_tracer";
    const TEACHER: &str = "teacher";
    const TUTOR: &str = "tutor";
    const PROBLEM_GENERATOR: &str = "problem_generator";
    const SOLUTION_VERIFIER: &str = "solution_verifier";
    const PROGRAMMER: &str = "programmer";
    const CODE_RUNNER: &str = "code_runner";
    const LEARNER_MODEL: &str = "learner_model";
    const LEVEL_ADAPTER: &str = "level_adapter";
    const MOTIVATOR: &str = "motivator";

    /// Who may NOT speak after each role.
    const DISALLOWED: &[(&str, &[&str])] = &[
        (
            STUDENT,
            &[SOLUTION_VERIFIER, PROGRAMMER, CODE_RUNNER, LEARNER_MODEL, LEVEL_ADAPTER, MOTIVATOR],
        ),
        (TUTOR, &[PROGRAMMER, CODE_RUNNER]),
        (
            TEACHER,
            &[
                KNOWLEDGE_TRACER,
                PROBLEM_GENERATOR,
                SOLUTION_VERIFIER,
                PROGRAMMER,
                CODE_RUNNER,
                LEARNER_MODEL,
                LEVEL_ADAPTER,
                MOTIVATOR,
            ],
        ),
        (KNOWLEDGE_TRACER, &[TEACHER, TUTOR, MOTIVATOR]),
        (
            PROBLEM_GENERATOR,
            &[TEACHER, SOLUTION_VERIFIER, PROGRAMMER, CODE_RUNNER, MOTIVATOR],
        ),
        (
            SOLUTION_VERIFIER,
            &[STUDENT, TEACHER, PROBLEM_GENERATOR, LEARNER_MODEL, LEVEL_ADAPTER, MOTIVATOR],
        ),
        (
            PROGRAMMER,
            &[
                STUDENT,
                TEACHER,
                KNOWLEDGE_TRACER,
                PROBLEM_GENERATOR,
                SOLUTION_VERIFIER,
                LEARNER_MODEL,
                LEVEL_ADAPTER,
                MOTIVATOR,
            ],
        ),
        (
            CODE_RUNNER,
            &[
                STUDENT,
                TEACHER,
                KNOWLEDGE_TRACER,
                PROBLEM_GENERATOR,
                SOLUTION_VERIFIER,
                LEARNER_MODEL,
                LEVEL_ADAPTER,
                MOTIVATOR,
            ],
        ),
        (
            LEARNER_MODEL,
            &[STUDENT, TEACHER, SOLUTION_VERIFIER, PROGRAMMER, CODE_RUNNER, MOTIVATOR],
        ),
        (
            LEVEL_ADAPTER,
            &[STUDENT, TEACHER, SOLUTION_VERIFIER, PROGRAMMER, CODE_RUNNER, MOTIVATOR],
        ),
        (
            MOTIVATOR,
            &[
                KNOWLEDGE_TRACER,
                PROBLEM_GENERATOR,
                SOLUTION_VERIFIER,
                PROGRAMMER,
                CODE_RUNNER,
                LEARNER_MODEL,
            ],
        ),
    ];

    /// Who MAY speak after each role.
    const ALLOWED: &[(&str, &[&str])] = &[
        (STUDENT, &[TUTOR, SOLUTION_VERIFIER]),
        (TUTOR, &[STUDENT, PROBLEM_GENERATOR, LEARNER_MODEL, LEVEL_ADAPTER]),
        (TEACHER, &[TUTOR, LEARNER_MODEL]),
        (
            KNOWLEDGE_TRACER,
            &[TUTOR, PROBLEM_GENERATOR, LEARNER_MODEL, LEVEL_ADAPTER],
        ),
        (PROBLEM_GENERATOR, &[TUTOR]),
        (SOLUTION_VERIFIER, &[PROGRAMMER]),
        (PROGRAMMER, &[CODE_RUNNER]),
        (CODE_RUNNER, &[TUTOR, SOLUTION_VERIFIER]),
        (LEARNER_MODEL, &[KNOWLEDGE_TRACER, LEVEL_ADAPTER]),
        (LEVEL_ADAPTER, &[TUTOR, PROBLEM_GENERATOR, LEARNER_MODEL]),
        (MOTIVATOR, &[TUTOR]),
    ];

    fn participants() -> Vec<FileParticipantConfig> {
        vec![
            FileParticipantConfig::new(
                STUDENT,
                "The Student is learning math and asks for help, answers problems and requests new material.",
            )
            .with_human_input_mode(HumanInputMode::Always),
            FileParticipantConfig::new(
                KNOWLEDGE_TRACER,
                "Knowledge Tracer tests the Student on what they know, works with the Problem Generator \
                 to present problems and with the Learner Model to keep track of the Student's level.",
            )
            .with_human_input_mode(HumanInputMode::Always),
            FileParticipantConfig::new(
                TEACHER,
                "Teacher presents clear and concise lecture-type material when the Student asks to learn something new.",
            )
            .with_replies([
                "Here is the idea: a fraction names equal parts of a whole. The bottom number counts the parts, the top number counts how many we take. tutor, please help the student practise.",
            ]),
            FileParticipantConfig::new(
                TUTOR,
                "Tutor assists the Student in real time with math problems, offering solutions and explanations \
                 to make learning easier and more interactive.",
            )
            .with_replies([
                "Let's work through this together. problem_generator, could you give the student a problem at their level?",
                "Good effort. Take it one step at a time and tell me where you get stuck, student.",
                "learner_model, please record how the student is doing on this topic.",
            ]),
            FileParticipantConfig::new(
                PROBLEM_GENERATOR,
                "Problem Generator creates math problems that fit the current curriculum and the Student's level, \
                 keeping them appropriate and challenging.",
            )
            .with_replies([
                "Problem: what is 3/4 + 1/8? tutor, over to you.",
                "Problem: a recipe needs 2/3 cup of sugar and you make it twice. How much sugar? tutor, over to you.",
            ]),
            FileParticipantConfig::new(
                SOLUTION_VERIFIER,
                "Solution Verifier checks submitted solutions against the correct answers and gives feedback on their correctness.",
            )
            .with_human_input_mode(HumanInputMode::Always),
            FileParticipantConfig::new(
                PROGRAMMER,
                "Programmer writes small programs that compute or check answers to the current problem.",
            )
            .with_replies([
                "print(3/4 + 1/8)  # code_runner, please run this.",
            ]),
            FileParticipantConfig::new(
                CODE_RUNNER,
                "Code Runner executes code and displays its output, giving real-time feedback to the other roles.",
            )
            .with_replies(["Output: 0.875 (which is 7/8). tutor, the result is ready."]),
            FileParticipantConfig::new(
                LEARNER_MODEL,
                "Learner Model tracks the Student's progress, sets educational goals and adjusts task difficulty \
                 together with the Tutor and Knowledge Tracer.",
            )
            .with_human_input_mode(HumanInputMode::Always),
            FileParticipantConfig::new(
                LEVEL_ADAPTER,
                "Level Adapter reads the Student's progress from the Learner Model and tells the other roles what level to aim for.",
            )
            .with_replies([
                "The student is ready for fractions with unlike denominators. problem_generator, aim for that level.",
            ]),
            FileParticipantConfig::new(
                MOTIVATOR,
                "Motivator gives the Student specific, encouraging feedback on their effort and progress, and speaks only to the Student.",
            )
            .with_replies([
                "You're making real progress, student. Keep going! tutor, back to you.",
            ]),
        ]
    }

    pub(super) fn file_config(mode: TransitionMode) -> FileConfig {
        let edges = match mode {
            TransitionMode::Allowed => graph(ALLOWED),
            TransitionMode::Disallowed => graph(DISALLOWED),
            TransitionMode::Unrestricted => BTreeMap::new(),
        };

        let mut config = FileConfig {
            participants: participants(),
            transitions: FileTransitionsConfig {
                mode: mode.as_str().to_string(),
                allow_repeat_speaker: false,
                graph: edges,
            },
            ..Default::default()
        };
        config.session.max_rounds = 40;
        config.session.send_introductions = true;
        config.session.initial_speaker = Some(TUTOR.to_string());
        config.output.welcome =
            Some("Welcome to the Adaptive Tutor! How can I help you today?".to_string());
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roundtable_domain::ParticipantId;

    fn names(ids: Vec<ParticipantId>) -> Vec<String> {
        ids.into_iter().map(|id| id.to_string()).collect()
    }

    #[test]
    fn test_parse_preset() {
        assert_eq!("tutor-math".parse::<Preset>().unwrap(), Preset::TutorMath);
        assert_eq!("TUTOR_MATH".parse::<Preset>().unwrap(), Preset::TutorMath);
        assert!(matches!(
            "chess".parse::<Preset>(),
            Err(ConfigError::UnknownPreset(_))
        ));
    }

    #[test]
    fn test_tutor_math_is_valid_in_every_mode() {
        for mode in [
            TransitionMode::Disallowed,
            TransitionMode::Allowed,
            TransitionMode::Unrestricted,
        ] {
            let config = Preset::TutorMath.file_config(mode);
            assert_eq!(config.participants.len(), 11);
            let errors: Vec<_> = config
                .validate()
                .into_iter()
                .filter(|issue| issue.is_error())
                .collect();
            assert!(errors.is_empty(), "{}: {:?}", mode, errors);
        }
    }

    #[test]
    fn test_tutor_math_disallowed_graph() {
        let policy = Preset::TutorMath
            .file_config(TransitionMode::Disallowed)
            .transition_policy()
            .unwrap();

        assert_eq!(
            names(policy.eligible_next(&ParticipantId::new("tutor"))),
            vec![
                "student",
                "knowledge_tracer",
                "teacher",
                "problem_generator",
                "solution_verifier",
                "learner_model",
                "level_adapter",
                "motivator"
            ]
        );
        assert!(policy.dead_ends().is_empty());
    }

    #[test]
    fn test_tutor_math_allowed_graph() {
        let policy = Preset::TutorMath
            .file_config(TransitionMode::Allowed)
            .transition_policy()
            .unwrap();

        assert_eq!(
            names(policy.eligible_next(&ParticipantId::new("solution_verifier"))),
            vec!["programmer"]
        );
        assert_eq!(
            names(policy.eligible_next(&ParticipantId::new("student"))),
            vec!["tutor", "solution_verifier"]
        );
    }

    #[test]
    fn test_tutor_math_human_roles() {
        let config = Preset::TutorMath.file_config(TransitionMode::Disallowed);
        let humans: Vec<_> = config
            .participants
            .iter()
            .filter(|p| p.to_profile().requires_external_input())
            .map(|p| p.name.as_str())
            .collect();

        assert_eq!(
            humans,
            vec!["student", "knowledge_tracer", "solution_verifier", "learner_model"]
        );
        assert_eq!(config.session.initial_speaker.as_deref(), Some("tutor"));
    }
}
