//! Transition configuration from TOML (`[transitions]` section)

use roundtable_domain::{ConfigIssue, ConfigIssueCode, TransitionGraph, TransitionMode};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Raw transition policy configuration from TOML
///
/// # Example
///
/// ```toml
/// [transitions]
/// mode = "disallowed"            # "allowed", "disallowed", "unrestricted"
/// allow_repeat_speaker = false
///
/// [transitions.graph]
/// tutor = ["programmer", "code_runner"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileTransitionsConfig {
    pub mode: String,
    pub allow_repeat_speaker: bool,
    /// Speaker name -> names that may (allowed) or may not (disallowed) follow
    pub graph: BTreeMap<String, Vec<String>>,
}

impl Default for FileTransitionsConfig {
    fn default() -> Self {
        Self {
            mode: TransitionMode::default().as_str().to_string(),
            allow_repeat_speaker: false,
            graph: BTreeMap::new(),
        }
    }
}

impl FileTransitionsConfig {
    /// Parse mode. An unknown mode is an error: guessing would change who may speak.
    pub fn parse_mode(&self) -> (TransitionMode, Vec<ConfigIssue>) {
        match self.mode.parse::<TransitionMode>() {
            Ok(mode) => (mode, vec![]),
            Err(_) => {
                let issue = ConfigIssue::error(
                    ConfigIssueCode::InvalidEnumValue {
                        field: "transitions.mode".to_string(),
                        value: self.mode.clone(),
                        valid_values: vec![
                            "allowed".to_string(),
                            "disallowed".to_string(),
                            "unrestricted".to_string(),
                        ],
                    },
                    format!("transitions.mode: unknown value '{}'", self.mode),
                );
                (TransitionMode::default(), vec![issue])
            }
        }
    }

    pub fn to_graph(&self) -> TransitionGraph {
        self.graph
            .iter()
            .fold(TransitionGraph::new(), |graph, (from, to)| {
                graph.with_edges(from.as_str(), to.iter().map(String::as_str))
            })
    }

    /// Every name the graph mentions, as (field, name) pairs.
    pub(super) fn referenced_names(&self) -> impl Iterator<Item = (String, &str)> {
        self.graph.iter().flat_map(|(from, targets)| {
            std::iter::once(("transitions.graph".to_string(), from.as_str())).chain(
                targets
                    .iter()
                    .map(move |to| (format!("transitions.graph.{}", from), to.as_str())),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roundtable_domain::ParticipantId;

    #[test]
    fn test_deserialize_graph() {
        let toml_str = r#"
mode = "allowed"

[graph]
student = ["tutor", "solution_verifier"]
tutor = ["student"]
"#;
        let config: FileTransitionsConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.parse_mode().0, TransitionMode::Allowed);
        assert!(!config.allow_repeat_speaker);

        let graph = config.to_graph();
        let targets = graph.targets(&ParticipantId::new("student")).unwrap();
        assert!(targets.contains(&ParticipantId::new("solution_verifier")));
        assert_eq!(targets.len(), 2);
    }

    #[test]
    fn test_unknown_mode_is_error() {
        let config = FileTransitionsConfig {
            mode: "sometimes".to_string(),
            ..Default::default()
        };
        let (_, issues) = config.parse_mode();
        assert!(issues[0].is_error());
    }

    #[test]
    fn test_referenced_names() {
        let mut config = FileTransitionsConfig::default();
        config
            .graph
            .insert("a".to_string(), vec!["b".to_string(), "c".to_string()]);

        let names: Vec<_> = config.referenced_names().map(|(_, n)| n).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }
}
