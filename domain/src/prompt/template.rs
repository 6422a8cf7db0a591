//! Prompt templates for coordinator-driven speaker selection

use crate::participant::entities::ParticipantProfile;
use crate::participant::value_objects::ParticipantId;

/// Templates for the prompts a coordinator receives
pub struct PromptTemplate;

impl PromptTemplate {
    /// System prompt describing the available roles
    pub fn select_speaker_system(candidates: &[ParticipantProfile]) -> String {
        let mut prompt = String::from(
            "You are coordinating a group conversation. The following roles are available:\n",
        );
        for candidate in candidates {
            prompt.push_str(&format!("{}: {}\n", candidate.id, candidate.description.trim()));
        }
        prompt.push_str(
            "\nRead the conversation so far, then decide which role should speak next.",
        );
        prompt
    }

    /// Instruction appended after the transcript, naming the eligible roles.
    ///
    /// On retries `rejected` lists earlier proposals that were not allowed,
    /// so the coordinator sees the eligible set explicitly.
    pub fn select_speaker_prompt(
        candidates: &[ParticipantProfile],
        rejected: &[String],
    ) -> String {
        let names = Self::name_list(candidates.iter().map(|c| &c.id));
        let mut prompt = String::new();

        if !rejected.is_empty() {
            prompt.push_str(&format!(
                "Your previous answer ({}) is not an eligible speaker at this point.\n",
                rejected.join(", ")
            ));
        }

        prompt.push_str(&format!(
            "Select the next role from [{}] to speak. Only return the role name.",
            names
        ));
        prompt
    }

    fn name_list<'a>(ids: impl Iterator<Item = &'a ParticipantId>) -> String {
        ids.map(|id| id.as_str()).collect::<Vec<_>>().join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates() -> Vec<ParticipantProfile> {
        vec![
            ParticipantProfile::new("tutor", "Helps with problems."),
            ParticipantProfile::new("teacher", "Presents lecture material."),
        ]
    }

    #[test]
    fn test_system_prompt_lists_roles() {
        let prompt = PromptTemplate::select_speaker_system(&candidates());
        assert!(prompt.contains("tutor: Helps with problems."));
        assert!(prompt.contains("teacher: Presents lecture material."));
    }

    #[test]
    fn test_selection_prompt_names_eligible_set() {
        let prompt = PromptTemplate::select_speaker_prompt(&candidates(), &[]);
        assert!(prompt.contains("[tutor, teacher]"));
        assert!(!prompt.contains("previous answer"));
    }

    #[test]
    fn test_retry_prompt_mentions_rejected_answers() {
        let prompt =
            PromptTemplate::select_speaker_prompt(&candidates(), &["motivator".to_string()]);
        assert!(prompt.contains("Your previous answer (motivator)"));
        assert!(prompt.contains("[tutor, teacher]"));
    }
}
