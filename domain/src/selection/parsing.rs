//! Coordinator reply parsing.
//!
//! A coordinator answers in free text. [`parse_proposal`] maps that text onto
//! a roster name. It is pure text matching: whether the named participant is
//! actually allowed to speak is decided by the transition policy afterwards.
//!
//! Resolution order:
//!
//! 1. The whole reply (trimmed, quotes and trailing punctuation removed)
//!    equals a roster name, case-insensitively.
//! 2. Otherwise every roster name is counted as a whole word (underscores
//!    may also be written as spaces). A unique most-mentioned name wins.
//! 3. Ties are [`Proposal::Ambiguous`]; no mention at all is
//!    [`Proposal::Unrecognized`].

use crate::participant::value_objects::ParticipantId;

/// Outcome of parsing a coordinator reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Proposal {
    Named(ParticipantId),
    Ambiguous(Vec<ParticipantId>),
    Unrecognized,
}

impl Proposal {
    pub fn named(&self) -> Option<&ParticipantId> {
        match self {
            Proposal::Named(id) => Some(id),
            _ => None,
        }
    }
}

/// Resolve a free-text reply to one roster member.
pub fn parse_proposal(reply: &str, roster: &[ParticipantId]) -> Proposal {
    let cleaned = reply
        .trim()
        .trim_matches(|c: char| c == '"' || c == '\'' || c == '`' || c == '*')
        .trim_end_matches(['.', '!', ':'])
        .trim()
        .to_lowercase();

    if cleaned.is_empty() {
        return Proposal::Unrecognized;
    }

    if let Some(exact) = roster
        .iter()
        .find(|id| id.as_str().to_lowercase() == cleaned || spaced(id) == cleaned)
    {
        return Proposal::Named(exact.clone());
    }

    let haystack = reply.to_lowercase();
    let counts: Vec<(usize, &ParticipantId)> = roster
        .iter()
        .map(|id| {
            let name = id.as_str().to_lowercase();
            let mut count = count_word(&haystack, &name);
            let alt = spaced(id);
            if alt != name {
                count += count_word(&haystack, &alt);
            }
            (count, id)
        })
        .collect();

    let best = counts.iter().map(|(c, _)| *c).max().unwrap_or(0);
    if best == 0 {
        return Proposal::Unrecognized;
    }

    let leaders: Vec<ParticipantId> = counts
        .into_iter()
        .filter(|(c, _)| *c == best)
        .map(|(_, id)| id.clone())
        .collect();

    match leaders.as_slice() {
        [single] => Proposal::Named(single.clone()),
        _ => Proposal::Ambiguous(leaders),
    }
}

fn spaced(id: &ParticipantId) -> String {
    id.as_str().to_lowercase().replace('_', " ")
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Byte offset of the first whole-word occurrence of `needle` at or after `from`.
fn find_word(haystack: &str, needle: &str, from: usize) -> Option<usize> {
    if needle.is_empty() {
        return None;
    }

    let mut start = from;
    while let Some(pos) = haystack.get(start..)?.find(needle) {
        let begin = start + pos;
        let end = begin + needle.len();
        let before_ok = haystack[..begin]
            .chars()
            .next_back()
            .is_none_or(|c| !is_word_char(c));
        let after_ok = haystack[end..].chars().next().is_none_or(|c| !is_word_char(c));

        if before_ok && after_ok {
            return Some(begin);
        }
        start = begin + needle.chars().next().map_or(1, char::len_utf8);
    }
    None
}

/// Count non-overlapping whole-word occurrences of `needle` in `haystack`.
fn count_word(haystack: &str, needle: &str) -> usize {
    let mut count = 0;
    let mut start = 0;
    while let Some(begin) = find_word(haystack, needle, start) {
        count += 1;
        start = begin + needle.len();
    }
    count
}

/// Byte offset of the earliest whole-word mention of `id` in `text`.
///
/// Matching is case-insensitive; underscores in the name may be written as
/// spaces. Names inside longer words ("tutor" in "tutoring") do not count.
pub fn first_mention(text: &str, id: &ParticipantId) -> Option<usize> {
    let haystack = text.to_lowercase();
    let name = id.as_str().to_lowercase();
    let alt = spaced(id);
    [find_word(&haystack, &name, 0), find_word(&haystack, &alt, 0)]
        .into_iter()
        .flatten()
        .min()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Vec<ParticipantId> {
        ["student", "tutor", "teacher", "knowledge_tracer", "learner_model"]
            .iter()
            .map(|n| ParticipantId::new(*n))
            .collect()
    }

    fn named(name: &str) -> Proposal {
        Proposal::Named(ParticipantId::new(name))
    }

    #[test]
    fn test_exact_name() {
        assert_eq!(parse_proposal("tutor", &roster()), named("tutor"));
        assert_eq!(parse_proposal("  Teacher.\n", &roster()), named("teacher"));
        assert_eq!(parse_proposal("\"student\"", &roster()), named("student"));
    }

    #[test]
    fn test_spaced_name() {
        assert_eq!(parse_proposal("Knowledge Tracer", &roster()), named("knowledge_tracer"));
    }

    #[test]
    fn test_mention_in_sentence() {
        assert_eq!(
            parse_proposal("I think the learner_model should go next.", &roster()),
            named("learner_model")
        );
    }

    #[test]
    fn test_most_mentioned_wins() {
        assert_eq!(
            parse_proposal("Not the tutor. The teacher, yes the teacher.", &roster()),
            named("teacher")
        );
    }

    #[test]
    fn test_word_boundaries() {
        // "tutoring" must not count as a mention of "tutor"
        assert_eq!(
            parse_proposal("More tutoring is needed, ask the student", &roster()),
            named("student")
        );
    }

    #[test]
    fn test_ambiguous_tie() {
        assert_eq!(
            parse_proposal("Either tutor or teacher", &roster()),
            Proposal::Ambiguous(vec![ParticipantId::new("tutor"), ParticipantId::new("teacher")])
        );
    }

    #[test]
    fn test_unrecognized() {
        assert_eq!(parse_proposal("", &roster()), Proposal::Unrecognized);
        assert_eq!(parse_proposal("the principal", &roster()), Proposal::Unrecognized);
        assert!(parse_proposal("nobody", &roster()).named().is_none());
    }

    #[test]
    fn test_count_word() {
        assert_eq!(count_word("tutor tutor", "tutor"), 2);
        assert_eq!(count_word("tutors", "tutor"), 0);
        assert_eq!(count_word("a_tutor", "tutor"), 0);
        assert_eq!(count_word("(tutor)", "tutor"), 1);
    }

    #[test]
    fn test_first_mention_requires_whole_word() {
        let text = "After tutoring, the Student should ask the tutor";
        let tutor = ParticipantId::new("tutor");

        assert_eq!(first_mention(text, &tutor), text.rfind("tutor"));
        assert_eq!(first_mention(text, &ParticipantId::new("student")), text.find("Student"));
        assert_eq!(first_mention("tutoring only", &tutor), None);
    }

    #[test]
    fn test_first_mention_spaced_name() {
        let text = "the solution verifier, then the learner_model";
        assert_eq!(
            first_mention(text, &ParticipantId::new("solution_verifier")),
            text.find("solution")
        );
        assert_eq!(
            first_mention(text, &ParticipantId::new("learner_model")),
            text.find("learner")
        );
    }
}
