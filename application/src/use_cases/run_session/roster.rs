//! Session roster: the participants taking part, in speaking order.

use crate::ports::participant::Participant;
use roundtable_domain::{DomainError, ParticipantId, ParticipantProfile};
use std::collections::HashSet;
use std::sync::Arc;

/// Ordered set of participants with unique names.
///
/// Roster order is what round-robin selection cycles through and what
/// eligible sets are reported in.
#[derive(Clone)]
pub struct Roster {
    participants: Vec<Arc<dyn Participant>>,
}

impl Roster {
    pub fn new(participants: Vec<Arc<dyn Participant>>) -> Result<Self, DomainError> {
        if participants.is_empty() {
            return Err(DomainError::EmptyRoster);
        }

        let mut seen = HashSet::new();
        for participant in &participants {
            let id = participant.id();
            if !id.is_valid() {
                return Err(DomainError::InvalidParticipantName(id.to_string()));
            }
            if !seen.insert(id.clone()) {
                return Err(DomainError::DuplicateParticipant(id.clone()));
            }
        }

        Ok(Self { participants })
    }

    pub fn get(&self, id: &ParticipantId) -> Option<&Arc<dyn Participant>> {
        self.participants.iter().find(|p| p.id() == id)
    }

    pub fn contains(&self, id: &ParticipantId) -> bool {
        self.get(id).is_some()
    }

    pub fn ids(&self) -> Vec<ParticipantId> {
        self.participants.iter().map(|p| p.id().clone()).collect()
    }

    pub fn profiles(&self) -> Vec<ParticipantProfile> {
        self.participants.iter().map(|p| p.profile().clone()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Participant>> {
        self.participants.iter()
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }
}

impl std::fmt::Debug for Roster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.participants.iter().map(|p| p.id().as_str()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::participant::{ParticipantError, Reply};
    use async_trait::async_trait;
    use roundtable_domain::Message;

    struct Silent(ParticipantProfile);

    #[async_trait]
    impl Participant for Silent {
        fn profile(&self) -> &ParticipantProfile {
            &self.0
        }

        async fn respond(&self, _transcript: &[Message]) -> Result<Reply, ParticipantError> {
            Ok(Reply::message(""))
        }
    }

    fn silent(name: &str) -> Arc<dyn Participant> {
        Arc::new(Silent(ParticipantProfile::new(name, "")))
    }

    #[test]
    fn test_roster_keeps_order() {
        let roster = Roster::new(vec![silent("b"), silent("a"), silent("c")]).unwrap();
        let names: Vec<_> = roster.ids().iter().map(|id| id.to_string()).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
        assert!(roster.contains(&ParticipantId::new("a")));
        assert!(roster.get(&ParticipantId::new("z")).is_none());
    }

    #[test]
    fn test_empty_roster_rejected() {
        assert_eq!(Roster::new(vec![]).unwrap_err(), DomainError::EmptyRoster);
    }

    #[test]
    fn test_duplicate_rejected() {
        let err = Roster::new(vec![silent("a"), silent("a")]).unwrap_err();
        assert_eq!(err, DomainError::DuplicateParticipant(ParticipantId::new("a")));
    }

    #[test]
    fn test_blank_name_rejected() {
        let err = Roster::new(vec![silent(" ")]).unwrap_err();
        assert!(matches!(err, DomainError::InvalidParticipantName(_)));
    }
}
