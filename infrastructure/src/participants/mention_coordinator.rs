use async_trait::async_trait;
use roundtable_application::{Coordinator, ParticipantError, SelectionRequest};
use roundtable_domain::{ParticipantId, Proposal, first_mention, parse_proposal};
use tracing::debug;

/// A coordinator that hands the floor to whoever the last message addressed.
///
/// The last transcript message is matched against the candidates that have
/// not been rejected yet. When it names nobody, or several names tie, the
/// earliest-mentioned or else the first remaining candidate is proposed.
pub struct MentionCoordinator {
    id: ParticipantId,
}

impl MentionCoordinator {
    pub fn new(id: impl Into<ParticipantId>) -> Self {
        Self { id: id.into() }
    }
}

impl Default for MentionCoordinator {
    fn default() -> Self {
        Self::new("coordinator")
    }
}

#[async_trait]
impl Coordinator for MentionCoordinator {
    fn id(&self) -> &ParticipantId {
        &self.id
    }

    async fn propose_next(&self, request: &SelectionRequest<'_>) -> Result<String, ParticipantError> {
        let open: Vec<ParticipantId> = request
            .candidates
            .iter()
            .map(|p| p.id.clone())
            .filter(|id| !request.rejected.iter().any(|r| r == id.as_str()))
            .collect();

        let Some(fallback) = open.first().or_else(|| request.candidates.first().map(|p| &p.id))
        else {
            return Err(ParticipantError::InvalidReply(
                "no candidates to choose from".to_string(),
            ));
        };

        let last = request
            .transcript
            .last()
            .map(|m| m.content().to_lowercase())
            .unwrap_or_default();

        let choice = match parse_proposal(&last, &open) {
            Proposal::Named(id) => id,
            Proposal::Ambiguous(tied) => tied
                .into_iter()
                .filter_map(|id| first_mention(&last, &id).map(|pos| (pos, id)))
                .min_by_key(|(pos, _)| *pos)
                .map(|(_, id)| id)
                .unwrap_or_else(|| fallback.clone()),
            Proposal::Unrecognized => fallback.clone(),
        };

        debug!(
            "{} proposes {} after {} (attempt {})",
            self.id, choice, request.current, request.attempt
        );
        Ok(choice.to_string())
    }
}
