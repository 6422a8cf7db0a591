//! Speaker transition policy.
//!
//! A [`TransitionPolicy`] is a static, directed constraint graph over the
//! roster answering "may `to` speak immediately after `from`?".
//!
//! | Mode | Mapped `from` | Unmapped `from` |
//! |------|---------------|-----------------|
//! | `Allowed` | `to` ∈ set | nobody may follow |
//! | `Disallowed` | `to` ∉ set | anybody may follow |
//! | `Unrestricted` | — | anybody may follow |
//!
//! Self-transitions are decided by `allow_repeat_speaker` before the mode's
//! rule is consulted: when it is `false` (the default) a participant never
//! follows itself; when `true` the mode's rule applies to the self edge too.
//! [`TransitionPolicy::eligible_next`] is built from
//! [`TransitionPolicy::is_allowed`], so the two always agree.

use crate::core::error::DomainError;
use crate::participant::value_objects::ParticipantId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Which reading of the transition graph is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionMode {
    /// The graph lists who MAY follow each participant.
    Allowed,
    /// The graph lists who may NOT follow each participant.
    Disallowed,
    /// No graph; anyone may follow anyone.
    #[default]
    Unrestricted,
}

impl TransitionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionMode::Allowed => "allowed",
            TransitionMode::Disallowed => "disallowed",
            TransitionMode::Unrestricted => "unrestricted",
        }
    }
}

impl std::fmt::Display for TransitionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for TransitionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "allowed" | "allow" => Ok(TransitionMode::Allowed),
            "disallowed" | "deny" | "denied" => Ok(TransitionMode::Disallowed),
            "unrestricted" | "none" | "all" => Ok(TransitionMode::Unrestricted),
            _ => Err(format!(
                "Unknown transition mode: {}. Valid: allowed, disallowed, unrestricted",
                s
            )),
        }
    }
}

/// Adjacency sets keyed by the participant that just spoke.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransitionGraph(BTreeMap<ParticipantId, BTreeSet<ParticipantId>>);

impl TransitionGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add edges `from → to` for every `to` (merged with existing edges).
    pub fn with_edges<I, T>(mut self, from: impl Into<ParticipantId>, to: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ParticipantId>,
    {
        self.insert(from, to);
        self
    }

    pub fn insert<I, T>(&mut self, from: impl Into<ParticipantId>, to: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<ParticipantId>,
    {
        self.0
            .entry(from.into())
            .or_default()
            .extend(to.into_iter().map(Into::into));
    }

    pub fn targets(&self, from: &ParticipantId) -> Option<&BTreeSet<ParticipantId>> {
        self.0.get(from)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ParticipantId, &BTreeSet<ParticipantId>)> {
        self.0.iter()
    }
}

/// Immutable transition policy over a fixed roster.
///
/// Safe to share read-only across any number of sessions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionPolicy {
    mode: TransitionMode,
    graph: TransitionGraph,
    roster: Vec<ParticipantId>,
    allow_repeat_speaker: bool,
}

impl TransitionPolicy {
    /// Build and validate a policy.
    ///
    /// Fails when the roster is empty, contains duplicates or blank names,
    /// when the graph mentions a participant outside the roster, or when a
    /// graph is supplied in `Unrestricted` mode.
    pub fn new(
        roster: Vec<ParticipantId>,
        mode: TransitionMode,
        graph: TransitionGraph,
    ) -> Result<Self, DomainError> {
        validate_roster(&roster)?;

        if mode == TransitionMode::Unrestricted && !graph.is_empty() {
            return Err(DomainError::InvalidConfiguration(
                "a transition graph was given but the transition mode is 'unrestricted'"
                    .to_string(),
            ));
        }

        let known: HashSet<&ParticipantId> = roster.iter().collect();
        for (from, targets) in graph.iter() {
            if !known.contains(from) {
                return Err(DomainError::UnknownParticipant(from.clone()));
            }
            if let Some(unknown) = targets.iter().find(|t| !known.contains(t)) {
                return Err(DomainError::UnknownTransitionTarget {
                    source_id: from.clone(),
                    participant: unknown.clone(),
                });
            }
        }

        Ok(Self {
            mode,
            graph,
            roster,
            allow_repeat_speaker: false,
        })
    }

    pub fn unrestricted(roster: Vec<ParticipantId>) -> Result<Self, DomainError> {
        Self::new(roster, TransitionMode::Unrestricted, TransitionGraph::new())
    }

    pub fn allowed(
        roster: Vec<ParticipantId>,
        graph: TransitionGraph,
    ) -> Result<Self, DomainError> {
        Self::new(roster, TransitionMode::Allowed, graph)
    }

    pub fn disallowed(
        roster: Vec<ParticipantId>,
        graph: TransitionGraph,
    ) -> Result<Self, DomainError> {
        Self::new(roster, TransitionMode::Disallowed, graph)
    }

    pub fn with_allow_repeat_speaker(mut self, allow: bool) -> Self {
        self.allow_repeat_speaker = allow;
        self
    }

    pub fn mode(&self) -> TransitionMode {
        self.mode
    }

    pub fn roster(&self) -> &[ParticipantId] {
        &self.roster
    }

    pub fn graph(&self) -> &TransitionGraph {
        &self.graph
    }

    pub fn allow_repeat_speaker(&self) -> bool {
        self.allow_repeat_speaker
    }

    pub fn contains(&self, id: &ParticipantId) -> bool {
        self.roster.contains(id)
    }

    /// May `to` speak immediately after `from`?
    ///
    /// Participants outside the roster are never allowed to speak.
    pub fn is_allowed(&self, from: &ParticipantId, to: &ParticipantId) -> bool {
        if !self.contains(to) {
            return false;
        }
        if from == to && !self.allow_repeat_speaker {
            return false;
        }

        match self.mode {
            TransitionMode::Unrestricted => true,
            TransitionMode::Allowed => self
                .graph
                .targets(from)
                .is_some_and(|allowed| allowed.contains(to)),
            TransitionMode::Disallowed => self
                .graph
                .targets(from)
                .is_none_or(|denied| !denied.contains(to)),
        }
    }

    /// Every roster member allowed to follow `from`, in roster order.
    pub fn eligible_next(&self, from: &ParticipantId) -> Vec<ParticipantId> {
        self.roster
            .iter()
            .filter(|to| self.is_allowed(from, to))
            .cloned()
            .collect()
    }

    /// Roster members nobody may follow.
    ///
    /// A dead end is a configuration bug: a session reaching one terminates
    /// with `NoEligibleSpeaker`.
    pub fn dead_ends(&self) -> Vec<ParticipantId> {
        self.roster
            .iter()
            .filter(|from| self.eligible_next(from).is_empty())
            .cloned()
            .collect()
    }
}

fn validate_roster(roster: &[ParticipantId]) -> Result<(), DomainError> {
    if roster.is_empty() {
        return Err(DomainError::EmptyRoster);
    }

    let mut seen = HashSet::new();
    for id in roster {
        if !id.is_valid() {
            return Err(DomainError::InvalidParticipantName(id.as_str().to_string()));
        }
        if !seen.insert(id) {
            return Err(DomainError::DuplicateParticipant(id.clone()));
        }
    }
    Ok(())
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    const NAMES: [&str; 5] = ["a", "b", "c", "d", "e"];

    fn arb_mode() -> impl Strategy<Value = TransitionMode> {
        prop_oneof![
            Just(TransitionMode::Allowed),
            Just(TransitionMode::Disallowed),
            Just(TransitionMode::Unrestricted),
        ]
    }

    fn arb_graph() -> impl Strategy<Value = TransitionGraph> {
        proptest::collection::vec((0..NAMES.len(), proptest::collection::vec(0..NAMES.len(), 0..4)), 0..6)
            .prop_map(|edges| {
                let mut graph = TransitionGraph::new();
                for (from, targets) in edges {
                    graph.insert(NAMES[from], targets.into_iter().map(|t| NAMES[t]));
                }
                graph
            })
    }

    fn roster() -> Vec<ParticipantId> {
        NAMES.iter().map(|n| ParticipantId::new(*n)).collect()
    }

    proptest! {
        // to ∈ eligible_next(from) ⟺ is_allowed(from, to), for every pair and mode.
        #[test]
        fn prop_is_allowed_matches_eligible_next(
            mode in arb_mode(),
            graph in arb_graph(),
            repeat in any::<bool>(),
        ) {
            let graph = if mode == TransitionMode::Unrestricted { TransitionGraph::new() } else { graph };
            let policy = TransitionPolicy::new(roster(), mode, graph)
                .unwrap()
                .with_allow_repeat_speaker(repeat);

            for from in roster() {
                let eligible = policy.eligible_next(&from);
                for to in roster() {
                    prop_assert_eq!(eligible.contains(&to), policy.is_allowed(&from, &to));
                }
            }
        }

        // Without the repeat flag nobody is ever eligible to follow themselves.
        #[test]
        fn prop_no_self_transition_by_default(mode in arb_mode(), graph in arb_graph()) {
            let graph = if mode == TransitionMode::Unrestricted { TransitionGraph::new() } else { graph };
            let policy = TransitionPolicy::new(roster(), mode, graph).unwrap();

            for from in roster() {
                prop_assert!(!policy.eligible_next(&from).contains(&from));
            }
        }
    }
}
