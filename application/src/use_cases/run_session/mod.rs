//! Run Session use case
//!
//! Drives one multi-participant conversation, one turn at a time:
//!
//! | Step                  | What happens                                          |
//! |-----------------------|-------------------------------------------------------|
//! | 1. Introductions      | each profile posted as a system message (optional)    |
//! | 2. Seed               | initial speaker + content committed as round 0        |
//! | 3. Selection          | `eligible_next(current)` then strategy, validated     |
//! | 4. Turn               | participant replies, or the session waits for a human |
//! | 5. Commit             | append, mirror to handles, notify observers           |
//! | 6. Termination check  | max rounds, cancellation                              |
//!
//! Steps 3-6 repeat until a [`TerminationReason`] is reached.

mod handle;
mod hil;
mod input_broker;
mod roster;
mod selection;
mod turn_loop;
mod types;

pub use handle::SessionHandle;
pub use input_broker::{BrokerError, InputBroker, InputHandle, PendingInput};
pub use roster::Roster;
pub use selection::{
    CoordinatorSelector, RandomSelector, RoundRobinSelector, SelectionContext, SelectionError,
    SpeakerSelector,
};
pub use types::{RunSessionError, RunSessionInput, SessionOutcome};

use crate::config::SessionConfig;
use crate::ports::session_progress::{NoSessionProgress, SessionProgressNotifier};
use crate::ports::transcript_observer::{ObserverSet, TranscriptObserver};
use handle::SessionShared;
use roundtable_domain::{DomainError, TerminationReason, TransitionPolicy};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{error, info};

/// Use case for running a turn-based conversation
#[derive(Clone)]
pub struct RunSessionUseCase {
    pub(super) roster: Roster,
    pub(super) policy: Arc<TransitionPolicy>,
    pub(super) selector: Arc<dyn SpeakerSelector>,
    pub(super) config: SessionConfig,
    pub(super) observers: ObserverSet,
    pub(super) progress: Arc<dyn SessionProgressNotifier>,
}

impl RunSessionUseCase {
    /// The roster and the policy must name exactly the same participants.
    pub fn new(
        roster: Roster,
        policy: Arc<TransitionPolicy>,
        selector: Arc<dyn SpeakerSelector>,
    ) -> Result<Self, RunSessionError> {
        let in_roster: BTreeSet<_> = roster.ids().into_iter().collect();
        let in_policy: BTreeSet<_> = policy.roster().iter().cloned().collect();
        if let Some(missing) = in_policy.symmetric_difference(&in_roster).next() {
            return Err(DomainError::UnknownParticipant(missing.clone()).into());
        }

        Ok(Self {
            roster,
            policy,
            selector,
            config: SessionConfig::default(),
            observers: ObserverSet::new(),
            progress: Arc::new(NoSessionProgress),
        })
    }

    pub fn with_config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    /// Observers are notified in the order they are added.
    pub fn with_observer(mut self, observer: Arc<dyn TranscriptObserver>) -> Self {
        self.observers.register(observer);
        self
    }

    pub fn with_progress(mut self, progress: Arc<dyn SessionProgressNotifier>) -> Self {
        self.progress = progress;
        self
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn policy(&self) -> &TransitionPolicy {
        &self.policy
    }

    /// Start the session on the current tokio runtime and return its handle.
    pub fn start(&self, input: RunSessionInput) -> Result<SessionHandle, RunSessionError> {
        self.validate(&input)?;

        let shared = SessionShared::new(input.initial_speaker.clone());
        let handle = SessionHandle::new(shared.clone());
        let use_case = self.clone();
        let loop_shared = shared.clone();
        let task = tokio::spawn(async move {
            use_case.drive(input, loop_shared).await;
        });

        // Publish a terminal status if the loop panics.
        tokio::spawn(async move {
            if let Err(e) = task.await {
                error!("Session loop stopped unexpectedly: {}", e);
                shared.abort(e.to_string());
            }
        });

        Ok(handle)
    }

    /// Run the session to completion on the current task.
    ///
    /// Nothing can submit input or cancel; use [`start`](Self::start) when a
    /// participant needs external input.
    pub async fn run(&self, input: RunSessionInput) -> Result<SessionOutcome, RunSessionError> {
        self.validate(&input)?;
        let shared = SessionShared::new(input.initial_speaker.clone());
        Ok(self.drive(input, shared).await)
    }

    fn validate(&self, input: &RunSessionInput) -> Result<(), RunSessionError> {
        if !self.roster.contains(&input.initial_speaker) {
            return Err(DomainError::UnknownParticipant(input.initial_speaker.clone()).into());
        }
        self.config.validate()?;
        Ok(())
    }

    fn log_termination(&self, reason: &TerminationReason, rounds: usize) {
        if reason.is_normal() {
            info!("Session finished after {} rounds: {}", rounds, reason);
        } else {
            info!("Session stopped after {} rounds: {}", rounds, reason);
        }
    }
}

impl std::fmt::Debug for RunSessionUseCase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunSessionUseCase")
            .field("roster", &self.roster)
            .field("mode", &self.policy.mode())
            .field("selection", &self.selector.method())
            .field("config", &self.config)
            .finish()
    }
}
