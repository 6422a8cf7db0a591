//! Control surface for a running session.

use super::input_broker::{BrokerError, InputBroker, PendingInput};
use roundtable_domain::{Message, ParticipantId, SessionStatus, TerminationReason, TurnState};
use std::sync::{Arc, RwLock};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

/// State shared between the turn loop and its handles.
///
/// The turn loop is the only writer of the status and the transcript mirror.
pub(super) struct SessionShared {
    status: watch::Sender<SessionStatus>,
    transcript: RwLock<Vec<Message>>,
    pub(super) broker: InputBroker,
    pub(super) cancel: CancellationToken,
}

impl SessionShared {
    pub(super) fn new(initial_speaker: ParticipantId) -> Arc<Self> {
        let (status, _) = watch::channel(SessionStatus::starting(initial_speaker));
        Arc::new(Self {
            status,
            transcript: RwLock::new(Vec::new()),
            broker: InputBroker::new(),
            cancel: CancellationToken::new(),
        })
    }

    pub(super) fn publish(&self, status: SessionStatus) {
        self.status.send_replace(status);
    }

    /// End the session from outside the turn loop, e.g. after the loop panicked.
    ///
    /// Does nothing if the loop already published a terminal status.
    pub(super) fn abort(&self, detail: String) {
        self.broker.close();
        self.status.send_if_modified(|status| {
            if status.terminated() {
                return false;
            }
            status.state = TurnState::Terminated(TerminationReason::Aborted { detail });
            true
        });
    }

    pub(super) fn mirror(&self, message: &Message) {
        self.transcript
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .push(message.clone());
    }
}

/// Handle to a session started with
/// [`RunSessionUseCase::start`](super::RunSessionUseCase::start).
///
/// Cheap to clone; every clone controls the same session.
#[derive(Clone)]
pub struct SessionHandle {
    shared: Arc<SessionShared>,
}

impl SessionHandle {
    pub(super) fn new(shared: Arc<SessionShared>) -> Self {
        Self { shared }
    }

    /// Current round, speaker and state.
    pub fn status(&self) -> SessionStatus {
        self.shared.status.borrow().clone()
    }

    /// Snapshot of every message committed so far.
    pub fn transcript(&self) -> Vec<Message> {
        self.shared
            .transcript
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// The participant the session is waiting on, if any.
    pub fn pending_input(&self) -> Option<PendingInput> {
        self.shared.broker.pending()
    }

    /// Resolve the outstanding input request with `content`.
    pub fn submit_input(&self, content: impl Into<String>) -> Result<PendingInput, BrokerError> {
        self.shared.broker.resolve(content)
    }

    /// Resolve a specific input request; fails if it is no longer the pending one.
    pub fn submit_input_for(
        &self,
        request_id: u64,
        content: impl Into<String>,
    ) -> Result<PendingInput, BrokerError> {
        self.shared.broker.resolve_for(request_id, content)
    }

    /// Ask the session to stop.
    ///
    /// Takes effect between turns, or immediately while waiting for input.
    /// Input the broker already accepted is still committed first.
    pub fn cancel(&self) {
        self.shared.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.shared.cancel.is_cancelled()
    }

    /// Receive every status change.
    pub fn subscribe(&self) -> watch::Receiver<SessionStatus> {
        self.shared.status.subscribe()
    }

    /// Wait until the session reaches a terminal state and return that status.
    pub async fn wait(&self) -> SessionStatus {
        let mut rx = self.shared.status.subscribe();
        match rx.wait_for(|status| status.terminated()).await {
            Ok(status) => status.clone(),
            Err(_) => self.status(),
        }
    }
}

impl std::fmt::Debug for SessionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionHandle")
            .field("status", &self.status())
            .finish()
    }
}
