//! Session-scoped broker for external (human) input.
//!
//! At most one request is outstanding at a time. The turn loop calls
//! [`InputBroker::request`] and awaits the returned [`InputHandle`]; any other
//! task fulfils it with [`InputBroker::resolve`]. Resolution travels over a
//! oneshot channel, so the waiting loop never polls.
//!
//! ```text
//! Idle ──request──▶ Pending ──resolve──▶ Resolved ──request──▶ Pending ...
//!   └───────────────────┴──────close─────────┴──────────▶ Closed
//! ```

use roundtable_domain::ParticipantId;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;
use tokio::sync::oneshot;
use tracing::{debug, warn};

/// Errors reported to callers of the broker.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BrokerError {
    #[error("An input request for {participant} is already outstanding")]
    RequestAlreadyOutstanding { participant: ParticipantId },

    #[error("No input is being awaited")]
    NoOutstandingRequest,

    #[error("The pending input request has already been resolved")]
    AlreadyResolved,

    #[error("Input request #{requested} is no longer pending (current: {current})")]
    StaleRequest { requested: u64, current: u64 },

    #[error("The waiting side released the request")]
    Released,

    #[error("The session has ended")]
    Closed,
}

/// Who the session is waiting on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingInput {
    /// Increments with every request made on this broker
    pub id: u64,
    pub participant: ParticipantId,
}

enum Slot {
    Idle,
    Pending {
        request: PendingInput,
        tx: oneshot::Sender<String>,
    },
    Resolved(PendingInput),
    Closed,
}

/// Single-slot input broker, one per running session.
pub struct InputBroker {
    slot: Mutex<Slot>,
    next_id: AtomicU64,
}

impl InputBroker {
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(Slot::Idle),
            next_id: AtomicU64::new(1),
        }
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Open a request for `participant`.
    ///
    /// A request whose handle has been dropped no longer counts as outstanding.
    pub fn request(&self, participant: ParticipantId) -> Result<InputHandle, BrokerError> {
        let mut slot = self.slot();
        match &*slot {
            Slot::Closed => return Err(BrokerError::Closed),
            Slot::Pending { request, tx } if !tx.is_closed() => {
                warn!(
                    "Rejected input request for {}: {} is still waiting",
                    participant, request.participant
                );
                return Err(BrokerError::RequestAlreadyOutstanding {
                    participant: request.participant.clone(),
                });
            }
            _ => {}
        }

        let request = PendingInput {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            participant,
        };
        let (tx, rx) = oneshot::channel();
        *slot = Slot::Pending {
            request: request.clone(),
            tx,
        };
        debug!("Input request #{} opened for {}", request.id, request.participant);

        Ok(InputHandle { request, rx })
    }

    /// Fulfil the outstanding request.
    pub fn resolve(&self, content: impl Into<String>) -> Result<PendingInput, BrokerError> {
        let mut slot = self.slot();
        Self::resolve_locked(&mut slot, content.into())
    }

    /// Fulfil a specific request, failing if a different one is pending.
    pub fn resolve_for(&self, id: u64, content: impl Into<String>) -> Result<PendingInput, BrokerError> {
        let mut slot = self.slot();
        let current = match &*slot {
            Slot::Pending { request, .. } | Slot::Resolved(request) => Some(request.id),
            Slot::Idle | Slot::Closed => None,
        };
        if let Some(current) = current
            && current != id
        {
            return Err(BrokerError::StaleRequest {
                requested: id,
                current,
            });
        }
        Self::resolve_locked(&mut slot, content.into())
    }

    fn resolve_locked(slot: &mut Slot, content: String) -> Result<PendingInput, BrokerError> {
        match std::mem::replace(slot, Slot::Idle) {
            Slot::Idle => Err(BrokerError::NoOutstandingRequest),
            Slot::Resolved(request) => {
                *slot = Slot::Resolved(request);
                Err(BrokerError::AlreadyResolved)
            }
            Slot::Closed => {
                *slot = Slot::Closed;
                Err(BrokerError::Closed)
            }
            Slot::Pending { request, tx } => match tx.send(content) {
                Ok(()) => {
                    debug!("Input request #{} resolved", request.id);
                    *slot = Slot::Resolved(request.clone());
                    Ok(request)
                }
                Err(_) => Err(BrokerError::Released),
            },
        }
    }

    /// The request currently awaiting resolution, if any.
    pub fn pending(&self) -> Option<PendingInput> {
        match &*self.slot() {
            Slot::Pending { request, tx } if !tx.is_closed() => Some(request.clone()),
            _ => None,
        }
    }

    /// Refuse all further requests and resolutions. Any waiting handle is released.
    pub fn close(&self) {
        let mut slot = self.slot();
        if let Slot::Pending { request, .. } = &*slot {
            debug!("Input request #{} released on close", request.id);
        }
        *slot = Slot::Closed;
    }

    pub fn is_closed(&self) -> bool {
        matches!(&*self.slot(), Slot::Closed)
    }
}

impl Default for InputBroker {
    fn default() -> Self {
        Self::new()
    }
}

/// The waiting side of one input request.
#[derive(Debug)]
pub struct InputHandle {
    request: PendingInput,
    rx: oneshot::Receiver<String>,
}

impl InputHandle {
    pub fn request(&self) -> &PendingInput {
        &self.request
    }

    /// Suspend until the request is resolved. Never times out by itself.
    pub async fn wait(&mut self) -> Result<String, BrokerError> {
        (&mut self.rx).await.map_err(|_| BrokerError::Released)
    }

    /// Content already delivered to this request, without waiting.
    pub fn try_take(&mut self) -> Option<String> {
        self.rx.try_recv().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(name: &str) -> ParticipantId {
        ParticipantId::new(name)
    }

    #[tokio::test]
    async fn test_request_then_resolve() {
        let broker = InputBroker::new();
        let mut handle = broker.request(id("student")).unwrap();
        assert_eq!(broker.pending().unwrap().participant, id("student"));

        let resolved = broker.resolve("42").unwrap();
        assert_eq!(resolved.participant, id("student"));
        assert_eq!(handle.wait().await.unwrap(), "42");
        assert!(broker.pending().is_none());
    }

    #[test]
    fn test_second_request_rejected() {
        let broker = InputBroker::new();
        let _handle = broker.request(id("a")).unwrap();

        let err = broker.request(id("b")).unwrap_err();
        assert_eq!(
            err,
            BrokerError::RequestAlreadyOutstanding { participant: id("a") }
        );
        // The original request is untouched
        assert_eq!(broker.pending().unwrap().participant, id("a"));
    }

    #[test]
    fn test_resolve_without_request() {
        let broker = InputBroker::new();
        assert_eq!(broker.resolve("x").unwrap_err(), BrokerError::NoOutstandingRequest);
    }

    #[test]
    fn test_resolve_twice() {
        let broker = InputBroker::new();
        let _handle = broker.request(id("a")).unwrap();
        broker.resolve("first").unwrap();
        assert_eq!(broker.resolve("second").unwrap_err(), BrokerError::AlreadyResolved);
    }

    #[test]
    fn test_new_request_after_resolution() {
        let broker = InputBroker::new();
        let first = broker.request(id("a")).unwrap();
        broker.resolve("done").unwrap();
        drop(first);

        let second = broker.request(id("b")).unwrap();
        assert!(second.request().id > 1);
    }

    #[test]
    fn test_dropped_handle_frees_slot() {
        let broker = InputBroker::new();
        drop(broker.request(id("a")).unwrap());

        assert!(broker.pending().is_none());
        assert!(broker.request(id("b")).is_ok());
    }

    #[tokio::test]
    async fn test_close_releases_waiter_and_rejects_late_resolve() {
        let broker = InputBroker::new();
        let mut handle = broker.request(id("a")).unwrap();
        broker.close();

        assert_eq!(handle.wait().await.unwrap_err(), BrokerError::Released);
        assert_eq!(broker.resolve("late").unwrap_err(), BrokerError::Closed);
        assert_eq!(broker.request(id("a")).unwrap_err(), BrokerError::Closed);
        assert!(broker.is_closed());
    }

    #[test]
    fn test_resolve_for_stale_id() {
        let broker = InputBroker::new();
        let handle = broker.request(id("a")).unwrap();
        let current = handle.request().id;

        let err = broker.resolve_for(current + 10, "x").unwrap_err();
        assert_eq!(
            err,
            BrokerError::StaleRequest {
                requested: current + 10,
                current
            }
        );
        assert!(broker.resolve_for(current, "x").is_ok());
    }

    #[tokio::test]
    async fn test_resolve_from_another_task() {
        let broker = std::sync::Arc::new(InputBroker::new());
        let mut handle = broker.request(id("q")).unwrap();

        let resolver = broker.clone();
        tokio::spawn(async move {
            tokio::task::yield_now().await;
            resolver.resolve("from elsewhere").unwrap();
        });

        assert_eq!(handle.wait().await.unwrap(), "from elsewhere");
    }

    #[test]
    fn test_resolved_content_survives_close() {
        let broker = InputBroker::new();
        let mut handle = broker.request(id("q")).unwrap();
        broker.resolve("42").unwrap();
        broker.close();

        assert_eq!(handle.try_take().as_deref(), Some("42"));
    }

    #[test]
    fn test_try_take_before_resolution() {
        let broker = InputBroker::new();
        let mut handle = broker.request(id("q")).unwrap();
        assert!(handle.try_take().is_none());

        broker.close();
        assert!(handle.try_take().is_none());
    }

    #[test]
    fn test_resolve_for_previous_request_never_reaches_next() {
        let broker = InputBroker::new();
        let first = broker.request(id("a")).unwrap();
        let first_id = first.request().id;
        broker.resolve("for a").unwrap();
        drop(first);

        let mut second = broker.request(id("b")).unwrap();
        let err = broker.resolve_for(first_id, "late for a").unwrap_err();
        assert_eq!(
            err,
            BrokerError::StaleRequest {
                requested: first_id,
                current: second.request().id
            }
        );
        assert!(second.try_take().is_none());
        assert_eq!(broker.pending().unwrap().participant, id("b"));
    }

    #[test]
    fn test_concurrent_resolve_for_same_request_applies_once() {
        let broker = std::sync::Arc::new(InputBroker::new());
        let mut handle = broker.request(id("q")).unwrap();
        let request_id = handle.request().id;

        let threads: Vec<_> = (0..8)
            .map(|n| {
                let broker = broker.clone();
                std::thread::spawn(move || broker.resolve_for(request_id, format!("answer {}", n)))
            })
            .collect();
        let accepted = threads
            .into_iter()
            .map(|t| t.join().unwrap())
            .filter(Result::is_ok)
            .count();

        assert_eq!(accepted, 1);
        assert!(handle.try_take().is_some());
    }
}
