//! Port for transcript observers.
//!
//! An observer is notified once per committed transcript message, after the
//! append, in registration order. The presentation layer renders chat lines
//! from it; the infrastructure layer persists JSONL from it.
//!
//! Observer failures never reach the turn loop: [`ObserverSet::notify_all`]
//! logs them (panics included) and moves on to the next observer.

use roundtable_domain::Message;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use thiserror::Error;
use tracing::warn;

/// Error type for observer failures.
#[derive(Error, Debug)]
pub enum ObserverError {
    #[error("Render failed: {0}")]
    Render(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization failed: {0}")]
    Serialization(String),
}

/// Receives every committed transcript message.
pub trait TranscriptObserver: Send + Sync {
    /// Short name used in log lines.
    fn name(&self) -> &str {
        "observer"
    }

    fn notify(&self, message: &Message) -> Result<(), ObserverError>;
}

/// Registration-ordered observer list with failure isolation.
#[derive(Clone, Default)]
pub struct ObserverSet {
    observers: Vec<Arc<dyn TranscriptObserver>>,
}

impl ObserverSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, observer: Arc<dyn TranscriptObserver>) {
        self.observers.push(observer);
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Notify every observer in order. Returns the number that failed.
    pub fn notify_all(&self, message: &Message) -> usize {
        let mut failures = 0;
        for observer in &self.observers {
            match catch_unwind(AssertUnwindSafe(|| observer.notify(message))) {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    failures += 1;
                    warn!(
                        "Observer {} failed on message #{}: {}",
                        observer.name(),
                        message.seq(),
                        e
                    );
                }
                Err(_) => {
                    failures += 1;
                    warn!(
                        "Observer {} panicked on message #{}",
                        observer.name(),
                        message.seq()
                    );
                }
            }
        }
        failures
    }
}

/// No-op observer for tests and headless runs.
pub struct NoTranscriptObserver;

impl TranscriptObserver for NoTranscriptObserver {
    fn notify(&self, _message: &Message) -> Result<(), ObserverError> {
        Ok(())
    }
}
