//! Application layer for roundtable
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::SessionConfig;
pub use ports::{
    coordinator::{Coordinator, SelectionRequest},
    participant::{Participant, ParticipantError, Reply},
    session_progress::{NoSessionProgress, SessionProgressNotifier},
    transcript_observer::{NoTranscriptObserver, ObserverError, ObserverSet, TranscriptObserver},
};
pub use use_cases::run_session::{
    BrokerError, CoordinatorSelector, InputBroker, InputHandle, PendingInput, RandomSelector,
    Roster, RoundRobinSelector, RunSessionError, RunSessionInput, RunSessionUseCase,
    SelectionContext, SelectionError, SessionHandle, SessionOutcome, SpeakerSelector,
};
