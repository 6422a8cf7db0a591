//! Infrastructure layer for roundtable
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod logging;
pub mod participants;
pub mod session;

// Re-export commonly used types
pub use config::{
    ConfigError, ConfigLoader, FileConfig, FileCoordinatorConfig, FileOutputConfig,
    FileOutputFormat, FileParticipantConfig, FileSessionConfig, FileTransitionsConfig, Preset,
};
pub use logging::JsonlTranscriptObserver;
pub use participants::{HumanParticipant, MentionCoordinator, ScriptedParticipant};
pub use session::SessionBlueprint;
