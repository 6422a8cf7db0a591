//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure and presentation adapters
//! must implement.

pub mod coordinator;
pub mod participant;
pub mod session_progress;
pub mod transcript_observer;
