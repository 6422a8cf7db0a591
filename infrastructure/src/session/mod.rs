//! Session assembly from file configuration
//!
//! Turns a validated [`FileConfig`](crate::config::FileConfig) into a ready
//! [`RunSessionUseCase`](roundtable_application::RunSessionUseCase): the
//! roster of participant adapters, the transition policy and the speaker
//! selector.

mod blueprint;

pub use blueprint::SessionBlueprint;
