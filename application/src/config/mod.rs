//! Application-level configuration.
//!
//! - [`SessionConfig`] — limits and flags for the session turn loop

mod session_config;

pub use session_config::SessionConfig;
