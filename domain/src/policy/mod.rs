//! Transition policy domain.
//!
//! - [`transition::TransitionPolicy`] — immutable "who may follow whom" rules
//! - [`transition::TransitionGraph`] — adjacency sets used by allow/deny modes
//! - [`transition::TransitionMode`] — allowed, disallowed or unrestricted

pub mod transition;
