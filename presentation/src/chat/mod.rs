//! Interactive chat module
//!
//! Provides the stdin-driven input loop that seeds a session and answers
//! its requests for external input.

mod repl;

pub use repl::{ChatRepl, ReplError};
