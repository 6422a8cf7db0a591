//! Presentation layer for roundtable
//!
//! This crate contains the CLI definition, console rendering of the
//! transcript, progress reporters, and the interactive input loop.

pub mod chat;
pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use chat::{ChatRepl, ReplError};
pub use cli::commands::{Cli, FormatArg, SelectionArg, TransitionsArg};
pub use output::console::{ConsoleFormatter, ConsoleObserver};
pub use progress::reporter::{ProgressReporter, SimpleProgress};
