//! Logging infrastructure: transcript persistence.
//!
//! Provides [`JsonlTranscriptObserver`], a JSONL file writer that implements
//! the [`TranscriptObserver`](roundtable_application::TranscriptObserver) port.

mod jsonl_transcript;

pub use jsonl_transcript::JsonlTranscriptObserver;
