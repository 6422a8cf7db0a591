//! JSONL file writer for transcript messages.
//!
//! Each committed [`Message`] is serialized as a single JSON line with a
//! `type` field and `timestamp`, appended to the file via a buffered writer.

use roundtable_application::{ObserverError, TranscriptObserver};
use roundtable_domain::Message;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::debug;

/// Transcript observer that writes one JSON object per message.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes after every line and on `Drop`.
pub struct JsonlTranscriptObserver {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlTranscriptObserver {
    /// Create an observer writing to the given path.
    ///
    /// Creates the file (and parent directories) if they don't exist, and
    /// truncates an existing file.
    pub fn create(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let file = File::create(path)?;
        debug!("Writing transcript to {}", path.display());

        Ok(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    /// Get the path to the transcript file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn record(message: &Message) -> Result<serde_json::Value, ObserverError> {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

        let mut record = serde_json::to_value(message)
            .map_err(|e| ObserverError::Serialization(e.to_string()))?;
        if let serde_json::Value::Object(map) = &mut record {
            map.insert(
                "type".to_string(),
                serde_json::Value::String("message".to_string()),
            );
            map.insert(
                "timestamp".to_string(),
                serde_json::Value::String(timestamp),
            );
        }
        Ok(record)
    }
}

impl TranscriptObserver for JsonlTranscriptObserver {
    fn name(&self) -> &str {
        "jsonl"
    }

    fn notify(&self, message: &Message) -> Result<(), ObserverError> {
        let record = Self::record(message)?;
        let line = serde_json::to_string(&record)
            .map_err(|e| ObserverError::Serialization(e.to_string()))?;

        let mut writer = self.writer.lock().unwrap_or_else(|e| e.into_inner());
        writeln!(writer, "{}", line)?;
        // JSONL is append-only; flush each line so a crash keeps what was said
        writer.flush()?;
        Ok(())
    }
}

impl Drop for JsonlTranscriptObserver {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roundtable_domain::{MessageDraft, ParticipantId, Recipient, Transcript};

    #[test]
    fn test_jsonl_observer_writes_one_line_per_message() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.transcript.jsonl");
        let observer = JsonlTranscriptObserver::create(&path).unwrap();

        let mut transcript = Transcript::new();
        let seed = transcript
            .append(MessageDraft::seed(ParticipantId::new("tutor"), "Welcome!"))
            .clone();
        let reply = transcript
            .append(
                MessageDraft::turn(ParticipantId::new("student"), 1, "What is 2+2?")
                    .to(Recipient::Participant(ParticipantId::new("tutor"))),
            )
            .clone();

        observer.notify(&seed).unwrap();
        observer.notify(&reply).unwrap();
        drop(observer);

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.trim().lines().collect();
        assert_eq!(lines.len(), 2);

        for line in &lines {
            let value: serde_json::Value = serde_json::from_str(line).unwrap();
            assert_eq!(value["type"], "message");
            assert!(value.get("timestamp").is_some());
        }

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["seq"], 0);
        assert_eq!(first["kind"], "seed");
        assert_eq!(first["content"], "Welcome!");

        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["seq"], 1);
        assert_eq!(second["round"], 1);
        assert_eq!(second["sender"]["name"], "student");
        assert_eq!(second["recipient"]["name"], "tutor");
    }

    #[test]
    fn test_jsonl_observer_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("logs").join("t.jsonl");

        let observer = JsonlTranscriptObserver::create(&path).unwrap();
        assert_eq!(observer.path(), path.as_path());
        assert!(path.exists());
    }

    #[test]
    fn test_jsonl_observer_rejects_directory_path() {
        let dir = tempfile::tempdir().unwrap();
        assert!(JsonlTranscriptObserver::create(dir.path()).is_err());
    }
}
