//! Output format value object

use serde::{Deserialize, Serialize};

/// How committed transcript messages are rendered on the console
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Colored chat lines with speaker names (default)
    #[default]
    Chat,
    /// Uncolored `[seq] sender: content` lines
    Plain,
    /// One JSON object per message
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_chat() {
        assert_eq!(OutputFormat::default(), OutputFormat::Chat);
    }

    #[test]
    fn test_serialize_lowercase() {
        let json = serde_json::to_string(&OutputFormat::Plain).unwrap();
        assert_eq!(json, "\"plain\"");
    }

    #[test]
    fn test_deserialize_lowercase() {
        let format: OutputFormat = serde_json::from_str("\"json\"").unwrap();
        assert_eq!(format, OutputFormat::Json);
    }
}
