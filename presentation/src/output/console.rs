//! Console rendering of transcript messages and session status

use crate::progress::reporter::ProgressReporter;
use colored::{Color, Colorize};
use roundtable_application::{ObserverError, PendingInput, TranscriptObserver};
use roundtable_domain::{
    Message, MessageKind, OutputFormat, Recipient, Sender, SessionStatus, TerminationReason,
};
use std::sync::Arc;

const PALETTE: [Color; 6] = [
    Color::Cyan,
    Color::Yellow,
    Color::Green,
    Color::Magenta,
    Color::Blue,
    Color::BrightRed,
];

/// Formats transcript messages for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Render `message` in the given format.
    pub fn format(message: &Message, format: OutputFormat) -> Result<String, ObserverError> {
        match format {
            OutputFormat::Chat => Ok(Self::format_chat(message)),
            OutputFormat::Plain => Ok(Self::format_plain(message)),
            OutputFormat::Json => Self::format_json(message),
        }
    }

    /// Colored chat line; the speaker's name keeps the same color all session.
    pub fn format_chat(message: &Message) -> String {
        match message.kind() {
            MessageKind::Introduction => format!("{}", message.content().dimmed()),
            MessageKind::Error => format!("{} {}", "!".red().bold(), message.content().red()),
            MessageKind::Seed | MessageKind::Turn => {
                let speaker = Self::speaker(message.sender());
                let addressed = match message.recipient() {
                    Recipient::Broadcast => String::new(),
                    Recipient::Participant(id) => format!(" {}", format!("(to {})", id).dimmed()),
                };
                format!(
                    "{}{}\n{}\n",
                    speaker,
                    addressed,
                    Self::indent(message.content(), "  ")
                )
            }
        }
    }

    /// `[seq] sender: content`, or `[seq] sender -> recipient: content` when addressed.
    pub fn format_plain(message: &Message) -> String {
        match message.recipient() {
            Recipient::Broadcast => format!(
                "[{}] {}: {}",
                message.seq(),
                message.sender(),
                message.content()
            ),
            Recipient::Participant(id) => format!(
                "[{}] {} -> {}: {}",
                message.seq(),
                message.sender(),
                id,
                message.content()
            ),
        }
    }

    pub fn format_json(message: &Message) -> Result<String, ObserverError> {
        serde_json::to_string(message).map_err(|e| ObserverError::Serialization(e.to_string()))
    }

    /// Answer to `/status`.
    pub fn format_status(status: &SessionStatus, pending: Option<&PendingInput>) -> String {
        let mut output = format!(
            "{} round {}, {} ({})",
            "Status:".cyan().bold(),
            status.round,
            status.current_speaker,
            status.state.as_str()
        );
        if let Some(request) = pending {
            output.push_str(&format!(
                "\n  waiting for {} (request #{})",
                request.participant.to_string().bold(),
                request.id
            ));
        }
        output
    }

    /// One-line summary printed when a session ends.
    pub fn format_termination(reason: &TerminationReason, rounds: usize) -> String {
        let text = format!("Session ended after {} rounds: {}", rounds, reason);
        if reason.is_normal() {
            format!("{}", text.green().bold())
        } else {
            format!("{}", text.yellow().bold())
        }
    }

    fn speaker(sender: &Sender) -> String {
        match sender {
            Sender::System => format!("{}", "System".dimmed().bold()),
            Sender::Participant(id) => {
                let index = id
                    .as_str()
                    .bytes()
                    .fold(0usize, |acc, b| acc.wrapping_mul(31).wrapping_add(b as usize));
                format!("{}", id.as_str().color(PALETTE[index % PALETTE.len()]).bold())
            }
        }
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Transcript observer that prints each committed message to stdout.
pub struct ConsoleObserver {
    format: OutputFormat,
    reporter: Option<Arc<ProgressReporter>>,
}

impl ConsoleObserver {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            reporter: None,
        }
    }

    /// Print through `reporter` so lines don't collide with its spinner.
    pub fn with_reporter(mut self, reporter: Arc<ProgressReporter>) -> Self {
        self.reporter = Some(reporter);
        self
    }
}

impl TranscriptObserver for ConsoleObserver {
    fn name(&self) -> &str {
        "console"
    }

    fn notify(&self, message: &Message) -> Result<(), ObserverError> {
        let line = ConsoleFormatter::format(message, self.format)?;
        match &self.reporter {
            Some(reporter) => reporter.suspend(|| println!("{}", line)),
            None => println!("{}", line),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roundtable_domain::{MessageDraft, ParticipantId, Transcript, TurnState};

    fn messages() -> Vec<Message> {
        let mut transcript = Transcript::new();
        transcript.append(MessageDraft::introduction("tutor: Helps with math."));
        transcript.append(MessageDraft::seed(ParticipantId::new("tutor"), "Welcome!"));
        transcript.append(
            MessageDraft::turn(ParticipantId::new("student"), 1, "What is 2+2?")
                .to(Recipient::Participant(ParticipantId::new("tutor"))),
        );
        transcript.append(MessageDraft::error(2, "teacher could not take its turn"));
        transcript.messages().to_vec()
    }

    #[test]
    fn test_format_plain() {
        let messages = messages();
        assert_eq!(
            ConsoleFormatter::format_plain(&messages[0]),
            "[0] System: tutor: Helps with math."
        );
        assert_eq!(ConsoleFormatter::format_plain(&messages[1]), "[1] tutor: Welcome!");
        assert_eq!(
            ConsoleFormatter::format_plain(&messages[2]),
            "[2] student -> tutor: What is 2+2?"
        );
    }

    #[test]
    fn test_format_chat_contains_speaker_and_content() {
        colored::control::set_override(false);
        let messages = messages();

        let turn = ConsoleFormatter::format_chat(&messages[2]);
        assert_eq!(turn, "student (to tutor)\n  What is 2+2?\n");

        let error = ConsoleFormatter::format_chat(&messages[3]);
        assert_eq!(error, "! teacher could not take its turn");
    }

    #[test]
    fn test_format_json_is_one_line() {
        let messages = messages();
        let line = ConsoleFormatter::format(&messages[1], OutputFormat::Json).unwrap();

        assert!(!line.contains('\n'));
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["seq"], 1);
        assert_eq!(value["kind"], "seed");
    }

    #[test]
    fn test_format_status_with_pending_input() {
        colored::control::set_override(false);
        let status = SessionStatus {
            round: 3,
            current_speaker: ParticipantId::new("student"),
            state: TurnState::AwaitingExternalInput(ParticipantId::new("student")),
        };
        let pending = PendingInput {
            id: 2,
            participant: ParticipantId::new("student"),
        };

        let output = ConsoleFormatter::format_status(&status, Some(&pending));
        assert!(output.contains("round 3, student (awaiting_external_input)"));
        assert!(output.contains("waiting for student (request #2)"));
    }

    #[test]
    fn test_indent() {
        assert_eq!(ConsoleFormatter::indent("a\nb", "  "), "  a\n  b");
    }
}
