//! Interactive input loop for a running session
//!
//! The first line typed seeds the conversation. While the session runs, each
//! further line answers whichever participant is waiting for input.

use crate::output::console::ConsoleFormatter;
use colored::Colorize;
use roundtable_application::{
    BrokerError, RunSessionError, RunSessionInput, RunSessionUseCase, SessionHandle,
};
use roundtable_domain::{ParticipantId, SessionStatus};
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::debug;

/// Errors that end the input loop early.
#[derive(Error, Debug)]
pub enum ReplError {
    #[error(transparent)]
    Session(#[from] RunSessionError),

    #[error("Failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

/// What a line of input asks for.
#[derive(Debug, PartialEq, Eq)]
enum Command<'a> {
    Status,
    Cancel,
    Quit,
    Help,
    Unknown(&'a str),
    Text(&'a str),
}

fn parse(line: &str) -> Command<'_> {
    match line {
        "/status" => Command::Status,
        "/cancel" => Command::Cancel,
        "/quit" | "/exit" | "/q" => Command::Quit,
        "/help" | "/h" | "/?" => Command::Help,
        other if other.starts_with('/') => Command::Unknown(other),
        text => Command::Text(text),
    }
}

/// Whether the loop keeps reading after a line.
enum Flow {
    Continue,
    Quit,
}

/// Interactive chat REPL
pub struct ChatRepl {
    use_case: RunSessionUseCase,
    initial_speaker: ParticipantId,
    welcome: Option<String>,
}

impl ChatRepl {
    pub fn new(use_case: RunSessionUseCase, initial_speaker: ParticipantId) -> Self {
        Self {
            use_case,
            initial_speaker,
            welcome: None,
        }
    }

    /// Text printed before asking for the first message
    pub fn with_welcome(mut self, welcome: Option<String>) -> Self {
        self.welcome = welcome;
        self
    }

    /// Run the REPL on stdin.
    ///
    /// `seed` starts the session right away instead of reading the first line.
    /// Returns the final status, or `None` when no session was started.
    pub async fn run(&self, seed: Option<String>) -> Result<Option<SessionStatus>, ReplError> {
        let lines = BufReader::new(tokio::io::stdin()).lines();
        self.run_with(lines, seed).await
    }

    /// Run the REPL over any line source.
    pub async fn run_with<R>(
        &self,
        mut lines: tokio::io::Lines<R>,
        seed: Option<String>,
    ) -> Result<Option<SessionStatus>, ReplError>
    where
        R: AsyncBufRead + Unpin,
    {
        self.print_welcome();

        let seed = match seed {
            Some(seed) => seed,
            None => match self.read_seed(&mut lines).await? {
                Some(seed) => seed,
                None => return Ok(None),
            },
        };

        let handle = self
            .use_case
            .start(RunSessionInput::new(self.initial_speaker.clone(), seed))?;
        let status = self.drive(&handle, &mut lines).await?;

        if let Some(reason) = status.reason() {
            println!();
            println!("{}", ConsoleFormatter::format_termination(reason, status.round));
        }
        Ok(Some(status))
    }

    async fn read_seed<R>(&self, lines: &mut tokio::io::Lines<R>) -> Result<Option<String>, ReplError>
    where
        R: AsyncBufRead + Unpin,
    {
        while let Some(line) = lines.next_line().await? {
            match parse(line.trim()) {
                Command::Text("") => continue,
                Command::Text(text) => return Ok(Some(text.to_string())),
                Command::Quit | Command::Cancel => return Ok(None),
                Command::Help => self.print_help(),
                Command::Status => println!("No session is running yet."),
                Command::Unknown(cmd) => self.print_unknown(cmd),
            }
        }
        Ok(None)
    }

    /// Feed input to the session until it terminates.
    ///
    /// Once stdin is closed, a session that asks for input is cancelled.
    async fn drive<R>(
        &self,
        handle: &SessionHandle,
        lines: &mut tokio::io::Lines<R>,
    ) -> Result<SessionStatus, ReplError>
    where
        R: AsyncBufRead + Unpin,
    {
        let finished = handle.clone();
        let wait = finished.wait();
        tokio::pin!(wait);
        let mut status_rx = handle.subscribe();
        let mut stdin_open = true;

        loop {
            tokio::select! {
                status = &mut wait => return Ok(status),
                line = lines.next_line(), if stdin_open => match line? {
                    Some(line) => {
                        if let Flow::Quit = self.handle_line(handle, line.trim()) {
                            handle.cancel();
                            return Ok(handle.wait().await);
                        }
                    }
                    None => {
                        debug!("Input closed");
                        stdin_open = false;
                        if handle.status().is_awaiting_input() {
                            handle.cancel();
                        }
                    }
                },
                changed = status_rx.changed(), if !stdin_open => {
                    if changed.is_err() || handle.status().is_awaiting_input() {
                        handle.cancel();
                    }
                }
            }
        }
    }

    fn handle_line(&self, handle: &SessionHandle, line: &str) -> Flow {
        match parse(line) {
            Command::Text("") => {}
            Command::Text(text) => match handle.submit_input(text) {
                Ok(request) => debug!("Resolved input request #{}", request.id),
                Err(BrokerError::NoOutstandingRequest | BrokerError::AlreadyResolved) => {
                    println!("No input being awaited.");
                }
                Err(e) => println!("{} {}", "x".red(), e),
            },
            Command::Status => println!(
                "{}",
                ConsoleFormatter::format_status(&handle.status(), handle.pending_input().as_ref())
            ),
            Command::Cancel => {
                println!("Cancelling session...");
                handle.cancel();
            }
            Command::Quit => return Flow::Quit,
            Command::Help => self.print_help(),
            Command::Unknown(cmd) => self.print_unknown(cmd),
        }
        Flow::Continue
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│                 Roundtable                  │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        if let Some(welcome) = &self.welcome {
            println!("{}", welcome.bold());
            println!();
        }
        println!(
            "Participants: {}",
            self.use_case
                .roster()
                .ids()
                .iter()
                .map(|id| id.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        );
        println!("Type /help for commands.");
        println!();
    }

    fn print_help(&self) {
        println!();
        println!("Commands:");
        println!("  /status         - Show the round, speaker and who is being waited on");
        println!("  /cancel         - Stop the session");
        println!("  /quit, /q       - Stop the session and exit");
        println!("  /help, /h, /?   - Show this help");
        println!();
        println!("Any other line is sent as the message of the participant being waited on.");
        println!();
    }

    fn print_unknown(&self, cmd: &str) {
        println!("Unknown command: {}", cmd);
        println!("Type /help for available commands");
    }
}
