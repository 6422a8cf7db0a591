//! Progress reporting for running sessions

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use roundtable_application::{ParticipantError, PendingInput, SessionProgressNotifier};
use roundtable_domain::{Message, ParticipantId, TerminationReason};
use std::sync::Mutex;
use std::time::Duration;

/// Reports progress with a spinner while a participant is responding
pub struct ProgressReporter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    /// Run `f` with the spinner hidden, e.g. to print a line.
    pub fn suspend<F: FnOnce() -> R, R>(&self, f: F) -> R {
        let spinner = self.spinner.lock().unwrap_or_else(|e| e.into_inner());
        match spinner.as_ref() {
            Some(pb) => pb.suspend(f),
            None => f(),
        }
    }

    fn clear(&self) {
        if let Some(pb) = self.spinner.lock().unwrap_or_else(|e| e.into_inner()).take() {
            pb.finish_and_clear();
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionProgressNotifier for ProgressReporter {
    fn on_speaker_selected(&self, speaker: &ParticipantId, round: usize) {
        self.clear();

        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_prefix(format!("Round {}", round));
        pb.set_message(format!("{} is responding...", speaker));
        pb.enable_steady_tick(Duration::from_millis(100));

        *self.spinner.lock().unwrap_or_else(|e| e.into_inner()) = Some(pb);
    }

    fn on_selection_rejected(&self, proposal: &str, eligible: &[ParticipantId]) {
        let names: Vec<&str> = eligible.iter().map(|id| id.as_str()).collect();
        self.suspend(|| {
            eprintln!(
                "{} proposal '{}' rejected, eligible: {}",
                "x".yellow(),
                proposal,
                names.join(", ")
            )
        });
    }

    fn on_input_requested(&self, request: &PendingInput) {
        self.clear();
        println!(
            "{} {}",
            ">".green().bold(),
            format!("Your turn as {}:", request.participant).bold()
        );
    }

    fn on_turn_failed(&self, speaker: &ParticipantId, attempt: usize, error: &ParticipantError) {
        if let Some(pb) = self
            .spinner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .as_ref()
        {
            pb.set_message(format!(
                "{} {} failed (attempt {}): {}",
                "x".red(),
                speaker,
                attempt,
                error
            ));
        }
    }

    fn on_turn_complete(&self, _message: &Message, _round: usize) {
        self.clear();
    }

    fn on_session_terminated(&self, _reason: &TerminationReason, _rounds: usize) {
        self.clear();
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl SessionProgressNotifier for SimpleProgress {
    fn on_session_start(&self, initial_speaker: &ParticipantId, roster_size: usize) {
        println!(
            "{} {} ({} participants, started by {})",
            "->".cyan(),
            "Session started".bold(),
            roster_size,
            initial_speaker
        );
    }

    fn on_input_requested(&self, request: &PendingInput) {
        println!("{} Your turn as {}:", ">".green(), request.participant);
    }

    fn on_turn_failed(&self, speaker: &ParticipantId, attempt: usize, error: &ParticipantError) {
        println!("  {} {} failed (attempt {}): {}", "x".red(), speaker, attempt, error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suspend_without_spinner_runs_closure() {
        let reporter = ProgressReporter::new();
        assert_eq!(reporter.suspend(|| 7), 7);
    }

    #[test]
    fn test_spinner_lifecycle() {
        let reporter = ProgressReporter::new();
        let tutor = ParticipantId::new("tutor");

        reporter.on_speaker_selected(&tutor, 1);
        assert!(reporter.spinner.lock().unwrap().is_some());

        reporter.on_turn_failed(&tutor, 1, &ParticipantError::Timeout);
        assert!(reporter.spinner.lock().unwrap().is_some());

        reporter.on_session_terminated(&TerminationReason::Cancelled, 1);
        assert!(reporter.spinner.lock().unwrap().is_none());
    }
}
