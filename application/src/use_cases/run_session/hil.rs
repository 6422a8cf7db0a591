//! Human-in-the-Loop handling for the RunSession use case.
//!
//! A participant flagged for external input suspends the turn loop on the
//! session's input broker until someone resolves the request or the session
//! is cancelled.

use super::RunSessionUseCase;
use super::input_broker::BrokerError;
use super::turn_loop::SessionRun;
use roundtable_domain::{ParticipantId, TurnState};
use tracing::{info, warn};

pub(super) enum InputOutcome {
    Received(String),
    Failed(BrokerError),
    Cancelled,
}

impl RunSessionUseCase {
    /// Open an input request for `speaker` and wait for it.
    ///
    /// On cancel the broker is closed, so a late resolve fails. Input the
    /// broker accepted before the close is still returned.
    pub(super) async fn await_external_input(
        &self,
        run: &mut SessionRun,
        speaker: &ParticipantId,
    ) -> InputOutcome {
        let mut handle = match run.shared.broker.request(speaker.clone()) {
            Ok(handle) => handle,
            Err(BrokerError::Closed) => return InputOutcome::Cancelled,
            Err(e) => {
                warn!("Could not request input for {}: {}", speaker, e);
                return InputOutcome::Failed(e);
            }
        };

        run.transition(TurnState::AwaitingExternalInput(speaker.clone()));
        self.progress.on_input_requested(handle.request());
        info!(
            "Waiting for external input for {} (request #{})",
            speaker,
            handle.request().id
        );

        let token = run.shared.cancel.clone();
        let waited = tokio::select! {
            biased;
            _ = token.cancelled() => None,
            result = handle.wait() => Some(result),
        };

        match waited {
            Some(Ok(content)) => InputOutcome::Received(content),
            Some(Err(e)) => {
                warn!("Input request for {} was not resolved: {}", speaker, e);
                InputOutcome::Failed(e)
            }
            None => {
                // Once closed nothing more can be sent, so an accepted resolution is already here.
                run.shared.broker.close();
                match handle.try_take() {
                    Some(content) => {
                        info!(
                            "Session cancelled after input for {} was accepted; committing it",
                            speaker
                        );
                        InputOutcome::Received(content)
                    }
                    None => {
                        info!("Session cancelled while waiting for {}", speaker);
                        InputOutcome::Cancelled
                    }
                }
            }
        }
    }
}
