//! The turn loop: selection, invocation and commit.

use super::RunSessionUseCase;
use super::handle::SessionShared;
use super::hil::InputOutcome;
use super::selection::{SelectionContext, SelectionError};
use super::types::{RunSessionInput, SessionOutcome};
use crate::ports::participant::Reply;
use roundtable_domain::{
    Message, MessageDraft, ParticipantId, ParticipantProfile, SessionStatus, TerminationReason,
    Transcript, TurnState,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Mutable state owned by one running turn loop.
pub(super) struct SessionRun {
    pub(super) transcript: Transcript,
    pub(super) round: usize,
    pub(super) current: ParticipantId,
    pub(super) state: TurnState,
    pub(super) shared: Arc<SessionShared>,
}

impl SessionRun {
    fn new(initial_speaker: ParticipantId, shared: Arc<SessionShared>) -> Self {
        Self {
            transcript: Transcript::new(),
            round: 0,
            state: TurnState::AwaitingTurn(initial_speaker.clone()),
            current: initial_speaker,
            shared,
        }
    }

    /// Move the state machine and publish the new status.
    pub(super) fn transition(&mut self, next: TurnState) {
        debug_assert!(
            self.state.can_transition_to(&next),
            "illegal transition {} -> {}",
            self.state.as_str(),
            next.as_str()
        );
        if let Some(speaker) = next.speaker() {
            self.current = speaker.clone();
        }
        self.state = next;
        self.shared.publish(SessionStatus {
            round: self.round,
            current_speaker: self.current.clone(),
            state: self.state.clone(),
        });
    }
}

impl RunSessionUseCase {
    pub(super) async fn drive(
        &self,
        input: RunSessionInput,
        shared: Arc<SessionShared>,
    ) -> SessionOutcome {
        let RunSessionInput {
            initial_speaker,
            initial_content,
        } = input;
        let mut run = SessionRun::new(initial_speaker.clone(), shared);

        info!(
            "Session started: {} participants, {} transitions, {} selection, initial speaker {}, max {} rounds",
            self.roster.len(),
            self.policy.mode(),
            self.selector.method(),
            initial_speaker,
            self.config.max_rounds
        );

        if self.config.send_introductions {
            for profile in self.roster.profiles() {
                self.commit(&mut run, MessageDraft::introduction(profile.introduction()));
            }
        }
        self.commit(
            &mut run,
            MessageDraft::seed(initial_speaker.clone(), initial_content),
        );
        self.progress
            .on_session_start(&initial_speaker, self.roster.len());

        let reason = loop {
            if run.shared.cancel.is_cancelled() {
                break TerminationReason::Cancelled;
            }

            let next = match self.select_next(&run).await {
                Ok(next) => next,
                Err(reason) => break reason,
            };

            let round = run.round + 1;
            run.transition(TurnState::InvokingParticipant(next.clone()));
            self.progress.on_speaker_selected(&next, round);

            let draft = match self.take_turn(&mut run, &next, round).await {
                Ok(draft) => draft,
                Err(reason) => break reason,
            };

            run.round = round;
            let message = self.commit(&mut run, draft);
            run.transition(TurnState::TurnComplete(next.clone()));
            self.progress.on_turn_complete(&message, run.round);

            if run.round >= self.config.max_rounds {
                break TerminationReason::MaxRoundsReached { rounds: run.round };
            }
            run.transition(TurnState::AwaitingTurn(next));
        };

        run.transition(TurnState::Terminated(reason.clone()));
        run.shared.broker.close();
        self.log_termination(&reason, run.round);
        self.progress.on_session_terminated(&reason, run.round);

        SessionOutcome {
            reason,
            rounds: run.round,
            transcript: run.transcript,
        }
    }

    /// Append to the transcript, then mirror and notify observers.
    fn commit(&self, run: &mut SessionRun, draft: MessageDraft) -> Message {
        let message = run.transcript.append(draft).clone();
        run.shared.mirror(&message);
        self.observers.notify_all(&message);
        message
    }

    /// Choose who speaks after `run.current`.
    ///
    /// Proposals outside `eligible_next` are rejected and retried up to
    /// `max_selection_attempts` times.
    async fn select_next(&self, run: &SessionRun) -> Result<ParticipantId, TerminationReason> {
        let current = &run.current;
        let eligible = self.policy.eligible_next(current);

        if eligible.is_empty() {
            warn!("No eligible speaker after {}", current);
            return Err(TerminationReason::NoEligibleSpeaker {
                after: current.clone(),
            });
        }
        if let [only] = eligible.as_slice() {
            debug!("{} is the only eligible speaker after {}", only, current);
            return Ok(only.clone());
        }

        let profiles: Vec<ParticipantProfile> = eligible
            .iter()
            .filter_map(|id| self.roster.get(id))
            .map(|p| p.profile().clone())
            .collect();
        let roster = self.policy.roster();
        let max_attempts = self.config.max_selection_attempts;
        let mut rejected: Vec<String> = Vec::new();
        let mut last_error = None;

        for attempt in 1..=max_attempts {
            let context = SelectionContext {
                transcript: run.transcript.messages(),
                current,
                roster,
                eligible: &profiles,
                rejected: &rejected,
                attempt,
            };

            let error = match self.selector.propose(&context).await {
                Ok(next) if eligible.contains(&next) => {
                    debug!(
                        "Selected {} after {} (attempt {}/{})",
                        next, current, attempt, max_attempts
                    );
                    return Ok(next);
                }
                Ok(next) => SelectionError::InvalidSelection {
                    proposed: next,
                    eligible: eligible.clone(),
                },
                Err(e) => e,
            };

            warn!(
                "Speaker selection after {} rejected (attempt {}/{}): {}",
                current, attempt, max_attempts, error
            );
            if let Some(proposal) = error.rejected_proposal() {
                self.progress.on_selection_rejected(&proposal, &eligible);
                rejected.push(proposal);
            }
            last_error = Some(error);
        }

        Err(TerminationReason::SelectionFailed {
            after: current.clone(),
            attempts: max_attempts,
            detail: last_error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "no selection attempts made".to_string()),
        })
    }

    /// Produce the draft for `speaker`'s turn.
    ///
    /// Fails only when the session is cancelled while waiting for input.
    /// Participant failures become an error turn once the attempts run out.
    async fn take_turn(
        &self,
        run: &mut SessionRun,
        speaker: &ParticipantId,
        round: usize,
    ) -> Result<MessageDraft, TerminationReason> {
        let Some(participant) = self.roster.get(speaker).cloned() else {
            warn!("{} was selected but is not in the roster", speaker);
            return Ok(MessageDraft::error(
                round,
                format!("{} is not part of this conversation", speaker),
            ));
        };

        if participant.requires_external_input() {
            return self.external_turn(run, speaker, round).await;
        }

        let max_attempts = self.config.max_turn_attempts;
        let mut last_error = None;

        for attempt in 1..=max_attempts {
            match participant.respond(run.transcript.messages()).await {
                Ok(Reply::Message { content, recipient }) => {
                    return Ok(MessageDraft::turn(speaker.clone(), round, content).to(recipient));
                }
                Ok(Reply::RequiresExternalInput) => {
                    debug!("{} asked for external input", speaker);
                    return self.external_turn(run, speaker, round).await;
                }
                Err(e) => {
                    warn!(
                        "{} failed to respond (attempt {}/{}): {}",
                        speaker, attempt, max_attempts, e
                    );
                    self.progress.on_turn_failed(speaker, attempt, &e);
                    last_error = Some(e);
                }
            }
        }

        let detail = last_error
            .map(|e| e.to_string())
            .unwrap_or_else(|| "not invoked".to_string());
        Ok(MessageDraft::error(
            round,
            format!(
                "{} could not take its turn after {} attempts: {}",
                speaker, max_attempts, detail
            ),
        ))
    }

    async fn external_turn(
        &self,
        run: &mut SessionRun,
        speaker: &ParticipantId,
        round: usize,
    ) -> Result<MessageDraft, TerminationReason> {
        match self.await_external_input(run, speaker).await {
            InputOutcome::Received(content) => Ok(MessageDraft::turn(speaker.clone(), round, content)),
            InputOutcome::Failed(e) => Ok(MessageDraft::error(
                round,
                format!("{} did not receive input: {}", speaker, e),
            )),
            InputOutcome::Cancelled => Err(TerminationReason::Cancelled),
        }
    }
}
