//! Session parameters — turn loop control.
//!
//! [`SessionConfig`] groups the static parameters that bound the turn loop in
//! [`RunSessionUseCase`](crate::use_cases::run_session::RunSessionUseCase).
//! Which participants exist and who may follow whom are configured
//! separately (roster and transition policy).

use roundtable_domain::DomainError;

/// Turn loop control parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Completed turns after which the session terminates (the seed is round 0).
    pub max_rounds: usize,
    /// Post every participant's description before the seed message.
    pub send_introductions: bool,
    /// Speaker proposals tried per turn before giving up with `SelectionFailed`.
    pub max_selection_attempts: usize,
    /// Invocations per turn before the turn is recorded as an error turn.
    pub max_turn_attempts: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_rounds: 40,
            send_introductions: true,
            max_selection_attempts: 3,
            max_turn_attempts: 2,
        }
    }
}

impl SessionConfig {
    // ==================== Builder Methods ====================

    pub fn with_max_rounds(mut self, max: usize) -> Self {
        self.max_rounds = max;
        self
    }

    pub fn with_send_introductions(mut self, send: bool) -> Self {
        self.send_introductions = send;
        self
    }

    pub fn with_max_selection_attempts(mut self, max: usize) -> Self {
        self.max_selection_attempts = max;
        self
    }

    pub fn with_max_turn_attempts(mut self, max: usize) -> Self {
        self.max_turn_attempts = max;
        self
    }

    /// Every limit must allow at least one round / attempt.
    pub fn validate(&self) -> Result<(), DomainError> {
        let limits = [
            ("max_rounds", self.max_rounds),
            ("max_selection_attempts", self.max_selection_attempts),
            ("max_turn_attempts", self.max_turn_attempts),
        ];
        for (field, value) in limits {
            if value == 0 {
                return Err(DomainError::InvalidConfiguration(format!(
                    "{} must be at least 1",
                    field
                )));
            }
        }
        Ok(())
    }
}
