//! Error taxonomy for the booking desk.
//!
//! `Validation` keeps the wizard on its current step, `State` flags a
//! submit outside the review step, `Channel` is the one failure the client
//! ever sees at submission, and `Persistence` is logged but never surfaced.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A required selection is missing for the current wizard step.
    /// Recoverable: the step does not advance and the message is shown
    /// as a transient notice.
    #[error("{0}")]
    Validation(String),

    /// `submit()` was invoked outside the review step. A programming-contract
    /// violation, not a user-facing condition.
    #[error("submit invoked on step {0}, expected the review step")]
    State(usize),

    /// Building or opening the WhatsApp deep link failed. Sets the session
    /// to `Failed`; the user can retry from the review step.
    #[error("channel hand-off failed: {0}")]
    Channel(String),

    /// Best-effort lead capture failed. Logged at WARN, never blocks the
    /// hand-off and never reaches the user.
    #[error("lead capture failed: {0}")]
    Persistence(String),

    /// Admin PIN missing or rejected.
    #[error("{0}")]
    Unauthorized(String),
}

impl Error {
    /// True when the error only interrupts the current step and the
    /// session should stay open.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::Validation(_) | Error::Channel(_) | Error::Persistence(_)
        )
    }
}
