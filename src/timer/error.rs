//! Timer error types.

use thiserror::Error;

use crate::types::{DurationKind, TimerPhase, MAX_DURATION_SECONDS};

/// Errors returned by timer commands.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimerError {
    /// A duration of zero (or beyond the supported maximum) was supplied.
    #[error("invalid {kind} duration: {seconds}s (must be 1-{max}s)", max = MAX_DURATION_SECONDS)]
    InvalidConfiguration { kind: DurationKind, seconds: u32 },

    /// Durations can only change while no countdown is running.
    #[error("cannot change the {kind} duration while {}", .phase.as_str())]
    ConfigurationLocked { kind: DurationKind, phase: TimerPhase },

    /// The controller has shut down and no longer accepts commands.
    #[error("timer controller is no longer running")]
    ControllerClosed,
}

impl TimerError {
    /// Returns true if the error was caused by user-supplied configuration.
    #[must_use]
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidConfiguration { .. } | Self::ConfigurationLocked { .. }
        )
    }
}
