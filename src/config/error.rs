//! Configuration error types.

use std::path::PathBuf;

use thiserror::Error;

use crate::timer::TimerError;

/// Errors raised while loading or validating the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid JSON for [`super::AppConfig`].
    #[error("failed to parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A timer duration is out of range.
    #[error(transparent)]
    Timer(#[from] TimerError),

    /// The haptic pulse length is out of range.
    #[error("haptic pulse must be 1-{max}ms, got {0}ms", max = crate::haptics::MAX_PULSE_MS)]
    HapticDuration(u64),
}
