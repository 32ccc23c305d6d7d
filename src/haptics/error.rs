//! Haptic feedback error types.

use thiserror::Error;

/// Errors that can occur while triggering a haptic pulse.
#[derive(Debug, Error)]
pub enum HapticError {
    /// No vibration-capable output is available.
    #[error("haptic output is not available: {0}")]
    DeviceNotAvailable(String),

    /// Writing the pulse to the output failed.
    #[error("failed to trigger haptic pulse: {0}")]
    PulseFailed(#[from] std::io::Error),
}
