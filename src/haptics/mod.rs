//! Haptic feedback for phase transitions.
//!
//! A single pulse is triggered after each completed phase. Pulses are
//! fire-and-forget: failures are reported to the caller for logging but
//! never retried.

mod bell;
mod error;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};

pub use bell::TerminalBell;
pub use error::HapticError;

/// Default pulse length in milliseconds.
pub const DEFAULT_PULSE_MS: u64 = 500;

/// Longest pulse accepted by the configuration.
pub const MAX_PULSE_MS: u64 = 5000;

/// Trait for haptic output implementations.
pub trait HapticFeedback {
    /// Triggers a single vibration pulse.
    ///
    /// # Errors
    ///
    /// Returns an error if the pulse could not be emitted.
    fn vibrate(&self, duration_ms: u64) -> Result<(), HapticError>;

    /// Returns true if a pulse would reach the user. Unavailable outputs
    /// are skipped.
    fn is_available(&self) -> bool;
}

impl<T: HapticFeedback + ?Sized> HapticFeedback for Arc<T> {
    fn vibrate(&self, duration_ms: u64) -> Result<(), HapticError> {
        (**self).vibrate(duration_ms)
    }

    fn is_available(&self) -> bool {
        (**self).is_available()
    }
}

fn default_enabled() -> bool {
    true
}

fn default_duration_ms() -> u64 {
    DEFAULT_PULSE_MS
}

/// Haptic settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HapticSettings {
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Pulse length in milliseconds.
    #[serde(default = "default_duration_ms")]
    pub duration_ms: u64,
}

impl Default for HapticSettings {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            duration_ms: default_duration_ms(),
        }
    }
}

impl HapticSettings {
    /// Returns true if the pulse length is within 1..=5000 ms.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        (1..=MAX_PULSE_MS).contains(&self.duration_ms)
    }
}

/// Mock haptics for testing.
#[derive(Debug, Default)]
pub struct MockHaptics {
    pulses: Mutex<Vec<u64>>,
    should_fail: AtomicBool,
    unavailable: AtomicBool,
}

impl MockHaptics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    pub fn set_available(&self, available: bool) {
        self.unavailable.store(!available, Ordering::SeqCst);
    }

    /// Durations of every recorded pulse, in order.
    #[must_use]
    pub fn pulses(&self) -> Vec<u64> {
        self.pulses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn pulse_count(&self) -> usize {
        self.pulses().len()
    }
}

impl HapticFeedback for MockHaptics {
    fn vibrate(&self, duration_ms: u64) -> Result<(), HapticError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(HapticError::DeviceNotAvailable("Mock failure".to_string()));
        }
        self.pulses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(duration_ms);
        Ok(())
    }

    fn is_available(&self) -> bool {
        !self.unavailable.load(Ordering::SeqCst)
    }
}
