//! Application configuration.
//!
//! Settings come from three layers, later ones winning:
//! 1. built-in defaults
//! 2. an optional JSON file (`--config <path>`)
//! 3. command-line overrides applied by the binary
//!
//! Every section is optional in the file; missing fields keep their
//! defaults.
//!
//! ```json
//! {
//!   "timer": { "work_seconds": 1500, "break_seconds": 300 },
//!   "notification": {
//!     "id_policy": "fixed",
//!     "platform": { "ios": { "sound": "beep.wav", "badge": 1, "foreground": true } }
//!   },
//!   "haptics": { "enabled": true, "duration_ms": 500 }
//! }
//! ```

mod error;

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

pub use error::ConfigError;

use crate::haptics::HapticSettings;
use crate::notification::NotificationSettings;
use crate::types::TimerConfig;

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub timer: TimerConfig,
    pub notification: NotificationSettings,
    pub haptics: HapticSettings,
}

impl AppConfig {
    /// Loads the configuration from `path`, or returns defaults when no
    /// path is given.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Validates every section.
    ///
    /// # Errors
    ///
    /// Returns the first out-of-range value found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.timer.validate()?;
        if !self.haptics.is_valid() {
            return Err(ConfigError::HapticDuration(self.haptics.duration_ms));
        }
        Ok(())
    }
}
