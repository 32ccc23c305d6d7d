//! Terminal bell haptics.
//!
//! Desktop terminals have no vibration motor; the closest physical cue is
//! the bell character, which most terminals turn into a beep or a window
//! flash.

use std::io::{IsTerminal, Write};

use tracing::debug;

use super::error::HapticError;
use super::HapticFeedback;

const BELL: &[u8] = b"\x07";

/// Rings the terminal bell on stderr for each pulse.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalBell;

impl HapticFeedback for TerminalBell {
    fn vibrate(&self, duration_ms: u64) -> Result<(), HapticError> {
        let mut stderr = std::io::stderr().lock();
        stderr.write_all(BELL)?;
        stderr.flush()?;
        debug!(duration_ms, "terminal bell rung");
        Ok(())
    }

    /// Only a terminal turns the bell into something the user notices.
    fn is_available(&self) -> bool {
        std::io::stderr().is_terminal()
    }
}
