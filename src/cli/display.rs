//! Display utilities for the Pomodoro Timer.
//!
//! This module provides formatted output for:
//! - The live status line (phase, countdown, wall clock)
//! - Command feedback and error messages
//! - Time formatting helpers shared with library users

use std::io::Write;

use chrono::{DateTime, Local};

use crate::types::TimerSnapshot;

// ============================================================================
// Formatting
// ============================================================================

/// Formats a second count as `MM:SS`.
///
/// Minutes are zero-padded to two digits and never wrap, so two hours is
/// `120:00`.
#[must_use]
pub fn format_time(total_seconds: u32) -> String {
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{minutes:02}:{seconds:02}")
}

/// Formats a wall-clock time as 24-hour `HH:MM:SS`.
#[must_use]
pub fn format_clock(now: &DateTime<Local>) -> String {
    now.format("%H:%M:%S").to_string()
}

// ============================================================================
// Display
// ============================================================================

/// Display utilities for terminal output.
pub struct Display;

impl Display {
    /// Builds the single status line for a snapshot.
    #[must_use]
    pub fn status_line(snapshot: &TimerSnapshot) -> String {
        format!(
            "{:<5} {}  |  {}",
            snapshot.phase.label(),
            format_time(snapshot.remaining_seconds),
            format_clock(&snapshot.now)
        )
    }

    /// Redraws the status line in place.
    pub fn show_status_line(snapshot: &TimerSnapshot) {
        let mut stdout = std::io::stdout().lock();
        let _ = write!(stdout, "\r\x1b[2K{}", Self::status_line(snapshot));
        let _ = stdout.flush();
    }

    /// Shows a detailed status block.
    pub fn show_status(snapshot: &TimerSnapshot) {
        println!();
        println!("Pomodoro Timer status");
        println!("─────────────────────────────");
        println!("Phase:     {}", snapshot.phase.label());
        println!("Remaining: {}", format_time(snapshot.remaining_seconds));
        println!("Work:      {}", format_time(snapshot.work_seconds));
        println!("Break:     {}", format_time(snapshot.break_seconds));
        println!("Clock:     {}", format_clock(&snapshot.now));
    }

    /// Shows the startup banner.
    pub fn show_welcome(snapshot: &TimerSnapshot) {
        println!(
            "Pomodoro Timer - work {} / break {}",
            format_time(snapshot.work_seconds),
            format_time(snapshot.break_seconds)
        );
        println!("Type 'help' for commands.");
    }

    /// Shows the list of interactive commands.
    pub fn show_help() {
        println!();
        println!("Commands:");
        println!("  start, s          start a work session");
        println!("  break, b          start a break (only while idle)");
        println!("  reset, r          stop and return to idle");
        println!("  work <m[:ss]>     set the work duration (only while idle)");
        println!("  rest <m[:ss]>     set the break duration (only while idle)");
        println!("  status            show the full timer status");
        println!("  quit, q           exit");
    }

    /// Shows a confirmation message.
    pub fn show_info(message: &str) {
        println!();
        println!("{message}");
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!();
        eprintln!("error: {message}");
    }

    /// Ends the status line before exit.
    pub fn finish() {
        println!();
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    use crate::types::{TimerConfig, TimerPhase, TimerSession};

    // ------------------------------------------------------------------------
    // Format Time Tests
    // ------------------------------------------------------------------------

    mod format_time_tests {
        use super::*;

        #[test]
        fn test_format_time_zero() {
            assert_eq!(format_time(0), "00:00");
        }

        #[test]
        fn test_format_time_mixed() {
            assert_eq!(format_time(65), "01:05");
        }

        #[test]
        fn test_format_time_seconds_only() {
            assert_eq!(format_time(45), "00:45");
        }

        #[test]
        fn test_format_time_25_minutes() {
            assert_eq!(format_time(25 * 60), "25:00");
        }

        #[test]
        fn test_format_time_does_not_wrap_hours() {
            assert_eq!(format_time(120 * 60), "120:00");
            assert_eq!(format_time(120 * 60 + 59), "120:59");
        }
    }

    // ------------------------------------------------------------------------
    // Format Clock Tests
    // ------------------------------------------------------------------------

    mod format_clock_tests {
        use super::*;

        #[test]
        fn test_format_clock_pads_fields() {
            let now = Local.with_ymd_and_hms(2024, 3, 9, 7, 5, 3).unwrap();
            assert_eq!(format_clock(&now), "07:05:03");
        }

        #[test]
        fn test_format_clock_is_24_hour() {
            let now = Local.with_ymd_and_hms(2024, 3, 9, 21, 30, 0).unwrap();
            assert_eq!(format_clock(&now), "21:30:00");
        }
    }

    // ------------------------------------------------------------------------
    // Status Line Tests
    // ------------------------------------------------------------------------

    mod status_line_tests {
        use super::*;

        #[test]
        fn test_status_line() {
            let now = Local.with_ymd_and_hms(2024, 3, 9, 14, 0, 9).unwrap();
            let mut session = TimerSession::new(TimerConfig::default(), now);
            session.phase = TimerPhase::Working;
            session.remaining_seconds = 1499;

            assert_eq!(
                Display::status_line(&session.snapshot()),
                "Work  24:59  |  14:00:09"
            );
        }

        #[test]
        fn test_status_line_idle() {
            let now = Local.with_ymd_and_hms(2024, 3, 9, 14, 0, 9).unwrap();
            let session = TimerSession::new(TimerConfig::default(), now);

            assert!(Display::status_line(&session.snapshot()).starts_with("Ready 25:00"));
        }
    }
}
