//! Command definitions for the Pomodoro Timer CLI.
//!
//! Startup arguments use the clap derive macro. Commands typed while the
//! timer is running are parsed by [`UserCommand::from_str`].

use std::path::PathBuf;
use std::str::FromStr;

use clap::{Args, Parser, Subcommand};
use thiserror::Error;

use crate::config::AppConfig;
use crate::notification::NotificationIdPolicy;
use crate::types::MAX_DURATION_SECONDS;

// ============================================================================
// CLI Structure
// ============================================================================

/// Pomodoro Timer - work/break countdown with desktop alerts
#[derive(Parser, Debug)]
#[command(
    name = "pomodoro-timer",
    version,
    about = "Single-screen Pomodoro countdown timer",
    long_about = "Counts down work and break sessions, showing a desktop notification \
                  and ringing the terminal bell whenever a session ends.",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute (defaults to `run`)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run the interactive timer
    Run(RunArgs),

    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ============================================================================
// Run Command Arguments
// ============================================================================

/// Arguments for the run command
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Work duration as minutes or M:SS (up to 1440:00)
    #[arg(short, long, value_name = "M[:SS]", value_parser = duration_arg)]
    pub work: Option<u32>,

    /// Break duration as minutes or M:SS (up to 1440:00)
    #[arg(short, long, value_name = "M[:SS]", value_parser = duration_arg)]
    pub break_time: Option<u32>,

    /// JSON configuration file
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Give every notification its own id instead of replacing the last one
    #[arg(long)]
    pub unique_ids: bool,

    /// Do not ring the terminal bell when a session ends
    #[arg(long)]
    pub no_haptics: bool,
}

impl RunArgs {
    /// Applies command-line overrides on top of a loaded configuration.
    pub fn apply_to(&self, config: &mut AppConfig) {
        if let Some(seconds) = self.work {
            config.timer.work_seconds = seconds;
        }
        if let Some(seconds) = self.break_time {
            config.timer.break_seconds = seconds;
        }
        if self.unique_ids {
            config.notification.id_policy = NotificationIdPolicy::Unique;
        }
        if self.no_haptics {
            config.haptics.enabled = false;
        }
    }
}

// ============================================================================
// Durations
// ============================================================================

/// Errors from parsing a duration written as `M` or `M:SS`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseDurationError {
    #[error("'{0}' is not a valid duration (use minutes or M:SS)")]
    Invalid(String),

    #[error("'{0}' has more than 59 seconds")]
    SecondsOutOfRange(String),

    #[error("'{0}' is out of range (must be 0:01-{max}:00)", max = MAX_DURATION_SECONDS / 60)]
    OutOfRange(String),
}

/// Parses `M` (whole minutes) or `M:SS` into seconds.
///
/// Only the syntax is checked here; `0` parses to zero seconds and is left
/// to the timer to reject.
pub fn parse_duration(value: &str) -> Result<u32, ParseDurationError> {
    let invalid = || ParseDurationError::Invalid(value.to_string());

    let (minutes, seconds) = match value.split_once(':') {
        Some((minutes, seconds)) => {
            if seconds.len() != 2 {
                return Err(invalid());
            }
            let seconds = seconds.parse::<u32>().map_err(|_| invalid())?;
            if seconds >= 60 {
                return Err(ParseDurationError::SecondsOutOfRange(value.to_string()));
            }
            (minutes.parse::<u32>().map_err(|_| invalid())?, seconds)
        }
        None => (value.parse::<u32>().map_err(|_| invalid())?, 0),
    };

    minutes
        .checked_mul(60)
        .and_then(|total| total.checked_add(seconds))
        .ok_or_else(invalid)
}

/// Command-line flavour of [`parse_duration`] that also enforces the range.
fn duration_arg(value: &str) -> Result<u32, ParseDurationError> {
    let seconds = parse_duration(value)?;
    if seconds == 0 || seconds > MAX_DURATION_SECONDS {
        return Err(ParseDurationError::OutOfRange(value.to_string()));
    }
    Ok(seconds)
}

// ============================================================================
// Interactive Commands
// ============================================================================

/// A command typed into the running timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserCommand {
    Start,
    Reset,
    Break,
    /// Set the work duration, in seconds
    Work(u32),
    /// Set the break duration, in seconds
    Rest(u32),
    Status,
    Help,
    Quit,
}

/// Errors from parsing an interactive command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseCommandError {
    #[error("empty command")]
    Empty,

    #[error("unknown command '{0}' (type 'help' for a list)")]
    Unknown(String),

    #[error("'{0}' needs a duration (minutes or M:SS)")]
    MissingDuration(&'static str),

    #[error(transparent)]
    InvalidDuration(#[from] ParseDurationError),
}

fn duration_operand(name: &'static str, value: Option<&str>) -> Result<u32, ParseCommandError> {
    let value = value.ok_or(ParseCommandError::MissingDuration(name))?;
    Ok(parse_duration(value)?)
}

impl FromStr for UserCommand {
    type Err = ParseCommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Err(ParseCommandError::Empty);
        };

        let command = match name.to_ascii_lowercase().as_str() {
            "start" | "s" => Self::Start,
            "reset" | "r" => Self::Reset,
            "break" | "b" => Self::Break,
            "work" | "w" => Self::Work(duration_operand("work", words.next())?),
            "rest" => Self::Rest(duration_operand("rest", words.next())?),
            "status" => Self::Status,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            other => return Err(ParseCommandError::Unknown(other.to_string())),
        };
        Ok(command)
    }
}

// ============================================================================
// Tests
// ============================================================================
