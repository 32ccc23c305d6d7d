//! Core data types for the Pomodoro Timer.
//!
//! This module defines the data structures used for:
//! - Timer phase and session state
//! - Timer configuration with validation
//! - Snapshots handed to the display surface
//! - Phase completion records that drive alerts

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::timer::TimerError;

/// Default work duration (25 minutes).
pub const DEFAULT_WORK_SECONDS: u32 = 25 * 60;

/// Default break duration (5 minutes).
pub const DEFAULT_BREAK_SECONDS: u32 = 5 * 60;

/// Longest duration accepted for either phase (24 hours).
pub const MAX_DURATION_SECONDS: u32 = 24 * 60 * 60;

// ============================================================================
// TimerPhase
// ============================================================================

/// Represents the current phase of the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerPhase {
    /// No countdown is active
    #[default]
    Idle,
    /// Currently in a work session
    Working,
    /// Currently in a break
    OnBreak,
}

impl TimerPhase {
    /// Returns the string representation of the phase.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerPhase::Idle => "idle",
            TimerPhase::Working => "working",
            TimerPhase::OnBreak => "on_break",
        }
    }

    /// Returns a short human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            TimerPhase::Idle => "Ready",
            TimerPhase::Working => "Work",
            TimerPhase::OnBreak => "Break",
        }
    }

    /// Returns true if the timer is actively counting down.
    pub fn is_active(&self) -> bool {
        matches!(self, TimerPhase::Working | TimerPhase::OnBreak)
    }
}

// ============================================================================
// TimerConfig
// ============================================================================

/// Which configured duration a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationKind {
    Work,
    Break,
}

impl std::fmt::Display for DurationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DurationKind::Work => f.write_str("work"),
            DurationKind::Break => f.write_str("break"),
        }
    }
}

/// Checks that a duration is usable for a countdown phase.
pub fn validate_duration(kind: DurationKind, seconds: u32) -> Result<u32, TimerError> {
    if seconds == 0 || seconds > MAX_DURATION_SECONDS {
        return Err(TimerError::InvalidConfiguration { kind, seconds });
    }
    Ok(seconds)
}

/// Work and break durations, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimerConfig {
    /// Work duration in seconds
    pub work_seconds: u32,
    /// Break duration in seconds
    pub break_seconds: u32,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            work_seconds: DEFAULT_WORK_SECONDS,
            break_seconds: DEFAULT_BREAK_SECONDS,
        }
    }
}

impl TimerConfig {
    /// Creates a configuration from explicit second values.
    pub fn new(work_seconds: u32, break_seconds: u32) -> Self {
        Self {
            work_seconds,
            break_seconds,
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), TimerError> {
        validate_duration(DurationKind::Work, self.work_seconds)?;
        validate_duration(DurationKind::Break, self.break_seconds)?;
        Ok(())
    }
}

// ============================================================================
// TimerSession
// ============================================================================

/// The single mutable timer entity.
#[derive(Debug, Clone)]
pub struct TimerSession {
    /// Current phase of the timer
    pub phase: TimerPhase,
    /// Remaining seconds in the current phase
    pub remaining_seconds: u32,
    /// Configured durations
    pub config: TimerConfig,
    /// Last observed wall-clock time (display only)
    pub now: DateTime<Local>,
}

impl TimerSession {
    /// Creates an idle session showing the full work duration.
    pub fn new(config: TimerConfig, now: DateTime<Local>) -> Self {
        Self {
            phase: TimerPhase::Idle,
            remaining_seconds: config.work_seconds,
            config,
            now,
        }
    }

    /// Returns true if a countdown is in progress.
    pub fn is_running(&self) -> bool {
        self.phase.is_active()
    }

    /// Returns an immutable copy for the display surface.
    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            phase: self.phase,
            remaining_seconds: self.remaining_seconds,
            work_seconds: self.config.work_seconds,
            break_seconds: self.config.break_seconds,
            now: self.now,
        }
    }
}

// ============================================================================
// TimerSnapshot
// ============================================================================

/// Read-only view of the timer, published after every change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub phase: TimerPhase,
    #[serde(rename = "remainingSeconds")]
    pub remaining_seconds: u32,
    #[serde(rename = "workSeconds")]
    pub work_seconds: u32,
    #[serde(rename = "breakSeconds")]
    pub break_seconds: u32,
    pub now: DateTime<Local>,
}

impl TimerSnapshot {
    /// Returns true if a countdown is in progress.
    pub fn is_running(&self) -> bool {
        self.phase.is_active()
    }
}

// ============================================================================
// PhaseCompletion
// ============================================================================

/// Outcome of a tick that ran a phase down to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseCompletion {
    /// The work session ended and a break of `break_seconds` began.
    WorkFinished { break_seconds: u32 },
    /// The break ended and the timer went idle.
    BreakFinished,
}

// ============================================================================
// Tests
// ============================================================================
