//! Pomodoro Timer Library
//!
//! This library provides the core functionality for the Pomodoro Timer CLI.
//! It includes:
//! - A three-phase timer state machine (Idle, Working, OnBreak)
//! - A single-task controller driving the countdown and the wall clock
//! - Alert delivery through pluggable notification and haptic backends
//! - Layered configuration (defaults, JSON file, command line)
//! - CLI command parsing and display utilities

pub mod cli;
pub mod config;
pub mod haptics;
pub mod notification;
pub mod timer;
pub mod types;

// Re-export commonly used types for convenience
pub use types::{
    PhaseCompletion, TimerConfig, TimerPhase, TimerSession, TimerSnapshot,
    DEFAULT_BREAK_SECONDS, DEFAULT_WORK_SECONDS,
};

pub use timer::{
    Alert, AlertDispatcher, PomodoroTimer, TimerCommand, TimerController, TimerError, TimerHandle,
};

pub use notification::{
    DesktopNotifier, MockNotifier, NotificationError, NotificationIdPolicy, NotificationRequest,
    NotificationSettings, Notifier, PermissionState,
};

pub use haptics::{HapticError, HapticFeedback, HapticSettings, MockHaptics, TerminalBell};

pub use config::{AppConfig, ConfigError};

pub use cli::{format_clock, format_time};
