//! CLI module for the Pomodoro Timer.
//!
//! This module provides the command-line interface:
//! - `commands`: Startup arguments and interactive commands
//! - `display`: Output formatting and display logic
//! - `terminal`: The interactive session loop

pub mod commands;
pub mod display;
pub mod terminal;

pub use commands::{Cli, Commands, ParseCommandError, RunArgs, UserCommand};
pub use display::{format_clock, format_time, Display};
pub use terminal::{execute_line, run_session, Flow};
