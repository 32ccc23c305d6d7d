//! Timer module for the Pomodoro Timer.
//!
//! - `engine`: the synchronous Idle/Working/OnBreak state machine
//! - `controller`: the single-task event loop that owns the tick handles
//! - `alert`: alert text and delivery through the notifier and haptics

pub mod alert;
pub mod controller;
pub mod engine;
mod error;

pub use alert::{Alert, AlertDispatcher};
pub use controller::{TimerCommand, TimerController, TimerHandle, TICK_PERIOD};
pub use engine::PomodoroTimer;
pub use error::TimerError;
