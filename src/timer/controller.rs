//! Timer event loop.
//!
//! `TimerController` owns the [`PomodoroTimer`] and both periodic timers:
//! - the clock tick, alive for the controller's whole lifetime
//! - the countdown tick, alive only while Working or OnBreak
//!
//! Commands arrive from any number of [`TimerHandle`]s. Snapshots go out on a
//! watch channel and completed phases go to the alert queue. Everything runs
//! on a single task, so the state needs no locking.

use chrono::Local;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::time::{interval_at, Duration, Instant, Interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::types::{TimerConfig, TimerSnapshot};

use super::alert::Alert;
use super::engine::PomodoroTimer;
use super::TimerError;

/// Period of both the clock and the countdown tick.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

// ============================================================================
// Commands
// ============================================================================

/// Commands accepted by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerCommand {
    Start,
    Reset,
    StartBreak,
    SetWorkDuration(u32),
    SetBreakDuration(u32),
    Snapshot,
    Shutdown,
}

type Reply = Result<TimerSnapshot, TimerError>;

#[derive(Debug)]
struct Request {
    command: TimerCommand,
    reply: oneshot::Sender<Reply>,
}

// ============================================================================
// TimerHandle
// ============================================================================

/// Cloneable client for a running [`TimerController`].
#[derive(Debug, Clone)]
pub struct TimerHandle {
    commands: mpsc::UnboundedSender<Request>,
    snapshots: watch::Receiver<TimerSnapshot>,
}

impl TimerHandle {
    async fn send(&self, command: TimerCommand) -> Reply {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(Request { command, reply })
            .map_err(|_| TimerError::ControllerClosed)?;
        response.await.map_err(|_| TimerError::ControllerClosed)?
    }

    /// Starts a work session (no-op while a countdown runs).
    pub async fn start(&self) -> Reply {
        self.send(TimerCommand::Start).await
    }

    /// Stops any countdown and returns to idle.
    pub async fn reset(&self) -> Reply {
        self.send(TimerCommand::Reset).await
    }

    /// Starts a break from idle (no-op otherwise).
    pub async fn start_break(&self) -> Reply {
        self.send(TimerCommand::StartBreak).await
    }

    /// Sets the work duration in seconds.
    pub async fn set_work_duration(&self, seconds: u32) -> Reply {
        self.send(TimerCommand::SetWorkDuration(seconds)).await
    }

    /// Sets the break duration in seconds.
    pub async fn set_break_duration(&self, seconds: u32) -> Reply {
        self.send(TimerCommand::SetBreakDuration(seconds)).await
    }

    /// Asks the controller to release its timers and exit.
    pub async fn shutdown(&self) -> Reply {
        self.send(TimerCommand::Shutdown).await
    }

    /// Fetches a snapshot through the controller, after pending commands.
    pub async fn refresh(&self) -> Reply {
        self.send(TimerCommand::Snapshot).await
    }

    /// Returns the most recently published snapshot.
    #[must_use]
    pub fn snapshot(&self) -> TimerSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Returns a receiver that is notified on every published snapshot.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<TimerSnapshot> {
        self.snapshots.clone()
    }
}

// ============================================================================
// Ticker
// ============================================================================

/// A periodic timer whose first tick fires one full period after creation.
#[derive(Debug)]
struct Ticker {
    interval: Interval,
}

impl Ticker {
    fn every(period: Duration) -> Self {
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Self { interval }
    }

    async fn tick(&mut self) {
        self.interval.tick().await;
    }
}

/// Waits for the countdown tick, or forever if no countdown is armed.
async fn next_countdown_tick(countdown: &mut Option<Ticker>) {
    match countdown {
        Some(ticker) => ticker.tick().await,
        None => std::future::pending().await,
    }
}

// ============================================================================
// TimerController
// ============================================================================

/// Drives a [`PomodoroTimer`] from clock and countdown ticks.
pub struct TimerController {
    timer: PomodoroTimer,
    commands: mpsc::UnboundedReceiver<Request>,
    snapshots: watch::Sender<TimerSnapshot>,
    alerts: mpsc::UnboundedSender<Alert>,
    countdown: Option<Ticker>,
}

impl TimerController {
    /// Creates a controller, its first handle and the alert queue receiver.
    pub fn new(config: TimerConfig) -> (Self, TimerHandle, mpsc::UnboundedReceiver<Alert>) {
        Self::with_timer(PomodoroTimer::new(config))
    }

    /// Same as [`TimerController::new`] with a pre-built state machine.
    pub fn with_timer(
        timer: PomodoroTimer,
    ) -> (Self, TimerHandle, mpsc::UnboundedReceiver<Alert>) {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, snapshot_rx) = watch::channel(timer.snapshot());
        let (alert_tx, alert_rx) = mpsc::unbounded_channel();

        let controller = Self {
            timer,
            commands: command_rx,
            snapshots: snapshot_tx,
            alerts: alert_tx,
            countdown: None,
        };
        let handle = TimerHandle {
            commands: command_tx,
            snapshots: snapshot_rx,
        };
        (controller, handle, alert_rx)
    }

    /// Runs the event loop until shutdown or until every handle is dropped.
    pub async fn run(mut self) {
        let mut clock = Ticker::every(TICK_PERIOD);
        info!(
            work_seconds = self.timer.config().work_seconds,
            break_seconds = self.timer.config().break_seconds,
            "timer controller started"
        );

        loop {
            tokio::select! {
                request = self.commands.recv() => {
                    let Some(Request { command, reply }) = request else {
                        debug!("all timer handles dropped");
                        break;
                    };
                    if command == TimerCommand::Shutdown {
                        let _ = reply.send(Ok(self.timer.snapshot()));
                        break;
                    }
                    let _ = reply.send(self.apply(command));
                }
                _ = clock.tick() => {
                    self.timer.refresh_clock(Local::now());
                    self.publish();
                }
                _ = next_countdown_tick(&mut self.countdown) => {
                    self.on_countdown_tick();
                }
            }
        }

        self.release_countdown();
        drop(clock);
        info!("timer controller stopped");
    }

    fn apply(&mut self, command: TimerCommand) -> Reply {
        debug!(?command, "applying timer command");
        match command {
            TimerCommand::Start => {
                if self.timer.start() {
                    self.arm_countdown();
                }
            }
            TimerCommand::StartBreak => {
                if self.timer.start_break() {
                    self.arm_countdown();
                }
            }
            TimerCommand::Reset => {
                self.timer.reset();
                self.release_countdown();
            }
            TimerCommand::SetWorkDuration(seconds) => self.timer.set_work_duration(seconds)?,
            TimerCommand::SetBreakDuration(seconds) => self.timer.set_break_duration(seconds)?,
            TimerCommand::Snapshot | TimerCommand::Shutdown => {}
        }

        self.publish();
        Ok(self.timer.snapshot())
    }

    fn on_countdown_tick(&mut self) {
        if let Some(completion) = self.timer.tick() {
            let alert = Alert::for_completion(completion);
            info!(title = %alert.title, phase = self.timer.phase().as_str(), "phase complete");
            if self.alerts.send(alert).is_err() {
                warn!("alert dispatcher is gone, dropping alert");
            }
        }

        if !self.timer.is_running() {
            self.release_countdown();
        }
        self.publish();
    }

    /// Replaces any previous countdown so only one is ever live.
    fn arm_countdown(&mut self) {
        if self.countdown.replace(Ticker::every(TICK_PERIOD)).is_some() {
            debug!("previous countdown handle released");
        }
    }

    fn release_countdown(&mut self) {
        if self.countdown.take().is_some() {
            debug!("countdown handle released");
        }
    }

    fn publish(&self) {
        self.snapshots.send_replace(self.timer.snapshot());
    }
}

// ============================================================================
// Tests
// ============================================================================
