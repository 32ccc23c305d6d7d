//! Pomodoro state machine.
//!
//! `PomodoroTimer` owns the [`TimerSession`] and implements every phase
//! transition synchronously:
//! - Idle → Working (`start`)
//! - Idle → OnBreak (`start_break`)
//! - Working → OnBreak → Idle (`tick` reaching zero)
//! - any → Idle (`reset`)
//!
//! It never sleeps or schedules anything itself; the controller decides when
//! a tick happens and owns the interval handles.

use chrono::{DateTime, Local};
use tracing::debug;

use crate::types::{
    validate_duration, DurationKind, PhaseCompletion, TimerConfig, TimerPhase, TimerSession,
    TimerSnapshot,
};

use super::TimerError;

/// The Pomodoro timer state machine.
#[derive(Debug, Clone)]
pub struct PomodoroTimer {
    session: TimerSession,
}

impl PomodoroTimer {
    /// Creates an idle timer using the current local time for the clock.
    pub fn new(config: TimerConfig) -> Self {
        Self::with_clock(config, Local::now())
    }

    /// Creates an idle timer with an explicit initial clock value.
    pub fn with_clock(config: TimerConfig, now: DateTime<Local>) -> Self {
        Self {
            session: TimerSession::new(config, now),
        }
    }

    /// Starts a work session.
    ///
    /// Only valid while idle. Returns `true` if a countdown began; calling it
    /// while a countdown is running changes nothing and returns `false`.
    pub fn start(&mut self) -> bool {
        if self.session.is_running() {
            debug!(phase = self.session.phase.as_str(), "start ignored");
            return false;
        }

        self.session.phase = TimerPhase::Working;
        self.session.remaining_seconds = self.session.config.work_seconds;
        debug!(seconds = self.session.remaining_seconds, "work session started");
        true
    }

    /// Starts a break without a preceding work session.
    ///
    /// Only valid while idle, i.e. neither counting down nor in a work phase.
    pub fn start_break(&mut self) -> bool {
        if self.session.phase != TimerPhase::Idle {
            debug!(phase = self.session.phase.as_str(), "manual break ignored");
            return false;
        }

        self.session.phase = TimerPhase::OnBreak;
        self.session.remaining_seconds = self.session.config.break_seconds;
        debug!(seconds = self.session.remaining_seconds, "break started manually");
        true
    }

    /// Returns to idle with the full work duration on the display.
    pub fn reset(&mut self) {
        self.session.phase = TimerPhase::Idle;
        self.session.remaining_seconds = self.session.config.work_seconds;
        debug!("timer reset");
    }

    /// Advances the countdown by one second.
    ///
    /// Returns the completed phase when the countdown reaches zero. At most
    /// one completion is produced per call. Idle timers are left untouched.
    pub fn tick(&mut self) -> Option<PhaseCompletion> {
        if !self.session.is_running() {
            return None;
        }

        self.session.remaining_seconds = self.session.remaining_seconds.saturating_sub(1);
        if self.session.remaining_seconds == 0 {
            Some(self.complete_phase())
        } else {
            None
        }
    }

    fn complete_phase(&mut self) -> PhaseCompletion {
        match self.session.phase {
            TimerPhase::Working => {
                let break_seconds = self.session.config.break_seconds;
                self.session.phase = TimerPhase::OnBreak;
                self.session.remaining_seconds = break_seconds;
                debug!(break_seconds, "work session complete");
                PhaseCompletion::WorkFinished { break_seconds }
            }
            TimerPhase::OnBreak | TimerPhase::Idle => {
                self.session.phase = TimerPhase::Idle;
                self.session.remaining_seconds = self.session.config.work_seconds;
                debug!("break complete");
                PhaseCompletion::BreakFinished
            }
        }
    }

    /// Changes the work duration.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` for zero or oversized values and
    /// `ConfigurationLocked` while a countdown is running.
    pub fn set_work_duration(&mut self, seconds: u32) -> Result<(), TimerError> {
        let seconds = self.check_duration(DurationKind::Work, seconds)?;
        self.session.config.work_seconds = seconds;
        self.session.remaining_seconds = seconds;
        Ok(())
    }

    /// Changes the break duration.
    ///
    /// # Errors
    ///
    /// Same conditions as [`PomodoroTimer::set_work_duration`].
    pub fn set_break_duration(&mut self, seconds: u32) -> Result<(), TimerError> {
        let seconds = self.check_duration(DurationKind::Break, seconds)?;
        self.session.config.break_seconds = seconds;
        Ok(())
    }

    fn check_duration(&self, kind: DurationKind, seconds: u32) -> Result<u32, TimerError> {
        let seconds = validate_duration(kind, seconds)?;
        if self.session.is_running() {
            return Err(TimerError::ConfigurationLocked {
                kind,
                phase: self.session.phase,
            });
        }
        Ok(seconds)
    }

    /// Records the latest wall-clock time.
    pub fn refresh_clock(&mut self, now: DateTime<Local>) {
        self.session.now = now;
    }

    pub fn phase(&self) -> TimerPhase {
        self.session.phase
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.session.remaining_seconds
    }

    pub fn config(&self) -> &TimerConfig {
        &self.session.config
    }

    pub fn is_running(&self) -> bool {
        self.session.is_running()
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        self.session.snapshot()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn timer(work: u32, brk: u32) -> PomodoroTimer {
        PomodoroTimer::new(TimerConfig::new(work, brk))
    }

    fn run_ticks(timer: &mut PomodoroTimer, count: u32) -> Vec<PhaseCompletion> {
        (0..count).filter_map(|_| timer.tick()).collect()
    }

    // ------------------------------------------------------------------------
    // Command Tests
    // ------------------------------------------------------------------------

    mod command_tests {
        use super::*;

        #[test]
        fn test_new_timer_is_idle() {
            let timer = timer(1500, 300);
            assert_eq!(timer.phase(), TimerPhase::Idle);
            assert_eq!(timer.remaining_seconds(), 1500);
            assert!(!timer.is_running());
        }

        #[test]
        fn test_start_enters_working() {
            let mut timer = timer(1500, 300);

            assert!(timer.start());
            assert_eq!(timer.phase(), TimerPhase::Working);
            assert_eq!(timer.remaining_seconds(), 1500);
        }

        #[test]
        fn test_start_while_working_is_noop() {
            let mut timer = timer(10, 5);
            timer.start();
            run_ticks(&mut timer, 3);

            assert!(!timer.start());
            assert_eq!(timer.phase(), TimerPhase::Working);
            assert_eq!(timer.remaining_seconds(), 7);
        }

        #[test]
        fn test_start_while_on_break_is_noop() {
            let mut timer = timer(10, 5);
            timer.start_break();

            assert!(!timer.start());
            assert_eq!(timer.phase(), TimerPhase::OnBreak);
            assert_eq!(timer.remaining_seconds(), 5);
        }

        #[test]
        fn test_start_break_from_idle() {
            let mut timer = timer(10, 5);

            assert!(timer.start_break());
            assert_eq!(timer.phase(), TimerPhase::OnBreak);
            assert_eq!(timer.remaining_seconds(), 5);
        }

        #[test]
        fn test_start_break_rejected_while_running() {
            let mut timer = timer(10, 5);
            timer.start();

            assert!(!timer.start_break());
            assert_eq!(timer.phase(), TimerPhase::Working);
            assert_eq!(timer.remaining_seconds(), 10);

            timer.reset();
            timer.start_break();
            run_ticks(&mut timer, 2);
            assert!(!timer.start_break());
            assert_eq!(timer.remaining_seconds(), 3);
        }

        #[test]
        fn test_reset_from_every_phase() {
            let mut timer = timer(10, 5);

            timer.reset();
            assert_eq!(timer.phase(), TimerPhase::Idle);
            assert_eq!(timer.remaining_seconds(), 10);

            timer.start();
            run_ticks(&mut timer, 4);
            timer.reset();
            assert_eq!(timer.phase(), TimerPhase::Idle);
            assert_eq!(timer.remaining_seconds(), 10);

            timer.start_break();
            run_ticks(&mut timer, 1);
            timer.reset();
            assert_eq!(timer.phase(), TimerPhase::Idle);
            assert_eq!(timer.remaining_seconds(), 10);
        }

        #[test]
        fn test_ticks_after_reset_do_not_decrement() {
            let mut timer = timer(10, 5);
            timer.start();
            run_ticks(&mut timer, 2);
            timer.reset();

            assert!(run_ticks(&mut timer, 5).is_empty());
            assert_eq!(timer.remaining_seconds(), 10);
        }
    }

    // ------------------------------------------------------------------------
    // Countdown Tests
    // ------------------------------------------------------------------------

    mod countdown_tests {
        use super::*;

        #[test]
        fn test_idle_tick_does_nothing() {
            let mut timer = timer(10, 5);
            assert_eq!(timer.tick(), None);
            assert_eq!(timer.remaining_seconds(), 10);
        }

        #[test]
        fn test_decrements_by_one_until_break() {
            for work in [1, 2, 7, 60] {
                let mut timer = timer(work, 3);
                timer.start();

                for expected in (1..work).rev() {
                    assert_eq!(timer.tick(), None);
                    assert_eq!(timer.remaining_seconds(), expected);
                    assert_eq!(timer.phase(), TimerPhase::Working);
                }

                assert_eq!(
                    timer.tick(),
                    Some(PhaseCompletion::WorkFinished { break_seconds: 3 })
                );
                assert_eq!(timer.phase(), TimerPhase::OnBreak);
                assert_eq!(timer.remaining_seconds(), 3);
            }
        }

        #[test]
        fn test_full_cycle() {
            let mut timer = timer(1, 1);
            timer.start();

            assert_eq!(
                timer.tick(),
                Some(PhaseCompletion::WorkFinished { break_seconds: 1 })
            );
            assert_eq!(timer.phase(), TimerPhase::OnBreak);
            assert_eq!(timer.remaining_seconds(), 1);

            assert_eq!(timer.tick(), Some(PhaseCompletion::BreakFinished));
            assert_eq!(timer.phase(), TimerPhase::Idle);
            assert_eq!(timer.remaining_seconds(), 1);

            assert_eq!(timer.tick(), None);
        }

        #[test]
        fn test_one_completion_per_phase() {
            let mut timer = timer(3, 2);
            timer.start();

            let completions = run_ticks(&mut timer, 20);
            assert_eq!(
                completions,
                vec![
                    PhaseCompletion::WorkFinished { break_seconds: 2 },
                    PhaseCompletion::BreakFinished,
                ]
            );
        }

        #[test]
        fn test_manual_break_ends_idle() {
            let mut timer = timer(4, 2);
            timer.start_break();

            assert_eq!(run_ticks(&mut timer, 2), vec![PhaseCompletion::BreakFinished]);
            assert_eq!(timer.phase(), TimerPhase::Idle);
            assert_eq!(timer.remaining_seconds(), 4);
        }
    }

    // ------------------------------------------------------------------------
    // Configuration Tests
    // ------------------------------------------------------------------------

    mod configuration_tests {
        use super::*;

        #[test]
        fn test_change_while_idle_applies_on_next_start() {
            let mut timer = timer(25 * 60, 5 * 60);

            timer.set_work_duration(10 * 60).unwrap();
            assert_eq!(timer.remaining_seconds(), 600);

            timer.start();
            assert_eq!(timer.remaining_seconds(), 600);
        }

        #[test]
        fn test_change_while_working_is_rejected() {
            let mut timer = timer(25 * 60, 5 * 60);
            timer.start();
            run_ticks(&mut timer, 5);

            let err = timer.set_work_duration(600).unwrap_err();
            assert_eq!(
                err,
                TimerError::ConfigurationLocked {
                    kind: DurationKind::Work,
                    phase: TimerPhase::Working
                }
            );
            assert_eq!(timer.remaining_seconds(), 25 * 60 - 5);
            assert_eq!(timer.config().work_seconds, 25 * 60);

            assert!(timer.set_break_duration(60).is_err());
            assert_eq!(timer.config().break_seconds, 5 * 60);
        }

        #[test]
        fn test_zero_duration_is_rejected() {
            let mut timer = timer(100, 50);

            let err = timer.set_work_duration(0).unwrap_err();
            assert!(matches!(err, TimerError::InvalidConfiguration { .. }));
            let err = timer.set_break_duration(0).unwrap_err();
            assert!(matches!(err, TimerError::InvalidConfiguration { .. }));

            assert_eq!(timer.config(), &TimerConfig::new(100, 50));
            assert_eq!(timer.remaining_seconds(), 100);
        }

        #[test]
        fn test_break_change_used_by_next_break() {
            let mut timer = timer(1, 300);
            timer.set_break_duration(45).unwrap();
            timer.start();

            assert_eq!(
                timer.tick(),
                Some(PhaseCompletion::WorkFinished { break_seconds: 45 })
            );
            assert_eq!(timer.remaining_seconds(), 45);
        }
    }

    // ------------------------------------------------------------------------
    // Clock Tests
    // ------------------------------------------------------------------------

    mod clock_tests {
        use super::*;
        use chrono::TimeZone;

        #[test]
        fn test_refresh_clock_only_touches_now() {
            let start = Local.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
            let later = Local.with_ymd_and_hms(2024, 1, 1, 9, 0, 1).unwrap();
            let mut timer = PomodoroTimer::with_clock(TimerConfig::new(10, 5), start);
            timer.start();

            timer.refresh_clock(later);

            let snapshot = timer.snapshot();
            assert_eq!(snapshot.now, later);
            assert_eq!(snapshot.phase, TimerPhase::Working);
            assert_eq!(snapshot.remaining_seconds, 10);
        }
    }
}
