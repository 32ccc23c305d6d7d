//! Interactive terminal session.
//!
//! Reads commands from stdin, forwards them to the timer controller and
//! redraws the status line whenever a new snapshot is published.

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, warn};

use crate::timer::TimerHandle;

use super::commands::{ParseCommandError, UserCommand};
use super::display::Display;

/// Whether the session should keep reading commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Runs the terminal session until `quit`, end of input or Ctrl-C.
///
/// The controller is always asked to shut down before returning.
pub async fn run_session<R>(handle: TimerHandle, input: R) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    let mut snapshots = handle.subscribe();
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    let mut listening_for_ctrl_c = true;
    Display::show_welcome(&handle.snapshot());

    let result = loop {
        tokio::select! {
            line = lines.next_line() => {
                let line = match line.context("failed to read command") {
                    Ok(Some(line)) => line,
                    Ok(None) => {
                        debug!("input closed");
                        break Ok(());
                    }
                    Err(e) => break Err(e),
                };
                match execute_line(&handle, &line).await {
                    Ok(Flow::Continue) => {}
                    Ok(Flow::Quit) => break Ok(()),
                    Err(e) => break Err(e),
                }
            }
            changed = snapshots.changed() => {
                if changed.is_err() {
                    break Ok(());
                }
                Display::show_status_line(&snapshots.borrow_and_update());
            }
            signal = &mut ctrl_c, if listening_for_ctrl_c => {
                match signal {
                    Ok(()) => {
                        debug!("interrupted");
                        break Ok(());
                    }
                    Err(e) => {
                        warn!("cannot listen for Ctrl-C, use 'quit' to exit: {}", e);
                        listening_for_ctrl_c = false;
                    }
                }
            }
        }
    };

    // The controller may already be gone if every handle was dropped.
    let _ = handle.shutdown().await;
    Display::finish();
    result
}

/// Parses and executes one line of input.
///
/// Command mistakes and rejected durations are shown to the user and do not
/// end the session; only a closed controller does.
pub async fn execute_line(handle: &TimerHandle, line: &str) -> Result<Flow> {
    let command = match line.parse::<UserCommand>() {
        Ok(command) => command,
        Err(ParseCommandError::Empty) => return Ok(Flow::Continue),
        Err(e) => {
            Display::show_error(&e.to_string());
            return Ok(Flow::Continue);
        }
    };

    let result = match command {
        UserCommand::Start => handle.start().await,
        UserCommand::Reset => handle.reset().await,
        UserCommand::Break => handle.start_break().await,
        UserCommand::Work(seconds) => handle.set_work_duration(seconds).await,
        UserCommand::Rest(seconds) => handle.set_break_duration(seconds).await,
        UserCommand::Status => handle.refresh().await,
        UserCommand::Help => {
            Display::show_help();
            return Ok(Flow::Continue);
        }
        UserCommand::Quit => return Ok(Flow::Quit),
    };

    match result {
        Ok(snapshot) => {
            match command {
                UserCommand::Status => Display::show_status(&snapshot),
                UserCommand::Work(_) | UserCommand::Rest(_) => Display::show_info(&format!(
                    "durations set: work {} / break {}",
                    super::display::format_time(snapshot.work_seconds),
                    super::display::format_time(snapshot.break_seconds)
                )),
                _ => {}
            }
            Ok(Flow::Continue)
        }
        Err(e) if e.is_configuration_error() => {
            Display::show_error(&e.to_string());
            Ok(Flow::Continue)
        }
        Err(e) => Err(e).context("timer stopped unexpectedly"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::TimerController;
    use crate::types::{TimerConfig, TimerPhase};
    use tokio::io::AsyncWriteExt;

    #[tokio::test(start_paused = true)]
    async fn test_execute_line_drives_timer() {
        let (controller, handle, _alerts) = TimerController::new(TimerConfig::new(60, 30));
        let _task = tokio::spawn(controller.run());

        assert_eq!(execute_line(&handle, "work 2").await.unwrap(), Flow::Continue);
        assert_eq!(handle.snapshot().work_seconds, 120);

        assert_eq!(execute_line(&handle, "work 1:30").await.unwrap(), Flow::Continue);
        assert_eq!(handle.snapshot().work_seconds, 90);
        assert_eq!(handle.snapshot().remaining_seconds, 90);

        assert_eq!(execute_line(&handle, "rest 0:45").await.unwrap(), Flow::Continue);
        assert_eq!(handle.snapshot().break_seconds, 45);

        // Rejected by the timer, but the session carries on.
        assert_eq!(execute_line(&handle, "work 0").await.unwrap(), Flow::Continue);
        assert_eq!(handle.snapshot().work_seconds, 90);

        assert_eq!(execute_line(&handle, "start").await.unwrap(), Flow::Continue);
        assert_eq!(handle.snapshot().phase, TimerPhase::Working);

        // Rejected while running, but the session carries on.
        assert_eq!(execute_line(&handle, "rest 1").await.unwrap(), Flow::Continue);
        assert_eq!(handle.snapshot().break_seconds, 45);

        assert_eq!(execute_line(&handle, "reset").await.unwrap(), Flow::Continue);
        assert_eq!(handle.snapshot().phase, TimerPhase::Idle);

        assert_eq!(execute_line(&handle, "bogus").await.unwrap(), Flow::Continue);
        assert_eq!(execute_line(&handle, "").await.unwrap(), Flow::Continue);
        assert_eq!(execute_line(&handle, "quit").await.unwrap(), Flow::Quit);
    }

    #[tokio::test(start_paused = true)]
    async fn test_execute_line_after_shutdown_fails() {
        let (controller, handle, _alerts) = TimerController::new(TimerConfig::default());
        let task = tokio::spawn(controller.run());
        handle.shutdown().await.unwrap();
        task.await.unwrap();

        assert!(execute_line(&handle, "start").await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_session_stops_controller_at_end_of_input() {
        let (controller, handle, _alerts) = TimerController::new(TimerConfig::default());
        let task = tokio::spawn(controller.run());

        let input: &[u8] = b"start\nstatus\n";
        run_session(handle.clone(), input).await.unwrap();

        task.await.unwrap();
        assert!(handle.start().await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_session_survives_many_redraws() {
        let (controller, handle, _alerts) = TimerController::new(TimerConfig::new(60, 30));
        let task = tokio::spawn(controller.run());
        let (mut writer, reader) = tokio::io::duplex(64);

        let script = async {
            writer.write_all(b"start\n").await.unwrap();
            // Every tick redraws the status line and loops the select again.
            tokio::time::sleep(std::time::Duration::from_millis(5500)).await;
            writer.write_all(b"quit\n").await.unwrap();
        };
        let (result, ()) = tokio::join!(
            run_session(handle.clone(), tokio::io::BufReader::new(reader)),
            script
        );

        result.unwrap();
        task.await.unwrap();
        assert_eq!(handle.snapshot().phase, TimerPhase::Working);
        assert_eq!(handle.snapshot().remaining_seconds, 55);
    }
}
