//! Pomodoro Timer CLI
//!
//! Counts down a work session, then a break, and returns to idle:
//! - 25 minutes of focused work by default
//! - 5 minutes of break by default
//! - a desktop notification and a terminal bell at every transition

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use tokio::io::BufReader;

use pomodoro_timer::cli::{run_session, Cli, Commands, Display, RunArgs};
use pomodoro_timer::{AlertDispatcher, AppConfig, DesktopNotifier, TerminalBell, TimerController};

/// Main entry point
#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    // Exit directly: a blocking stdin read may still be in flight and would
    // keep the runtime from shutting down.
    match execute(cli).await {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            Display::show_error(&format!("{e:#}"));
            std::process::exit(1);
        }
    }
}

/// Initializes the tracing subscriber for logging.
///
/// `RUST_LOG` wins over the `--verbose` flag.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

/// Executes the CLI command.
async fn execute(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Commands::Run(args)) => run_timer(&args).await?,
        Some(Commands::Completions { shell }) => generate_completions(shell),
        None => run_timer(&RunArgs::default()).await?,
    }

    Ok(())
}

/// Builds the configuration, wires the controller, dispatcher and terminal
/// together and runs them until the session ends.
async fn run_timer(args: &RunArgs) -> Result<()> {
    let mut config = AppConfig::load(args.config.as_deref())?;
    args.apply_to(&mut config);
    config.validate().context("invalid configuration")?;

    tracing::debug!(?config, "starting timer");

    let (controller, handle, alerts) = TimerController::new(config.timer);
    let dispatcher = AlertDispatcher::new(
        DesktopNotifier::default(),
        TerminalBell,
        config.notification,
        config.haptics,
        alerts,
    );

    let input = BufReader::new(tokio::io::stdin());
    let ((), (), session) = tokio::join!(
        controller.run(),
        dispatcher.run(),
        run_session(handle, input)
    );
    session
}

/// Generates shell completion scripts.
fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}

// ============================================================================
// Tests
// ============================================================================
