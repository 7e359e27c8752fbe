//! substreams-versions - impact analysis and version bumping for substreams monorepos

mod cli;
mod exit_codes;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use cli::{output, Cli};

fn main() -> ExitCode {
    let cli = Cli::parse();
    let _guard = init_tracing(cli.verbose, cli.quiet);

    match cli.execute() {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS),
        Err(e) => {
            output::error(&format!("{:#}", e));
            ExitCode::from(exit_codes::for_error(&e))
        }
    }
}

/// Set up tracing with two layers:
/// - Console on stderr: `-v`/`-q` or RUST_LOG (default: warn)
/// - File: always debug-level JSON to ~/.substreams-versions/logs/
fn init_tracing(verbose: bool, quiet: bool) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let console_filter = if verbose {
        EnvFilter::new("debug")
    } else if quiet {
        EnvFilter::new("error")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(console_filter);

    if let Some(log_dir) = log_directory() {
        let file_appender = tracing_appender::rolling::daily(&log_dir, "substreams-versions.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        tracing_subscriber::registry()
            .with(console_layer)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(non_blocking)
                    .with_target(true)
                    .with_filter(EnvFilter::new("debug")),
            )
            .init();

        return Some(guard);
    }

    // Fallback: console only
    tracing_subscriber::registry().with(console_layer).init();

    None
}

/// Returns the log directory path, creating it if needed.
fn log_directory() -> Option<std::path::PathBuf> {
    let log_dir = dirs::home_dir()?
        .join(".substreams-versions")
        .join("logs");
    std::fs::create_dir_all(&log_dir).ok()?;
    Some(log_dir)
}
