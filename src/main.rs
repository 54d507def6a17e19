//! tidyhook: commit-time lint hook for staged changes.
//!
//! This is the main entry point for the `tidyhook` CLI. It sets up logging
//! and colour, parses arguments, dispatches to the command handler, and maps
//! errors to exit codes git and scripts can act on.

mod cli;
mod commands;
pub mod config;
pub mod context;
pub mod diff;
pub mod error;
pub mod exec;
pub mod exit_codes;
pub mod fs;
pub mod git;
pub mod validate;

#[cfg(test)]
mod test_support;

use cli::Cli;
use std::io::IsTerminal;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter (EnvFilter syntax).
const LOG_ENV: &str = "TIDYHOOK_LOG";

fn main() -> ExitCode {
    init_logging();
    if !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    let cli = Cli::parse_args();

    match commands::dispatch(cli) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::from(err.exit_code() as u8)
        }
    }
}

/// Log to stderr so stdout carries only the report. Defaults to `warn`.
fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
