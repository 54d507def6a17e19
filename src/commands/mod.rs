//! Command implementations for tidyhook.
//!
//! Routes the parsed command line to its handler:
//! - no arguments: check the staged change (the hook itself)
//! - `--link`: install the hook
//! - `tags`: sweep tag files across projects

mod check;
mod link;
mod tags;

use crate::cli::{Cli, Command};
use crate::error::Result;

/// Dispatch a command line to its implementation.
pub fn dispatch(cli: Cli) -> Result<()> {
    if cli.link {
        return link::cmd_link();
    }

    match cli.command {
        None => check::cmd_check(),
        Some(Command::Tags(args)) => tags::cmd_tags(args),
    }
}
