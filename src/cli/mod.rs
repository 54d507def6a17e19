//! CLI argument parsing for tidyhook.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// tidyhook: commit-time lint hook for staged changes.
///
/// With no arguments, checks every file added, modified or renamed in the
/// index: trailing whitespace on added lines, then syntax and style checks
/// on staged source files. Exits 1 if any file fails.
#[derive(Parser, Debug)]
#[command(name = "tidyhook")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Install tidyhook as this repository's pre-commit hook (symlink) and exit.
    #[arg(long)]
    pub link: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Subcommands besides the default check mode.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Regenerate tag files for a configured set of project directories.
    ///
    /// Runs the configured indexer (ctags by default) inside every project
    /// and optionally writes a JSON manifest of the run.
    Tags(TagsArgs),
}

/// Arguments for the `tags` command.
#[derive(Parser, Debug)]
pub struct TagsArgs {
    /// Path to the tag sweep settings file (YAML).
    #[arg(long, short)]
    pub config: PathBuf,

    /// Print the commands that would run without running them.
    #[arg(long)]
    pub dry_run: bool,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
