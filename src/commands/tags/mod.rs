//! Implementation of `tidyhook tags`.
//!
//! Regenerates tag files across a set of project directories:
//! 1. enumerate projects from the settings file (see [`discover_projects`])
//! 2. run the indexer once inside each project, with no shell
//! 3. optionally write a JSON manifest of the outcomes
//!
//! A failing project never stops the sweep; the command exits non-zero at the
//! end if any project failed.

mod discovery;
mod manifest;


pub use discovery::discover_projects;
pub use manifest::SweepManifest;

use crate::cli::TagsArgs;
use crate::config::{TagSweepConfig, expand_home};
use crate::error::{HookError, Result};
use crate::exec::{CommandRunner, SystemRunner, ToolCommand};
use colored::Colorize;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

const TAGS_FILE_PLACEHOLDER: &str = "{tags_file}";

/// How indexing one project went.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectStatus {
    Indexed,
    /// The indexer ran and failed, or the project directory is missing.
    Failed(String),
    /// The indexer could not be started.
    Unavailable(String),
}

impl ProjectStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, ProjectStatus::Indexed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectOutcome {
    pub path: PathBuf,
    pub status: ProjectStatus,
}

pub fn cmd_tags(args: TagsArgs) -> Result<()> {
    let config = TagSweepConfig::load(&args.config)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let outcomes = run_sweep(&config, &SystemRunner, args.dry_run, &mut out)?;

    if args.dry_run {
        return Ok(());
    }

    if let Some(manifest_path) = &config.manifest {
        let manifest_path = expand_home(manifest_path);
        SweepManifest::from_outcomes(&outcomes, &config.tags_file).write(&manifest_path)?;
        tracing::debug!(manifest = %manifest_path.display(), "tag manifest written");
    }

    let failed = outcomes.iter().filter(|o| !o.status.is_success()).count();
    if failed > 0 {
        return Err(HookError::IndexFailed(failed));
    }
    Ok(())
}

/// Run the indexer in every project and report one line per project to `out`.
///
/// With `dry_run` the commands are printed instead of run and no outcomes are
/// returned.
pub fn run_sweep(
    config: &TagSweepConfig,
    runner: &dyn CommandRunner,
    dry_run: bool,
    out: &mut dyn Write,
) -> Result<Vec<ProjectOutcome>> {
    let argv = indexer_argv(config)?;
    let Some((program, args)) = argv.split_first() else {
        return Err(HookError::Environment(
            "config validation failed: indexer must be non-empty".to_string(),
        ));
    };
    let projects = discover_projects(config)?;
    tracing::debug!(count = projects.len(), "projects to index");

    let mut outcomes = Vec::new();
    for project in projects {
        let command = ToolCommand::new(program, &project).args(args);

        if dry_run {
            writeln!(out, "{}: {}", project.display(), command.display()).map_err(output_error)?;
            continue;
        }

        let status = index_project(runner, &project, &command);
        write_outcome(out, &project, &status)?;
        outcomes.push(ProjectOutcome {
            path: project,
            status,
        });
    }

    out.flush().map_err(output_error)?;
    Ok(outcomes)
}

/// Split the indexer command and substitute the tag file name in every word.
fn indexer_argv(config: &TagSweepConfig) -> Result<Vec<String>> {
    let words = shell_words::split(&config.indexer).map_err(|e| {
        HookError::Environment(format!(
            "config validation failed: cannot parse indexer '{}' - {}",
            config.indexer, e
        ))
    })?;

    Ok(words
        .into_iter()
        .map(|word| word.replace(TAGS_FILE_PLACEHOLDER, &config.tags_file))
        .collect())
}

fn index_project(runner: &dyn CommandRunner, project: &Path, command: &ToolCommand) -> ProjectStatus {
    if !project.is_dir() {
        return ProjectStatus::Failed("project directory does not exist".to_string());
    }

    tracing::debug!(project = %project.display(), command = %command.display(), "running indexer");
    let output = match runner.run(command) {
        Ok(output) => output,
        Err(e) => {
            return ProjectStatus::Unavailable(format!(
                "could not run `{}`: {}",
                command.program, e
            ));
        }
    };

    if output.success() {
        return ProjectStatus::Indexed;
    }

    let text = output.combined_text();
    let text = text.trim();
    if text.is_empty() {
        ProjectStatus::Failed(match output.status {
            Some(code) => format!("`{}` exited with status {}", command.display(), code),
            None => format!("`{}` was terminated by a signal", command.display()),
        })
    } else {
        ProjectStatus::Failed(text.to_string())
    }
}

fn write_outcome(out: &mut dyn Write, project: &Path, status: &ProjectStatus) -> Result<()> {
    let line = match status {
        ProjectStatus::Indexed => format!("{} {}", "indexed".green(), project.display()),
        ProjectStatus::Failed(msg) => format!(
            "{} {}: {}",
            "failed".red().bold(),
            project.display(),
            first_line(msg)
        ),
        ProjectStatus::Unavailable(msg) => format!(
            "{} {}: {}",
            "unavailable".red().bold(),
            project.display(),
            first_line(msg)
        ),
    };
    writeln!(out, "{}", line).map_err(output_error)
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or(text)
}

fn output_error(e: io::Error) -> HookError {
    HookError::Environment(format!("failed to write report: {}", e))
}
