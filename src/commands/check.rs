//! Implementation of the default hook mode.
//!
//! Enumerates the staged change and runs every check on every file. Failing
//! files are printed to stdout as a highlighted path followed by the
//! concatenated findings; the bypass advisory goes to stderr through the
//! returned [`HookError::ChecksFailed`].

use crate::config::Config;
use crate::context::HookContext;
use crate::diff::changed_files;
use crate::error::{HookError, Result};
use crate::exec::{CommandRunner, SystemRunner};
use crate::validate::{CheckSummary, ContentRuleRunner, FileReport};
use colored::Colorize;
use std::io::{self, Write};

/// Run the hook against the staged change of the current repository.
pub fn cmd_check() -> Result<()> {
    let runner = SystemRunner;
    let ctx = HookContext::resolve(&runner)?;
    let config = Config::load_or_default(ctx.config_path())?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let summary = run_checks(&ctx, &config, &runner, &mut out)?;

    if summary.passed() {
        Ok(())
    } else {
        Err(HookError::ChecksFailed(summary.failures.len()))
    }
}

/// Check every staged file, writing each failing file's block to `out`.
///
/// Files are processed in the order git lists them; one file's findings never
/// stop the next file from being checked.
pub fn run_checks(
    ctx: &HookContext,
    config: &Config,
    runner: &dyn CommandRunner,
    out: &mut dyn Write,
) -> Result<CheckSummary> {
    let rules = ContentRuleRunner::new(ctx, config, runner)?;
    let files = changed_files(runner, &ctx.repo_root)?;
    tracing::debug!(count = files.len(), "staged files to check");

    let mut summary = CheckSummary::default();
    for file in &files {
        let report = rules.check_file(file)?;
        summary.files_checked += 1;

        if !report.passed() {
            write_report(out, &report)?;
            summary.failures.push(report);
        }
    }

    out.flush().map_err(output_error)?;
    Ok(summary)
}

fn write_report(out: &mut dyn Write, report: &FileReport) -> Result<()> {
    writeln!(out, "{}", report.path.as_str().red().bold()).map_err(output_error)?;
    write!(out, "{}", report.output()).map_err(output_error)
}

fn output_error(e: io::Error) -> HookError {
    HookError::Environment(format!("failed to write report: {}", e))
}
