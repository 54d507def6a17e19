//! Git command runner for tidyhook.
//!
//! Provides a wrapper around git commands with captured stdout/stderr and
//! structured error handling. All git operations go through this module,
//! and through a [`CommandRunner`] so tests can substitute fakes.

use crate::error::{HookError, Result};
use crate::exec::{CommandRunner, ToolCommand, ToolOutput};
use std::path::{Path, PathBuf};

/// Result of a successful git command execution.
///
/// Output is kept verbatim: diff text and blob content are whitespace-sensitive.
#[derive(Debug, Clone)]
pub struct GitOutput {
    pub stdout: String,
    pub stderr: String,
}

impl GitOutput {
    fn from_output(output: &ToolOutput) -> Self {
        Self {
            stdout: output.stdout_text(),
            stderr: output.stderr_text(),
        }
    }

    /// Stdout with surrounding whitespace removed, for single-value queries.
    pub fn trimmed(&self) -> &str {
        self.stdout.trim()
    }

    pub fn is_empty(&self) -> bool {
        self.stdout.trim().is_empty()
    }
}

fn git_command<P: AsRef<Path>>(cwd: P, args: &[&str]) -> ToolCommand {
    ToolCommand::new("git", cwd).args(args.iter().copied())
}

fn run_git_raw<P: AsRef<Path>>(
    runner: &dyn CommandRunner,
    cwd: P,
    args: &[&str],
) -> Result<ToolOutput> {
    let output = runner.run(&git_command(cwd, args)).map_err(|e| {
        HookError::Environment(format!(
            "failed to execute git {}: {} (is git installed?)",
            args.first().unwrap_or(&""),
            e
        ))
    })?;

    if output.success() {
        Ok(output)
    } else {
        let git_output = GitOutput::from_output(&output);
        let error_msg = if git_output.stderr.trim().is_empty() {
            git_output.stdout.trim().to_string()
        } else {
            git_output.stderr.trim().to_string()
        };

        Err(HookError::GitError(format!(
            "git {} failed (exit code {}): {}",
            args.first().unwrap_or(&""),
            output.status.unwrap_or(-1),
            error_msg
        )))
    }
}

/// Run a git command in `cwd`.
///
/// * `Ok(GitOutput)` on exit code 0
/// * `Err(HookError::GitError)` on non-zero exit (exit code 3)
/// * `Err(HookError::Environment)` when git cannot be started
pub fn run_git<P: AsRef<Path>>(
    runner: &dyn CommandRunner,
    cwd: P,
    args: &[&str],
) -> Result<GitOutput> {
    run_git_raw(runner, cwd, args).map(|output| GitOutput::from_output(&output))
}

/// Get the repository root directory using `git rev-parse --show-toplevel`.
///
/// Works from any location inside the working tree. Outside a repository this
/// is an environment error (exit 2), not a git failure.
pub fn get_repo_root<P: AsRef<Path>>(runner: &dyn CommandRunner, cwd: P) -> Result<PathBuf> {
    match run_git(runner, cwd, &["rev-parse", "--show-toplevel"]) {
        Ok(output) if !output.is_empty() => Ok(PathBuf::from(output.trimmed())),
        Ok(_) => Err(HookError::Environment(
            "not inside a git working tree. Run tidyhook from within a repository checkout."
                .to_string(),
        )),
        Err(HookError::GitError(msg))
            if msg.contains("not a git repository") || msg.contains("fatal:") =>
        {
            Err(HookError::Environment(
                "not inside a git repository. Run tidyhook from within a git repository."
                    .to_string(),
            ))
        }
        Err(err) => Err(err),
    }
}

/// Resolve the hooks directory, honoring `core.hooksPath`.
///
/// `git rev-parse --git-path hooks` may print a path relative to `repo_root`.
pub fn hooks_dir<P: AsRef<Path>>(runner: &dyn CommandRunner, repo_root: P) -> Result<PathBuf> {
    let repo_root = repo_root.as_ref();
    let output = run_git(runner, repo_root, &["rev-parse", "--git-path", "hooks"])?;
    let path = PathBuf::from(output.trimmed());
    if path.is_absolute() {
        Ok(path)
    } else {
        Ok(repo_root.join(path))
    }
}

/// Read the staged (index) version of `path` via `git show :<path>`.
///
/// Unstaged edits in the working tree do not affect the result.
pub fn staged_blob<P: AsRef<Path>>(
    runner: &dyn CommandRunner,
    repo_root: P,
    path: &str,
) -> Result<Vec<u8>> {
    let object = format!(":{}", path);
    run_git_raw(runner, repo_root, &["show", &object]).map(|output| output.stdout)
}
