//! Repository context resolution for tidyhook.
//!
//! The repository root is resolved exactly once per invocation and carried in
//! a [`HookContext`] that every component receives explicitly. Git runs
//! pre-commit hooks from the top of the working tree, but resolving through
//! `git rev-parse` keeps manual runs from subdirectories working too.

use crate::error::{HookError, Result};
use crate::exec::CommandRunner;
use crate::git;
use std::env;
use std::path::{Path, PathBuf};

/// Hook configuration file name at the repository root.
pub const CONFIG_FILE_NAME: &str = ".tidyhook.yaml";

/// Hook file name inside the hooks directory.
pub const HOOK_NAME: &str = "pre-commit";

/// Resolved paths for one tidyhook invocation. All paths are absolute.
#[derive(Debug, Clone)]
pub struct HookContext {
    /// Top of the working tree.
    pub repo_root: PathBuf,

    /// Hooks directory (`.git/hooks` unless `core.hooksPath` says otherwise).
    pub hooks_dir: PathBuf,
}

impl HookContext {
    /// Resolve the context from the current working directory.
    ///
    /// * `Err(HookError::Environment)` - If not in a git repository (exit code 2)
    pub fn resolve(runner: &dyn CommandRunner) -> Result<Self> {
        let cwd = env::current_dir().map_err(|e| {
            HookError::Environment(format!("failed to get current working directory: {}", e))
        })?;

        Self::resolve_from(runner, &cwd)
    }

    /// Resolve the context from a specific directory.
    pub fn resolve_from<P: AsRef<Path>>(runner: &dyn CommandRunner, cwd: P) -> Result<Self> {
        let repo_root = git::get_repo_root(runner, cwd)?;
        let hooks_dir = git::hooks_dir(runner, &repo_root)?;

        Ok(Self {
            repo_root,
            hooks_dir,
        })
    }

    /// Path of the optional hook configuration file.
    pub fn config_path(&self) -> PathBuf {
        self.repo_root.join(CONFIG_FILE_NAME)
    }

    /// Where `--link` installs the hook.
    pub fn hook_path(&self) -> PathBuf {
        self.hooks_dir.join(HOOK_NAME)
    }
}
