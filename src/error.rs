//! Error types for the tidyhook CLI.
//!
//! Uses thiserror for derive macros. Every variant maps to an exit code so
//! `main` can translate any failure into a status git understands.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for tidyhook operations.
#[derive(Error, Debug)]
pub enum HookError {
    /// The environment is not usable: no repository, hook already present, bad config.
    #[error("{0}")]
    Environment(String),

    /// Git operation failed.
    #[error("Git operation failed: {0}")]
    GitError(String),

    /// Diff output broke the hunk structure the line tracker relies on.
    #[error("Malformed diff: {0}")]
    MalformedDiff(String),

    /// One or more staged files failed checks.
    #[error(
        "{0} file(s) failed pre-commit checks. Fix the issues above, or bypass with `git commit --no-verify`."
    )]
    ChecksFailed(usize),

    /// One or more projects failed to index during a tag sweep.
    #[error("{0} project(s) failed to index")]
    IndexFailed(usize),
}

impl HookError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            HookError::Environment(_) => exit_codes::ENVIRONMENT_ERROR,
            HookError::GitError(_) => exit_codes::GIT_FAILURE,
            HookError::MalformedDiff(_) => exit_codes::MALFORMED_DIFF,
            HookError::ChecksFailed(_) => exit_codes::CHECK_FAILURE,
            HookError::IndexFailed(_) => exit_codes::CHECK_FAILURE,
        }
    }
}

/// Result type alias for tidyhook operations.
pub type Result<T> = std::result::Result<T, HookError>;
