//! Exit code constants for the tidyhook CLI.
//!
//! - 0: Success
//! - 1: Check failure (a staged file failed a check, or a tag sweep project failed)
//! - 2: Environment error (no repository, hook already installed, bad config)
//! - 3: Git operation failure
//! - 4: Malformed diff output

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// At least one staged file failed a check. Git aborts the commit on any non-zero status.
pub const CHECK_FAILURE: i32 = 1;

/// Environment error: repository root not resolvable, hook already present, unreadable config.
pub const ENVIRONMENT_ERROR: i32 = 2;

/// Git operation failure: a git subcommand exited non-zero.
pub const GIT_FAILURE: i32 = 3;

/// Diff output did not have the expected hunk structure.
pub const MALFORMED_DIFF: i32 = 4;
