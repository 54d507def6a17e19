//! Diff parsing primitives for tidyhook.
//!
//! This module turns git output about the staged change into typed values:
//! - The changed-file list from `git diff --cached --raw -z`
//! - Per-file added lines with new-file line numbers, tracked through
//!   context, addition and removal lines of each hunk
//!
//! Hunk headers may omit the `,len` part (git does this for one-line ranges).
//! A content line before any hunk header is a malformed diff, not a skip.

mod api;
mod helpers;
mod parser;

#[cfg(test)]
mod tests;

pub use api::{AddedLine, ChangeKind, ChangedFile, EntryMode, changed_files, staged_diff};
pub use parser::parse_added_lines;
