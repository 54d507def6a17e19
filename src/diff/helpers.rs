//! Helper functions for diff parsing.

use regex::Regex;
use std::sync::LazyLock;

use super::api::{ChangeKind, ChangedFile, EntryMode};
use super::parser::DiffHunk;
use crate::error::{HookError, Result};

static HUNK_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^@@ -(\d+)(?:,(\d+))? \+(\d+)(?:,(\d+))? @@").expect("hunk header regex is valid")
});

/// Parse a hunk header line.
///
/// Format: "@@ -old_start,old_len +new_start,new_len @@ optional context".
/// Either length may be omitted, in which case it is 1.
pub(super) fn parse_hunk_header(line: &str) -> Option<DiffHunk> {
    let caps = HUNK_HEADER.captures(line)?;
    let number = |idx: usize| -> Option<usize> {
        match caps.get(idx) {
            Some(m) => m.as_str().parse().ok(),
            None => Some(1),
        }
    };

    Some(DiffHunk {
        old_start: number(1)?,
        old_len: number(2)?,
        new_start: number(3)?,
        new_len: number(4)?,
    })
}

/// Mode git uses for submodule entries.
const GITLINK_MODE: &str = "160000";
/// Mode git uses for symbolic links.
const SYMLINK_MODE: &str = "120000";

/// Parse `git diff --raw -z` output.
///
/// Each record is a header followed by NUL separated paths:
/// `:100644 100644 <sha> <sha> M\0path\0`, or for renames
/// `:100644 100644 <sha> <sha> R087\0old\0new\0`.
/// Status letters other than A, M and R are skipped along with their paths,
/// and so are gitlinks (submodule entries).
pub(super) fn parse_raw_changes(output: &str) -> Result<Vec<ChangedFile>> {
    let mut fields = output.split('\0').filter(|f| !f.is_empty());
    let mut files = Vec::new();

    while let Some(header) = fields.next() {
        let (new_mode, status) = parse_raw_header(header)?;
        let mut take_path = |what: &str| {
            fields.next().map(normalize_path).ok_or_else(|| {
                HookError::GitError(format!(
                    "unexpected end of raw diff output: missing {} for status '{}'",
                    what, status
                ))
            })
        };

        let file = match status.chars().next() {
            Some('A') => Some(ChangedFile::new(take_path("path")?, ChangeKind::Added)),
            Some('M') => Some(ChangedFile::new(take_path("path")?, ChangeKind::Modified)),
            Some('R') => {
                let from = take_path("rename source")?;
                let to = take_path("rename target")?;
                Some(ChangedFile::new(to, ChangeKind::Renamed { from }))
            }
            // Copies carry two paths, everything else one.
            Some('C') => {
                take_path("copy source")?;
                take_path("copy target")?;
                None
            }
            _ => {
                take_path("path")?;
                None
            }
        };

        match (file, new_mode) {
            (Some(_), GITLINK_MODE) => {}
            (Some(file), SYMLINK_MODE) => files.push(file.with_mode(EntryMode::Symlink)),
            (Some(file), _) => files.push(file),
            (None, _) => {}
        }
    }

    Ok(files)
}

/// Split a raw header (`:old_mode new_mode old_sha new_sha status`) into the
/// new mode and the status.
fn parse_raw_header(header: &str) -> Result<(&str, &str)> {
    let malformed = || {
        HookError::GitError(format!("unexpected raw diff record header: {:?}", header))
    };

    let rest = header.strip_prefix(':').ok_or_else(malformed)?;
    let parts: Vec<&str> = rest.split_whitespace().collect();
    match parts.as_slice() {
        [_old_mode, new_mode, _old_sha, _new_sha, status] => Ok((*new_mode, *status)),
        _ => Err(malformed()),
    }
}

/// Normalize a file path to use forward slashes.
pub(super) fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
}
