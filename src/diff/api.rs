//! Public API for diff parsing.

use crate::error::Result;
use crate::exec::CommandRunner;
use crate::git::run_git;
use std::path::Path;

use super::helpers::parse_raw_changes;

/// How a staged file differs from the previous commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeKind {
    Added,
    Modified,
    Renamed { from: String },
}

/// What the staged index entry holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntryMode {
    /// Regular file, executable or not (modes 100644 and 100755).
    #[default]
    Regular,
    /// Symbolic link (mode 120000); the blob is the link target.
    Symlink,
}

/// A file added, modified or renamed in the staged change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangedFile {
    /// Repository-relative path in the new snapshot (forward slashes).
    pub path: String,
    pub kind: ChangeKind,
    pub mode: EntryMode,
}

impl ChangedFile {
    pub fn new(path: impl Into<String>, kind: ChangeKind) -> Self {
        Self {
            path: path.into(),
            kind,
            mode: EntryMode::Regular,
        }
    }

    pub fn with_mode(mut self, mode: EntryMode) -> Self {
        self.mode = mode;
        self
    }
}

/// A single added line from a diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddedLine {
    /// Line number in the new file (1-based).
    pub line_number: usize,
    /// The content of the added line (without leading '+').
    pub content: String,
}

/// List files added, modified or renamed in the index relative to HEAD.
///
/// Deleted files are excluded since there is nothing left to lint, and so
/// are submodule entries (gitlinks), which have no content in this
/// repository. On an unborn branch git compares against the empty tree, so
/// every staged file shows up as added.
pub fn changed_files<P: AsRef<Path>>(
    runner: &dyn CommandRunner,
    repo_root: P,
) -> Result<Vec<ChangedFile>> {
    let output = run_git(
        runner,
        repo_root,
        &[
            "diff",
            "--cached",
            "--raw",
            "-z",
            "--diff-filter=AMR",
            "-M",
        ],
    )?;

    parse_raw_changes(&output.stdout)
}

/// Unified diff of one staged file against HEAD.
///
/// Renames pass both paths so git pairs them and only real edits show up as
/// added lines. Paths are passed with `:(literal)` magic so names containing
/// `*`, `?` or `[` match only themselves.
pub fn staged_diff<P: AsRef<Path>>(
    runner: &dyn CommandRunner,
    repo_root: P,
    file: &ChangedFile,
) -> Result<String> {
    let mut pathspecs = Vec::with_capacity(2);
    if let ChangeKind::Renamed { from } = &file.kind {
        pathspecs.push(literal_pathspec(from));
    }
    pathspecs.push(literal_pathspec(&file.path));

    let mut args = vec!["diff", "--cached", "--no-color", "--no-ext-diff", "-M", "--"];
    args.extend(pathspecs.iter().map(String::as_str));

    run_git(runner, repo_root, &args).map(|output| output.stdout)
}

fn literal_pathspec(path: &str) -> String {
    format!(":(literal){}", path)
}
