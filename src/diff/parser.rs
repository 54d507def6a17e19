//! Core diff parsing logic: line classification and the new-file line cursor.

use crate::error::{HookError, Result};

use super::api::AddedLine;
use super::helpers::parse_hunk_header;

/// Ranges from a hunk header line (`@@ -old_start,old_len +new_start,new_len @@`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffHunk {
    pub old_start: usize,
    pub old_len: usize,
    pub new_start: usize,
    pub new_len: usize,
}

/// Classification of a single line of unified diff output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffLine<'a> {
    HunkHeader(DiffHunk),
    /// Unchanged line, prefixed with a single space.
    Context,
    /// Added line; holds the content after the leading `+`.
    Addition(&'a str),
    Removal,
    /// File headers, metadata, `\ No newline at end of file`.
    Other,
}

/// Tracks the current line number in the new version of a file while
/// walking one file's unified diff.
#[derive(Debug, Clone, Default)]
pub struct HunkLineTracker {
    cursor: Option<usize>,
    remaining_old: usize,
    remaining_new: usize,
}

impl HunkLineTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while the current hunk still expects body lines.
    ///
    /// Inside a body, `+++ x` is an added line whose content starts with `++`;
    /// outside it is a file header.
    fn in_hunk_body(&self) -> bool {
        self.remaining_old > 0 || self.remaining_new > 0
    }

    /// Classify `line` without changing the tracker state.
    pub fn classify<'a>(&self, line: &'a str) -> DiffLine<'a> {
        if line.starts_with("@@ ")
            && let Some(hunk) = parse_hunk_header(line)
        {
            return DiffLine::HunkHeader(hunk);
        }

        let in_body = self.in_hunk_body();
        if let Some(content) = line.strip_prefix('+') {
            if in_body || !line.starts_with("+++") {
                return DiffLine::Addition(content);
            }
        } else if line.starts_with('-') {
            if in_body || !line.starts_with("---") {
                return DiffLine::Removal;
            }
        } else if line.starts_with(' ') {
            return DiffLine::Context;
        }

        DiffLine::Other
    }

    /// Consume one diff line.
    ///
    /// Returns the added line with its new-file line number for additions,
    /// `None` for everything else. A context or added line before any hunk
    /// header is a [`HookError::MalformedDiff`].
    pub fn feed(&mut self, line: &str) -> Result<Option<AddedLine>> {
        match self.classify(line) {
            DiffLine::HunkHeader(hunk) => {
                self.cursor = Some(hunk.new_start);
                self.remaining_old = hunk.old_len;
                self.remaining_new = hunk.new_len;
                Ok(None)
            }
            DiffLine::Context => {
                self.require_cursor("context", line)?;
                self.advance();
                self.remaining_old = self.remaining_old.saturating_sub(1);
                self.remaining_new = self.remaining_new.saturating_sub(1);
                Ok(None)
            }
            DiffLine::Addition(content) => {
                let line_number = self.require_cursor("added", line)?;
                self.advance();
                self.remaining_new = self.remaining_new.saturating_sub(1);
                Ok(Some(AddedLine {
                    line_number,
                    content: content.to_string(),
                }))
            }
            DiffLine::Removal => {
                self.remaining_old = self.remaining_old.saturating_sub(1);
                Ok(None)
            }
            DiffLine::Other => Ok(None),
        }
    }

    fn require_cursor(&self, kind: &str, line: &str) -> Result<usize> {
        self.cursor.ok_or_else(|| {
            HookError::MalformedDiff(format!(
                "{} line appears before any hunk header: {:?}",
                kind, line
            ))
        })
    }

    fn advance(&mut self) {
        if let Some(cursor) = self.cursor.as_mut() {
            *cursor += 1;
        }
    }
}

/// Parse the added lines of a single file's unified diff.
///
/// Lines are split on `\n` only, so a `\r` from CRLF content stays part of the
/// line content.
pub fn parse_added_lines(diff_output: &str) -> Result<Vec<AddedLine>> {
    let mut tracker = HunkLineTracker::new();
    let mut result = Vec::new();

    for line in diff_output.split_terminator('\n') {
        if let Some(added) = tracker.feed(line)? {
            result.push(added);
        }
    }

    Ok(result)
}
