//! Trailing-whitespace rule for added lines.

use crate::config::Config;
use crate::diff::{AddedLine, parse_added_lines};
use crate::error::Result;
use regex::Regex;
use std::sync::LazyLock;

static TRAILING_WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+$").expect("trailing whitespace regex is valid"));

pub const TRAILING_WHITESPACE_MESSAGE: &str = "trailing whitespace";

/// An added line that ends in whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhitespaceViolation {
    /// Line number in the staged file (1-based).
    pub line_number: usize,
    pub message: String,
}

/// Scan one file's unified diff for added lines ending in whitespace.
///
/// Exempt extensions short-circuit before the diff is parsed. A malformed
/// diff is an error, not an empty result.
pub fn check_trailing_whitespace(
    config: &Config,
    path: &str,
    diff: &str,
) -> Result<Vec<WhitespaceViolation>> {
    if config.is_whitespace_exempt(path) {
        return Ok(Vec::new());
    }

    let added = parse_added_lines(diff)?;
    Ok(scan_added_lines(&added))
}

pub fn scan_added_lines(added: &[AddedLine]) -> Vec<WhitespaceViolation> {
    added
        .iter()
        .filter(|line| TRAILING_WHITESPACE.is_match(&line.content))
        .map(|line| WhitespaceViolation {
            line_number: line.line_number,
            message: TRAILING_WHITESPACE_MESSAGE.to_string(),
        })
        .collect()
}

/// Render violations as report text, one per line.
///
/// ```text
/// line 12: trailing whitespace
/// line 40: trailing whitespace
/// ```
pub fn format_violations(violations: &[WhitespaceViolation]) -> String {
    violations
        .iter()
        .map(|v| format!("line {}: {}\n", v.line_number, v.message))
        .collect()
}
