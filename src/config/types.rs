//! Configuration types and defaults for tidyhook.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Extensions never scanned for trailing whitespace (tabular data and SQL dumps).
pub fn default_whitespace_exempt_extensions() -> Vec<String> {
    vec!["csv".to_string(), "sql".to_string()]
}

pub(crate) fn default_language_extensions() -> Vec<String> {
    vec!["pl".to_string(), "pm".to_string(), "t".to_string()]
}

pub(crate) fn default_interpreter_pattern() -> String {
    r"^#!.*\bperl\b".to_string()
}

pub(crate) fn default_syntax_check() -> ToolCheckConfig {
    ToolCheckConfig {
        command: "perl -c".to_string(),
        ..Default::default()
    }
}

pub(crate) fn default_style_check() -> ToolCheckConfig {
    ToolCheckConfig {
        command: "perlcritic --quiet --profile {profile}".to_string(),
        ..Default::default()
    }
}

pub(crate) fn default_policy_profile() -> String {
    ".perlcriticrc".to_string()
}

pub(crate) fn default_indexer() -> String {
    "ctags -R -f {tags_file} .".to_string()
}

pub(crate) fn default_tags_file() -> String {
    "tags".to_string()
}

pub(crate) fn default_true() -> bool {
    true
}

/// How source files of the checked language are recognized.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageConfig {
    /// File extensions (no leading dots, case-insensitive).
    pub extensions: Vec<String>,

    /// Regex applied to the first line of extension-less files.
    pub interpreter_pattern: String,
}

impl Default for LanguageConfig {
    fn default() -> Self {
        Self {
            extensions: default_language_extensions(),
            interpreter_pattern: default_interpreter_pattern(),
        }
    }
}

/// An external check fed the staged file content on stdin.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolCheckConfig {
    /// Command to execute (shell-words parsed; no shell). `{profile}` expands
    /// to the absolute policy-profile path.
    pub command: String,

    /// Disabled checks are reported as skipped.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Unknown fields preserved for forward compatibility.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl Default for ToolCheckConfig {
    fn default() -> Self {
        Self {
            command: String::new(),
            enabled: true,
            extra: BTreeMap::new(),
        }
    }
}

/// Settings for `tidyhook tags`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TagSweepConfig {
    /// Directories whose immediate subdirectories containing `.git` are projects.
    pub roots: Vec<String>,

    /// Explicit project directories, indexed before discovered ones.
    pub projects: Vec<String>,

    /// Glob patterns; matching project paths are skipped.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,

    /// Indexer command run inside each project. `{tags_file}` expands to `tags_file`.
    #[serde(default = "default_indexer")]
    pub indexer: String,

    /// Tag file name written inside each project.
    #[serde(default = "default_tags_file")]
    pub tags_file: String,

    /// Where to write the JSON run manifest, if anywhere.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manifest: Option<String>,
}

impl Default for TagSweepConfig {
    fn default() -> Self {
        Self {
            roots: Vec::new(),
            projects: Vec::new(),
            exclude: Vec::new(),
            indexer: default_indexer(),
            tags_file: default_tags_file(),
            manifest: None,
        }
    }
}
