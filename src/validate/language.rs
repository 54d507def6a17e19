//! Recognizing source files of the checked scripting language.

use crate::config::{Config, file_extension};
use crate::error::{HookError, Result};
use regex::Regex;

/// Decides whether a staged file is source code for the syntax and style checks.
///
/// Files with an extension match on the extension alone. Extension-less files
/// (scripts like `bin/deploy`) match when their first line names the
/// interpreter.
#[derive(Debug, Clone)]
pub struct LanguageGate {
    extensions: Vec<String>,
    interpreter: Regex,
}

impl LanguageGate {
    pub fn from_config(config: &Config) -> Result<Self> {
        let interpreter = Regex::new(&config.language.interpreter_pattern).map_err(|e| {
            HookError::Environment(format!(
                "invalid language.interpreter_pattern '{}' - {}",
                config.language.interpreter_pattern, e
            ))
        })?;

        Ok(Self {
            extensions: config
                .language
                .extensions
                .iter()
                .map(|s| s.to_lowercase())
                .collect(),
            interpreter,
        })
    }

    /// True when the staged content must be read to decide: the extension
    /// matches outright, or there is no extension and the first line decides.
    pub fn may_match(&self, path: &str) -> bool {
        match file_extension(path) {
            Some(ext) => self.extensions.contains(&ext),
            None => true,
        }
    }

    /// Final decision given the staged content.
    pub fn matches(&self, path: &str, content: &[u8]) -> bool {
        match file_extension(path) {
            Some(ext) => self.extensions.contains(&ext),
            None => {
                let first_line = content.split(|&b| b == b'\n').next().unwrap_or_default();
                let first_line = String::from_utf8_lossy(first_line);
                self.interpreter.is_match(first_line.trim_end_matches('\r'))
            }
        }
    }
}
