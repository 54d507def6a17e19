//! Config loading, validation, and utility operations.

use super::model::Config;
use super::types::TagSweepConfig;
use crate::error::{HookError, Result};
use regex::Regex;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

fn read_yaml<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        HookError::Environment(format!(
            "failed to read config file '{}': {}",
            path.display(),
            e
        ))
    })?;

    parse_yaml(&content)
}

/// An empty or comment-only document parses as `{}` so every field takes its default.
fn parse_yaml<T: DeserializeOwned>(yaml: &str) -> Result<T> {
    let has_content = yaml
        .lines()
        .any(|l| !l.trim().is_empty() && !l.trim_start().starts_with('#'));
    let yaml = if has_content { yaml } else { "{}" };
    serde_yaml::from_str(yaml)
        .map_err(|e| HookError::Environment(format!("failed to parse config YAML: {}", e)))
}

fn validate_extensions(field: &str, extensions: &[String]) -> Result<()> {
    for ext in extensions {
        if ext.is_empty() {
            return Err(HookError::Environment(format!(
                "config validation failed: {} entries must be non-empty",
                field
            )));
        }
        if ext.starts_with('.') {
            return Err(HookError::Environment(format!(
                "config validation failed: {} entries must not have leading dots (found '{}'). Use '{}' instead.",
                field,
                ext,
                ext.trim_start_matches('.')
            )));
        }
    }
    Ok(())
}

/// Lowercased extension of the final path component, if any.
pub(crate) fn file_extension(path: &str) -> Option<String> {
    Path::new(path)
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .filter(|ext| !ext.is_empty())
}

impl Config {
    /// Load config from a YAML file.
    ///
    /// * `Ok(Config)` - Successfully loaded and validated config
    /// * `Err(HookError::Environment)` - Read error, parse error or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config: Config = read_yaml(path.as_ref())?;
        config.validate()?;
        Ok(config)
    }

    /// Load config if the file exists, otherwise return defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            tracing::debug!(path = %path.display(), "loading hook config");
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = parse_yaml(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate config values and return error on invalid values.
    ///
    /// Validation rules:
    /// - extension lists must hold non-empty entries without leading dots
    /// - enabled checks must have a non-empty command
    /// - `language.interpreter_pattern` must be a valid regex
    pub fn validate(&self) -> Result<()> {
        validate_extensions(
            "whitespace_exempt_extensions",
            &self.whitespace_exempt_extensions,
        )?;
        validate_extensions("language.extensions", &self.language.extensions)?;

        for (field, check) in [
            ("syntax_check", &self.syntax_check),
            ("style_check", &self.style_check),
        ] {
            if check.enabled && check.command.trim().is_empty() {
                return Err(HookError::Environment(format!(
                    "config validation failed: {}.command must be non-empty when the check is enabled",
                    field
                )));
            }
        }

        Regex::new(&self.language.interpreter_pattern).map_err(|e| {
            HookError::Environment(format!(
                "config validation failed: invalid language.interpreter_pattern '{}' - {}",
                self.language.interpreter_pattern, e
            ))
        })?;

        Ok(())
    }

    /// True if `path` is exempt from the trailing-whitespace scan.
    pub fn is_whitespace_exempt(&self, path: &str) -> bool {
        file_extension(path).is_some_and(|ext| {
            self.whitespace_exempt_extensions
                .iter()
                .any(|e| e.eq_ignore_ascii_case(&ext))
        })
    }

    /// Absolute path of the policy profile for a repository.
    pub fn profile_path<P: AsRef<Path>>(&self, repo_root: P) -> PathBuf {
        repo_root.as_ref().join(&self.policy_profile)
    }
}

impl TagSweepConfig {
    /// Load tag sweep settings from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config: TagSweepConfig = read_yaml(path.as_ref())?;
        config.validate()?;
        Ok(config)
    }

    /// Parse tag sweep settings from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: TagSweepConfig = parse_yaml(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validation rules:
    /// - at least one root or project
    /// - `indexer` and `tags_file` must be non-empty
    pub fn validate(&self) -> Result<()> {
        if self.roots.is_empty() && self.projects.is_empty() {
            return Err(HookError::Environment(
                "config validation failed: tag sweep needs at least one entry in roots or projects"
                    .to_string(),
            ));
        }
        if self.indexer.trim().is_empty() {
            return Err(HookError::Environment(
                "config validation failed: indexer must be non-empty".to_string(),
            ));
        }
        if self.tags_file.trim().is_empty() {
            return Err(HookError::Environment(
                "config validation failed: tags_file must be non-empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Expand a leading `~/` to `$HOME`.
pub(crate) fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = std::env::var_os("HOME")
    {
        return PathBuf::from(home).join(rest);
    }
    PathBuf::from(path)
}
