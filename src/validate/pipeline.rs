//! External check steps.
//!
//! A step runs one external tool against staged content piped to its stdin.
//! A non-zero exit is a failure whose message is the tool's own output; a
//! tool that cannot be started is reported as unavailable. Both block the
//! commit.

use crate::config::ToolCheckConfig;
use crate::error::{HookError, Result};
use crate::exec::{CommandRunner, ToolCommand};
use std::path::Path;

/// Placeholder in check commands for the policy-profile path.
pub const PROFILE_PLACEHOLDER: &str = "{profile}";

/// Status of a validation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationStepStatus {
    Pass,
    /// The tool ran and reported findings.
    Fail,
    Skip,
    /// The tool could not be started.
    Unavailable,
}

/// Result of a single validation step.
#[derive(Debug, Clone)]
pub struct ValidationStepResult {
    pub name: String,
    pub status: ValidationStepStatus,
    pub message: Option<String>,
}

impl ValidationStepResult {
    pub fn pass(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: ValidationStepStatus::Pass,
            message: None,
        }
    }

    pub fn fail(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: ValidationStepStatus::Fail,
            message: Some(message.into()),
        }
    }

    pub fn skip(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: ValidationStepStatus::Skip,
            message: Some(message.into()),
        }
    }

    pub fn unavailable(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: ValidationStepStatus::Unavailable,
            message: Some(message.into()),
        }
    }

    /// True when this step stops the commit.
    pub fn is_blocking(&self) -> bool {
        matches!(
            self.status,
            ValidationStepStatus::Fail | ValidationStepStatus::Unavailable
        )
    }

    /// Text this step contributes to the file report: empty unless blocking.
    pub fn report_text(&self) -> &str {
        if self.is_blocking() {
            self.message.as_deref().unwrap_or_default()
        } else {
            ""
        }
    }
}

/// A configured external check, parsed once per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCheck {
    name: String,
    argv: Vec<String>,
    display: String,
}

impl ToolCheck {
    /// Build a check from config. Returns `Ok(None)` when the check is disabled.
    ///
    /// The command is split with shell-words rules (no shell is involved) and
    /// `{profile}` is substituted per argument, so profile paths containing
    /// spaces stay a single argument.
    pub fn from_config(
        name: &str,
        config: &ToolCheckConfig,
        profile: &Path,
    ) -> Result<Option<Self>> {
        if !config.enabled {
            return Ok(None);
        }

        let command = config.command.trim();
        let words = shell_words::split(command).map_err(|e| {
            HookError::Environment(format!(
                "failed to parse {} command: {}\nCommand: {}\nFix: check for unmatched quotes or invalid escape sequences.",
                name, e, command
            ))
        })?;
        if words.is_empty() {
            return Err(HookError::Environment(format!(
                "{} command is empty after parsing.\nCommand: {}",
                name, command
            )));
        }

        let profile = profile.to_string_lossy();
        let argv: Vec<String> = words
            .into_iter()
            .map(|w| w.replace(PROFILE_PLACEHOLDER, &profile))
            .collect();

        Ok(Some(Self {
            name: name.to_string(),
            display: shell_words::join(&argv),
            argv,
        }))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run the check with `content` on stdin, from `cwd`.
    pub fn run(&self, runner: &dyn CommandRunner, cwd: &Path, content: &[u8]) -> ValidationStepResult {
        let Some(command) = ToolCommand::from_argv(self.argv.clone(), cwd) else {
            return ValidationStepResult::fail(&self.name, "command is empty\n");
        };
        let command = command.stdin(content);

        let output = match runner.run(&command) {
            Ok(output) => output,
            Err(e) => {
                tracing::warn!(check = %self.name, program = %command.program, error = %e, "check tool unavailable");
                return ValidationStepResult::unavailable(
                    &self.name,
                    format!(
                        "{} check could not run `{}`: {}\nFix: ensure the tool is installed and in PATH.\n",
                        self.name, command.program, e
                    ),
                );
            }
        };

        if output.success() {
            return ValidationStepResult::pass(&self.name);
        }

        let mut text = output.combined_text();
        if text.trim().is_empty() {
            text = match output.status {
                Some(code) => format!("`{}` exited with status {}\n", self.display, code),
                None => format!("`{}` was terminated by a signal\n", self.display),
            };
        } else if !text.ends_with('\n') {
            text.push('\n');
        }

        ValidationStepResult::fail(&self.name, text)
    }
}
