//! Per-file check orchestration.
//!
//! For each changed file the runner executes, in order:
//! 1. the trailing-whitespace rule on the staged diff against HEAD
//! 2. the syntax check on the staged content, for source files only
//! 3. the style check on the staged content, for source files only
//!
//! Symlinks get only the whitespace rule; their blob is a link target, not
//! source.
//!
//! Files are independent of each other; nothing here carries state between
//! calls to [`ContentRuleRunner::check_file`].

mod types;


pub use types::{CheckSummary, FileReport};

use crate::config::Config;
use crate::context::HookContext;
use crate::diff::{ChangedFile, EntryMode, staged_diff};
use crate::error::Result;
use crate::exec::CommandRunner;
use crate::git::staged_blob;

use super::language::LanguageGate;
use super::pipeline::{ToolCheck, ValidationStepResult};
use super::whitespace::{check_trailing_whitespace, format_violations};

const WHITESPACE_STEP: &str = "whitespace";
const SYNTAX_STEP: &str = "syntax";
const STYLE_STEP: &str = "style";

pub struct ContentRuleRunner<'a> {
    ctx: &'a HookContext,
    config: &'a Config,
    runner: &'a dyn CommandRunner,
    gate: LanguageGate,
    syntax: Option<ToolCheck>,
    style: Option<ToolCheck>,
}

impl<'a> ContentRuleRunner<'a> {
    /// Compile the language gate and parse both check commands up front so
    /// a config mistake surfaces once, before any file is processed.
    pub fn new(
        ctx: &'a HookContext,
        config: &'a Config,
        runner: &'a dyn CommandRunner,
    ) -> Result<Self> {
        let profile = config.profile_path(&ctx.repo_root);
        if config.style_check.enabled && !profile.exists() {
            tracing::warn!(profile = %profile.display(), "policy profile not found");
        }

        Ok(Self {
            ctx,
            config,
            runner,
            gate: LanguageGate::from_config(config)?,
            syntax: ToolCheck::from_config(SYNTAX_STEP, &config.syntax_check, &profile)?,
            style: ToolCheck::from_config(STYLE_STEP, &config.style_check, &profile)?,
        })
    }

    /// Run every check against one staged file.
    ///
    /// Findings land in the report. Git failures and malformed diffs are
    /// returned as errors and stop the run.
    pub fn check_file(&self, file: &ChangedFile) -> Result<FileReport> {
        tracing::debug!(path = %file.path, kind = ?file.kind, "checking staged file");
        let mut report = FileReport::new(&file.path);

        report.steps.push(self.whitespace_step(file)?);

        if file.mode != EntryMode::Regular {
            Self::skip_content_steps(&mut report, "not a regular file");
            return Ok(report);
        }

        let content = if self.gate.may_match(&file.path) {
            let blob = staged_blob(self.runner, &self.ctx.repo_root, &file.path)?;
            self.gate.matches(&file.path, &blob).then_some(blob)
        } else {
            None
        };

        match content {
            Some(content) => {
                report.steps.push(self.tool_step(SYNTAX_STEP, self.syntax.as_ref(), &content));
                report.steps.push(self.tool_step(STYLE_STEP, self.style.as_ref(), &content));
            }
            None => Self::skip_content_steps(&mut report, "not a source file"),
        }

        Ok(report)
    }

    fn skip_content_steps(report: &mut FileReport, reason: &str) {
        report.steps.push(ValidationStepResult::skip(SYNTAX_STEP, reason));
        report.steps.push(ValidationStepResult::skip(STYLE_STEP, reason));
    }

    fn whitespace_step(&self, file: &ChangedFile) -> Result<ValidationStepResult> {
        if self.config.is_whitespace_exempt(&file.path) {
            return Ok(ValidationStepResult::skip(WHITESPACE_STEP, "exempt extension"));
        }

        let diff = staged_diff(self.runner, &self.ctx.repo_root, file)?;
        let violations = check_trailing_whitespace(self.config, &file.path, &diff)?;

        if violations.is_empty() {
            Ok(ValidationStepResult::pass(WHITESPACE_STEP))
        } else {
            Ok(ValidationStepResult::fail(
                WHITESPACE_STEP,
                format_violations(&violations),
            ))
        }
    }

    fn tool_step(
        &self,
        name: &str,
        check: Option<&ToolCheck>,
        content: &[u8],
    ) -> ValidationStepResult {
        match check {
            Some(check) => {
                tracing::debug!(check = %check.name(), "running external check");
                check.run(self.runner, &self.ctx.repo_root, content)
            }
            None => ValidationStepResult::skip(name, "disabled in config"),
        }
    }
}
