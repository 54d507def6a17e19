//! Per-file and per-run check results.

use crate::validate::pipeline::ValidationStepResult;

/// Outcome of every check run against one staged file.
#[derive(Debug, Clone)]
pub struct FileReport {
    /// Repository-relative path (forward slashes).
    pub path: String,
    /// Step results in execution order: whitespace, syntax, style.
    pub steps: Vec<ValidationStepResult>,
}

impl FileReport {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            steps: Vec::new(),
        }
    }

    /// Concatenated text of the blocking steps. Empty means the file passes.
    pub fn output(&self) -> String {
        self.steps.iter().map(|s| s.report_text()).collect()
    }

    pub fn passed(&self) -> bool {
        !self.steps.iter().any(|s| s.is_blocking())
    }
}

/// Totals for one hook run.
#[derive(Debug, Clone, Default)]
pub struct CheckSummary {
    pub files_checked: usize,
    pub failures: Vec<FileReport>,
}

impl CheckSummary {
    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }
}
