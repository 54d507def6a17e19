//! JSON manifest describing one tag sweep.

use super::{ProjectOutcome, ProjectStatus};
use crate::error::{HookError, Result};
use crate::fs::atomic_write_file;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Manifest status of one project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryStatus {
    Indexed,
    Failed,
    Unavailable,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub path: String,
    /// Absolute path of the tag file inside the project.
    pub tags_file: String,
    pub status: EntryStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepManifest {
    /// When the sweep finished (RFC 3339).
    pub generated_at: DateTime<Utc>,
    pub projects: Vec<ManifestEntry>,
}

impl SweepManifest {
    pub fn from_outcomes(outcomes: &[ProjectOutcome], tags_file: &str) -> Self {
        let projects = outcomes
            .iter()
            .map(|outcome| {
                let (status, message) = match &outcome.status {
                    ProjectStatus::Indexed => (EntryStatus::Indexed, None),
                    ProjectStatus::Failed(msg) => (EntryStatus::Failed, Some(msg.clone())),
                    ProjectStatus::Unavailable(msg) => (EntryStatus::Unavailable, Some(msg.clone())),
                };
                ManifestEntry {
                    path: outcome.path.display().to_string(),
                    tags_file: outcome.path.join(tags_file).display().to_string(),
                    status,
                    message,
                }
            })
            .collect();

        Self {
            generated_at: Utc::now(),
            projects,
        }
    }

    /// Write the manifest as pretty JSON, replacing any previous one atomically.
    pub fn write(&self, path: &Path) -> Result<()> {
        let mut json = serde_json::to_string_pretty(self).map_err(|e| {
            HookError::Environment(format!("failed to serialize tag manifest: {}", e))
        })?;
        json.push('\n');
        atomic_write_file(path, &json)
    }
}
