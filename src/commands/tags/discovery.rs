//! Project enumeration for the tag sweep.

use crate::config::{TagSweepConfig, expand_home};
use crate::error::{HookError, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// List the project directories a sweep covers, in run order.
///
/// Explicit `projects` come first, in the order given, followed by the git
/// checkouts found directly under each root (sorted per root). Duplicates keep
/// their first position. Paths matching an `exclude` glob are dropped.
/// Missing explicit projects are kept so the sweep can report them; missing
/// roots are skipped with a warning.
pub fn discover_projects(config: &TagSweepConfig) -> Result<Vec<PathBuf>> {
    let excludes = build_excludes(&config.exclude)?;

    let mut candidates: Vec<PathBuf> = config.projects.iter().map(|p| expand_home(p)).collect();
    for root in &config.roots {
        candidates.extend(projects_under(&expand_home(root)));
    }

    let mut seen = HashSet::new();
    let mut projects = Vec::new();
    for path in candidates {
        if is_excluded(&excludes, &path) {
            tracing::debug!(project = %path.display(), "excluded from tag sweep");
            continue;
        }
        if seen.insert(path.clone()) {
            projects.push(path);
        }
    }

    Ok(projects)
}

/// Immediate subdirectories of `root` that hold a `.git` entry.
///
/// `.git` may be a directory or, for linked worktrees, a file.
fn projects_under(root: &Path) -> Vec<PathBuf> {
    let entries = match fs::read_dir(root) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(root = %root.display(), error = %e, "skipping unreadable root");
            return Vec::new();
        }
    };

    let mut found: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_dir() && path.join(".git").exists())
        .collect();
    found.sort();
    found
}

fn build_excludes(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();

    for pattern in patterns {
        let expanded = expand_home(pattern);
        let glob = Glob::new(&expanded.to_string_lossy()).map_err(|e| {
            HookError::Environment(format!(
                "invalid glob pattern in exclude: '{}' - {}",
                pattern, e
            ))
        })?;
        builder.add(glob);
    }

    builder
        .build()
        .map_err(|e| HookError::Environment(format!("failed to compile exclude globs: {}", e)))
}

/// A project is excluded when a glob matches its full path or its directory name.
fn is_excluded(excludes: &GlobSet, path: &Path) -> bool {
    if excludes.is_empty() {
        return false;
    }
    excludes.is_match(path) || path.file_name().is_some_and(|name| excludes.is_match(name))
}
