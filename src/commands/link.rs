//! Implementation of `tidyhook --link`.
//!
//! Installs the running executable as the repository's pre-commit hook by
//! symlinking `<hooks dir>/pre-commit` to it. An existing hook is never
//! replaced.

use crate::context::HookContext;
use crate::error::{HookError, Result};
use crate::exec::SystemRunner;
use std::fs;
use std::path::{Path, PathBuf};

/// Link the current executable into the hooks directory and report where.
pub fn cmd_link() -> Result<()> {
    let ctx = HookContext::resolve(&SystemRunner)?;
    let target = std::env::current_exe().map_err(|e| {
        HookError::Environment(format!("failed to locate the tidyhook executable: {}", e))
    })?;

    let hook_path = install_hook(&ctx, &target)?;
    println!("Linked {} -> {}", hook_path.display(), target.display());
    Ok(())
}

/// Create the hook symlink pointing at `target`.
///
/// * `Err(HookError::Environment)` - If anything already exists at the hook
///   path (including a dangling symlink), or the link cannot be created
pub fn install_hook(ctx: &HookContext, target: &Path) -> Result<PathBuf> {
    let hook_path = ctx.hook_path();

    if fs::symlink_metadata(&hook_path).is_ok() {
        return Err(HookError::Environment(format!(
            "a pre-commit hook already exists at {}; remove it first if tidyhook should replace it",
            hook_path.display()
        )));
    }

    fs::create_dir_all(&ctx.hooks_dir).map_err(|e| {
        HookError::Environment(format!(
            "failed to create hooks directory '{}': {}",
            ctx.hooks_dir.display(),
            e
        ))
    })?;

    symlink(target, &hook_path)?;
    tracing::debug!(hook = %hook_path.display(), target = %target.display(), "hook linked");
    Ok(hook_path)
}

#[cfg(unix)]
fn symlink(target: &Path, link: &Path) -> Result<()> {
    std::os::unix::fs::symlink(target, link).map_err(|e| {
        HookError::Environment(format!(
            "failed to link {} -> {}: {}",
            link.display(),
            target.display(),
            e
        ))
    })
}

#[cfg(not(unix))]
fn symlink(_target: &Path, link: &Path) -> Result<()> {
    Err(HookError::Environment(format!(
        "linking {} is only supported on Unix platforms",
        link.display()
    )))
}
