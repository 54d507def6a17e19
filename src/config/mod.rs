//! Configuration model for tidyhook.
//!
//! Two YAML files are understood:
//! - `.tidyhook.yaml` at the repository root, read by the commit hook
//!   (optional; every field has a default)
//! - the tag sweep settings file passed to `tidyhook tags --config`
//!
//! Unknown fields are ignored for forward compatibility and values are
//! validated after parsing.

mod model;
mod operations;
pub mod types;


pub use model::Config;
pub(crate) use operations::{expand_home, file_extension};
pub use types::{TagSweepConfig, ToolCheckConfig};
