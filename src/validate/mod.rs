//! Validation module for tidyhook.
//!
//! Checks applied to each staged file:
//! - Trailing whitespace: flags added lines ending in whitespace
//! - Syntax: compile-only run of the language's interpreter
//! - Style: static analysis with the repository's policy profile

pub mod language;
pub mod pipeline;
pub mod runner;
pub mod whitespace;

pub use runner::{CheckSummary, ContentRuleRunner, FileReport};
