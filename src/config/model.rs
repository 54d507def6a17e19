//! Config struct definition and default implementation.

use super::types::*;
use serde::{Deserialize, Serialize};

/// Configuration for the commit hook.
///
/// This struct represents the contents of `.tidyhook.yaml` at the repository
/// root. A missing file means all defaults, which target Perl sources.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // =========================================================================
    // Whitespace rule
    // =========================================================================
    /// Extensions exempt from the trailing-whitespace scan (no leading dots).
    #[serde(default = "default_whitespace_exempt_extensions")]
    pub whitespace_exempt_extensions: Vec<String>,

    // =========================================================================
    // Language gate and external checks
    // =========================================================================
    /// Which files count as source of the checked language.
    pub language: LanguageConfig,

    /// Compile-only syntax check.
    #[serde(default = "default_syntax_check")]
    pub syntax_check: ToolCheckConfig,

    /// Style-policy check.
    #[serde(default = "default_style_check")]
    pub style_check: ToolCheckConfig,

    /// Policy profile path relative to the repository root.
    #[serde(default = "default_policy_profile")]
    pub policy_profile: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            whitespace_exempt_extensions: default_whitespace_exempt_extensions(),
            language: LanguageConfig::default(),
            syntax_check: default_syntax_check(),
            style_check: default_style_check(),
            policy_profile: default_policy_profile(),
        }
    }
}
