//! Policy document types.

use serde::{Deserialize, Serialize};

/// The policy document evaluated against each outbound prompt.
///
/// Loaded once at construction and reloadable on demand; immutable
/// between reloads. Every field has a default so a partial (or empty)
/// document is still a valid policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Enforcement mode.
    #[serde(default)]
    pub mode: PolicyMode,

    /// Substrings whose presence unconditionally denies a prompt.
    #[serde(default)]
    pub deny_terms: Vec<String>,

    /// Substrings whose presence flags but does not block a prompt.
    #[serde(default)]
    pub warn_terms: Vec<String>,

    /// Whether to run the fixed jailbreak-heuristic patterns.
    #[serde(default = "default_true")]
    pub block_jailbreak_like: bool,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            mode: PolicyMode::default(),
            deny_terms: Vec::new(),
            warn_terms: Vec::new(),
            block_jailbreak_like: true,
        }
    }
}

/// Enforcement mode declared by the policy document.
///
/// Parsed and validated, but enforcement strictness is decided by the
/// gateway client's `strict` flag, not by this field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PolicyMode {
    /// Deny decisions are enforced.
    #[default]
    Enforce,
    /// Decisions are logged but nothing is blocked by the policy itself.
    Monitor,
}

fn default_true() -> bool {
    true
}
