//! Decision types returned by policy evaluation.

use serde::{Deserialize, Serialize};

/// What the policy decided for a prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecisionAction {
    /// No violation detected; forward to the backend.
    Allow,
    /// Flagged but not blocked; forward to the backend.
    Warn,
    /// Blocked; the backend is never invoked.
    Deny,
}

impl std::fmt::Display for DecisionAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Allow => write!(f, "allow"),
            Self::Warn => write!(f, "warn"),
            Self::Deny => write!(f, "deny"),
        }
    }
}

/// Terms that matched during evaluation, in configuration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionMatches {
    /// Matched deny terms, plus the `jailbreak_pattern` tag when a
    /// heuristic fired.
    pub deny: Vec<String>,
    /// Matched warn terms.
    pub warn: Vec<String>,
}

/// Result of evaluating one prompt against the policy.
///
/// Created fresh per evaluation; never persisted as-is, only flattened
/// into an audit event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Decision {
    /// The decided action.
    pub action: DecisionAction,
    /// Human-readable reason for the action.
    pub reason: String,
    /// Which terms matched.
    pub matches: DecisionMatches,
}

impl Decision {
    /// Whether this decision blocks the prompt.
    pub fn is_deny(&self) -> bool {
        self.action == DecisionAction::Deny
    }
}
