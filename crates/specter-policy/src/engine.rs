//! The policy engine: load, reload, evaluate.

use std::path::{Path, PathBuf};

use specter_core::{ConfigError, PolicyConfig};

use crate::decision::{Decision, DecisionAction, DecisionMatches};
use crate::jailbreak::JailbreakDetector;
use crate::JAILBREAK_MATCH_TAG;

/// Evaluates prompts against a policy document loaded from disk.
///
/// The policy is loaded once at construction and replaced wholesale on
/// [`reload`](Self::reload); a failed reload leaves the previous policy
/// in place.
pub struct PolicyEngine {
    policy_path: PathBuf,
    policy: PolicyConfig,
    jailbreak: JailbreakDetector,
}

impl PolicyEngine {
    /// Load the policy document and build an engine.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let policy_path = path.as_ref().to_path_buf();
        let policy = PolicyConfig::from_file(&policy_path)?;

        tracing::debug!(
            path = %policy_path.display(),
            deny_terms = policy.deny_terms.len(),
            warn_terms = policy.warn_terms.len(),
            block_jailbreak_like = policy.block_jailbreak_like,
            "Loaded policy document"
        );

        Ok(Self {
            policy_path,
            policy,
            jailbreak: JailbreakDetector::new(),
        })
    }

    /// Build an engine from an in-memory policy (tests, embedding).
    pub fn with_policy(policy: PolicyConfig) -> Self {
        Self {
            policy_path: PathBuf::new(),
            policy,
            jailbreak: JailbreakDetector::new(),
        }
    }

    /// The currently loaded policy.
    pub fn policy(&self) -> &PolicyConfig {
        &self.policy
    }

    /// Re-run the load against the same path, replacing the in-memory
    /// policy. On error the previous policy stays active.
    pub fn reload(&mut self) -> Result<(), ConfigError> {
        self.policy = PolicyConfig::from_file(&self.policy_path)?;
        tracing::info!(path = %self.policy_path.display(), "Reloaded policy document");
        Ok(())
    }

    /// Evaluate one prompt against the policy.
    ///
    /// Both term lists are scanned up front, so warn matches are reported
    /// even when a deny term decides the action. The jailbreak heuristics
    /// are only consulted when no deny term matched.
    pub fn evaluate(&self, text: &str) -> Decision {
        let deny = find_matches(text, &self.policy.deny_terms);
        let warn = find_matches(text, &self.policy.warn_terms);
        let mut matches = DecisionMatches { deny, warn };

        if !matches.deny.is_empty() {
            return Decision {
                action: DecisionAction::Deny,
                reason: format!("Matched deny terms: {}", matches.deny.join(", ")),
                matches,
            };
        }

        if self.policy.block_jailbreak_like && self.jailbreak.is_match(text) {
            matches.deny.push(JAILBREAK_MATCH_TAG.to_string());
            return Decision {
                action: DecisionAction::Deny,
                reason: "Prompt looks like a jailbreak attempt".to_string(),
                matches,
            };
        }

        if !matches.warn.is_empty() {
            return Decision {
                action: DecisionAction::Warn,
                reason: format!("Matched warn terms: {}", matches.warn.join(", ")),
                matches,
            };
        }

        Decision {
            action: DecisionAction::Allow,
            reason: "No policy violations detected".to_string(),
            matches,
        }
    }
}

/// Case-insensitive substring scan; hits are returned in configuration
/// order, spelled as configured.
fn find_matches(text: &str, terms: &[String]) -> Vec<String> {
    let lower = text.to_lowercase();
    terms
        .iter()
        .filter(|term| lower.contains(&term.to_lowercase()))
        .cloned()
        .collect()
}
