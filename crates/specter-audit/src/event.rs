//! Audit event types.
//!
//! One record per gateway call, flattened from the policy decision.
//! Privacy invariant: raw prompt text never appears in a record, only
//! its length and a one-way digest.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use specter_policy::{Decision, DecisionAction, DecisionMatches};

/// Component name stamped on every event.
pub const COMPONENT: &str = "ai_firewall_proxy";

/// Hex SHA-256 digest of the exact prompt bytes.
///
/// Logged instead of the prompt itself; identical prompts correlate
/// across records without revealing content.
pub fn hash_prompt(prompt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(prompt.as_bytes());
    hex::encode(hasher.finalize())
}

/// An audit event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEvent {
    /// When the event occurred (UTC, RFC-3339 with `Z`).
    pub timestamp: DateTime<Utc>,

    /// Always [`COMPONENT`].
    pub component: String,

    /// The decided action.
    pub action: DecisionAction,

    /// Human-readable reason for the action.
    pub reason: String,

    /// Which terms matched.
    pub matches: DecisionMatches,

    /// Hex SHA-256 of the exact prompt bytes.
    pub prompt_hash: String,

    /// Prompt length in characters.
    pub prompt_length: u64,
}

impl AuditEvent {
    /// Build the event for one evaluated prompt.
    pub fn from_decision(prompt: &str, decision: &Decision) -> Self {
        Self {
            timestamp: Utc::now(),
            component: COMPONENT.to_string(),
            action: decision.action,
            reason: decision.reason.clone(),
            matches: decision.matches.clone(),
            prompt_hash: hash_prompt(prompt),
            prompt_length: prompt.chars().count() as u64,
        }
    }

    /// Format the event as a human-readable log line.
    ///
    /// Format: `[timestamp] ACTION reason="..." hash=... len=...`
    pub fn to_log_line(&self) -> String {
        let mut line = format!(
            "[{}] {} reason=\"{}\" hash={} len={}",
            self.timestamp.format("%Y-%m-%dT%H:%M:%S%.3fZ"),
            self.action,
            self.reason.replace('"', "'"),
            &self.prompt_hash[..12.min(self.prompt_hash.len())],
            self.prompt_length,
        );

        if !self.matches.deny.is_empty() {
            line.push_str(&format!(" deny=[{}]", self.matches.deny.join(",")));
        }
        if !self.matches.warn.is_empty() {
            line.push_str(&format!(" warn=[{}]", self.matches.warn.join(",")));
        }

        line
    }
}
