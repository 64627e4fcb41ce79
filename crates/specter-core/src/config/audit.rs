//! Audit logging configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for audit logging.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Whether audit logging is enabled.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Whether to mirror events to stdout in addition to the file.
    #[serde(default)]
    pub stdout: bool,

    /// Path of the append-only JSONL event log.
    #[serde(default = "default_log_path")]
    pub path: PathBuf,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            stdout: false,
            path: default_log_path(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

/// Default log location, user-scoped: `~/.specter/logs/events.jsonl`.
fn default_log_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    let mut path = PathBuf::from(home);
    path.push(".specter");
    path.push("logs");
    path.push("events.jsonl");
    path
}
