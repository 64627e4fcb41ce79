//! Audit logger implementation.
//!
//! Resolves a storage backend from [`AuditConfig`] and writes one event
//! per gateway call.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use specter_core::AuditConfig;
use specter_policy::DecisionAction;

use crate::error::AuditError;
use crate::event::AuditEvent;
use crate::storage::{AuditStorage, ConsoleStorage, DualStorage, FileStorage, NullStorage};

/// The main audit logger.
pub struct AuditLogger {
    config: AuditConfig,
    storage: Arc<dyn AuditStorage>,
}

impl AuditLogger {
    /// Create a new audit logger with the given configuration.
    pub fn new(config: AuditConfig) -> Result<Self, AuditError> {
        let storage: Arc<dyn AuditStorage> = if !config.enabled {
            Arc::new(NullStorage)
        } else if config.stdout {
            // Dual output: file + console
            Arc::new(DualStorage::new(&config.path)?)
        } else {
            // File only
            Arc::new(FileStorage::new(&config.path)?)
        };

        Ok(Self { config, storage })
    }

    /// Create a logger with a custom storage backend.
    pub fn with_storage(config: AuditConfig, storage: Arc<dyn AuditStorage>) -> Self {
        Self { config, storage }
    }

    /// Create a disabled (no-op) logger.
    pub fn disabled() -> Self {
        Self {
            config: AuditConfig {
                enabled: false,
                ..Default::default()
            },
            storage: Arc::new(NullStorage),
        }
    }

    /// Create a console-only logger (useful for development).
    pub fn console_only() -> Self {
        Self {
            config: AuditConfig {
                stdout: true,
                ..Default::default()
            },
            storage: Arc::new(ConsoleStorage),
        }
    }

    /// Check if logging is enabled.
    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Log an audit event.
    pub async fn log(&self, event: AuditEvent) -> Result<(), AuditError> {
        if !self.config.enabled {
            return Ok(());
        }

        // Also log to tracing for structured logging integration
        tracing::debug!(
            action = %event.action,
            reason = %event.reason,
            prompt_hash = %event.prompt_hash,
            prompt_length = event.prompt_length,
            "Audit event"
        );

        self.storage.store(&event).await
    }

    /// Query audit events with filters.
    pub async fn query(&self, filter: AuditFilter) -> Result<Vec<AuditEvent>, AuditError> {
        self.storage.query(&filter).await
    }

    /// Get the most recent events, newest first.
    pub async fn recent(&self, limit: usize) -> Result<Vec<AuditEvent>, AuditError> {
        self.query(AuditFilter {
            limit: Some(limit),
            ..Default::default()
        })
        .await
    }
}

/// Filter for querying audit events.
#[derive(Debug, Clone, Default)]
pub struct AuditFilter {
    /// Filter by decided action.
    pub action: Option<DecisionAction>,
    /// Only events at or after this time.
    pub since: Option<DateTime<Utc>>,
    /// Maximum number of results, newest first.
    pub limit: Option<usize>,
}

impl AuditFilter {
    /// Whether an event passes this filter (limit excluded).
    pub fn accepts(&self, event: &AuditEvent) -> bool {
        if let Some(action) = self.action {
            if event.action != action {
                return false;
            }
        }
        if let Some(since) = self.since {
            if event.timestamp < since {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use specter_policy::{Decision, DecisionMatches};

    fn allow_event(prompt: &str) -> AuditEvent {
        AuditEvent::from_decision(
            prompt,
            &Decision {
                action: DecisionAction::Allow,
                reason: "No policy violations detected".to_string(),
                matches: DecisionMatches::default(),
            },
        )
    }

    #[tokio::test]
    async fn test_disabled_logger() {
        let logger = AuditLogger::disabled();
        assert!(!logger.is_enabled());

        // Should not error even when logging
        logger.log(allow_event("hello")).await.unwrap();
    }

    #[tokio::test]
    async fn test_console_only_logger() {
        let logger = AuditLogger::console_only();
        assert!(logger.is_enabled());

        logger.log(allow_event("hello")).await.unwrap();
    }

    #[tokio::test]
    async fn test_file_backed_logger_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let config = AuditConfig {
            enabled: true,
            stdout: false,
            path: dir.path().join("events.jsonl"),
        };
        let logger = AuditLogger::new(config).unwrap();

        logger.log(allow_event("one")).await.unwrap();
        logger.log(allow_event("two")).await.unwrap();

        let recent = logger.recent(10).await.unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].prompt_hash, crate::hash_prompt("two"));
    }
}
