//! # specter-audit
//!
//! Audit logging for the Specter AI firewall proxy.
//!
//! Every gateway call produces exactly one audit event, written before
//! any enforcement action. Events are privacy-preserving: the raw prompt
//! never appears in a record, only its character count and a hex SHA-256
//! digest for correlation.
//!
//! - **File output**: JSON Lines, one self-contained record per line
//! - **Console output**: human-readable log lines
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use specter_audit::{AuditEvent, AuditLogger};
//! use specter_core::AuditConfig;
//! use specter_policy::PolicyEngine;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let logger = AuditLogger::new(AuditConfig::default())?;
//! let engine = PolicyEngine::with_policy(Default::default());
//!
//! let prompt = "Write a short poem about secure coding.";
//! let decision = engine.evaluate(prompt);
//! logger.log(AuditEvent::from_decision(prompt, &decision)).await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod event;
pub mod logger;
pub mod storage;

pub use error::AuditError;
pub use event::{hash_prompt, AuditEvent, COMPONENT};
pub use logger::{AuditFilter, AuditLogger};
pub use storage::{AuditStorage, ConsoleStorage, DualStorage, FileStorage, NullStorage};
