//! # specter-core
//!
//! Configuration types shared across all Specter crates.
//!
//! The policy document is a small YAML file; every field has a documented
//! default so a partial document is still a valid policy:
//!
//! ```yaml
//! mode: enforce
//! deny_terms:
//!   - internal_ip
//!   - api_key
//! warn_terms:
//!   - password
//! block_jailbreak_like: true
//! ```

// Configuration types shared across all Specter crates
pub mod config;

// Re-export commonly used config types for convenience
pub use config::{AuditConfig, ConfigError, PolicyConfig, PolicyMode};
