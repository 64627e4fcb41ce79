//! Error taxonomy for the gateway call path.

use specter_audit::AuditError;
use specter_core::ConfigError;
use thiserror::Error;

/// Errors surfaced by [`GatewayClient`](crate::GatewayClient).
///
/// [`GatewayError::PermissionDenied`] is the only variant callers are
/// expected to match on programmatically.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Policy document missing or malformed (construction/reload time).
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The audit record could not be written.
    #[error("audit log write failed: {0}")]
    Audit(#[from] AuditError),

    /// Strict-mode denial; carries the decision's reason.
    #[error("prompt denied by policy: {reason}")]
    PermissionDenied {
        /// Human-readable reason from the policy decision.
        reason: String,
    },

    /// Opaque passthrough of whatever the backend raised.
    #[error("backend error: {0}")]
    Backend(#[source] anyhow::Error),
}
