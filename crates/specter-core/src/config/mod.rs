//! Configuration types for the Specter AI firewall proxy.
//!
//! Two documents are involved:
//!
//! - **policy.yaml**: the policy document (`PolicyConfig`) with deny/warn
//!   term lists and the jailbreak-heuristic switch
//! - **audit settings** (`AuditConfig`): where the append-only audit log
//!   lives and whether events are mirrored to the console

pub mod audit;
pub mod policy;

use std::path::Path;

pub use audit::AuditConfig;
pub use policy::{PolicyConfig, PolicyMode};

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The policy document does not exist at the given path.
    #[error("policy file not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl PolicyConfig {
    /// Load a policy document from a YAML file.
    ///
    /// Fails with [`ConfigError::NotFound`] if the file is absent and
    /// [`ConfigError::Yaml`] if it does not parse. Missing fields take
    /// their documented defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse a policy document from YAML content.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        // An empty document is a valid policy: everything defaults.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(ConfigError::from)
    }
}
