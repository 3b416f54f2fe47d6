//! Configuration types for Tollgate.
//!
//! A single YAML file configures both halves of the layer:
//!
//! ```yaml
//! audit:
//!   level: request_response
//!   output:
//!     type: file
//!     path: /var/log/tollgate/audit.log
//! body:
//!   max_bytes: 2097153
//! ```
//!
//! Every section is optional and falls back to its `Default`.

pub mod audit;
pub mod body;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub use audit::{AuditConfig, AuditLevel, AuditOutput};
pub use body::{BodyConfig, DEFAULT_MAX_BODY_BYTES};

/// Complete Tollgate configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TollgateConfig {
    /// Audit logging configuration.
    #[serde(default)]
    pub audit: AuditConfig,

    /// Request body decoding configuration.
    #[serde(default)]
    pub body: BodyConfig,
}

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl TollgateConfig {
    /// Load and validate configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&content)
    }

    /// Parse and validate configuration from YAML content.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check values serde cannot reject on its own.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let AuditOutput::File { path } = &self.audit.output {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::Config(
                    "audit.output.path must not be empty".to_string(),
                ));
            }
        }
        if self.body.max_bytes == 0 {
            return Err(ConfigError::Config(
                "body.max_bytes must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
