//! Audit logging configuration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Detail tier of an audit record.
///
/// Tiers are ordered: every tier captures everything the tiers below it
/// capture. The serialized form is the record label (`MetadataLevel`, ...);
/// config files may also use the short spellings (`metadata`, `request`,
/// `request_response`).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum AuditLevel {
    /// Request metadata only (URI, verb, status, source, identity).
    #[default]
    #[serde(rename = "MetadataLevel", alias = "metadata")]
    Metadata,
    /// Metadata plus the decoded request body.
    #[serde(rename = "RequestLevel", alias = "request")]
    Request,
    /// Metadata plus request and response bodies.
    #[serde(rename = "RequestResponseLevel", alias = "request_response")]
    RequestResponse,
}

impl AuditLevel {
    /// The label written into the `level` field of a record.
    pub fn label(self) -> &'static str {
        match self {
            Self::Metadata => "MetadataLevel",
            Self::Request => "RequestLevel",
            Self::RequestResponse => "RequestResponseLevel",
        }
    }

    /// Whether records at this tier carry the request body.
    pub fn captures_request_body(self) -> bool {
        self >= Self::Request
    }

    /// Whether records at this tier carry the response body.
    pub fn captures_response_body(self) -> bool {
        self >= Self::RequestResponse
    }
}

impl fmt::Display for AuditLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Where serialized audit records go.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AuditOutput {
    /// Standard output, one JSON object per line.
    #[default]
    Stdout,
    /// Standard error, one JSON object per line.
    Stderr,
    /// Append to a file, creating it if needed.
    File { path: PathBuf },
}

/// Configuration for audit logging.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Whether audit logging is enabled.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Detail tier. Fixed for the lifetime of the logger built from it.
    #[serde(default)]
    pub level: AuditLevel,

    /// Output destination.
    #[serde(default)]
    pub output: AuditOutput,

    /// Fail the request when its audit record cannot be written.
    /// When false the failure is logged and the response is returned as is.
    #[serde(default)]
    pub fail_on_error: bool,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            level: AuditLevel::default(),
            output: AuditOutput::default(),
            fail_on_error: false,
        }
    }
}

fn default_enabled() -> bool {
    true
}
