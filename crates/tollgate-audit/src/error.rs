//! Error types for the audit crate.

use thiserror::Error;

/// Errors that can occur while emitting an audit record.
#[derive(Debug, Error)]
pub enum AuditError {
    /// The sink could not accept the record.
    #[error("audit sink error: {0}")]
    SinkError(String),

    /// Serialization error.
    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error raised by a user-supplied encoder or sink.
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}
