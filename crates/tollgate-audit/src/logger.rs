//! Audit logger implementation.
//!
//! [`AuditLogger`] is what the request layer holds on to: it builds a record
//! from a finished request and hands it to the configured sink.

use std::fmt;
use std::sync::Arc;
use tollgate_core::{AuditConfig, AuditLevel};

use crate::builder::AuditRecordBuilder;
use crate::context::AuditContext;
use crate::error::AuditError;
use crate::record::AuditRecord;
use crate::sink::{AuditSink, NullSink, create_sink};

/// Builds one record per finished request and writes it to a sink.
pub struct AuditLogger {
    enabled: bool,
    builder: AuditRecordBuilder,
    sink: Arc<dyn AuditSink>,
}

impl AuditLogger {
    /// Create a logger, and its sink, from configuration.
    pub fn new(config: &AuditConfig) -> Result<Self, AuditError> {
        if !config.enabled {
            return Ok(Self::disabled());
        }
        Ok(Self::with_sink(config.level, create_sink(config)?))
    }

    /// Create a logger writing to a custom sink.
    pub fn with_sink(level: AuditLevel, sink: Arc<dyn AuditSink>) -> Self {
        Self {
            enabled: true,
            builder: AuditRecordBuilder::new(level),
            sink,
        }
    }

    /// A logger that never builds or writes records.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            builder: AuditRecordBuilder::new(AuditLevel::Metadata),
            sink: Arc::new(NullSink),
        }
    }

    /// Whether [`log`](Self::log) writes anything.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn level(&self) -> AuditLevel {
        self.builder.level()
    }

    /// Build the record for `ctx` and write it.
    ///
    /// Returns the written record, or `None` when logging is disabled.
    pub async fn log(&self, ctx: &AuditContext) -> Result<Option<AuditRecord>, AuditError> {
        if !self.enabled {
            return Ok(None);
        }

        let record = self.builder.build(ctx);

        tracing::debug!(
            audit_id = %record.audit_id,
            verb = %record.verb,
            request_uri = %record.request_uri,
            status = record.response_status,
            level = %record.level,
            "Audit record"
        );

        self.sink.write(&record).await?;
        Ok(Some(record))
    }
}

impl fmt::Debug for AuditLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuditLogger")
            .field("enabled", &self.enabled)
            .field("level", &self.builder.level())
            .finish_non_exhaustive()
    }
}
