//! # tollgate-audit
//!
//! Audit records for requests passing through the Tollgate gateway layer.
//!
//! One [`AuditRecord`] is built per request/response cycle from an
//! [`AuditContext`] and written to an [`AuditSink`]. The configured
//! [`AuditLevel`] decides how much of the cycle a record carries:
//!
//! | Level | Label | Adds |
//! |-------|-------|------|
//! | `Metadata` | `MetadataLevel` | URI, verb, status, source IPs, identity, user agent |
//! | `Request` | `RequestLevel` | decoded request body |
//! | `RequestResponse` | `RequestResponseLevel` | response body |
//!
//! ## Output Format
//!
//! [`JsonLinesEncoder`] writes one JSON object per line. Empty fields are
//! left out rather than written as `null`:
//!
//! ```json
//! {"auditID":"…","requestReceivedTimestamp":"…","requestURI":"/v1/things","verb":"POST","responseStatus":201,"sourceIPs":["10.0.0.1"],"level":"MetadataLevel"}
//! ```
//!
//! ## Example Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use http::{Method, StatusCode};
//! use tollgate_audit::{AuditContext, AuditLevel, AuditLogger, MemorySink};
//!
//! # async fn example() -> Result<(), tollgate_audit::AuditError> {
//! let sink = Arc::new(MemorySink::new());
//! let logger = AuditLogger::with_sink(AuditLevel::Metadata, sink.clone());
//!
//! let ctx = AuditContext::new(Method::GET, "/v1/things")
//!     .response_status(StatusCode::OK);
//! logger.log(&ctx).await?;
//!
//! assert_eq!(sink.records().len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod logger;
pub mod record;
pub mod sink;
pub mod source_ip;

pub use builder::{AuditRecordBuilder, IMPERSONATE_GROUP, IMPERSONATE_USER};
pub use context::AuditContext;
pub use error::AuditError;
pub use logger::AuditLogger;
pub use record::{AuditRecord, UserInfo};
pub use sink::{
    AuditSink, JsonLinesEncoder, MemorySink, NullSink, RecordEncoder, WriterSink, create_sink,
};
pub use source_ip::source_ips;
pub use tollgate_core::AuditLevel;
