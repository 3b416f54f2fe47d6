//! Audit sinks: where serialized records go.
//!
//! Emission is split into two injected pieces: a [`RecordEncoder`] turns a
//! record into bytes and an [`AuditSink`] delivers them. [`WriterSink`] pairs
//! an encoder with any `std::io::Write` output.

use async_trait::async_trait;
use std::fs::{File, OpenOptions};
use std::io::{self, Stderr, Stdout, Write};
use std::path::Path;
use std::sync::{Arc, RwLock};
use tokio::sync::Mutex;
use tollgate_core::{AuditConfig, AuditOutput};

use crate::error::AuditError;
use crate::record::AuditRecord;

/// Serializes one record into a byte buffer.
///
/// Closures of the same shape are encoders too.
pub trait RecordEncoder: Send + Sync {
    fn encode(&self, record: &AuditRecord, buf: &mut Vec<u8>) -> Result<(), AuditError>;
}

impl<F> RecordEncoder for F
where
    F: Fn(&AuditRecord, &mut Vec<u8>) -> Result<(), AuditError> + Send + Sync,
{
    fn encode(&self, record: &AuditRecord, buf: &mut Vec<u8>) -> Result<(), AuditError> {
        self(record, buf)
    }
}

/// Compact JSON, one record per line.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonLinesEncoder;

impl RecordEncoder for JsonLinesEncoder {
    fn encode(&self, record: &AuditRecord, buf: &mut Vec<u8>) -> Result<(), AuditError> {
        serde_json::to_writer(&mut *buf, record)?;
        buf.push(b'\n');
        Ok(())
    }
}

/// Destination for audit records.
#[async_trait]
pub trait AuditSink: Send + Sync {
    /// Write one record. Failures are returned as is, never retried.
    async fn write(&self, record: &AuditRecord) -> Result<(), AuditError>;
}

/// Create the sink an [`AuditConfig`] asks for.
pub fn create_sink(config: &AuditConfig) -> Result<Arc<dyn AuditSink>, AuditError> {
    if !config.enabled {
        return Ok(Arc::new(NullSink));
    }
    Ok(match &config.output {
        AuditOutput::Stdout => Arc::new(WriterSink::stdout()),
        AuditOutput::Stderr => Arc::new(WriterSink::stderr()),
        AuditOutput::File { path } => Arc::new(WriterSink::file(path)?),
    })
}

/// Writes encoded records to a shared output.
///
/// The output is shared by all in-flight requests. A record is encoded in
/// full before the output lock is taken, and the lock is held until it is
/// written and flushed, so records never interleave and an encoding failure
/// writes nothing.
pub struct WriterSink<W> {
    output: Mutex<W>,
    encoder: Box<dyn RecordEncoder>,
}

impl<W: Write + Send> WriterSink<W> {
    /// Write JSON lines to `output`.
    pub fn new(output: W) -> Self {
        Self::with_encoder(output, JsonLinesEncoder)
    }

    pub fn with_encoder(output: W, encoder: impl RecordEncoder + 'static) -> Self {
        Self {
            output: Mutex::new(output),
            encoder: Box::new(encoder),
        }
    }

    pub fn into_inner(self) -> W {
        self.output.into_inner()
    }
}

impl WriterSink<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl WriterSink<Stderr> {
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl WriterSink<File> {
    /// Append to the file at `path`, creating it if needed.
    pub fn file(path: impl AsRef<Path>) -> Result<Self, AuditError> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path.as_ref())?;
        Ok(Self::new(file))
    }
}

#[async_trait]
impl<W: Write + Send> AuditSink for WriterSink<W> {
    async fn write(&self, record: &AuditRecord) -> Result<(), AuditError> {
        let mut buf = Vec::new();
        self.encoder.encode(record, &mut buf)?;

        let mut output = self.output.lock().await;
        output.write_all(&buf)?;
        output.flush()?;
        Ok(())
    }
}

/// Keeps records in memory. Useful for tests and inspection.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: RwLock<Vec<AuditRecord>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the records written so far, oldest first.
    pub fn records(&self) -> Vec<AuditRecord> {
        self.records
            .read()
            .map(|records| records.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl AuditSink for MemorySink {
    async fn write(&self, record: &AuditRecord) -> Result<(), AuditError> {
        let mut records = self
            .records
            .write()
            .map_err(|e| AuditError::SinkError(format!("Failed to acquire write lock: {}", e)))?;
        records.push(record.clone());
        Ok(())
    }
}

/// Discards every record.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

#[async_trait]
impl AuditSink for NullSink {
    async fn write(&self, _record: &AuditRecord) -> Result<(), AuditError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::AuditRecordBuilder;
    use crate::context::AuditContext;
    use http::Method;
    use std::io::Read;
    use tollgate_core::AuditLevel;

    fn record() -> AuditRecord {
        AuditRecordBuilder::new(AuditLevel::Metadata)
            .build(&AuditContext::new(Method::GET, "/v1/things"))
    }

    #[tokio::test]
    async fn writer_sink_writes_json_lines() {
        let sink = WriterSink::new(Vec::new());
        let first = record();
        let second = record();
        sink.write(&first).await.unwrap();
        sink.write(&second).await.unwrap();

        let out = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(out.ends_with('\n'));

        let parsed: AuditRecord = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(parsed, second);
    }

    #[tokio::test]
    async fn encoder_failure_writes_nothing() {
        let failing = |_: &AuditRecord, buf: &mut Vec<u8>| -> Result<(), AuditError> {
            buf.extend_from_slice(b"{\"partial\":");
            Err(anyhow::anyhow!("encoder refused record").into())
        };
        let sink = WriterSink::with_encoder(Vec::new(), failing);

        let err = sink.write(&record()).await.unwrap_err();
        assert!(matches!(err, AuditError::Internal(_)));
        assert!(err.to_string().contains("encoder refused record"));
        assert!(sink.into_inner().is_empty());
    }

    #[tokio::test]
    async fn write_failure_is_returned() {
        struct Broken;
        impl Write for Broken {
            fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"))
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let err = WriterSink::new(Broken).write(&record()).await.unwrap_err();
        assert!(matches!(err, AuditError::IoError(ref e) if e.kind() == io::ErrorKind::BrokenPipe));
    }

    #[tokio::test]
    async fn closure_encoder_is_used() {
        let verb_only = |record: &AuditRecord, buf: &mut Vec<u8>| -> Result<(), AuditError> {
            buf.extend_from_slice(record.verb.as_bytes());
            buf.push(b'\n');
            Ok(())
        };
        let sink = WriterSink::with_encoder(Vec::new(), verb_only);
        sink.write(&record()).await.unwrap();
        assert_eq!(sink.into_inner(), b"GET\n");
    }

    #[tokio::test]
    async fn file_sink_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.log");

        WriterSink::file(&path).unwrap().write(&record()).await.unwrap();
        WriterSink::file(&path).unwrap().write(&record()).await.unwrap();

        let mut content = String::new();
        File::open(&path)
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(content.lines().count(), 2);
    }

    #[tokio::test]
    async fn memory_sink_keeps_records_in_order() {
        let sink = MemorySink::new();
        let first = record();
        let second = record();
        sink.write(&first).await.unwrap();
        sink.write(&second).await.unwrap();

        assert_eq!(sink.records(), vec![first, second]);
    }

    #[tokio::test]
    async fn create_sink_honours_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.log");
        let config = AuditConfig {
            output: AuditOutput::File { path: path.clone() },
            ..Default::default()
        };

        create_sink(&config).unwrap().write(&record()).await.unwrap();
        assert!(path.exists());

        let disabled = AuditConfig {
            enabled: false,
            output: AuditOutput::File {
                path: dir.path().join("never.log"),
            },
            ..Default::default()
        };
        create_sink(&disabled).unwrap().write(&record()).await.unwrap();
        assert!(!dir.path().join("never.log").exists());
    }
}
