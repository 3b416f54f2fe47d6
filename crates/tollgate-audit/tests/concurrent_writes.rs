//! Records written from many tasks at once stay intact.

use http::{HeaderValue, Method, StatusCode};
use serde_json::json;
use std::collections::HashSet;
use std::io::{self, Write};
use std::sync::Arc;
use tollgate_audit::{AuditContext, AuditLevel, AuditLogger, AuditRecord, WriterSink};

/// Accepts a few bytes per call so a record takes many `write` calls.
#[derive(Default)]
struct TrickleWriter {
    bytes: Vec<u8>,
}

impl Write for TrickleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = buf.len().min(7);
        self.bytes.extend_from_slice(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_records_do_not_interleave() {
    let sink = Arc::new(WriterSink::new(TrickleWriter::default()));
    let logger = Arc::new(AuditLogger::with_sink(
        AuditLevel::RequestResponse,
        sink.clone(),
    ));

    let tasks = (0..64).map(|i| {
        let logger = logger.clone();
        tokio::spawn(async move {
            let ctx = AuditContext::new(Method::POST, format!("/v1/things/{i}"))
                .header("user-agent", HeaderValue::from_static("load-test/1.0"))
                .response_status(StatusCode::CREATED)
                .response_body(json!({"id": i, "padding": "x".repeat(512)}));
            logger.log(&ctx).await.unwrap().unwrap()
        })
    });
    let written: Vec<AuditRecord> = futures::future::join_all(tasks)
        .await
        .into_iter()
        .map(|res| res.unwrap())
        .collect();

    drop(logger);
    let sink = Arc::try_unwrap(sink).ok().expect("sink still shared");
    let out = String::from_utf8(sink.into_inner().bytes).unwrap();

    let parsed: Vec<AuditRecord> = out
        .lines()
        .map(|line| serde_json::from_str(line).expect("each line is one record"))
        .collect();
    assert_eq!(parsed.len(), written.len());

    let ids: HashSet<_> = parsed.iter().map(|r| r.audit_id).collect();
    assert_eq!(ids.len(), 64);
    for record in &written {
        assert!(parsed.contains(record));
    }
}
