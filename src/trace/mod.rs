//! Trace sink for AI calls
//!
//! Every gateway call is bracketed by a span: opened before the call, closed
//! exactly once when it settles. Closed spans are recorded in the local
//! `TraceLog` (for the metrics endpoint) and handed to a background exporter
//! that ships them to the configured `TraceSink`.
//!
//! # Architecture
//!
//! ```text
//! Tracer::with_trace()
//!     │
//!     ├──→ TraceLog (in-memory ring, metrics)
//!     │
//!     └──→ mpsc::Sender (bounded, try_send)
//!             │
//!             └──→ exporter task ──→ TraceSink (Opik / no-op)
//! ```
//!
//! Tracing is best-effort: a full channel, a dead exporter or a failing sink
//! is logged and never changes what the wrapped call returns.

mod exporter;
mod log;
mod opik;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};

use crate::config::OpikConfig;

pub use log::{TraceLog, TraceMetrics};
pub use opik::OpikSink;

use exporter::ExportCommand;

/// Error recorded on spans whose future was dropped before it settled
pub const CANCELLED: &str = "cancelled";

// ─────────────────────────────────────────────────────────────────────────────
// Records
// ─────────────────────────────────────────────────────────────────────────────

/// A closed span
#[derive(Debug, Clone, Serialize)]
pub struct TraceRecord {
    pub id: String,
    pub name: String,
    pub input: Value,
    /// `Value::Null` on failure
    pub output: Value,
    /// Caller metadata merged with `timestamp`, `duration`, `success`, `error`
    pub metadata: Value,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub duration_ms: u64,
    pub success: bool,
    pub error: Option<String>,
}

/// A judge score attached to an existing trace
#[derive(Debug, Clone, Serialize)]
pub struct FeedbackScore {
    pub trace_id: String,
    pub name: String,
    pub value: f64,
    pub reason: String,
}

#[derive(Debug, Error)]
pub enum TraceError {
    #[error("trace sink not configured (set OPIK_API_KEY)")]
    NotConfigured,

    #[error("trace sink request failed: {0}")]
    Request(String),

    #[error("trace sink returned {status}: {body}")]
    Status { status: u16, body: String },
}

// ─────────────────────────────────────────────────────────────────────────────
// Sinks
// ─────────────────────────────────────────────────────────────────────────────

/// Destination for closed spans
#[async_trait]
pub trait TraceSink: Send + Sync {
    /// Human-readable name for logging
    fn name(&self) -> &'static str;

    async fn export(&self, record: &TraceRecord) -> Result<(), TraceError>;

    async fn score(&self, _score: &FeedbackScore) -> Result<(), TraceError> {
        Ok(())
    }
}

/// Sink used when tracing is disabled; spans still reach the local log
#[derive(Debug, Default)]
pub struct NoopSink;

#[async_trait]
impl TraceSink for NoopSink {
    fn name(&self) -> &'static str {
        "noop"
    }

    async fn export(&self, _record: &TraceRecord) -> Result<(), TraceError> {
        Ok(())
    }
}

/// Create a trace sink from configuration
pub fn create_sink(config: &OpikConfig) -> Arc<dyn TraceSink> {
    if !config.is_configured() {
        tracing::debug!("Opik export not configured, traces stay local");
        return Arc::new(NoopSink);
    }

    match OpikSink::new(config) {
        Ok(sink) => Arc::new(sink),
        Err(e) => {
            tracing::error!("Failed to create Opik sink: {}", e);
            Arc::new(NoopSink)
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tracer
// ─────────────────────────────────────────────────────────────────────────────

/// Handle used by the gateway to open spans. Cheap to clone.
#[derive(Clone)]
pub struct Tracer {
    tx: mpsc::Sender<ExportCommand>,
    log: TraceLog,
    sink_name: &'static str,
}

impl Tracer {
    /// Spawn the exporter task for `sink`. Must be called inside a tokio runtime.
    pub fn new(sink: Arc<dyn TraceSink>, channel_buffer: usize) -> Self {
        let sink_name = sink.name();
        let (tx, rx) = mpsc::channel(channel_buffer.max(1));
        tokio::spawn(exporter::run(rx, sink));

        tracing::debug!(sink = sink_name, "Tracer started");

        Self {
            tx,
            log: TraceLog::new(),
            sink_name,
        }
    }

    pub fn sink_name(&self) -> &'static str {
        self.sink_name
    }

    pub fn log(&self) -> &TraceLog {
        &self.log
    }

    /// Open a span. It is closed by `succeed`/`fail`, or as cancelled on drop.
    pub fn start_span(&self, name: &str, input: Value, metadata: Value) -> SpanGuard {
        SpanGuard {
            id: new_trace_id(),
            tracer: self.clone(),
            open: Some(OpenSpan {
                name: name.to_string(),
                input,
                metadata,
                start_time: Utc::now(),
                started: Instant::now(),
            }),
        }
    }

    /// Run `fut` inside a span and return its result unchanged
    pub async fn with_trace<T, E, F>(
        &self,
        name: &str,
        input: Value,
        metadata: Value,
        fut: F,
    ) -> Result<T, E>
    where
        F: Future<Output = Result<T, E>>,
        T: Serialize,
        E: Display,
    {
        self.with_trace_id(name, input, metadata, fut).await.1
    }

    /// Like `with_trace`, also returning the span id (for attaching scores)
    pub async fn with_trace_id<T, E, F>(
        &self,
        name: &str,
        input: Value,
        metadata: Value,
        fut: F,
    ) -> (String, Result<T, E>)
    where
        F: Future<Output = Result<T, E>>,
        T: Serialize,
        E: Display,
    {
        let span = self.start_span(name, input, metadata);
        let id = span.id().to_string();

        let result = fut.await;
        match &result {
            Ok(value) => span.succeed(serde_json::to_value(value).unwrap_or(Value::Null)),
            Err(e) => span.fail(e.to_string()),
        }

        (id, result)
    }

    /// Attach a feedback score to a trace
    pub fn score(&self, score: FeedbackScore) {
        self.log.record_score(&score);
        self.dispatch(ExportCommand::Score(Box::new(score)));
    }

    /// Wait until everything queued so far has reached the sink
    pub async fn flush(&self) {
        let (ack_tx, ack_rx) = oneshot::channel();
        if self.tx.send(ExportCommand::Flush(ack_tx)).await.is_ok() {
            let _ = ack_rx.await;
        }
    }

    fn close(&self, id: String, span: OpenSpan, output: Value, error: Option<String>) {
        let end_time = Utc::now();
        let duration_ms = span.started.elapsed().as_millis() as u64;
        let success = error.is_none();

        let mut metadata = match span.metadata {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => {
                let mut map = Map::new();
                map.insert("context".to_string(), other);
                map
            }
        };
        metadata.insert("timestamp".to_string(), json!(span.start_time.to_rfc3339()));
        metadata.insert("duration".to_string(), json!(duration_ms));
        metadata.insert("success".to_string(), json!(success));
        if let Some(ref e) = error {
            metadata.insert("error".to_string(), json!(e));
        }

        let record = TraceRecord {
            id,
            name: span.name,
            input: span.input,
            output,
            metadata: Value::Object(metadata),
            start_time: span.start_time,
            end_time,
            duration_ms,
            success,
            error,
        };

        if record.success {
            tracing::debug!(trace = %record.name, duration_ms, "Span closed");
        } else {
            tracing::debug!(
                trace = %record.name,
                error = record.error.as_deref().unwrap_or(""),
                "Span closed with failure"
            );
        }

        self.log.record(record.clone());
        self.dispatch(ExportCommand::Export(Box::new(record)));
    }

    fn dispatch(&self, command: ExportCommand) {
        if let Err(e) = self.tx.try_send(command) {
            tracing::warn!("Dropping trace export: {}", e);
        }
    }
}

/// Opik expects UUIDv7 trace ids
fn new_trace_id() -> String {
    uuid::Uuid::now_v7().to_string()
}

struct OpenSpan {
    name: String,
    input: Value,
    metadata: Value,
    start_time: DateTime<Utc>,
    started: Instant,
}

/// An open span. Consumed by `succeed`/`fail`; dropping it unfinished
/// closes it as cancelled.
pub struct SpanGuard {
    id: String,
    tracer: Tracer,
    open: Option<OpenSpan>,
}

impl SpanGuard {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn succeed(mut self, output: Value) {
        if let Some(span) = self.open.take() {
            self.tracer.close(self.id.clone(), span, output, None);
        }
    }

    pub fn fail(mut self, error: impl Into<String>) {
        if let Some(span) = self.open.take() {
            self.tracer
                .close(self.id.clone(), span, Value::Null, Some(error.into()));
        }
    }
}

impl Drop for SpanGuard {
    fn drop(&mut self) {
        if let Some(span) = self.open.take() {
            self.tracer
                .close(self.id.clone(), span, Value::Null, Some(CANCELLED.to_string()));
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::Mutex;

    /// Sink that keeps everything it receives
    #[derive(Default)]
    pub struct RecordingSink {
        pub records: Mutex<Vec<TraceRecord>>,
        pub scores: Mutex<Vec<FeedbackScore>>,
    }

    #[async_trait]
    impl TraceSink for RecordingSink {
        fn name(&self) -> &'static str {
            "recording"
        }

        async fn export(&self, record: &TraceRecord) -> Result<(), TraceError> {
            self.records.lock().unwrap().push(record.clone());
            Ok(())
        }

        async fn score(&self, score: &FeedbackScore) -> Result<(), TraceError> {
            self.scores.lock().unwrap().push(score.clone());
            Ok(())
        }
    }

    /// Sink that always fails
    pub struct BrokenSink;

    #[async_trait]
    impl TraceSink for BrokenSink {
        fn name(&self) -> &'static str {
            "broken"
        }

        async fn export(&self, _record: &TraceRecord) -> Result<(), TraceError> {
            Err(TraceError::Request("sink unavailable".to_string()))
        }
    }
}
