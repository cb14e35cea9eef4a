// Background trace exporter
//
// Receives closed spans and scores from the `Tracer` and forwards them to the
// sink one at a time. Commands are processed in order, so a `Flush` ack means
// everything queued before it has been handed to the sink.

use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};

use super::{FeedbackScore, TraceRecord, TraceSink};

/// Commands sent to the exporter task
pub(super) enum ExportCommand {
    Export(Box<TraceRecord>),
    Score(Box<FeedbackScore>),
    Flush(oneshot::Sender<()>),
}

/// Exporter loop. Ends once every `Tracer` handle has been dropped.
pub(super) async fn run(mut rx: mpsc::Receiver<ExportCommand>, sink: Arc<dyn TraceSink>) {
    tracing::debug!(sink = sink.name(), "Trace exporter started");

    while let Some(command) = rx.recv().await {
        match command {
            ExportCommand::Export(record) => {
                if let Err(e) = sink.export(&record).await {
                    tracing::warn!(trace = %record.name, "Trace export failed: {}", e);
                }
            }
            ExportCommand::Score(score) => {
                if let Err(e) = sink.score(&score).await {
                    tracing::warn!(score = %score.name, "Feedback score export failed: {}", e);
                }
            }
            ExportCommand::Flush(ack) => {
                let _ = ack.send(());
            }
        }
    }

    tracing::debug!("Trace exporter stopped");
}
