// Opik REST sink
//
// Traces:          POST {api_base}/v1/private/traces
// Feedback scores: PUT  {api_base}/v1/private/traces/{id}/feedback-scores
//
// Opik stores `input`/`output`/`metadata` as JSON objects, so scalar values
// are wrapped before sending.

use async_trait::async_trait;
use serde_json::{json, Value};

use super::{FeedbackScore, TraceError, TraceRecord, TraceSink};
use crate::config::OpikConfig;

pub struct OpikSink {
    client: reqwest::Client,
    base_url: String,
    project_name: String,
    api_key: String,
    workspace: Option<String>,
}

impl OpikSink {
    pub fn new(config: &OpikConfig) -> Result<Self, TraceError> {
        let api_key = config.api_key.clone().ok_or(TraceError::NotConfigured)?;

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TraceError::Request(format!("Failed to create HTTP client: {}", e)))?;

        tracing::info!(
            "Initialized Opik sink: {} (project: {})",
            config.api_base,
            config.project_name
        );

        Ok(Self {
            client,
            base_url: config.api_base.trim_end_matches('/').to_string(),
            project_name: config.project_name.clone(),
            api_key,
            workspace: config.workspace.clone(),
        })
    }

    fn with_auth(&self, mut req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        req = req.header("authorization", &self.api_key);
        if let Some(workspace) = &self.workspace {
            req = req.header("Comet-Workspace", workspace);
        }
        req
    }

    fn trace_body(&self, record: &TraceRecord) -> Value {
        let mut body = json!({
            "id": record.id,
            "project_name": self.project_name,
            "name": record.name,
            "start_time": record.start_time.to_rfc3339(),
            "end_time": record.end_time.to_rfc3339(),
            "input": as_object(&record.input, "input"),
            "metadata": as_object(&record.metadata, "metadata"),
        });

        if !record.output.is_null() {
            body["output"] = as_object(&record.output, "output");
        }
        if let Some(error) = &record.error {
            body["error_info"] = json!({
                "exception_type": "AiCallFailed",
                "message": error,
                "traceback": error,
            });
        }
        body
    }

    async fn send(&self, req: reqwest::RequestBuilder) -> Result<(), TraceError> {
        let response = self
            .with_auth(req)
            .send()
            .await
            .map_err(|e| TraceError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(TraceError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}

fn as_object(value: &Value, key: &str) -> Value {
    match value {
        Value::Object(_) => value.clone(),
        Value::Null => json!({}),
        other => {
            let mut map = serde_json::Map::new();
            map.insert(key.to_string(), other.clone());
            Value::Object(map)
        }
    }
}

#[async_trait]
impl TraceSink for OpikSink {
    fn name(&self) -> &'static str {
        "opik"
    }

    async fn export(&self, record: &TraceRecord) -> Result<(), TraceError> {
        let url = format!("{}/v1/private/traces", self.base_url);
        self.send(self.client.post(&url).json(&self.trace_body(record)))
            .await
    }

    async fn score(&self, score: &FeedbackScore) -> Result<(), TraceError> {
        let url = format!(
            "{}/v1/private/traces/{}/feedback-scores",
            self.base_url, score.trace_id
        );
        let body = json!({
            "name": score.name,
            "value": score.value,
            "reason": score.reason,
            "source": "sdk",
        });
        self.send(self.client.put(&url).json(&body)).await
    }
}
