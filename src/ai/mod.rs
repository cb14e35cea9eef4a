//! AI gateway
//!
//! Thin wrapper around a generative-text endpoint. The gateway builds the
//! prompts, routes every call through the `Tracer`, and fails closed: any
//! transport, status or parse failure is logged and the caller receives an
//! empty value, leaving dashboard state as it was.
//!
//! # Providers
//!
//! - `GeminiClient`: Google Generative Language `generateContent` over HTTP
//! - `UnconfiguredGenerator`: used when no API key is set; every call fails
//!   with `AiError::NotConfigured`

pub mod evaluators;
mod gemini;
pub mod prompts;
pub mod sanitize;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::config::AiConfig;
use crate::trace::{FeedbackScore, Tracer};

pub use evaluators::EvaluatorRegistry;
pub use gemini::GeminiClient;

// ─────────────────────────────────────────────────────────────────────────────
// Errors & requests
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum AiError {
    #[error("AI endpoint not configured (set GEMINI_API_KEY)")]
    NotConfigured,

    #[error("request failed: {0}")]
    Request(String),

    #[error("endpoint returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("malformed response: {0}")]
    Parse(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
    pub format: ResponseFormat,
    pub timeout: Duration,
}

/// A generative-text endpoint
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Human-readable name for logging
    fn name(&self) -> &'static str;

    /// Single attempt, no retries
    async fn generate(&self, request: &GenerateRequest) -> Result<String, AiError>;
}

/// Generator used when no API key is available
#[derive(Debug, Default)]
pub struct UnconfiguredGenerator;

#[async_trait]
impl TextGenerator for UnconfiguredGenerator {
    fn name(&self) -> &'static str {
        "none"
    }

    async fn generate(&self, _request: &GenerateRequest) -> Result<String, AiError> {
        Err(AiError::NotConfigured)
    }
}

/// Create a text generator from configuration
///
/// A missing key is not fatal: the generator fails each request instead.
pub fn create_generator(config: &AiConfig) -> Arc<dyn TextGenerator> {
    let Some(key) = config.api_key.clone() else {
        tracing::warn!("GEMINI_API_KEY not set, AI features will return empty results");
        return Arc::new(UnconfiguredGenerator);
    };

    match GeminiClient::new(&config.api_base, key) {
        Ok(client) => {
            tracing::info!(
                "Initialized Gemini client: {} (model: {})",
                config.api_base,
                config.model
            );
            Arc::new(client)
        }
        Err(e) => {
            tracing::error!("Failed to create Gemini client: {}", e);
            Arc::new(UnconfiguredGenerator)
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Results
// ─────────────────────────────────────────────────────────────────────────────

/// Vision and anti-vision generated together from a directive
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisionPair {
    #[serde(default)]
    pub vision: String,
    #[serde(default, rename = "antiVision")]
    pub anti_vision: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JournalAnalysis {
    pub themes: Vec<String>,
    pub emotional_trend: String,
    pub suggestions: Vec<String>,
}

impl JournalAnalysis {
    pub fn is_empty(&self) -> bool {
        self.themes.is_empty() && self.emotional_trend.is_empty() && self.suggestions.is_empty()
    }
}

/// What the vision prompt knows about the user
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisionContext {
    pub directive: String,
    /// Answered dossier items, `{category: {prompt: response}}`
    pub dossier: Value,
    /// Journal responses, newest first
    pub journal: Vec<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Gateway
// ─────────────────────────────────────────────────────────────────────────────

/// Call `generator`, giving up once the request's timeout has elapsed
///
/// Generators are expected to honour `request.timeout` themselves; this
/// bounds the ones that do not.
pub(crate) async fn generate_within(
    generator: &dyn TextGenerator,
    request: &GenerateRequest,
) -> Result<String, AiError> {
    match tokio::time::timeout(request.timeout, generator.generate(request)).await {
        Ok(result) => result,
        Err(_) => Err(AiError::Timeout(request.timeout)),
    }
}

/// Traced, fail-closed AI operations. Cheap to clone.
#[derive(Clone)]
pub struct AiGateway {
    generator: Arc<dyn TextGenerator>,
    tracer: Tracer,
    evaluators: Option<Arc<EvaluatorRegistry>>,
    model: String,
    timeout: Duration,
}

impl AiGateway {
    pub fn new(generator: Arc<dyn TextGenerator>, tracer: Tracer, config: &AiConfig) -> Self {
        let timeout = Duration::from_secs(config.timeout_secs);
        let evaluators = config.evaluate.then(|| {
            Arc::new(EvaluatorRegistry::with_defaults(
                generator.clone(),
                config.model.clone(),
                timeout,
            ))
        });

        Self {
            generator,
            tracer,
            evaluators,
            model: config.model.clone(),
            timeout,
        }
    }

    pub fn generator_name(&self) -> &'static str {
        self.generator.name()
    }

    pub fn tracer(&self) -> &Tracer {
        &self.tracer
    }

    /// Vision and anti-vision in one JSON-mode call
    pub async fn generate_visions(&self, directive: &str) -> VisionPair {
        let prompt = prompts::combined_visions(directive);
        let input = json!({ "prompt": prompt, "directive": directive });
        let metadata = json!({ "feature": "directive", "type": "visions" });

        self.run("generate_visions", input, metadata, None, async {
            let text = self.call(prompt.clone(), ResponseFormat::Json).await?;
            let pair: VisionPair = sanitize::parse_lenient(&text)?;
            Ok(VisionPair {
                vision: pair.vision.trim().to_string(),
                anti_vision: pair.anti_vision.trim().to_string(),
            })
        })
        .await
        .unwrap_or_default()
    }

    pub async fn generate_vision(&self, context: &VisionContext) -> String {
        let prompt = prompts::vision(&context.directive, &context.dossier, &context.journal);
        let input = json!({ "prompt": prompt, "context": context });
        let metadata = json!({ "feature": "boss_fight", "type": "vision" });

        self.run(
            "generate_vision",
            input,
            metadata,
            Some(evaluators::VISION_QUALITY),
            async {
                let text = self.call(prompt.clone(), ResponseFormat::Text).await?;
                Ok(text.trim().to_string())
            },
        )
        .await
        .unwrap_or_default()
    }

    pub async fn generate_anti_vision(&self, directive: &str, current_vision: &str) -> String {
        let prompt = prompts::anti_vision(directive, current_vision);
        let input = json!({
            "prompt": prompt,
            "context": { "directive": directive, "currentVision": current_vision },
        });
        let metadata = json!({ "feature": "boss_fight", "type": "anti_vision" });

        self.run("generate_anti_vision", input, metadata, None, async {
            let text = self.call(prompt.clone(), ResponseFormat::Text).await?;
            Ok(text.trim().to_string())
        })
        .await
        .unwrap_or_default()
    }

    /// Themes, trend and suggestions from the most recent journal responses
    ///
    /// `entry_count` is the size of the whole journal, not just the
    /// responses sent.
    pub async fn analyze_journal(
        &self,
        responses: &[String],
        entry_count: usize,
    ) -> JournalAnalysis {
        let prompt = prompts::journal_analysis(responses);
        let input = json!({ "entryCount": entry_count });
        let metadata = json!({ "feature": "journal_analysis" });

        self.run(
            "analyze_journal",
            input,
            metadata,
            Some(evaluators::JOURNAL_ANALYSIS_QUALITY),
            async {
                let text = self.call(prompt.clone(), ResponseFormat::Json).await?;
                sanitize::parse_lenient::<JournalAnalysis>(&text)
            },
        )
        .await
        .unwrap_or_default()
    }

    async fn call(&self, prompt: String, format: ResponseFormat) -> Result<String, AiError> {
        let request = GenerateRequest {
            model: self.model.clone(),
            prompt,
            format,
            timeout: self.timeout,
        };
        generate_within(self.generator.as_ref(), &request).await
    }

    /// Trace `fut`, schedule its evaluator on success, and swallow failures
    async fn run<T, F>(
        &self,
        name: &'static str,
        input: Value,
        metadata: Value,
        evaluator: Option<&'static str>,
        fut: F,
    ) -> Option<T>
    where
        T: Serialize,
        F: Future<Output = Result<T, AiError>>,
    {
        let judged = evaluator.and_then(|evaluator| {
            self.evaluators
                .as_ref()
                .filter(|registry| registry.contains(evaluator))
                .map(|registry| (evaluator, registry.clone()))
        });

        let result = match judged {
            None => self.tracer.with_trace(name, input, metadata, fut).await,
            Some((evaluator, registry)) => {
                let (trace_id, result) = self
                    .tracer
                    .with_trace_id(name, input.clone(), metadata, fut)
                    .await;
                if let Ok(value) = &result {
                    let output = serde_json::to_value(value).unwrap_or(Value::Null);
                    self.spawn_evaluation(registry, evaluator, trace_id, input, output);
                }
                result
            }
        };

        match result {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::error!(operation = name, "AI call failed: {}", e);
                None
            }
        }
    }

    fn spawn_evaluation(
        &self,
        registry: Arc<EvaluatorRegistry>,
        evaluator: &'static str,
        trace_id: String,
        input: Value,
        output: Value,
    ) {
        let tracer = self.tracer.clone();
        tokio::spawn(async move {
            if let Some(evaluation) = registry.evaluate(evaluator, &input, &output).await {
                tracing::debug!(evaluator, score = evaluation.score, "Evaluation recorded");
                tracer.score(FeedbackScore {
                    trace_id,
                    name: evaluator.to_string(),
                    value: evaluation.score,
                    reason: evaluation.reasoning,
                });
            }
        });
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Generator that replays scripted replies and records prompts
    pub struct StubGenerator {
        replies: Mutex<VecDeque<Result<String, AiError>>>,
        requests: Mutex<Vec<GenerateRequest>>,
    }

    impl StubGenerator {
        pub fn new(replies: Vec<Result<String, AiError>>) -> Self {
            Self {
                replies: Mutex::new(replies.into()),
                requests: Mutex::new(Vec::new()),
            }
        }

        pub fn replying(replies: &[&str]) -> Self {
            Self::new(replies.iter().map(|r| Ok(r.to_string())).collect())
        }

        pub fn prompts(&self) -> Vec<String> {
            self.requests
                .lock()
                .unwrap()
                .iter()
                .map(|r| r.prompt.clone())
                .collect()
        }

        pub fn requests(&self) -> Vec<GenerateRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl TextGenerator for StubGenerator {
        fn name(&self) -> &'static str {
            "stub"
        }

        async fn generate(&self, request: &GenerateRequest) -> Result<String, AiError> {
            self.requests.lock().unwrap().push(request.clone());
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(AiError::Request("no scripted reply".to_string())))
        }
    }

    /// Generator that never answers
    pub struct HangingGenerator;

    #[async_trait]
    impl TextGenerator for HangingGenerator {
        fn name(&self) -> &'static str {
            "hanging"
        }

        async fn generate(&self, _request: &GenerateRequest) -> Result<String, AiError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(String::new())
        }
    }
}
