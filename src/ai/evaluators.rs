//! LLM-as-judge evaluators
//!
//! Each evaluator turns a traced call's input and output into a rubric
//! prompt, asks the text endpoint to grade it, and averages the three 1-5
//! rubric scores. Any failure along the way yields a neutral score of 3.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use super::prompts;
use super::sanitize::parse_lenient;
use super::{generate_within, AiError, GenerateRequest, ResponseFormat, TextGenerator};

pub const VISION_QUALITY: &str = "vision_quality";
pub const JOURNAL_ANALYSIS_QUALITY: &str = "journal_analysis_quality";

const FALLBACK_SCORE: f64 = 3.0;
const FALLBACK_REASONING: &str = "Evaluation failed";

/// A judge verdict
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub score: f64,
    pub reasoning: String,
}

impl Evaluation {
    fn failed() -> Self {
        Self {
            score: FALLBACK_SCORE,
            reasoning: FALLBACK_REASONING.to_string(),
        }
    }

    fn from_scores(scores: [f64; 3], reasoning: String) -> Self {
        let avg = scores.iter().map(|s| s.clamp(1.0, 5.0)).sum::<f64>() / 3.0;
        Self {
            score: avg,
            reasoning,
        }
    }
}

/// A named rubric
pub trait Evaluator: Send + Sync {
    fn name(&self) -> &'static str;

    fn judge_prompt(&self, input: &Value, output: &Value) -> String;

    fn score(&self, response: &str) -> Result<Evaluation, AiError>;
}

// ─────────────────────────────────────────────────────────────────────────────
// Rubrics
// ─────────────────────────────────────────────────────────────────────────────

/// Specificity, inspiration and identity focus of a generated vision
pub struct VisionQuality;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct VisionRubric {
    specificity: f64,
    inspiration: f64,
    identity_focus: f64,
    #[serde(default)]
    reasoning: String,
}

impl Evaluator for VisionQuality {
    fn name(&self) -> &'static str {
        VISION_QUALITY
    }

    fn judge_prompt(&self, input: &Value, output: &Value) -> String {
        let context = input.get("context").unwrap_or(input);
        let vision = output.as_str().map(str::to_string).unwrap_or_else(|| output.to_string());
        prompts::vision_judge(context, &vision)
    }

    fn score(&self, response: &str) -> Result<Evaluation, AiError> {
        let rubric: VisionRubric = parse_lenient(response)?;
        Ok(Evaluation::from_scores(
            [rubric.specificity, rubric.inspiration, rubric.identity_focus],
            rubric.reasoning,
        ))
    }
}

/// Relevance, depth and actionability of a journal analysis
pub struct JournalAnalysisQuality;

#[derive(Deserialize)]
struct JournalRubric {
    relevance: f64,
    depth: f64,
    actionability: f64,
    #[serde(default)]
    reasoning: String,
}

impl Evaluator for JournalAnalysisQuality {
    fn name(&self) -> &'static str {
        JOURNAL_ANALYSIS_QUALITY
    }

    fn judge_prompt(&self, input: &Value, output: &Value) -> String {
        let entry_count = input
            .get("entryCount")
            .and_then(Value::as_u64)
            .unwrap_or(0) as usize;
        prompts::journal_judge(entry_count, output)
    }

    fn score(&self, response: &str) -> Result<Evaluation, AiError> {
        let rubric: JournalRubric = parse_lenient(response)?;
        Ok(Evaluation::from_scores(
            [rubric.relevance, rubric.depth, rubric.actionability],
            rubric.reasoning,
        ))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Registry
// ─────────────────────────────────────────────────────────────────────────────

/// Evaluators by name, sharing one judge endpoint
pub struct EvaluatorRegistry {
    judge: Arc<dyn TextGenerator>,
    model: String,
    timeout: Duration,
    evaluators: HashMap<&'static str, Box<dyn Evaluator>>,
}

impl EvaluatorRegistry {
    pub fn new(judge: Arc<dyn TextGenerator>, model: impl Into<String>, timeout: Duration) -> Self {
        Self {
            judge,
            model: model.into(),
            timeout,
            evaluators: HashMap::new(),
        }
    }

    /// Registry with the vision and journal analysis rubrics
    pub fn with_defaults(
        judge: Arc<dyn TextGenerator>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        let mut registry = Self::new(judge, model, timeout);
        registry.register(Box::new(VisionQuality));
        registry.register(Box::new(JournalAnalysisQuality));
        registry
    }

    pub fn register(&mut self, evaluator: Box<dyn Evaluator>) {
        self.evaluators.insert(evaluator.name(), evaluator);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.evaluators.contains_key(name)
    }

    /// Run the named evaluator. `None` when no evaluator has that name.
    pub async fn evaluate(&self, name: &str, input: &Value, output: &Value) -> Option<Evaluation> {
        let evaluator = self.evaluators.get(name)?;

        let request = GenerateRequest {
            model: self.model.clone(),
            prompt: evaluator.judge_prompt(input, output),
            format: ResponseFormat::Json,
            timeout: self.timeout,
        };

        let evaluation = match generate_within(self.judge.as_ref(), &request).await {
            Ok(response) => evaluator.score(&response),
            Err(e) => Err(e),
        };

        Some(evaluation.unwrap_or_else(|e| {
            tracing::warn!(evaluator = name, "Evaluation failed: {}", e);
            Evaluation::failed()
        }))
    }
}
