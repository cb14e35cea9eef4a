//! In-memory trace log
//!
//! Keeps the most recent closed spans and their judge scores so the API can
//! report call metrics without a round trip to the trace backend.

use serde::Serialize;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use super::{FeedbackScore, TraceRecord};

/// Maximum spans retained
const MAX_RECORDS: usize = 500;

/// Token count assumed per call for the cost estimate
const ESTIMATED_TOKENS_PER_CALL: f64 = 500.0;

/// USD per token for the cost estimate
const ESTIMATED_COST_PER_TOKEN: f64 = 0.00002;

/// Summary of the retained spans
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceMetrics {
    pub total_calls: usize,
    /// Mean of each trace's first `*quality*` score, 1.0..=5.0
    pub avg_quality: Option<f64>,
    pub avg_duration_ms: u64,
    /// Percentage of calls that succeeded
    pub success_rate: Option<f64>,
    pub cost_estimate_usd: f64,
}

#[derive(Debug, Default)]
struct Inner {
    records: VecDeque<TraceRecord>,
    scores: HashMap<String, Vec<(String, f64)>>,
}

/// Ring buffer of closed spans. Cheap to clone.
#[derive(Debug, Clone, Default)]
pub struct TraceLog {
    inner: Arc<Mutex<Inner>>,
}

impl TraceLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, record: TraceRecord) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.records.push_back(record);
            while inner.records.len() > MAX_RECORDS {
                if let Some(evicted) = inner.records.pop_front() {
                    inner.scores.remove(&evicted.id);
                }
            }
        }
    }

    pub fn record_score(&self, score: &FeedbackScore) {
        if let Ok(mut inner) = self.inner.lock() {
            inner
                .scores
                .entry(score.trace_id.clone())
                .or_default()
                .push((score.name.clone(), score.value));
        }
    }

    /// Most recent spans first
    pub fn recent(&self, limit: usize) -> Vec<TraceRecord> {
        match self.inner.lock() {
            Ok(inner) => inner.records.iter().rev().take(limit).cloned().collect(),
            Err(_) => Vec::new(),
        }
    }

    pub fn metrics(&self) -> TraceMetrics {
        let Ok(inner) = self.inner.lock() else {
            return TraceMetrics::empty();
        };

        let total_calls = inner.records.len();
        if total_calls == 0 {
            return TraceMetrics::empty();
        }

        let qualities: Vec<f64> = inner
            .records
            .iter()
            .filter_map(|r| inner.scores.get(&r.id))
            .filter_map(|scores| {
                scores
                    .iter()
                    .find(|(name, _)| name.contains("quality"))
                    .map(|(_, value)| *value)
            })
            .collect();
        let avg_quality = if qualities.is_empty() {
            None
        } else {
            Some(qualities.iter().sum::<f64>() / qualities.len() as f64)
        };

        let total_duration: u64 = inner.records.iter().map(|r| r.duration_ms).sum();
        let successes = inner.records.iter().filter(|r| r.success).count();

        TraceMetrics {
            total_calls,
            avg_quality,
            avg_duration_ms: total_duration / total_calls as u64,
            success_rate: Some(successes as f64 * 100.0 / total_calls as f64),
            cost_estimate_usd: total_calls as f64
                * ESTIMATED_TOKENS_PER_CALL
                * ESTIMATED_COST_PER_TOKEN,
        }
    }
}

impl TraceMetrics {
    fn empty() -> Self {
        Self {
            total_calls: 0,
            avg_quality: None,
            avg_duration_ms: 0,
            success_rate: None,
            cost_estimate_usd: 0.0,
        }
    }
}
