// Trace metrics endpoint

use super::AppState;
use crate::trace::{TraceMetrics, TraceRecord};
use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

const DEFAULT_RECENT: usize = 20;
const MAX_RECENT: usize = 100;

#[derive(Debug, Deserialize)]
pub struct MetricsQuery {
    /// Number of recent spans to include
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct MetricsResponse {
    pub metrics: TraceMetrics,
    pub recent: Vec<TraceRecord>,
}

/// GET /api/metrics - Call metrics over the retained spans
pub async fn get_metrics(
    State(state): State<AppState>,
    Query(params): Query<MetricsQuery>,
) -> Json<MetricsResponse> {
    let log = state.gateway().tracer().log();
    let limit = params.limit.unwrap_or(DEFAULT_RECENT).min(MAX_RECENT);

    Json(MetricsResponse {
        metrics: log.metrics(),
        recent: log.recent(limit),
    })
}
