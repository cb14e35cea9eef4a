// Journal endpoints

use super::{ApiError, AppState};
use crate::ai::JournalAnalysis;
use crate::store::JournalEntry;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Local;
use serde::{Deserialize, Serialize};

/// GET /api/journal - Newest first
pub async fn list_journal(
    State(state): State<AppState>,
) -> Result<Json<Vec<JournalEntry>>, ApiError> {
    Ok(Json(state.lock()?.store().journal().to_vec()))
}

/// POST /api/journal - New blank entry with a random prompt
pub async fn add_journal_entry(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<JournalEntry>), ApiError> {
    let entry = state.lock()?.add_journal_entry(Local::now().naive_local());
    Ok((StatusCode::CREATED, Json(entry)))
}

#[derive(Debug, Deserialize)]
pub struct ResponseBody {
    pub response: String,
}

pub async fn update_journal_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<ResponseBody>,
) -> Result<Json<JournalEntry>, ApiError> {
    let entry =
        state
            .lock()?
            .update_journal_entry(&id, &body.response, Local::now().naive_local())?;
    Ok(Json(entry))
}

#[derive(Debug, Serialize)]
pub struct Deleted {
    pub removed: bool,
}

/// DELETE /api/journal/:id - Idempotent; unknown ids report `removed: false`
pub async fn delete_journal_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Deleted>, ApiError> {
    let removed = state.lock()?.delete_journal_entry(&id);
    Ok(Json(Deleted { removed }))
}

#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    /// Latest analysis; unchanged when the call produced nothing
    pub analysis: Option<JournalAnalysis>,
}

/// POST /api/journal/analysis
pub async fn analyze_journal(
    State(state): State<AppState>,
) -> Result<Json<AnalysisResponse>, ApiError> {
    let task = state.lock()?.begin_journal_analysis()?;
    state.generate(task).await?;

    let analysis = state.lock()?.journal_analysis().cloned();
    Ok(Json(AnalysisResponse { analysis }))
}
