// Boss fight endpoints - vision and anti-vision

use super::{ApiError, AppState, TextBody};
use axum::{extract::State, Json};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BossFightView {
    pub vision: String,
    pub anti_vision: String,
}

fn view(state: &AppState) -> Result<Json<BossFightView>, ApiError> {
    let dashboard = state.lock()?;
    Ok(Json(BossFightView {
        vision: dashboard.vision().to_string(),
        anti_vision: dashboard.anti_vision().to_string(),
    }))
}

pub async fn set_vision(
    State(state): State<AppState>,
    Json(body): Json<TextBody>,
) -> Result<Json<BossFightView>, ApiError> {
    state.lock()?.set_vision(&body.text)?;
    view(&state)
}

pub async fn set_anti_vision(
    State(state): State<AppState>,
    Json(body): Json<TextBody>,
) -> Result<Json<BossFightView>, ApiError> {
    state.lock()?.set_anti_vision(&body.text)?;
    view(&state)
}

/// POST /api/boss-fight/vision/generate - Regenerate from directive, dossier and journal
pub async fn generate_vision(
    State(state): State<AppState>,
) -> Result<Json<BossFightView>, ApiError> {
    let task = state.lock()?.begin_vision_generation()?;
    state.generate(task).await?;
    view(&state)
}

pub async fn generate_anti_vision(
    State(state): State<AppState>,
) -> Result<Json<BossFightView>, ApiError> {
    let task = state.lock()?.begin_anti_vision_generation()?;
    state.generate(task).await?;
    view(&state)
}
