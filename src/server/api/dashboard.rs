// Session, onboarding, directive and quest endpoints

use super::{ApiError, AppState, TextBody};
use crate::dashboard::{DashboardSnapshot, OnboardingView, ProgressView, Tab};
use crate::store::DossierItem;
use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Local;
use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub generator: &'static str,
    pub trace_sink: &'static str,
}

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        generator: state.gateway().generator_name(),
        trace_sink: state.gateway().tracer().sink_name(),
    })
}

/// GET /api/dashboard - Everything needed to render the current view
pub async fn get_dashboard(
    State(state): State<AppState>,
) -> Result<Json<DashboardSnapshot>, ApiError> {
    Ok(Json(state.lock()?.snapshot()))
}

// ============================================================================
// Onboarding & tabs
// ============================================================================

pub async fn get_onboarding(
    State(state): State<AppState>,
) -> Result<Json<OnboardingView>, ApiError> {
    Ok(Json(state.lock()?.onboarding()))
}

pub async fn next_onboarding_step(
    State(state): State<AppState>,
) -> Result<Json<OnboardingView>, ApiError> {
    Ok(Json(state.lock()?.next_onboarding_step()))
}

#[derive(Debug, Deserialize)]
pub struct StepBody {
    pub step: usize,
}

/// PUT /api/onboarding/step - Jump via the progress dots
pub async fn go_to_onboarding_step(
    State(state): State<AppState>,
    Json(body): Json<StepBody>,
) -> Result<Json<OnboardingView>, ApiError> {
    Ok(Json(state.lock()?.go_to_onboarding_step(body.step)))
}

#[derive(Debug, Deserialize, Serialize)]
pub struct TabBody {
    pub tab: Tab,
}

pub async fn select_tab(
    State(state): State<AppState>,
    Json(body): Json<TabBody>,
) -> Result<Json<TabBody>, ApiError> {
    let mut dashboard = state.lock()?;
    dashboard.select_tab(body.tab);
    Ok(Json(TabBody {
        tab: dashboard.active_tab(),
    }))
}

// ============================================================================
// Directive
// ============================================================================

/// POST /api/directive - Save the directive
///
/// The first save also generates vision and anti-vision; the response is
/// sent once that generation has been merged.
pub async fn commit_directive(
    State(state): State<AppState>,
    Json(body): Json<TextBody>,
) -> Result<Json<DashboardSnapshot>, ApiError> {
    let task = state.lock()?.commit_directive(&body.text)?;
    if let Some(task) = task {
        state.generate(task).await?;
    }
    Ok(Json(state.lock()?.snapshot()))
}

pub async fn edit_directive(
    State(state): State<AppState>,
) -> Result<Json<DashboardSnapshot>, ApiError> {
    let mut dashboard = state.lock()?;
    dashboard.edit_directive();
    Ok(Json(dashboard.snapshot()))
}

// ============================================================================
// Quests & dossier
// ============================================================================

#[derive(Debug, Serialize)]
pub struct QuestToggled {
    pub index: usize,
    pub completed: bool,
}

pub async fn toggle_quest(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<QuestToggled>, ApiError> {
    let completed = state.lock()?.toggle_quest(index)?;
    Ok(Json(QuestToggled { index, completed }))
}

#[derive(Debug, Deserialize)]
pub struct DossierBody {
    pub response: String,
}

/// PUT /api/dossier/:category/:item
pub async fn update_dossier_item(
    State(state): State<AppState>,
    Path((category, item)): Path<(usize, usize)>,
    Json(body): Json<DossierBody>,
) -> Result<Json<DossierItem>, ApiError> {
    let updated = state
        .lock()?
        .update_dossier_item(category, item, &body.response)?;
    Ok(Json(updated))
}

// ============================================================================
// Progress & session
// ============================================================================

pub async fn get_progress(State(state): State<AppState>) -> Result<Json<ProgressView>, ApiError> {
    Ok(Json(state.lock()?.progress()))
}

/// POST /api/session/terminate - Start over with a fresh session
pub async fn terminate_session(
    State(state): State<AppState>,
) -> Result<Json<DashboardSnapshot>, ApiError> {
    let mut dashboard = state.lock()?;
    dashboard.terminate_session(Local::now().naive_local(), StdRng::from_entropy());
    Ok(Json(dashboard.snapshot()))
}
