// HTTP server - JSON API over the dashboard controller
//
// Every handler locks the dashboard only for synchronous work. AI calls are
// admitted under the lock, run on a spawned task with the lock released, and
// merged back by `Dashboard::apply_generation`. The task owns the merge, so a
// client that disconnects mid-call cannot leave an operation pending.

pub mod api;
mod error;

pub use error::ApiError;

use crate::ai::AiGateway;
use crate::dashboard::{Dashboard, GenerationTask};
use anyhow::{Context, Result};
use axum::{
    routing::{get, post, put},
    Router,
};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Shared state for the API server
#[derive(Clone)]
pub struct AppState {
    dashboard: Arc<Mutex<Dashboard>>,
    gateway: AiGateway,
}

impl AppState {
    pub fn new(dashboard: Dashboard, gateway: AiGateway) -> Self {
        Self {
            dashboard: Arc::new(Mutex::new(dashboard)),
            gateway,
        }
    }

    pub fn gateway(&self) -> &AiGateway {
        &self.gateway
    }

    pub(crate) fn lock(&self) -> Result<MutexGuard<'_, Dashboard>, ApiError> {
        self.dashboard
            .lock()
            .map_err(|e| ApiError::Internal(format!("Failed to lock dashboard: {}", e)))
    }

    /// Run a generation and merge its result. Resolves to whether it applied.
    pub(crate) fn spawn_generation(&self, task: GenerationTask) -> JoinHandle<bool> {
        let state = self.clone();
        tokio::spawn(async move {
            let operation = task.operation();
            let result = task.run(&state.gateway).await;
            match state.dashboard.lock() {
                Ok(mut dashboard) => dashboard.apply_generation(result),
                Err(e) => {
                    tracing::error!(%operation, "Dropping generation result: {}", e);
                    false
                }
            }
        })
    }

    /// Spawn and wait for a generation
    pub(crate) async fn generate(&self, task: GenerationTask) -> Result<bool, ApiError> {
        self.spawn_generation(task)
            .await
            .map_err(|e| ApiError::Internal(format!("Generation task failed: {}", e)))
    }
}

/// Build the API router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(api::health))
        .route("/api/dashboard", get(api::get_dashboard))
        .route("/api/onboarding", get(api::get_onboarding))
        .route("/api/onboarding/next", post(api::next_onboarding_step))
        .route("/api/onboarding/step", put(api::go_to_onboarding_step))
        .route("/api/tab", put(api::select_tab))
        .route("/api/directive", post(api::commit_directive))
        .route("/api/directive/edit", post(api::edit_directive))
        .route("/api/quests/:index/toggle", post(api::toggle_quest))
        .route(
            "/api/journal",
            get(api::list_journal).post(api::add_journal_entry),
        )
        .route(
            "/api/journal/:id",
            put(api::update_journal_entry).delete(api::delete_journal_entry),
        )
        .route("/api/journal/analysis", post(api::analyze_journal))
        .route("/api/calendar", get(api::get_calendar))
        .route("/api/calendar/day", get(api::get_day_detail))
        .route(
            "/api/dossier/:category/:item",
            put(api::update_dossier_item),
        )
        .route("/api/boss-fight/vision", put(api::set_vision))
        .route("/api/boss-fight/anti-vision", put(api::set_anti_vision))
        .route(
            "/api/boss-fight/vision/generate",
            post(api::generate_vision),
        )
        .route(
            "/api/boss-fight/anti-vision/generate",
            post(api::generate_anti_vision),
        )
        .route("/api/progress", get(api::get_progress))
        .route("/api/metrics", get(api::get_metrics))
        .route("/api/session/terminate", post(api::terminate_session))
        .with_state(state)
}

/// Start the API server
pub async fn start_server(
    bind_addr: SocketAddr,
    state: AppState,
    shutdown_rx: tokio::sync::oneshot::Receiver<()>,
) -> Result<()> {
    let app = router(state);

    tracing::info!("Starting API server on {}", bind_addr);

    let listener = TcpListener::bind(bind_addr)
        .await
        .context("Failed to bind to address")?;

    tracing::info!("API listening on {}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_rx.await.ok();
        })
        .await
        .context("Server error")?;

    tracing::info!("API server shut down gracefully");
    Ok(())
}

#[cfg(test)]
mod tests;
