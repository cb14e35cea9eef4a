// HTTP API handlers
//
// All endpoints take and return JSON. Binds to 127.0.0.1 by default, the
// dashboard is a single local session.

mod boss_fight;
mod calendar;
mod dashboard;
mod journal;
mod metrics;

use super::{ApiError, AppState};

pub use boss_fight::{generate_anti_vision, generate_vision, set_anti_vision, set_vision};
pub use calendar::{get_calendar, get_day_detail};
pub use dashboard::{
    commit_directive, edit_directive, get_dashboard, get_onboarding, get_progress,
    go_to_onboarding_step, health, next_onboarding_step, select_tab, terminate_session,
    toggle_quest, update_dossier_item,
};
pub use journal::{
    add_journal_entry, analyze_journal, delete_journal_entry, list_journal,
    update_journal_entry,
};
pub use metrics::get_metrics;

/// Request body carrying free text
#[derive(Debug, serde::Deserialize)]
pub struct TextBody {
    pub text: String,
}
