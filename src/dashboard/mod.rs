//! View controller
//!
//! `Dashboard` owns every piece of session state: onboarding progress, the
//! active tab, the directive state machine, vision and anti-vision, the
//! latest journal analysis, and the entry/dossier store. Mutations are
//! synchronous. AI work is split in two: a `begin_*` call admits the request
//! and returns a `GenerationTask`, the caller runs it without holding any
//! lock, and `apply_generation` merges the result if its ticket is current.

mod content;
mod generation;
mod requests;

use chrono::NaiveDateTime;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::ai::{prompts::ANALYSIS_ENTRIES, JournalAnalysis, VisionContext};
use crate::calendar::{self, CalendarError, DayDetail, DayStatus};
use crate::store::{DossierCategory, DossierItem, JournalEntry, Quest, Store, StoreError};

pub use content::{milestones, Milestone, OnboardingStep, ONBOARDING_STEPS, UNLOCKED_LEVELS};
pub use generation::{GenerationOutput, GenerationResult, GenerationTask};
pub use requests::{InFlight, Operation, Ticket};

/// Minimum trimmed length (exclusive) for directive and vision text
const MIN_TEXT_CHARS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DashboardError {
    #[error("directive must be longer than 5 characters")]
    DirectiveTooShort,

    #[error("{0} must be longer than 5 characters")]
    TextTooShort(&'static str),

    #[error("dossier response cannot be blank")]
    EmptyResponse,

    #[error("a {0} request is already in progress")]
    AlreadyPending(Operation),

    #[error("directive is saved; edit it before saving again")]
    NotEditing,

    #[error("no journal reflections to analyze")]
    NothingToAnalyze,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Calendar(#[from] CalendarError),
}

// ─────────────────────────────────────────────────────────────────────────────
// View state
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tab {
    #[default]
    Journey,
    BossFight,
    Progress,
    Logs,
    Me,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DirectiveMode {
    #[default]
    Editing,
    Viewing,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingView {
    pub step: usize,
    pub total_steps: usize,
    pub current: OnboardingStep,
    pub show_dashboard: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DossierProgress {
    pub title: String,
    pub answered: usize,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub onboarding: OnboardingView,
    pub active_tab: Tab,
    pub directive: String,
    pub directive_mode: DirectiveMode,
    pub has_directive: bool,
    pub vision: String,
    pub anti_vision: String,
    pub journal_analysis: Option<JournalAnalysis>,
    pub quests: Vec<Quest>,
    pub journal: Vec<JournalEntry>,
    pub dossier: Vec<DossierCategory>,
    pub dossier_progress: Vec<DossierProgress>,
    pub pending: Vec<Operation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarDay {
    pub day: u32,
    pub status: DayStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct CalendarView {
    pub year: i32,
    /// Zero-based
    pub month: u32,
    pub label: &'static str,
    /// Leading `null` padding, then one slot per day
    pub days: Vec<Option<CalendarDay>>,
    pub wins: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressView {
    pub current_level: u32,
    pub milestones: Vec<Milestone>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Dashboard
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct Dashboard {
    onboarding_step: usize,
    show_dashboard: bool,
    tab: Tab,
    directive: String,
    directive_mode: DirectiveMode,
    has_directive: bool,
    vision: String,
    anti_vision: String,
    journal_analysis: Option<JournalAnalysis>,
    store: Store,
    in_flight: InFlight,
}

impl Dashboard {
    /// A fresh session seeded with the default store
    pub fn new(now: NaiveDateTime, rng: StdRng) -> Self {
        Self::with_store(Store::with_defaults(now, rng))
    }

    pub fn with_store(store: Store) -> Self {
        Self {
            onboarding_step: 0,
            show_dashboard: false,
            tab: Tab::default(),
            directive: String::new(),
            directive_mode: DirectiveMode::default(),
            has_directive: false,
            vision: String::new(),
            anti_vision: String::new(),
            journal_analysis: None,
            store,
            in_flight: InFlight::default(),
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn vision(&self) -> &str {
        &self.vision
    }

    pub fn anti_vision(&self) -> &str {
        &self.anti_vision
    }

    #[cfg(test)]
    pub fn directive(&self) -> &str {
        &self.directive
    }

    #[cfg(test)]
    pub fn directive_mode(&self) -> DirectiveMode {
        self.directive_mode
    }

    pub fn active_tab(&self) -> Tab {
        self.tab
    }

    pub fn journal_analysis(&self) -> Option<&JournalAnalysis> {
        self.journal_analysis.as_ref()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Onboarding & navigation
    // ─────────────────────────────────────────────────────────────────────────

    pub fn onboarding(&self) -> OnboardingView {
        OnboardingView {
            step: self.onboarding_step,
            total_steps: ONBOARDING_STEPS.len(),
            current: ONBOARDING_STEPS[self.onboarding_step].clone(),
            show_dashboard: self.show_dashboard,
        }
    }

    /// Advance one step; "next" on the last step reveals the dashboard
    pub fn next_onboarding_step(&mut self) -> OnboardingView {
        if self.onboarding_step + 1 < ONBOARDING_STEPS.len() {
            self.onboarding_step += 1;
        } else {
            self.show_dashboard = true;
        }
        self.onboarding()
    }

    /// Jump to a step via the progress dots; out-of-range steps are clamped
    pub fn go_to_onboarding_step(&mut self, step: usize) -> OnboardingView {
        self.onboarding_step = step.min(ONBOARDING_STEPS.len() - 1);
        self.onboarding()
    }

    pub fn select_tab(&mut self, tab: Tab) {
        self.tab = tab;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Directive & visions
    // ─────────────────────────────────────────────────────────────────────────

    /// Save the directive and leave edit mode
    ///
    /// Only allowed while editing. The first commit with no vision yet also
    /// admits the combined vision generation; the returned task must be run
    /// by the caller.
    pub fn commit_directive(
        &mut self,
        text: &str,
    ) -> Result<Option<GenerationTask>, DashboardError> {
        if self.directive_mode != DirectiveMode::Editing {
            return Err(DashboardError::NotEditing);
        }
        if !long_enough(text) {
            return Err(DashboardError::DirectiveTooShort);
        }

        self.directive = text.to_string();
        self.directive_mode = DirectiveMode::Viewing;
        self.has_directive = true;
        tracing::debug!("Directive committed");

        if !self.vision.is_empty() {
            return Ok(None);
        }

        Ok(self
            .in_flight
            .begin(Operation::Visions)
            .map(|ticket| GenerationTask::Visions {
                ticket,
                directive: self.directive.clone(),
            }))
    }

    pub fn edit_directive(&mut self) {
        self.directive_mode = DirectiveMode::Editing;
    }

    pub fn set_vision(&mut self, text: &str) -> Result<(), DashboardError> {
        if !long_enough(text) {
            return Err(DashboardError::TextTooShort("vision"));
        }
        self.vision = text.to_string();
        Ok(())
    }

    pub fn set_anti_vision(&mut self, text: &str) -> Result<(), DashboardError> {
        if !long_enough(text) {
            return Err(DashboardError::TextTooShort("anti-vision"));
        }
        self.anti_vision = text.to_string();
        Ok(())
    }

    pub fn begin_vision_generation(&mut self) -> Result<GenerationTask, DashboardError> {
        let ticket = self.admit(Operation::Vision)?;
        Ok(GenerationTask::Vision {
            ticket,
            context: self.vision_context(),
        })
    }

    pub fn begin_anti_vision_generation(&mut self) -> Result<GenerationTask, DashboardError> {
        let ticket = self.admit(Operation::AntiVision)?;
        Ok(GenerationTask::AntiVision {
            ticket,
            directive: self.directive.clone(),
            current_vision: self.vision.clone(),
        })
    }

    pub fn begin_journal_analysis(&mut self) -> Result<GenerationTask, DashboardError> {
        let responses: Vec<String> = self
            .store
            .journal()
            .iter()
            .map(|e| e.response.trim())
            .filter(|r| !r.is_empty())
            .take(ANALYSIS_ENTRIES)
            .map(str::to_string)
            .collect();
        if responses.is_empty() {
            return Err(DashboardError::NothingToAnalyze);
        }

        let ticket = self.admit(Operation::JournalAnalysis)?;
        Ok(GenerationTask::JournalAnalysis {
            ticket,
            responses,
            entry_count: self.store.journal().len(),
        })
    }

    /// Merge a finished generation
    ///
    /// Returns false when the result was discarded because its session has
    /// been terminated. Empty outputs leave the current text untouched.
    pub fn apply_generation(&mut self, result: GenerationResult) -> bool {
        let operation = result.ticket.operation();
        if !self.in_flight.finish(result.ticket) {
            tracing::debug!(%operation, "Discarding stale generation result");
            return false;
        }

        match result.output {
            GenerationOutput::Visions(pair) => {
                replace_if_present(&mut self.vision, pair.vision);
                replace_if_present(&mut self.anti_vision, pair.anti_vision);
            }
            GenerationOutput::Vision(text) => replace_if_present(&mut self.vision, text),
            GenerationOutput::AntiVision(text) => replace_if_present(&mut self.anti_vision, text),
            GenerationOutput::JournalAnalysis(analysis) => {
                if !analysis.is_empty() {
                    self.journal_analysis = Some(analysis);
                }
            }
        }
        true
    }

    #[cfg(test)]
    pub fn is_pending(&self, operation: Operation) -> bool {
        self.in_flight.is_pending(operation)
    }

    fn admit(&mut self, operation: Operation) -> Result<Ticket, DashboardError> {
        self.in_flight
            .begin(operation)
            .ok_or(DashboardError::AlreadyPending(operation))
    }

    /// Directive, answered dossier items and recent reflections
    fn vision_context(&self) -> VisionContext {
        let mut dossier = Map::new();
        for category in self.store.dossier() {
            let answered: Map<String, Value> = category
                .items
                .iter()
                .filter(|i| i.is_answered())
                .map(|i| (i.prompt.clone(), Value::String(i.response.clone())))
                .collect();
            if !answered.is_empty() {
                dossier.insert(category.title.clone(), Value::Object(answered));
            }
        }

        VisionContext {
            directive: self.directive.clone(),
            dossier: Value::Object(dossier),
            journal: self
                .store
                .journal()
                .iter()
                .filter(|e| !e.response.trim().is_empty())
                .map(|e| e.response.clone())
                .collect(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Store passthrough
    // ─────────────────────────────────────────────────────────────────────────

    pub fn add_journal_entry(&mut self, now: NaiveDateTime) -> JournalEntry {
        self.store.add_journal_entry(now).clone()
    }

    pub fn update_journal_entry(
        &mut self,
        id: &str,
        response: &str,
        now: NaiveDateTime,
    ) -> Result<JournalEntry, DashboardError> {
        Ok(self.store.update_journal_entry(id, response, now)?.clone())
    }

    pub fn delete_journal_entry(&mut self, id: &str) -> bool {
        self.store.delete_journal_entry(id)
    }

    /// Blank answers are rejected here; the store itself accepts any text
    pub fn update_dossier_item(
        &mut self,
        category: usize,
        item: usize,
        value: &str,
    ) -> Result<DossierItem, DashboardError> {
        if value.trim().is_empty() {
            return Err(DashboardError::EmptyResponse);
        }
        Ok(self.store.update_dossier_item(category, item, value)?.clone())
    }

    pub fn toggle_quest(&mut self, index: usize) -> Result<bool, DashboardError> {
        Ok(self.store.toggle_quest(index)?)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Calendar & progress
    // ─────────────────────────────────────────────────────────────────────────

    pub fn calendar(&self, year: i32, month0: u32) -> Result<CalendarView, DashboardError> {
        let entries = self.store.journal();
        let days = calendar::month_grid(year, month0)?
            .into_iter()
            .map(|slot| {
                slot.map(|day| CalendarDay {
                    day,
                    status: calendar::day_status(entries, year, month0, day),
                })
            })
            .collect();

        Ok(CalendarView {
            year,
            month: month0,
            label: calendar::month_label(month0)?,
            days,
            wins: calendar::win_count(entries, year, month0),
        })
    }

    pub fn day_detail(&self, year: i32, month0: u32, day: u32) -> Result<DayDetail, DashboardError> {
        Ok(calendar::day_detail(self.store.journal(), year, month0, day)?)
    }

    pub fn progress(&self) -> ProgressView {
        ProgressView {
            current_level: UNLOCKED_LEVELS,
            milestones: milestones(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Session
    // ─────────────────────────────────────────────────────────────────────────

    /// Reset to a fresh session. Results of requests still in flight are
    /// discarded when they arrive.
    pub fn terminate_session(&mut self, now: NaiveDateTime, rng: StdRng) {
        let mut in_flight = std::mem::take(&mut self.in_flight);
        in_flight.invalidate_all();

        *self = Self::new(now, rng);
        self.in_flight = in_flight;
        tracing::info!("Session terminated");
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot {
            onboarding: self.onboarding(),
            active_tab: self.tab,
            directive: self.directive.clone(),
            directive_mode: self.directive_mode,
            has_directive: self.has_directive,
            vision: self.vision.clone(),
            anti_vision: self.anti_vision.clone(),
            journal_analysis: self.journal_analysis.clone(),
            quests: self.store.quests().to_vec(),
            journal: self.store.journal().to_vec(),
            dossier: self.store.dossier().to_vec(),
            dossier_progress: self
                .store
                .dossier()
                .iter()
                .map(|c| DossierProgress {
                    title: c.title.clone(),
                    answered: c.answered_count(),
                    total: c.items.len(),
                })
                .collect(),
            pending: self.in_flight.pending(),
        }
    }
}

fn long_enough(text: &str) -> bool {
    text.trim().chars().count() > MIN_TEXT_CHARS
}

fn replace_if_present(slot: &mut String, text: String) {
    if !text.trim().is_empty() {
        *slot = text;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::VisionPair;
    use chrono::NaiveDate;
    use rand::SeedableRng;

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap()
    }

    fn dashboard() -> Dashboard {
        Dashboard::new(at(2024, 6, 15), StdRng::seed_from_u64(3))
    }

    fn result(task: GenerationTask, output: GenerationOutput) -> GenerationResult {
        let ticket = match task {
            GenerationTask::Visions { ticket, .. }
            | GenerationTask::Vision { ticket, .. }
            | GenerationTask::AntiVision { ticket, .. }
            | GenerationTask::JournalAnalysis { ticket, .. } => ticket,
        };
        GenerationResult { ticket, output }
    }

    fn pair(vision: &str, anti: &str) -> GenerationOutput {
        GenerationOutput::Visions(VisionPair {
            vision: vision.to_string(),
            anti_vision: anti.to_string(),
        })
    }

    #[test]
    fn test_onboarding_reveals_dashboard_after_last_step() {
        let mut dash = dashboard();
        assert_eq!(dash.onboarding().current.title, "Who are you protecting?");

        for expected in 1..4 {
            assert_eq!(dash.next_onboarding_step().step, expected);
        }
        assert!(!dash.onboarding().show_dashboard);

        let view = dash.next_onboarding_step();
        assert_eq!(view.step, 3);
        assert!(view.show_dashboard);
    }

    #[test]
    fn test_go_to_onboarding_step_clamps() {
        let mut dash = dashboard();
        assert_eq!(dash.go_to_onboarding_step(2).current.title, "Identity First");
        assert_eq!(dash.go_to_onboarding_step(9).step, 3);
    }

    #[test]
    fn test_short_directive_is_rejected_without_mutation() {
        let mut dash = dashboard();

        assert_eq!(
            dash.commit_directive("abc").unwrap_err(),
            DashboardError::DirectiveTooShort
        );
        assert_eq!(
            dash.commit_directive("  hello  ").unwrap_err(),
            DashboardError::DirectiveTooShort
        );

        let snap = dash.snapshot();
        assert!(!snap.has_directive);
        assert_eq!(snap.directive, "");
        assert_eq!(snap.directive_mode, DirectiveMode::Editing);
        assert!(snap.pending.is_empty());
    }

    #[test]
    fn test_directive_triggers_generation_exactly_once() {
        let mut dash = dashboard();

        let task = dash.commit_directive("Ship the MVP").unwrap().unwrap();
        assert_eq!(task.operation(), Operation::Visions);
        assert_eq!(dash.directive_mode(), DirectiveMode::Viewing);

        // Re-committing while the first generation is in flight admits nothing
        dash.edit_directive();
        assert!(dash.commit_directive("Ship the MVP").unwrap().is_none());

        assert!(dash.apply_generation(result(task, pair("You ship.", "You stall."))));
        assert_eq!(dash.vision(), "You ship.");
        assert_eq!(dash.anti_vision(), "You stall.");

        // Vision present: no further automatic generation
        dash.edit_directive();
        assert!(dash.commit_directive("Ship the MVP v2").unwrap().is_none());
        assert_eq!(dash.directive(), "Ship the MVP v2");
    }

    #[test]
    fn test_empty_generation_leaves_state() {
        let mut dash = dashboard();
        dash.set_vision("Existing vision text").unwrap();

        let task = dash.begin_vision_generation().unwrap();
        assert!(dash.apply_generation(result(task, GenerationOutput::Vision(String::new()))));
        assert_eq!(dash.vision(), "Existing vision text");
        assert!(!dash.is_pending(Operation::Vision));
    }

    #[test]
    fn test_duplicate_regeneration_is_rejected() {
        let mut dash = dashboard();
        let _task = dash.begin_anti_vision_generation().unwrap();

        assert_eq!(
            dash.begin_anti_vision_generation().unwrap_err(),
            DashboardError::AlreadyPending(Operation::AntiVision)
        );
        assert!(dash.begin_vision_generation().is_ok());
        assert_eq!(
            dash.snapshot().pending,
            vec![Operation::Vision, Operation::AntiVision]
        );
    }

    #[test]
    fn test_terminate_discards_in_flight_results() {
        let mut dash = dashboard();
        dash.next_onboarding_step();
        dash.select_tab(Tab::Logs);
        let task = dash.commit_directive("Ship the MVP").unwrap().unwrap();

        dash.terminate_session(at(2024, 6, 16), StdRng::seed_from_u64(4));
        let snap = dash.snapshot();
        assert_eq!(snap.onboarding.step, 0);
        assert_eq!(snap.active_tab, Tab::Journey);
        assert!(!snap.has_directive);
        assert!(snap.pending.is_empty());
        assert_eq!(snap.journal.len(), 1);
        assert_eq!(snap.journal[0].date, "06/16/2024");

        assert!(!dash.apply_generation(result(task, pair("Stale", "Stale"))));
        assert_eq!(dash.vision(), "");
    }

    #[test]
    fn test_vision_context_uses_answers_and_reflections() {
        let mut dash = dashboard();
        dash.commit_directive("Ship the MVP").unwrap();
        dash.update_dossier_item(2, 2, "Demo Fridays").unwrap();

        let task = dash.begin_vision_generation().unwrap();
        let GenerationTask::Vision { context, .. } = task else {
            panic!("expected vision task");
        };
        assert_eq!(context.directive, "Ship the MVP");
        assert_eq!(context.dossier["Vision MVP"]["WEEKLY LEVER"], "Demo Fridays");
        assert_eq!(context.dossier.as_object().unwrap().len(), 1);
        assert_eq!(context.journal.len(), 1);
    }

    #[test]
    fn test_journal_analysis_needs_reflections() {
        let mut dash = Dashboard::with_store(Store::empty(StdRng::seed_from_u64(1)));
        assert_eq!(
            dash.begin_journal_analysis().unwrap_err(),
            DashboardError::NothingToAnalyze
        );

        let id = dash.add_journal_entry(at(2024, 6, 15)).id;
        dash.update_journal_entry(&id, "Recorded the demo", at(2024, 6, 15))
            .unwrap();
        let task = dash.begin_journal_analysis().unwrap();

        let analysis = JournalAnalysis {
            themes: vec!["craft".to_string()],
            emotional_trend: "steady".to_string(),
            suggestions: vec![],
        };
        assert!(dash.apply_generation(result(
            task,
            GenerationOutput::JournalAnalysis(analysis.clone())
        )));
        assert_eq!(dash.snapshot().journal_analysis, Some(analysis));
    }

    #[test]
    fn test_blank_dossier_answer_is_rejected() {
        let mut dash = dashboard();
        assert_eq!(
            dash.update_dossier_item(0, 0, "   ").unwrap_err(),
            DashboardError::EmptyResponse
        );
        assert!(matches!(
            dash.update_dossier_item(9, 0, "text"),
            Err(DashboardError::Store(StoreError::IndexOutOfRange { .. }))
        ));
    }

    #[test]
    fn test_calendar_marks_wins() {
        let mut dash = Dashboard::with_store(Store::empty(StdRng::seed_from_u64(1)));
        dash.add_journal_entry(at(2024, 6, 15));

        let view = dash.calendar(2024, 5).unwrap();
        assert_eq!(view.label, "JUN");
        assert_eq!(view.wins, 1);
        // June 2024 starts on Saturday: six padding slots
        assert!(view.days[..6].iter().all(Option::is_none));
        let day15 = view.days[6 + 14].as_ref().unwrap();
        assert_eq!(day15.day, 15);
        assert_eq!(day15.status, DayStatus::Win);
        assert_eq!(
            view.days[6 + 15].as_ref().unwrap().status,
            DayStatus::Neutral
        );

        assert!(matches!(
            dash.calendar(2024, 12),
            Err(DashboardError::Calendar(CalendarError::InvalidMonth(12)))
        ));
    }

    #[test]
    fn test_saved_directive_needs_edit_before_resave() {
        let mut dash = dashboard();
        dash.set_vision("Existing vision text").unwrap();
        dash.commit_directive("Ship the MVP").unwrap();

        assert_eq!(
            dash.commit_directive("Quit and travel").unwrap_err(),
            DashboardError::NotEditing
        );
        assert_eq!(dash.directive(), "Ship the MVP");
        assert_eq!(dash.directive_mode(), DirectiveMode::Viewing);

        dash.edit_directive();
        dash.commit_directive("Quit and travel").unwrap();
        assert_eq!(dash.directive(), "Quit and travel");
    }

    #[test]
    fn test_journal_analysis_counts_every_entry() {
        let mut dash = dashboard();
        // Blank entries are not sent but still count toward the journal size
        dash.add_journal_entry(at(2024, 6, 15));
        dash.add_journal_entry(at(2024, 6, 15));

        let GenerationTask::JournalAnalysis {
            responses,
            entry_count,
            ..
        } = dash.begin_journal_analysis().unwrap()
        else {
            panic!("expected journal analysis task");
        };
        assert_eq!(responses.len(), 1);
        assert_eq!(entry_count, 3);
    }

    #[test]
    fn test_manual_vision_edits_need_content() {
        let mut dash = dashboard();
        assert_eq!(
            dash.set_anti_vision("no").unwrap_err(),
            DashboardError::TextTooShort("anti-vision")
        );
        dash.set_anti_vision("Still stuck in 2029").unwrap();
        assert_eq!(dash.anti_vision(), "Still stuck in 2029");
    }
}
