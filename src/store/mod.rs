//! Entry/Dossier store
//!
//! In-memory collections behind the dashboard: journal entries (newest
//! first), the fixed dossier, and the fixed quest list. Nothing here is
//! persisted; a terminated session simply builds a new `Store`.
//!
//! Time and randomness are injected: every write takes `now` from the caller
//! and prompt selection draws from the store's own seedable RNG, so tests can
//! pin both.

pub mod defaults;
pub mod types;

use chrono::NaiveDateTime;
use rand::rngs::StdRng;
use rand::Rng;
use thiserror::Error;

pub use types::{DossierCategory, DossierItem, JournalEntry, Quest, DATE_FORMAT, TIME_FORMAT};

/// Errors returned by store mutations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("journal entry not found: {0}")]
    NotFound(String),

    #[error("{collection} index {index} out of range (len {len})")]
    IndexOutOfRange {
        collection: &'static str,
        index: usize,
        len: usize,
    },
}

/// Generate a unique journal entry ID
/// Format: <unix millis>-<process-wide counter>
fn generate_entry_id(now: NaiveDateTime) -> String {
    use std::sync::atomic::{AtomicU64, Ordering};
    static COUNTER: AtomicU64 = AtomicU64::new(0);

    let count = COUNTER.fetch_add(1, Ordering::SeqCst);
    format!("{}-{}", now.and_utc().timestamp_millis(), count)
}

/// Owned state for journal, dossier and quests
#[derive(Debug)]
pub struct Store {
    journal: Vec<JournalEntry>,
    dossier: Vec<DossierCategory>,
    quests: Vec<Quest>,
    rng: StdRng,
}

impl Store {
    /// A store with no journal entries, dossier or quests
    pub fn empty(rng: StdRng) -> Self {
        Self {
            journal: Vec::new(),
            dossier: Vec::new(),
            quests: Vec::new(),
            rng,
        }
    }

    /// A store seeded the way every new session starts: the five quests,
    /// the six dossier categories with blank answers, and one completed
    /// welcome entry dated `now`.
    pub fn with_defaults(now: NaiveDateTime, rng: StdRng) -> Self {
        let welcome = JournalEntry {
            id: generate_entry_id(now),
            time: defaults::WELCOME_TIME.to_string(),
            date: now.format(DATE_FORMAT).to_string(),
            prompt: defaults::WELCOME_PROMPT.to_string(),
            response: defaults::WELCOME_RESPONSE.to_string(),
            completed: true,
        };

        let mut store = Self::empty(rng);
        store.journal.push(welcome);
        store.dossier = defaults::dossier();
        store.quests = defaults::quests();
        store
    }

    pub fn journal(&self) -> &[JournalEntry] {
        &self.journal
    }

    pub fn dossier(&self) -> &[DossierCategory] {
        &self.dossier
    }

    pub fn quests(&self) -> &[Quest] {
        &self.quests
    }

    #[cfg(test)]
    pub fn journal_entry(&self, id: &str) -> Option<&JournalEntry> {
        self.journal.iter().find(|e| e.id == id)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Journal
    // ─────────────────────────────────────────────────────────────────────────

    /// Create an entry with a random prompt and prepend it (newest first)
    pub fn add_journal_entry(&mut self, now: NaiveDateTime) -> &JournalEntry {
        let index = self.rng.gen_range(0..defaults::JOURNAL_PROMPTS.len());
        let entry = JournalEntry {
            id: generate_entry_id(now),
            time: now.format(TIME_FORMAT).to_string(),
            date: now.format(DATE_FORMAT).to_string(),
            prompt: defaults::JOURNAL_PROMPTS[index].to_string(),
            response: String::new(),
            completed: false,
        };

        tracing::debug!(id = %entry.id, "Journal entry added");
        self.journal.insert(0, entry);
        &self.journal[0]
    }

    /// Replace an entry's response and refresh its time
    ///
    /// `id` and `date` are left untouched.
    pub fn update_journal_entry(
        &mut self,
        id: &str,
        response: impl Into<String>,
        now: NaiveDateTime,
    ) -> Result<&JournalEntry, StoreError> {
        let entry = self
            .journal
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        entry.response = response.into();
        entry.time = now.format(TIME_FORMAT).to_string();
        Ok(&*entry)
    }

    /// Remove an entry. Returns whether anything was removed; deleting an
    /// absent id is a no-op.
    pub fn delete_journal_entry(&mut self, id: &str) -> bool {
        let before = self.journal.len();
        self.journal.retain(|e| e.id != id);
        before != self.journal.len()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Dossier & quests
    // ─────────────────────────────────────────────────────────────────────────

    pub fn update_dossier_item(
        &mut self,
        category: usize,
        item: usize,
        value: impl Into<String>,
    ) -> Result<&DossierItem, StoreError> {
        let len = self.dossier.len();
        let cat = self
            .dossier
            .get_mut(category)
            .ok_or(StoreError::IndexOutOfRange {
                collection: "dossier category",
                index: category,
                len,
            })?;

        let len = cat.items.len();
        let slot = cat.items.get_mut(item).ok_or(StoreError::IndexOutOfRange {
            collection: "dossier item",
            index: item,
            len,
        })?;

        slot.response = value.into();
        Ok(&*slot)
    }

    /// Flip a quest's completed flag, returning the new value
    pub fn toggle_quest(&mut self, index: usize) -> Result<bool, StoreError> {
        let len = self.quests.len();
        let quest = self
            .quests
            .get_mut(index)
            .ok_or(StoreError::IndexOutOfRange {
                collection: "quest",
                index,
                len,
            })?;

        quest.completed = !quest.completed;
        Ok(quest.completed)
    }
}
