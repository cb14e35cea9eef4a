//! Store entity types
//!
//! Everything here is serialised straight into API snapshots, so field names
//! follow the camelCase the dashboard client expects.

use serde::{Deserialize, Serialize};

/// Display format for `JournalEntry::date` (e.g. "06/15/2024")
pub const DATE_FORMAT: &str = "%m/%d/%Y";

/// Display format for `JournalEntry::time` (e.g. "11:00 AM")
pub const TIME_FORMAT: &str = "%I:%M %p";

/// A single journal reflection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    /// Unique within the journal
    pub id: String,
    /// Wall-clock time of the last write, `TIME_FORMAT`
    pub time: String,
    /// Creation day, always `DATE_FORMAT`
    pub date: String,
    /// Prompt picked from the fixed pool
    pub prompt: String,
    /// User reflection, empty until edited
    pub response: String,
    pub completed: bool,
}

/// One fixed question inside a dossier category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DossierItem {
    pub prompt: String,
    pub response: String,
}

impl DossierItem {
    pub fn new(prompt: &str) -> Self {
        Self {
            prompt: prompt.to_string(),
            response: String::new(),
        }
    }

    /// An item counts as answered once it holds non-blank text
    pub fn is_answered(&self) -> bool {
        !self.response.trim().is_empty()
    }
}

/// A titled group of dossier questions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DossierCategory {
    pub title: String,
    pub color: String,
    pub items: Vec<DossierItem>,
}

impl DossierCategory {
    /// Number of items with a non-blank response
    pub fn answered_count(&self) -> usize {
        self.items.iter().filter(|i| i.is_answered()).count()
    }
}

/// A daily quest on the Journey tab
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quest {
    pub title: String,
    /// Reward label, e.g. "+15 Clarity"
    pub reward: String,
    pub icon: String,
    pub color: String,
    pub completed: bool,
}
