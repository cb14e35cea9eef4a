// Calendar utility - month grids and journal day status
//
// Months are zero-based throughout (0 = January) to match the dashboard
// client. A grid is `first_weekday` leading `None` slots (0 = Sunday)
// followed by `Some(1..=days_in_month)`.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use thiserror::Error;

use crate::store::JournalEntry;

const MONTH_LABELS: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalendarError {
    #[error("month {0} out of range (expected 0-11)")]
    InvalidMonth(u32),

    #[error("day {day} out of range for month {month0} of {year}")]
    InvalidDay { year: i32, month0: u32, day: u32 },

    #[error("year {0} out of range")]
    InvalidYear(i32),
}

/// Whether a day has a journal entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DayStatus {
    Win,
    Neutral,
}

/// Content of the day detail modal
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayDetail {
    pub date: String,
    pub status: DayStatus,
    pub score: u32,
    pub headline: &'static str,
    pub summary: &'static str,
}

fn first_of_month(year: i32, month0: u32) -> Result<NaiveDate, CalendarError> {
    if month0 > 11 {
        return Err(CalendarError::InvalidMonth(month0));
    }
    NaiveDate::from_ymd_opt(year, month0 + 1, 1).ok_or(CalendarError::InvalidYear(year))
}

/// Number of days in the month
pub fn days_in_month(year: i32, month0: u32) -> Result<u32, CalendarError> {
    let first = first_of_month(year, month0)?;
    let (next_year, next_month0) = shift_month(year, month0, 1);
    let next = first_of_month(next_year, next_month0)?;
    Ok(next.signed_duration_since(first).num_days() as u32)
}

/// Weekday index of the 1st (0 = Sunday)
pub fn first_weekday(year: i32, month0: u32) -> Result<u32, CalendarError> {
    Ok(first_of_month(year, month0)?
        .weekday()
        .num_days_from_sunday())
}

/// Day slots for a month view: leading padding then day numbers
pub fn month_grid(year: i32, month0: u32) -> Result<Vec<Option<u32>>, CalendarError> {
    let offset = first_weekday(year, month0)?;
    let days = days_in_month(year, month0)?;

    let mut slots = Vec::with_capacity((offset + days) as usize);
    slots.extend((0..offset).map(|_| None));
    slots.extend((1..=days).map(Some));
    Ok(slots)
}

/// Move the viewed month by `offset`, rolling the year over as needed
pub fn shift_month(year: i32, month0: u32, offset: i32) -> (i32, u32) {
    let total = year * 12 + month0 as i32 + offset;
    (total.div_euclid(12), total.rem_euclid(12) as u32)
}

/// The `MM/DD/YYYY` key journal entries are dated with
pub fn day_key(year: i32, month0: u32, day: u32) -> String {
    format!("{:02}/{:02}/{}", month0 + 1, day, year)
}

/// `Win` when any entry's date equals the day's key exactly
pub fn day_status(entries: &[JournalEntry], year: i32, month0: u32, day: u32) -> DayStatus {
    let key = day_key(year, month0, day);
    if entries.iter().any(|e| e.date == key) {
        DayStatus::Win
    } else {
        DayStatus::Neutral
    }
}

/// Entries dated in the given month and year
pub fn win_count(entries: &[JournalEntry], year: i32, month0: u32) -> usize {
    entries
        .iter()
        .filter(|e| {
            let mut parts = e.date.split('/');
            let month = parts.next().and_then(|m| m.parse::<u32>().ok());
            let entry_year = parts.nth(1).and_then(|y| y.parse::<i32>().ok());
            month == Some(month0 + 1) && entry_year == Some(year)
        })
        .count()
}

/// Short upper-case month label, e.g. "JUN"
pub fn month_label(month0: u32) -> Result<&'static str, CalendarError> {
    MONTH_LABELS
        .get(month0 as usize)
        .copied()
        .ok_or(CalendarError::InvalidMonth(month0))
}

pub fn day_detail(
    entries: &[JournalEntry],
    year: i32,
    month0: u32,
    day: u32,
) -> Result<DayDetail, CalendarError> {
    if day == 0 || day > days_in_month(year, month0)? {
        return Err(CalendarError::InvalidDay { year, month0, day });
    }

    let status = day_status(entries, year, month0, day);
    let (score, headline, summary) = match status {
        DayStatus::Win => (
            100,
            "Positive PNL",
            "Strategic alignment verified. Your documentation of wins and struggles \
             demonstrates genuine commitment to innovation over performative progress. \
             Maintain this trajectory to ensure the evolution of your core loop.",
        ),
        DayStatus::Neutral => (
            0,
            "Session Inactive",
            "No data captured for this temporal segment. Identity recoding requires \
             consistent temporal nodes. Ensure future reflections are initialized to \
             prevent drift.",
        ),
    };

    Ok(DayDetail {
        date: day_key(year, month0, day),
        status,
        score,
        headline,
        summary,
    })
}
