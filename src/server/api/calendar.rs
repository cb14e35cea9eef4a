// Calendar endpoints
//
// Months are zero-based on the wire, matching `CalendarView.month`. Missing
// query values default to the current local date. `offset` moves the viewed
// month forward or back, rolling the year over.

use super::{ApiError, AppState};
use crate::calendar::{shift_month, DayDetail};
use crate::dashboard::CalendarView;
use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{Datelike, Local};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct MonthQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
    /// Months to move from `year`/`month`, e.g. -1 for the previous month
    pub offset: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct DayQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub offset: Option<i32>,
    pub day: u32,
}

/// Resolve the month a query points at
///
/// An out-of-range month is passed through unshifted so it is still rejected.
fn resolve_month(year: Option<i32>, month: Option<u32>, offset: Option<i32>) -> (i32, u32) {
    let today = Local::now().date_naive();
    let year = year.unwrap_or(today.year());
    let month0 = month.unwrap_or(today.month0());

    match offset {
        Some(offset) if month0 < 12 => shift_month(year, month0, offset),
        _ => (year, month0),
    }
}

/// GET /api/calendar?year=2024&month=5&offset=-1
pub async fn get_calendar(
    State(state): State<AppState>,
    Query(params): Query<MonthQuery>,
) -> Result<Json<CalendarView>, ApiError> {
    let (year, month0) = resolve_month(params.year, params.month, params.offset);

    Ok(Json(state.lock()?.calendar(year, month0)?))
}

/// GET /api/calendar/day?year=2024&month=5&day=15
pub async fn get_day_detail(
    State(state): State<AppState>,
    Query(params): Query<DayQuery>,
) -> Result<Json<DayDetail>, ApiError> {
    let (year, month0) = resolve_month(params.year, params.month, params.offset);

    Ok(Json(state.lock()?.day_detail(year, month0, params.day)?))
}
