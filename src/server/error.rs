//! API error type and response mapping

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::dashboard::DashboardError;
use crate::store::StoreError;

/// API error responses
/// Converted to HTTP status codes via IntoResponse
#[derive(Debug)]
pub enum ApiError {
    Internal(String),
    NotFound(String),
    Conflict(String),
    Unprocessable(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

impl From<DashboardError> for ApiError {
    fn from(err: DashboardError) -> Self {
        let message = err.to_string();
        match err {
            DashboardError::AlreadyPending(_) | DashboardError::NotEditing => {
                ApiError::Conflict(message)
            }
            DashboardError::Store(StoreError::NotFound(_))
            | DashboardError::Store(StoreError::IndexOutOfRange { .. }) => {
                ApiError::NotFound(message)
            }
            DashboardError::DirectiveTooShort
            | DashboardError::TextTooShort(_)
            | DashboardError::EmptyResponse
            | DashboardError::NothingToAnalyze
            | DashboardError::Calendar(_) => ApiError::Unprocessable(message),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let message = match self {
            ApiError::Internal(msg)
            | ApiError::NotFound(msg)
            | ApiError::Conflict(msg)
            | ApiError::Unprocessable(msg) => msg,
        };

        if status.is_server_error() {
            tracing::error!("API error: {} - {}", status, message);
        } else {
            tracing::debug!("API rejected request: {} - {}", status, message);
        }

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::CalendarError;
    use crate::dashboard::Operation;

    #[test]
    fn test_dashboard_errors_map_to_status() {
        let cases = [
            (DashboardError::DirectiveTooShort, StatusCode::UNPROCESSABLE_ENTITY),
            (DashboardError::EmptyResponse, StatusCode::UNPROCESSABLE_ENTITY),
            (
                DashboardError::Calendar(CalendarError::InvalidMonth(12)),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                DashboardError::AlreadyPending(Operation::Vision),
                StatusCode::CONFLICT,
            ),
            (DashboardError::NotEditing, StatusCode::CONFLICT),
            (
                DashboardError::Store(StoreError::NotFound("x".to_string())),
                StatusCode::NOT_FOUND,
            ),
            (
                DashboardError::Store(StoreError::IndexOutOfRange {
                    collection: "quests",
                    index: 9,
                    len: 5,
                }),
                StatusCode::NOT_FOUND,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(ApiError::from(err).status(), expected);
        }
    }
}
