//! Response types for the attendance API.
//!
//! This module defines the success payloads that are not plain engine models,
//! the error response structure, and the mapping from engine errors to HTTP
//! status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculation::AbsenceMark;
use crate::error::EngineError;
use crate::models::{AttendanceField, WriteOutcome};
use crate::session::PendingIntent;

/// Response body for `POST /employees`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterEmployeeResponse {
    /// The registered name.
    pub employee: String,
    /// False if the employee was already on the roster.
    pub created: bool,
}

/// Response body for an arrival or departure write.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceResponse {
    /// The employee written for.
    pub employee: String,
    /// The date written.
    pub date: NaiveDate,
    /// The field written.
    pub field: AttendanceField,
    /// The value that was offered.
    pub value: String,
    /// Whether the value was stored or an earlier value was kept.
    pub result: WriteOutcome,
}

/// Response body for `POST /sessions/{user_id}/intent`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentResponse {
    /// The chat user.
    pub user_id: String,
    /// The intent now pending.
    pub intent: PendingIntent,
}

/// Response body for `POST /report/mark-absences`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkAbsencesResponse {
    /// The report the marks were derived from.
    pub report_id: Uuid,
    /// Only days before this date were marked.
    pub cutoff: NaiveDate,
    /// One entry per absent day.
    pub marks: Vec<AbsenceMark>,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 response carrying `error`.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::InvalidTimeFormat { value } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_TIME",
                    message,
                    format!("'{}' is not a time of day between 00:00 and 23:59", value),
                ),
            },
            EngineError::DateOutOfRange { date } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "DATE_OUT_OF_RANGE",
                    message,
                    format!("Choose a reference date nearer to today than {}", date),
                ),
            },
            EngineError::InvalidRequest { .. } => {
                ApiErrorResponse::bad_request(ApiError::validation_error(message))
            }
            EngineError::NoPendingIntent { user_id } => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError::with_details(
                    "NO_PENDING_INTENT",
                    message,
                    format!("User '{}' must choose arrival or departure first", user_id),
                ),
            },
            EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. }
            | EngineError::InvalidConfig { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            },
            EngineError::Store { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("STORE_ERROR", "Attendance store failed", message),
            },
        }
    }
}
