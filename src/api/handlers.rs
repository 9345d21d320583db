//! HTTP request handlers for the attendance API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    routing::{get, post},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{build_report, mark_absences, summarize};
use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceField, AttendanceReport, FineSummary};

use super::request::{AttendanceEntry, AttendanceRequest, DateQuery, IntentRequest, RegisterEmployeeRequest};
use super::response::{
    ApiError, ApiErrorResponse, AttendanceResponse, IntentResponse, MarkAbsencesResponse,
    RegisterEmployeeResponse,
};
use super::state::AppState;

type ApiResult<T> = Result<T, ApiErrorResponse>;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/employees", post(register_employee_handler))
        .route("/attendance/arrival", post(arrival_handler))
        .route("/attendance/departure", post(departure_handler))
        .route("/sessions/:user_id/intent", post(intent_handler))
        .route("/sessions/:user_id/confirm", post(confirm_handler))
        .route("/summary", get(summary_handler))
        .route("/report", get(report_handler))
        .route("/report/mark-absences", post(mark_absences_handler))
        .with_state(state)
}

/// Unwraps a JSON body, turning extractor rejections into API errors.
fn json_body<T>(payload: Result<Json<T>, JsonRejection>, correlation_id: Uuid) -> ApiResult<T> {
    let rejection = match payload {
        Ok(Json(body)) => return Ok(body),
        Err(rejection) => rejection,
    };

    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(correlation_id = %correlation_id, error = %body_text, "JSON data error");
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "JSON syntax error");
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };

    Err(ApiErrorResponse::bad_request(error))
}

/// Unwraps the date query, turning extractor rejections into API errors.
fn date_query(query: Result<Query<DateQuery>, QueryRejection>, correlation_id: Uuid) -> ApiResult<DateQuery> {
    query.map(|Query(q)| q).map_err(|rejection| {
        let body_text = rejection.body_text();
        warn!(correlation_id = %correlation_id, error = %body_text, "Invalid query string");
        ApiErrorResponse::bad_request(ApiError::validation_error(body_text))
    })
}

/// Logs an engine failure and converts it to an API error.
fn engine_failure(correlation_id: Uuid, error: EngineError) -> ApiErrorResponse {
    warn!(correlation_id = %correlation_id, error = %error, "Request failed");
    error.into()
}

/// Handler for POST /employees.
async fn register_employee_handler(
    State(state): State<AppState>,
    payload: Result<Json<RegisterEmployeeRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<RegisterEmployeeResponse>)> {
    let correlation_id = Uuid::new_v4();
    let request = json_body(payload, correlation_id)?;

    let name = request.name.trim();
    if name.is_empty() {
        return Err(engine_failure(
            correlation_id,
            EngineError::InvalidRequest {
                message: "name must not be empty".to_string(),
            },
        ));
    }

    let created = state
        .store()
        .register_employee(name)
        .map_err(|err| engine_failure(correlation_id, err))?;
    info!(correlation_id = %correlation_id, employee = %name, created, "Employee registration");

    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((
        status,
        Json(RegisterEmployeeResponse {
            employee: name.to_string(),
            created,
        }),
    ))
}

/// Handler for POST /attendance/arrival.
async fn arrival_handler(
    State(state): State<AppState>,
    payload: Result<Json<AttendanceRequest>, JsonRejection>,
) -> ApiResult<Json<AttendanceResponse>> {
    let correlation_id = Uuid::new_v4();
    let request = json_body(payload, correlation_id)?;
    request
        .resolve()
        .and_then(|entry| record_attendance(&state, AttendanceField::Arrival, entry, correlation_id))
        .map(Json)
        .map_err(|err| engine_failure(correlation_id, err))
}

/// Handler for POST /attendance/departure.
async fn departure_handler(
    State(state): State<AppState>,
    payload: Result<Json<AttendanceRequest>, JsonRejection>,
) -> ApiResult<Json<AttendanceResponse>> {
    let correlation_id = Uuid::new_v4();
    let request = json_body(payload, correlation_id)?;
    request
        .resolve()
        .and_then(|entry| record_attendance(&state, AttendanceField::Departure, entry, correlation_id))
        .map(Json)
        .map_err(|err| engine_failure(correlation_id, err))
}

/// Handler for POST /sessions/:user_id/intent.
///
/// A later intent replaces an earlier unconfirmed one.
async fn intent_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    payload: Result<Json<IntentRequest>, JsonRejection>,
) -> ApiResult<Json<IntentResponse>> {
    let correlation_id = Uuid::new_v4();
    let request = json_body(payload, correlation_id)?;

    state
        .sessions()
        .begin(&user_id, request.intent)
        .map_err(|err| engine_failure(correlation_id, err))?;
    info!(correlation_id = %correlation_id, user_id = %user_id, intent = ?request.intent, "Intent pending");

    Ok(Json(IntentResponse {
        user_id,
        intent: request.intent,
    }))
}

/// Handler for POST /sessions/:user_id/confirm.
///
/// The request is validated before the pending intent is taken, so a bad
/// request leaves the intent in place.
async fn confirm_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    payload: Result<Json<AttendanceRequest>, JsonRejection>,
) -> ApiResult<Json<AttendanceResponse>> {
    let correlation_id = Uuid::new_v4();
    let request = json_body(payload, correlation_id)?;

    let entry = request
        .resolve()
        .map_err(|err| engine_failure(correlation_id, err))?;
    let intent = state
        .sessions()
        .confirm(&user_id)
        .map_err(|err| engine_failure(correlation_id, err))?;
    info!(correlation_id = %correlation_id, user_id = %user_id, ?intent, "Intent confirmed");

    record_attendance(&state, intent.field(), entry, correlation_id)
        .map(Json)
        .map_err(|err| engine_failure(correlation_id, err))
}

/// Handler for GET /summary.
async fn summary_handler(
    State(state): State<AppState>,
    query: Result<Query<DateQuery>, QueryRejection>,
) -> ApiResult<Json<FineSummary>> {
    let correlation_id = Uuid::new_v4();
    let reference_date = date_query(query, correlation_id)?.date_or_today();
    info!(correlation_id = %correlation_id, %reference_date, "Processing summary request");

    summarize(state.store(), reference_date, state.rules())
        .map(Json)
        .map_err(|err| engine_failure(correlation_id, err))
}

/// Handler for GET /report.
async fn report_handler(
    State(state): State<AppState>,
    query: Result<Query<DateQuery>, QueryRejection>,
) -> ApiResult<Json<AttendanceReport>> {
    let correlation_id = Uuid::new_v4();
    let reference_date = date_query(query, correlation_id)?.date_or_today();
    info!(correlation_id = %correlation_id, %reference_date, "Processing report request");

    build_report(state.store(), reference_date, state.rules())
        .map(Json)
        .map_err(|err| engine_failure(correlation_id, err))
}

/// Handler for POST /report/mark-absences.
///
/// Marks absent days of the cycle containing the date, strictly before it.
async fn mark_absences_handler(
    State(state): State<AppState>,
    query: Result<Query<DateQuery>, QueryRejection>,
) -> ApiResult<Json<MarkAbsencesResponse>> {
    let correlation_id = Uuid::new_v4();
    let cutoff = date_query(query, correlation_id)?.date_or_today();
    info!(correlation_id = %correlation_id, %cutoff, "Processing absence marking request");

    let marked = build_report(state.store(), cutoff, state.rules()).and_then(|report| {
        mark_absences(state.store(), &report, cutoff, state.rules()).map(|marks| {
            MarkAbsencesResponse {
                report_id: report.report_id,
                cutoff,
                marks,
            }
        })
    });

    marked.map(Json).map_err(|err| engine_failure(correlation_id, err))
}

/// Writes a validated entry to the store.
fn record_attendance(
    state: &AppState,
    field: AttendanceField,
    entry: AttendanceEntry,
    correlation_id: Uuid,
) -> EngineResult<AttendanceResponse> {
    let value = entry.time.to_string();

    let result = state
        .store()
        .set_field(&entry.employee, entry.date, field, &value)?;

    info!(
        correlation_id = %correlation_id,
        employee = %entry.employee,
        date = %entry.date,
        %field,
        value = %value,
        recorded = result.is_recorded(),
        "Attendance write"
    );

    Ok(AttendanceResponse {
        employee: entry.employee,
        date: entry.date,
        field,
        value,
        result,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use chrono::NaiveDate;

    use crate::config::ConfigLoader;
    use crate::models::WriteOutcome;
    use crate::store::InMemoryStore;
    use axum::{body::Body, http::Request, response::Response};
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        let config = ConfigLoader::load("./config/attendance").expect("Failed to load config");
        AppState::new(config, Arc::new(InMemoryStore::new()))
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn read_json<T: serde::de::DeserializeOwned>(response: Response) -> T {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_register_employee_created_then_ok() {
        let router = create_router(create_test_state());

        let response = router
            .clone()
            .oneshot(post_json("/employees", r#"{"name": "Aziz"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = router
            .oneshot(post_json("/employees", r#"{"name": "Aziz"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body: RegisterEmployeeResponse = read_json(response).await;
        assert!(!body.created);
    }

    #[tokio::test]
    async fn test_register_blank_name_rejected() {
        let router = create_router(create_test_state());
        let response = router
            .oneshot(post_json("/employees", r#"{"name": "  "}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = read_json(response).await;
        assert_eq!(error.code, "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_arrival_first_write_wins() {
        let router = create_router(create_test_state());
        let body = r#"{"employee": "Aziz", "date": "2025-03-17", "time": "8:05"}"#;

        let response = router
            .clone()
            .oneshot(post_json("/attendance/arrival", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let first: AttendanceResponse = read_json(response).await;
        assert_eq!(first.value, "08:05");
        assert_eq!(first.result, WriteOutcome::Recorded);

        let later = r#"{"employee": "Aziz", "date": "2025-03-17", "time": "09:00"}"#;
        let response = router
            .oneshot(post_json("/attendance/arrival", later))
            .await
            .unwrap();
        let second: AttendanceResponse = read_json(response).await;
        assert_eq!(
            second.result,
            WriteOutcome::AlreadySet {
                existing: "08:05".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_departure_with_bad_time_returns_400() {
        let router = create_router(create_test_state());
        let body = r#"{"employee": "Aziz", "date": "2025-03-17", "time": "late"}"#;
        let response = router
            .oneshot(post_json("/attendance/departure", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = read_json(response).await;
        assert_eq!(error.code, "INVALID_TIME");
    }

    #[tokio::test]
    async fn test_malformed_json_returns_400() {
        let router = create_router(create_test_state());
        let response = router
            .oneshot(post_json("/attendance/arrival", "{invalid json"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = read_json(response).await;
        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_missing_field_returns_validation_error() {
        let router = create_router(create_test_state());
        let response = router
            .oneshot(post_json("/attendance/arrival", r#"{"time": "08:00"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = read_json(response).await;
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert!(error.message.contains("missing field"));
    }

    #[tokio::test]
    async fn test_confirm_without_intent_returns_409() {
        let router = create_router(create_test_state());
        let response = router
            .oneshot(post_json("/sessions/42/confirm", r#"{"employee": "Aziz"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        let error: ApiError = read_json(response).await;
        assert_eq!(error.code, "NO_PENDING_INTENT");
    }

    #[tokio::test]
    async fn test_intent_then_confirm_records_departure() {
        let state = create_test_state();
        let router = create_router(state.clone());

        let response = router
            .clone()
            .oneshot(post_json("/sessions/42/intent", r#"{"intent": "departure"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = r#"{"employee": "Aziz", "date": "2025-03-17", "time": "20:30"}"#;
        let response = router
            .oneshot(post_json("/sessions/42/confirm", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let written: AttendanceResponse = read_json(response).await;
        assert_eq!(written.field, AttendanceField::Departure);
        assert_eq!(state.sessions().pending("42").unwrap(), None);
    }

    #[tokio::test]
    async fn test_bad_confirm_keeps_intent() {
        let state = create_test_state();
        let router = create_router(state.clone());
        state
            .sessions()
            .begin("42", crate::session::PendingIntent::Arrival)
            .unwrap();

        let body = r#"{"employee": "Aziz", "time": "99:99"}"#;
        let response = router
            .oneshot(post_json("/sessions/42/confirm", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(state.sessions().pending("42").unwrap().is_some());
    }

    #[tokio::test]
    async fn test_summary_with_bad_date_returns_400() {
        let router = create_router(create_test_state());
        let response = router
            .oneshot(
                Request::builder()
                    .uri("/summary?date=17-03-2025")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = read_json(response).await;
        assert_eq!(error.code, "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_summary_for_date() {
        let state = create_test_state();
        state.store().register_employee("Aziz").unwrap();
        let router = create_router(state);

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/summary?date=2025-03-20")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let summary: FineSummary = read_json(response).await;
        assert_eq!(summary.per_employee.len(), 1);
        assert_eq!(summary.per_employee[0].absent_days, 26);
    }

    /// Query string for the last representable date, with its sign escaped.
    fn last_date_query(path: &str) -> String {
        format!("{}?date={}", path, NaiveDate::MAX.to_string().replace('+', "%2B"))
    }

    #[tokio::test]
    async fn test_summary_without_cycle_returns_400() {
        let state = create_test_state();
        state.store().register_employee("Aziz").unwrap();
        let router = create_router(state);

        let response = router
            .oneshot(
                Request::builder()
                    .uri(last_date_query("/summary"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = read_json(response).await;
        assert_eq!(error.code, "DATE_OUT_OF_RANGE");
    }

    #[tokio::test]
    async fn test_mark_absences_without_cycle_returns_400() {
        let state = create_test_state();
        state.store().register_employee("Aziz").unwrap();
        let router = create_router(state.clone());

        let response = router
            .oneshot(post_json(&last_date_query("/report/mark-absences"), "{}"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = read_json(response).await;
        assert_eq!(error.code, "DATE_OUT_OF_RANGE");
        assert!(state.store().get_day_record("Aziz", NaiveDate::MAX).unwrap().is_blank());
    }
}
