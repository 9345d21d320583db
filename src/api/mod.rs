//! HTTP API module for the attendance rules engine.
//!
//! This module provides the REST API endpoints for recording arrivals and
//! departures, confirming chat intents, and reading cycle fines and reports.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{AttendanceEntry, AttendanceRequest, DateQuery, IntentRequest, RegisterEmployeeRequest};
pub use response::{
    ApiError, ApiErrorResponse, AttendanceResponse, IntentResponse, MarkAbsencesResponse,
    RegisterEmployeeResponse,
};
pub use state::AppState;
