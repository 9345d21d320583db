//! Request types for the attendance API.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::ClockTime;
use crate::session::PendingIntent;

/// Request body for `POST /employees`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterEmployeeRequest {
    /// The employee's display name.
    pub name: String,
}

/// Request body for recording an arrival or departure.
///
/// Also used to confirm a pending intent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceRequest {
    /// The employee's display name.
    pub employee: String,
    /// The date to record; today's local date when omitted.
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// The time to record as `HH:MM`; the current local time when omitted.
    #[serde(default)]
    pub time: Option<String>,
}

/// A validated [`AttendanceRequest`] with defaults filled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceEntry {
    /// The trimmed employee name.
    pub employee: String,
    /// The date to record.
    pub date: NaiveDate,
    /// The time to record.
    pub time: ClockTime,
}

impl AttendanceRequest {
    /// Validates the request, defaulting date and time to the local clock.
    pub fn resolve(&self) -> EngineResult<AttendanceEntry> {
        let employee = self.employee.trim();
        if employee.is_empty() {
            return Err(EngineError::InvalidRequest {
                message: "employee must not be empty".to_string(),
            });
        }

        let now = Local::now().naive_local();
        let time = match &self.time {
            Some(raw) => raw.parse()?,
            None => ClockTime::from_naive(now.time()),
        };

        Ok(AttendanceEntry {
            employee: employee.to_string(),
            date: self.date.unwrap_or(now.date()),
            time,
        })
    }
}

/// Request body for `POST /sessions/{user_id}/intent`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentRequest {
    /// What the user is about to record.
    pub intent: PendingIntent,
}

/// Query string for the summary, report and absence-marking endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DateQuery {
    /// The reference date as `YYYY-MM-DD`; today's local date when omitted.
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

impl DateQuery {
    /// The requested date, or today.
    pub fn date_or_today(&self) -> NaiveDate {
        self.date.unwrap_or_else(|| Local::now().date_naive())
    }
}
