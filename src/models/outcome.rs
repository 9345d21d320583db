//! Per-day verdicts produced by the classifiers.
//!
//! These are pure values; any colouring or marking of a day happens in a
//! consumer of these enums.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ClockTime;

/// The attendance verdict for one employee on one date.
///
/// # Example
///
/// ```
/// use attendance_engine::models::DayOutcome;
///
/// assert!(DayOutcome::UnexcusedLate.is_fined());
/// assert!(!DayOutcome::RestDay.is_fined());
/// assert_eq!(serde_json::to_string(&DayOutcome::OnTime).unwrap(), "\"on_time\"");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayOutcome {
    /// Arrived no later than the effective limit, or only a departure was logged.
    OnTime,
    /// Arrived strictly after the effective limit.
    UnexcusedLate,
    /// Neither arrival nor departure was recorded on a working day.
    Absent,
    /// The weekly rest day; never fined.
    RestDay,
}

impl DayOutcome {
    /// Returns true if the outcome contributes to a fine.
    pub fn is_fined(self) -> bool {
        matches!(self, DayOutcome::UnexcusedLate | DayOutcome::Absent)
    }
}

impl std::fmt::Display for DayOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DayOutcome::OnTime => write!(f, "On time"),
            DayOutcome::UnexcusedLate => write!(f, "Unexcused late"),
            DayOutcome::Absent => write!(f, "Absent"),
            DayOutcome::RestDay => write!(f, "Rest day"),
        }
    }
}

/// How a recorded departure relates to the end of the working day.
///
/// Departures between the end of the regular overtime window and the start
/// of late overtime carry no status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepartureStatus {
    /// Left before the end of the working day.
    Early,
    /// Left between the end of the working day and the end of regular overtime.
    Regular,
    /// Left at or after the start of late overtime.
    Overtime,
}

/// The detailed classification of one employee's day, for display layers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayClassification {
    /// The employee the day belongs to.
    pub employee: String,
    /// The date classified.
    pub date: NaiveDate,
    /// The arrival time used, if one was usable.
    pub arrival: Option<ClockTime>,
    /// The departure time used, if one was usable.
    pub departure: Option<ClockTime>,
    /// The arrival deadline applied; `None` on rest days.
    pub arrival_limit: Option<ClockTime>,
    /// The attendance verdict.
    pub outcome: DayOutcome,
    /// The departure status, when a departure was recorded.
    pub departure_status: Option<DepartureStatus>,
    /// Human-readable explanation of the verdict.
    pub reasoning: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_late_and_absent_are_fined() {
        assert!(DayOutcome::UnexcusedLate.is_fined());
        assert!(DayOutcome::Absent.is_fined());
        assert!(!DayOutcome::OnTime.is_fined());
        assert!(!DayOutcome::RestDay.is_fined());
    }

    #[test]
    fn test_day_outcome_serialization() {
        let json = serde_json::to_string(&DayOutcome::UnexcusedLate).unwrap();
        assert_eq!(json, "\"unexcused_late\"");

        let deserialized: DayOutcome = serde_json::from_str("\"rest_day\"").unwrap();
        assert_eq!(deserialized, DayOutcome::RestDay);
    }

    #[test]
    fn test_day_outcome_display() {
        assert_eq!(DayOutcome::Absent.to_string(), "Absent");
        assert_eq!(DayOutcome::UnexcusedLate.to_string(), "Unexcused late");
    }

    #[test]
    fn test_departure_status_serialization() {
        assert_eq!(
            serde_json::to_string(&DepartureStatus::Overtime).unwrap(),
            "\"overtime\""
        );
    }

    #[test]
    fn test_day_classification_serialization() {
        let day = DayClassification {
            employee: "Aziz Karimov".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 3, 18).unwrap(),
            arrival: Some(ClockTime::from_hm(8, 30).unwrap()),
            departure: None,
            arrival_limit: Some(ClockTime::from_hm(8, 10).unwrap()),
            outcome: DayOutcome::UnexcusedLate,
            departure_status: None,
            reasoning: "Arrived 08:30 after limit 08:10".to_string(),
        };

        let json = serde_json::to_string(&day).unwrap();
        assert!(json.contains("\"arrival\":\"08:30\""));
        assert!(json.contains("\"departure\":null"));
        assert!(json.contains("\"outcome\":\"unexcused_late\""));

        let back: DayClassification = serde_json::from_str(&json).unwrap();
        assert_eq!(back, day);
    }
}
