//! Raw per-day attendance records as served by the store.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::EngineResult;

use super::TimeMark;

/// One employee's arrival and departure entries for one date.
///
/// Values are kept exactly as entered. A missing record is represented by a
/// record with both fields `None`.
///
/// # Example
///
/// ```
/// use attendance_engine::models::{AttendanceField, DayRecord, TimeMark};
/// use chrono::NaiveDate;
///
/// let record = DayRecord::empty(NaiveDate::from_ymd_opt(2025, 3, 17).unwrap());
/// assert_eq!(record.mark(AttendanceField::Arrival).unwrap(), TimeMark::Missing);
/// assert!(record.is_blank());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRecord {
    /// The calendar date of the record.
    pub date: NaiveDate,
    /// The raw arrival entry.
    #[serde(default)]
    pub arrival: Option<String>,
    /// The raw departure entry.
    #[serde(default)]
    pub departure: Option<String>,
}

impl DayRecord {
    /// A record with nothing entered.
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            arrival: None,
            departure: None,
        }
    }

    /// Returns the raw value of the given field.
    pub fn field(&self, field: AttendanceField) -> Option<&str> {
        match field {
            AttendanceField::Arrival => self.arrival.as_deref(),
            AttendanceField::Departure => self.departure.as_deref(),
        }
    }

    /// Parses the given field as a [`TimeMark`].
    pub fn mark(&self, field: AttendanceField) -> EngineResult<TimeMark> {
        TimeMark::from_raw(self.field(field))
    }

    /// True when neither field holds any text.
    pub fn is_blank(&self) -> bool {
        is_unset(self.arrival.as_deref()) && is_unset(self.departure.as_deref())
    }
}

/// True when a raw field counts as not entered.
pub fn is_unset(raw: Option<&str>) -> bool {
    raw.is_none_or(|value| value.trim().is_empty())
}

/// The two writable fields of a day record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceField {
    /// The arrival time.
    Arrival,
    /// The departure time.
    Departure,
}

impl std::fmt::Display for AttendanceField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttendanceField::Arrival => write!(f, "arrival"),
            AttendanceField::Departure => write!(f, "departure"),
        }
    }
}

/// The result of a set-if-absent write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WriteOutcome {
    /// The value was stored.
    Recorded,
    /// The field already held a value; nothing changed.
    AlreadySet {
        /// The value that was kept.
        existing: String,
    },
}

impl WriteOutcome {
    /// Returns true if the write took effect.
    pub fn is_recorded(&self) -> bool {
        matches!(self, WriteOutcome::Recorded)
    }
}
