//! Writing absence markers into the attendance history.
//!
//! Marking is a separate step from classification: it runs over a finished
//! report and only touches days that are already over.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::AttendanceRules;
use crate::error::EngineResult;
use crate::models::{AttendanceReport, DayOutcome};
use crate::store::AttendanceStore;

/// One day that received the absence marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbsenceMark {
    /// The absent employee.
    pub employee: String,
    /// The absent date.
    pub date: NaiveDate,
}

/// Writes the configured absence marker into both fields of every absent day
/// in `report` that falls strictly before `cutoff`.
///
/// Each day is marked through [`AttendanceStore::mark_if_blank`], so a day
/// that gained any entry after the report was built is skipped whole and
/// its other field stays open for the real value. The marker never parses
/// as a time, which keeps a marked day absent on later evaluations and keeps
/// it from extending the next day's arrival limit.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::{build_report, mark_absences};
/// use attendance_engine::config::AttendanceRules;
/// use attendance_engine::store::{AttendanceStore, InMemoryStore};
/// use chrono::NaiveDate;
///
/// let rules = AttendanceRules::default();
/// let store = InMemoryStore::with_employees(["Aziz"]);
/// // Monday 2025-03-17
/// let cutoff = NaiveDate::from_ymd_opt(2025, 3, 17).unwrap();
///
/// let report = build_report(&store, cutoff, &rules).unwrap();
/// let marks = mark_absences(&store, &report, cutoff, &rules).unwrap();
///
/// // Only Saturday the 15th is both absent and before the cutoff
/// assert_eq!(marks.len(), 1);
/// let record = store
///     .get_day_record("Aziz", NaiveDate::from_ymd_opt(2025, 3, 15).unwrap())
///     .unwrap();
/// assert_eq!(record.arrival.as_deref(), Some("200 000"));
/// ```
pub fn mark_absences(
    store: &dyn AttendanceStore,
    report: &AttendanceReport,
    cutoff: NaiveDate,
    rules: &AttendanceRules,
) -> EngineResult<Vec<AbsenceMark>> {
    let marker = rules.fines.absence_marker.trim();
    let mut marks = Vec::new();

    for day in report
        .days
        .iter()
        .filter(|d| d.outcome == DayOutcome::Absent && d.date < cutoff)
    {
        if store.mark_if_blank(&day.employee, day.date, marker)? {
            marks.push(AbsenceMark {
                employee: day.employee.clone(),
                date: day.date,
            });
        }
    }

    info!(
        report_id = %report.report_id,
        %cutoff,
        marked = marks.len(),
        "Marked absences"
    );

    Ok(marks)
}
