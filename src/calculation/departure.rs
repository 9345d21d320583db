//! Departure status classification.
//!
//! Departures never affect fines; the status only tells a display layer how
//! the end of the day went.

use crate::config::AttendanceRules;
use crate::models::{ClockTime, DepartureStatus};

/// Classifies a departure time against the working-day thresholds.
///
/// - before `work_end`: [`DepartureStatus::Early`]
/// - from `work_end` through `overtime_green_end`: [`DepartureStatus::Regular`]
/// - from `overtime_yellow_start` on: [`DepartureStatus::Overtime`]
///
/// Departures strictly between `overtime_green_end` and
/// `overtime_yellow_start` get no status.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::classify_departure;
/// use attendance_engine::config::AttendanceRules;
/// use attendance_engine::models::DepartureStatus;
///
/// let rules = AttendanceRules::default();
/// assert_eq!(
///     classify_departure("19:30".parse().unwrap(), &rules),
///     Some(DepartureStatus::Early)
/// );
/// assert_eq!(classify_departure("21:05".parse().unwrap(), &rules), None);
/// ```
pub fn classify_departure(departure: ClockTime, rules: &AttendanceRules) -> Option<DepartureStatus> {
    let schedule = &rules.schedule;

    if departure < schedule.work_end {
        Some(DepartureStatus::Early)
    } else if departure <= schedule.overtime_green_end {
        Some(DepartureStatus::Regular)
    } else if departure >= schedule.overtime_yellow_start {
        Some(DepartureStatus::Overtime)
    } else {
        None
    }
}
