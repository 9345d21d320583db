//! Effective arrival limit resolution.
//!
//! The deadline for arriving on a day depends on when the employee left the
//! previous day: staying into late overtime pushes the next morning's limit
//! back, and staying very late pushes it back further.

use serde::{Deserialize, Serialize};

use crate::config::AttendanceRules;
use crate::models::{ClockTime, TimeMark};

/// Why a particular arrival limit applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LimitBasis {
    /// No qualifying late departure the day before.
    Standard,
    /// Left at or after the start of late overtime.
    LateDeparture,
    /// Left at or after the very late threshold.
    VeryLateDeparture,
}

/// The arrival deadline for one employee on one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrivalLimit {
    /// Arrivals strictly after this time are late.
    pub deadline: ClockTime,
    /// The rule that produced the deadline.
    pub basis: LimitBasis,
}

impl ArrivalLimit {
    /// The deadline in minutes since midnight.
    pub fn minutes(&self) -> u32 {
        self.deadline.minutes()
    }

    /// Returns true if `arrival` is after the deadline.
    pub fn is_exceeded_by(&self, arrival: ClockTime) -> bool {
        arrival > self.deadline
    }
}

/// Resolves the arrival limit from the previous day's departure.
///
/// The very late threshold is tested before the late-overtime threshold, so
/// a departure past both gets the wider limit. A missing departure, including
/// a missing previous-day record, leaves the standard limit.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::{effective_limit, LimitBasis};
/// use attendance_engine::config::AttendanceRules;
/// use attendance_engine::models::{to_minutes, TimeMark};
///
/// let rules = AttendanceRules::default();
///
/// let limit = effective_limit(TimeMark::Missing, &rules);
/// assert_eq!(limit.minutes(), to_minutes("08:10").unwrap());
///
/// let limit = effective_limit(TimeMark::Present("23:45".parse().unwrap()), &rules);
/// assert_eq!(limit.minutes(), to_minutes("11:30").unwrap());
/// assert_eq!(limit.basis, LimitBasis::VeryLateDeparture);
/// ```
pub fn effective_limit(prev_departure: TimeMark, rules: &AttendanceRules) -> ArrivalLimit {
    let schedule = &rules.schedule;

    let (deadline, basis) = match prev_departure {
        TimeMark::Present(left) if left >= schedule.very_late_leave => {
            (schedule.extended_arrival_2, LimitBasis::VeryLateDeparture)
        }
        TimeMark::Present(left) if left >= schedule.overtime_yellow_start => {
            (schedule.extended_arrival_1, LimitBasis::LateDeparture)
        }
        _ => (schedule.work_start, LimitBasis::Standard),
    };

    ArrivalLimit { deadline, basis }
}
