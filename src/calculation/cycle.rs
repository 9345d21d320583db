//! Billing cycle calculation.
//!
//! Fines are aggregated over cycles that run from the 15th of one month to
//! the 14th of the next. This module finds the cycle containing a date.

use chrono::{Datelike, NaiveDate};

use crate::error::{EngineError, EngineResult};
use crate::models::BillingCycle;

/// The first day of every cycle.
pub const CYCLE_START_DAY: u32 = 15;

/// The last day of every cycle.
pub const CYCLE_END_DAY: u32 = 14;

/// Returns the billing cycle containing `reference_date`.
///
/// On or after the 15th the cycle starts on the 15th of the reference month
/// and ends on the 14th of the next month. Before the 15th it starts on the
/// 15th of the previous month and ends on the 14th of the reference month.
/// Year boundaries roll over in both directions.
///
/// # Errors
///
/// Returns [`EngineError::DateOutOfRange`] when the cycle would start or end
/// outside the representable calendar.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::cycle_bounds;
/// use chrono::NaiveDate;
///
/// // Day 10: the cycle started in the previous month
/// let cycle = cycle_bounds(NaiveDate::from_ymd_opt(2025, 1, 10).unwrap()).unwrap();
/// assert_eq!(cycle.start, NaiveDate::from_ymd_opt(2024, 12, 15).unwrap());
/// assert_eq!(cycle.end, NaiveDate::from_ymd_opt(2025, 1, 14).unwrap());
///
/// // Day 15: the cycle starts today
/// let cycle = cycle_bounds(NaiveDate::from_ymd_opt(2025, 12, 15).unwrap()).unwrap();
/// assert_eq!(cycle.start, NaiveDate::from_ymd_opt(2025, 12, 15).unwrap());
/// assert_eq!(cycle.end, NaiveDate::from_ymd_opt(2026, 1, 14).unwrap());
/// ```
pub fn cycle_bounds(reference_date: NaiveDate) -> EngineResult<BillingCycle> {
    let (year, month) = (reference_date.year(), reference_date.month());

    let (start_month, end_month) = if reference_date.day() >= CYCLE_START_DAY {
        ((year, month), next_month(year, month))
    } else {
        (previous_month(year, month), (year, month))
    };

    let out_of_range = || EngineError::DateOutOfRange {
        date: reference_date,
    };
    Ok(BillingCycle {
        start: day_of(start_month, CYCLE_START_DAY).ok_or_else(out_of_range)?,
        end: day_of(end_month, CYCLE_END_DAY).ok_or_else(out_of_range)?,
    })
}

fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}

fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month == 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

fn day_of((year, month): (i32, u32), day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
}
