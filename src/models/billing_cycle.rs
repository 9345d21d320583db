//! Billing cycle model.
//!
//! This module contains the [`BillingCycle`] type, the 15th-to-14th date range
//! over which attendance fines are aggregated.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A billing cycle running from day 15 of one month through day 14 of the
/// next, both inclusive.
///
/// Use [`cycle_bounds`](crate::calculation::cycle_bounds) to obtain the cycle containing a date.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::cycle_bounds;
/// use chrono::NaiveDate;
///
/// let cycle = cycle_bounds(NaiveDate::from_ymd_opt(2025, 3, 20).unwrap()).unwrap();
/// assert!(cycle.contains(NaiveDate::from_ymd_opt(2025, 4, 14).unwrap()));
/// assert!(!cycle.contains(NaiveDate::from_ymd_opt(2025, 4, 15).unwrap()));
/// assert_eq!(cycle.days().count(), 31);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BillingCycle {
    /// The first day of the cycle (always the 15th).
    pub start: NaiveDate,
    /// The last day of the cycle (always the 14th).
    pub end: NaiveDate,
}

impl BillingCycle {
    /// Checks if a given date falls within this cycle (inclusive).
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Iterates every date of the cycle in ascending order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }
}
