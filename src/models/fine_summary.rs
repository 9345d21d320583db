//! Fine summary models.
//!
//! This module contains the [`FineSummary`] produced for a billing cycle and
//! the per-employee [`EmployeeFines`] lines it is made of.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::BillingCycle;

/// Late and absent tallies and the resulting fines for one employee.
///
/// The amounts always satisfy `late_fine = late_days * late rate`,
/// `absent_fine = absent_days * absence rate` and
/// `total_fine = late_fine + absent_fine`.
///
/// # Example
///
/// ```
/// use attendance_engine::models::EmployeeFines;
/// use rust_decimal::Decimal;
///
/// let fines = EmployeeFines {
///     employee: "Dilnoza".to_string(),
///     late_days: 2,
///     absent_days: 1,
///     late_fine: Decimal::from(40_000),
///     absent_fine: Decimal::from(200_000),
///     total_fine: Decimal::from(240_000),
/// };
/// assert!(fines.has_fines());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeFines {
    /// The employee's display name.
    pub employee: String,
    /// Working days with an unexcused late arrival.
    pub late_days: u32,
    /// Working days with no arrival and no departure.
    pub absent_days: u32,
    /// Fine for late days.
    pub late_fine: Decimal,
    /// Fine for absent days.
    pub absent_fine: Decimal,
    /// Sum of both fines.
    pub total_fine: Decimal,
}

impl EmployeeFines {
    /// Returns true if any fine applies.
    pub fn has_fines(&self) -> bool {
        self.total_fine > Decimal::ZERO
    }
}

/// Fines for every rostered employee over one billing cycle.
///
/// Employees appear in roster order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FineSummary {
    /// The cycle the fines were computed over.
    pub cycle: BillingCycle,
    /// One line per employee, in roster order.
    pub per_employee: Vec<EmployeeFines>,
}

impl FineSummary {
    /// Looks up the line for an employee by name.
    pub fn get(&self, employee: &str) -> Option<&EmployeeFines> {
        self.per_employee.iter().find(|f| f.employee == employee)
    }

    /// Sum of all employees' total fines.
    pub fn grand_total(&self) -> Decimal {
        self.per_employee.iter().map(|f| f.total_fine).sum()
    }
}
