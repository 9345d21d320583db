//! Attendance storage.
//!
//! The engine reads and writes attendance through the [`AttendanceStore`]
//! trait so the rules never depend on where the history lives. An in-memory
//! implementation is provided for the HTTP service and for tests.

mod memory;

pub use memory::InMemoryStore;

use chrono::NaiveDate;

use crate::error::EngineResult;
use crate::models::{AttendanceField, DayRecord, WriteOutcome};

/// Read and write access to the attendance history.
///
/// Writes are set-if-absent: the first value written to a field wins and
/// later writes report [`WriteOutcome::AlreadySet`] without changing it.
pub trait AttendanceStore: Send + Sync {
    /// Returns every registered employee in roster order.
    fn list_employees(&self) -> EngineResult<Vec<String>>;

    /// Adds an employee to the roster.
    ///
    /// Returns `false` if the employee was already registered.
    fn register_employee(&self, name: &str) -> EngineResult<bool>;

    /// Returns the record for one employee and date.
    ///
    /// A date with nothing entered yields [`DayRecord::empty`], never an error.
    fn get_day_record(&self, employee: &str, date: NaiveDate) -> EngineResult<DayRecord>;

    /// Writes `value` into `field` unless it already holds a value.
    ///
    /// An employee that is not on the roster yet is registered first.
    fn set_field(
        &self,
        employee: &str,
        date: NaiveDate,
        field: AttendanceField,
        value: &str,
    ) -> EngineResult<WriteOutcome>;

    /// Writes `marker` into both fields of a day that has nothing entered.
    ///
    /// The check and both writes happen as one step. Returns `false`, and
    /// changes nothing, if either field already holds a value.
    fn mark_if_blank(&self, employee: &str, date: NaiveDate, marker: &str) -> EngineResult<bool>;

    /// Records an arrival.
    fn set_arrival(&self, employee: &str, date: NaiveDate, value: &str) -> EngineResult<WriteOutcome> {
        self.set_field(employee, date, AttendanceField::Arrival, value)
    }

    /// Records a departure.
    fn set_departure(
        &self,
        employee: &str,
        date: NaiveDate,
        value: &str,
    ) -> EngineResult<WriteOutcome> {
        self.set_field(employee, date, AttendanceField::Departure, value)
    }
}
