//! Core data models for the attendance rules engine.
//!
//! This module contains all the domain models used throughout the engine.

mod billing_cycle;
mod clock_time;
mod day_record;
mod fine_summary;
mod outcome;
mod report;

pub use billing_cycle::BillingCycle;
pub use clock_time::{ClockTime, TimeMark, to_minutes};
pub use day_record::{AttendanceField, DayRecord, WriteOutcome, is_unset};
pub use fine_summary::{EmployeeFines, FineSummary};
pub use outcome::{DayClassification, DayOutcome, DepartureStatus};
pub use report::{AttendanceReport, AuditStep, AuditTrace, AuditWarning};
