//! Attendance report models.
//!
//! This module contains the [`AttendanceReport`] type and its audit structures
//! that capture every output of a cycle evaluation: the fine summary, the
//! per-day classifications, and an audit trace of the fine computations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{DayClassification, FineSummary};

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during evaluation.
///
/// Warnings flag data-quality problems that were tolerated, such as an
/// arrival that could not be read as a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a report.
///
/// # Example
///
/// ```
/// use attendance_engine::models::AuditTrace;
///
/// let trace = AuditTrace {
///     steps: vec![],
///     warnings: vec![],
///     duration_us: 1234,
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during evaluation.
    pub warnings: Vec<AuditWarning>,
    /// The total evaluation duration in microseconds.
    pub duration_us: u64,
}

/// The complete result of evaluating a billing cycle.
///
/// The `summary` and `days` are a pure function of the stored history and the
/// reference date; the id and timestamp identify this particular report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceReport {
    /// Unique identifier for this report.
    pub report_id: Uuid,
    /// When the report was generated.
    pub generated_at: DateTime<Utc>,
    /// The version of the engine that produced it.
    pub engine_version: String,
    /// Fines per employee for the cycle.
    pub summary: FineSummary,
    /// Every classified day, employee by employee in roster order, dates ascending.
    pub days: Vec<DayClassification>,
    /// Audit trace of the fine computations.
    pub audit_trace: AuditTrace,
}

impl AttendanceReport {
    /// Returns the classified days of one employee.
    pub fn days_for<'a>(
        &'a self,
        employee: &'a str,
    ) -> impl Iterator<Item = &'a DayClassification> + 'a {
        self.days.iter().filter(move |d| d.employee == employee)
    }
}
