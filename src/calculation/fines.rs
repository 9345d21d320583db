//! Fine aggregation over a billing cycle.
//!
//! For every employee on the roster and every day of the cycle containing the
//! reference date, the day is classified using that day's record and the
//! previous day's departure. Late and absent days are tallied and priced with
//! the configured per-day fines.

use std::time::Instant;

use chrono::{Days, NaiveDate, Utc};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::AttendanceRules;
use crate::error::EngineResult;
use crate::models::{
    AttendanceField, AttendanceReport, AuditStep, AuditTrace, AuditWarning, BillingCycle,
    DayClassification, DayOutcome, DayRecord, EmployeeFines, FineSummary, TimeMark,
};
use crate::store::AttendanceStore;

use super::{classify_day, cycle_bounds};

/// Prices a tally of late and absent days.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::compute_fines;
/// use attendance_engine::config::AttendanceRules;
/// use rust_decimal::Decimal;
///
/// let fines = compute_fines("Aziz", 2, 1, &AttendanceRules::default());
/// assert_eq!(fines.late_fine, Decimal::from(40_000));
/// assert_eq!(fines.absent_fine, Decimal::from(200_000));
/// assert_eq!(fines.total_fine, Decimal::from(240_000));
/// ```
pub fn compute_fines(
    employee: &str,
    late_days: u32,
    absent_days: u32,
    rules: &AttendanceRules,
) -> EmployeeFines {
    let late_fine = rules.fines.late_per_day * Decimal::from(late_days);
    let absent_fine = rules.fines.absence_per_day * Decimal::from(absent_days);

    EmployeeFines {
        employee: employee.to_string(),
        late_days,
        absent_days,
        late_fine,
        absent_fine,
        total_fine: late_fine + absent_fine,
    }
}

/// Computes the fine summary for the cycle containing `reference_date`.
///
/// Employees appear in roster order. Every non-rest day of the cycle is
/// evaluated, so an employee with no records at all is absent on each of
/// them. Store failures are returned unchanged, and a date whose cycle leaves
/// the calendar gives [`EngineError::DateOutOfRange`](crate::error::EngineError::DateOutOfRange). Calling this twice over
/// the same history gives equal summaries.
///
/// # Arguments
///
/// * `store` - The attendance history
/// * `reference_date` - Any date inside the cycle to summarise
/// * `rules` - The attendance rules
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::summarize;
/// use attendance_engine::config::AttendanceRules;
/// use attendance_engine::store::InMemoryStore;
/// use chrono::NaiveDate;
///
/// let store = InMemoryStore::with_employees(["Aziz"]);
/// let reference = NaiveDate::from_ymd_opt(2025, 3, 20).unwrap();
///
/// let summary = summarize(&store, reference, &AttendanceRules::default()).unwrap();
/// assert_eq!(summary.cycle.start, NaiveDate::from_ymd_opt(2025, 3, 15).unwrap());
/// // 15 March .. 14 April 2025 has 26 working days
/// assert_eq!(summary.get("Aziz").unwrap().absent_days, 26);
/// ```
pub fn summarize(
    store: &dyn AttendanceStore,
    reference_date: NaiveDate,
    rules: &AttendanceRules,
) -> EngineResult<FineSummary> {
    let cycle = cycle_bounds(reference_date)?;
    let mut warnings = Vec::new();
    let mut per_employee = Vec::new();

    for employee in store.list_employees()? {
        let days = walk_cycle(store, &employee, cycle, rules, &mut warnings)?;
        per_employee.push(tally(&employee, &days, rules));
    }

    debug!(
        %reference_date,
        employees = per_employee.len(),
        warnings = warnings.len(),
        "Summarised billing cycle"
    );

    Ok(FineSummary { cycle, per_employee })
}

/// Builds the full attendance report for the cycle containing `reference_date`.
///
/// The report carries the same summary as [`summarize`] together with every
/// day's classification (rest days included), a warning for each entry that
/// could not be read as a time, and one audit step per employee describing
/// how the fine was priced.
pub fn build_report(
    store: &dyn AttendanceStore,
    reference_date: NaiveDate,
    rules: &AttendanceRules,
) -> EngineResult<AttendanceReport> {
    let start_time = Instant::now();
    let cycle = cycle_bounds(reference_date)?;

    let mut warnings = Vec::new();
    let mut steps = Vec::new();
    let mut per_employee = Vec::new();
    let mut all_days = Vec::new();

    for (index, employee) in store.list_employees()?.into_iter().enumerate() {
        let days = walk_cycle(store, &employee, cycle, rules, &mut warnings)?;
        let fines = tally(&employee, &days, rules);

        steps.push(fine_audit_step(index as u32 + 1, &fines, rules));
        per_employee.push(fines);
        all_days.extend(days);
    }

    let duration_us = start_time.elapsed().as_micros() as u64;

    info!(
        %reference_date,
        cycle_start = %cycle.start,
        cycle_end = %cycle.end,
        employees = per_employee.len(),
        warnings = warnings.len(),
        duration_us = duration_us,
        "Built attendance report"
    );

    Ok(AttendanceReport {
        report_id: Uuid::new_v4(),
        generated_at: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        summary: FineSummary { cycle, per_employee },
        days: all_days,
        audit_trace: AuditTrace {
            steps,
            warnings,
            duration_us,
        },
    })
}

/// Classifies every day of `cycle` for one employee in ascending date order.
fn walk_cycle(
    store: &dyn AttendanceStore,
    employee: &str,
    cycle: BillingCycle,
    rules: &AttendanceRules,
    warnings: &mut Vec<AuditWarning>,
) -> EngineResult<Vec<DayClassification>> {
    let mut prev_departure = match cycle.start.checked_sub_days(Days::new(1)) {
        Some(eve) => {
            let record = store.get_day_record(employee, eve)?;
            read_mark(&record, AttendanceField::Departure, employee, rules, warnings)
        }
        None => TimeMark::Missing,
    };

    let mut days = Vec::new();
    for date in cycle.days() {
        let record = store.get_day_record(employee, date)?;
        let arrival = read_mark(&record, AttendanceField::Arrival, employee, rules, warnings);
        let departure = read_mark(&record, AttendanceField::Departure, employee, rules, warnings);

        days.push(classify_day(
            employee,
            date,
            arrival,
            departure,
            prev_departure,
            rules,
        ));
        prev_departure = departure;
    }

    Ok(days)
}

/// Reads one field as a [`TimeMark`], degrading unreadable text to `Missing`.
///
/// The configured absence marker is expected text and is not reported.
fn read_mark(
    record: &DayRecord,
    field: AttendanceField,
    employee: &str,
    rules: &AttendanceRules,
    warnings: &mut Vec<AuditWarning>,
) -> TimeMark {
    let marker = rules.fines.absence_marker.trim();
    if record.field(field).is_some_and(|value| value.trim() == marker) {
        return TimeMark::Missing;
    }

    match record.mark(field) {
        Ok(mark) => mark,
        Err(err) => {
            warn!(
                employee = %employee,
                date = %record.date,
                field = %field,
                error = %err,
                "Unparseable attendance entry treated as missing"
            );
            warnings.push(AuditWarning {
                code: "UNPARSEABLE_TIME".to_string(),
                message: format!("{} {} on {}: {}", employee, field, record.date, err),
                severity: "medium".to_string(),
            });
            TimeMark::Missing
        }
    }
}

fn tally(employee: &str, days: &[DayClassification], rules: &AttendanceRules) -> EmployeeFines {
    let count = |outcome: DayOutcome| days.iter().filter(|d| d.outcome == outcome).count() as u32;
    compute_fines(
        employee,
        count(DayOutcome::UnexcusedLate),
        count(DayOutcome::Absent),
        rules,
    )
}

fn fine_audit_step(step_number: u32, fines: &EmployeeFines, rules: &AttendanceRules) -> AuditStep {
    AuditStep {
        step_number,
        rule_id: "cycle_fines".to_string(),
        rule_name: "Billing Cycle Fine Calculation".to_string(),
        input: serde_json::json!({
            "employee": fines.employee,
            "late_days": fines.late_days,
            "absent_days": fines.absent_days,
            "late_per_day": rules.fines.late_per_day.normalize().to_string(),
            "absence_per_day": rules.fines.absence_per_day.normalize().to_string()
        }),
        output: serde_json::json!({
            "late_fine": fines.late_fine.normalize().to_string(),
            "absent_fine": fines.absent_fine.normalize().to_string(),
            "total_fine": fines.total_fine.normalize().to_string()
        }),
        reasoning: format!(
            "{}: {} late day(s) x {} + {} absent day(s) x {} = {}",
            fines.employee,
            fines.late_days,
            rules.fines.late_per_day.normalize(),
            fines.absent_days,
            rules.fines.absence_per_day.normalize(),
            fines.total_fine.normalize()
        ),
    }
}
