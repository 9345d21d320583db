//! Daily attendance classification.
//!
//! A working day with neither an arrival nor a departure is an absence. When
//! an arrival exists it is compared with the effective arrival limit, which
//! depends on the previous day's departure. Rest days are never fined.

use chrono::NaiveDate;

use crate::config::AttendanceRules;
use crate::models::{DayClassification, DayOutcome, TimeMark};

use super::{ArrivalLimit, LimitBasis, classify_departure, effective_limit, is_rest_day};

/// Classifies one day.
///
/// - On the rest day the outcome is [`DayOutcome::RestDay`] whatever was recorded.
/// - Both fields missing: [`DayOutcome::Absent`].
/// - Arrival after the effective limit: [`DayOutcome::UnexcusedLate`].
/// - Otherwise [`DayOutcome::OnTime`]. This includes days with only a
///   departure, which are not checked for lateness.
///
/// # Arguments
///
/// * `date` - The day being classified
/// * `arrival` - The arrival recorded on `date`
/// * `departure` - The departure recorded on `date`
/// * `prev_departure` - The departure recorded on the day before `date`
/// * `rules` - The attendance rules
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::classify;
/// use attendance_engine::config::AttendanceRules;
/// use attendance_engine::models::{DayOutcome, TimeMark};
/// use chrono::NaiveDate;
///
/// let rules = AttendanceRules::default();
/// let monday = NaiveDate::from_ymd_opt(2025, 3, 17).unwrap();
/// let left_late = TimeMark::Present("23:45".parse().unwrap());
///
/// let outcome = classify(
///     monday,
///     TimeMark::Present("11:00".parse().unwrap()),
///     TimeMark::Missing,
///     left_late,
///     &rules,
/// );
/// assert_eq!(outcome, DayOutcome::OnTime);
///
/// let outcome = classify(monday, TimeMark::Missing, TimeMark::Missing, left_late, &rules);
/// assert_eq!(outcome, DayOutcome::Absent);
/// ```
pub fn classify(
    date: NaiveDate,
    arrival: TimeMark,
    departure: TimeMark,
    prev_departure: TimeMark,
    rules: &AttendanceRules,
) -> DayOutcome {
    evaluate(date, arrival, departure, prev_departure, rules).0
}

/// Classifies one day and explains the verdict.
///
/// Produces the same outcome as [`classify`], together with the arrival
/// limit applied, the departure status and a reasoning line.
pub fn classify_day(
    employee: &str,
    date: NaiveDate,
    arrival: TimeMark,
    departure: TimeMark,
    prev_departure: TimeMark,
    rules: &AttendanceRules,
) -> DayClassification {
    let (outcome, limit) = evaluate(date, arrival, departure, prev_departure, rules);

    let reasoning = match (outcome, arrival, limit) {
        (DayOutcome::RestDay, _, _) => format!("{} is the weekly rest day", date.format("%A")),
        (DayOutcome::Absent, _, _) => "No arrival or departure recorded".to_string(),
        (_, TimeMark::Present(arrived), Some(limit)) => {
            let relation = if outcome == DayOutcome::UnexcusedLate {
                "after"
            } else {
                "within"
            };
            format!(
                "Arrived {} {} limit {} ({})",
                arrived,
                relation,
                limit.deadline,
                describe_basis(limit.basis)
            )
        }
        _ => "Departure recorded without arrival; lateness not evaluated".to_string(),
    };

    DayClassification {
        employee: employee.to_string(),
        date,
        arrival: arrival.time(),
        departure: departure.time(),
        arrival_limit: limit.map(|l| l.deadline),
        outcome,
        departure_status: departure.time().and_then(|t| classify_departure(t, rules)),
        reasoning,
    }
}

fn evaluate(
    date: NaiveDate,
    arrival: TimeMark,
    departure: TimeMark,
    prev_departure: TimeMark,
    rules: &AttendanceRules,
) -> (DayOutcome, Option<ArrivalLimit>) {
    if is_rest_day(date, rules) {
        return (DayOutcome::RestDay, None);
    }

    let limit = effective_limit(prev_departure, rules);

    let outcome = match (arrival, departure) {
        (TimeMark::Missing, TimeMark::Missing) => DayOutcome::Absent,
        (TimeMark::Present(arrived), _) if limit.is_exceeded_by(arrived) => {
            DayOutcome::UnexcusedLate
        }
        _ => DayOutcome::OnTime,
    };

    (outcome, Some(limit))
}

fn describe_basis(basis: LimitBasis) -> &'static str {
    match basis {
        LimitBasis::Standard => "standard start",
        LimitBasis::LateDeparture => "left in late overtime the day before",
        LimitBasis::VeryLateDeparture => "left very late the day before",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ClockTime, DepartureStatus};

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn at(time: &str) -> TimeMark {
        TimeMark::Present(time.parse().unwrap())
    }

    // 2025-03-17 is a Monday, 2025-03-16 a Sunday
    fn monday() -> NaiveDate {
        make_date("2025-03-17")
    }

    fn sunday() -> NaiveDate {
        make_date("2025-03-16")
    }

    fn outcome(arrival: TimeMark, departure: TimeMark, prev: TimeMark) -> DayOutcome {
        classify(monday(), arrival, departure, prev, &AttendanceRules::default())
    }

    // ==========================================================================
    // Absence
    // ==========================================================================
    #[test]
    fn test_both_missing_is_absent() {
        assert_eq!(
            outcome(TimeMark::Missing, TimeMark::Missing, TimeMark::Missing),
            DayOutcome::Absent
        );
        assert_eq!(
            outcome(TimeMark::Missing, TimeMark::Missing, at("23:50")),
            DayOutcome::Absent
        );
    }

    #[test]
    fn test_arrival_only_is_not_absent() {
        assert_ne!(
            outcome(at("09:00"), TimeMark::Missing, TimeMark::Missing),
            DayOutcome::Absent
        );
    }

    #[test]
    fn test_departure_only_is_on_time() {
        assert_eq!(
            outcome(TimeMark::Missing, at("20:00"), TimeMark::Missing),
            DayOutcome::OnTime
        );
    }

    // ==========================================================================
    // Lateness
    // ==========================================================================
    #[test]
    fn test_arrival_at_limit_is_on_time() {
        assert_eq!(
            outcome(at("08:10"), at("20:00"), TimeMark::Missing),
            DayOutcome::OnTime
        );
    }

    #[test]
    fn test_arrival_one_minute_late() {
        assert_eq!(
            outcome(at("08:11"), at("20:00"), TimeMark::Missing),
            DayOutcome::UnexcusedLate
        );
    }

    #[test]
    fn test_very_late_departure_extends_to_1130() {
        assert_eq!(
            outcome(at("11:00"), TimeMark::Missing, at("23:45")),
            DayOutcome::OnTime
        );
        assert_eq!(
            outcome(at("11:45"), TimeMark::Missing, at("23:45")),
            DayOutcome::UnexcusedLate
        );
    }

    #[test]
    fn test_late_overtime_extends_to_0920() {
        assert_eq!(outcome(at("09:20"), at("20:00"), at("21:10")), DayOutcome::OnTime);
        assert_eq!(
            outcome(at("09:21"), at("20:00"), at("21:10")),
            DayOutcome::UnexcusedLate
        );
    }

    #[test]
    fn test_late_arrival_without_departure_is_still_late() {
        assert_eq!(
            outcome(at("10:00"), TimeMark::Missing, TimeMark::Missing),
            DayOutcome::UnexcusedLate
        );
    }

    // ==========================================================================
    // Rest day
    // ==========================================================================
    #[test]
    fn test_rest_day_ignores_inputs() {
        let rules = AttendanceRules::default();
        let cases = [
            (TimeMark::Missing, TimeMark::Missing),
            (at("13:00"), TimeMark::Missing),
            (at("07:00"), at("22:00")),
        ];
        for (arrival, departure) in cases {
            assert_eq!(
                classify(sunday(), arrival, departure, TimeMark::Missing, &rules),
                DayOutcome::RestDay
            );
        }
    }

    // ==========================================================================
    // Detailed classification
    // ==========================================================================
    #[test]
    fn test_classify_day_carries_limit_and_status() {
        let day = classify_day(
            "Aziz",
            monday(),
            at("09:00"),
            at("21:30"),
            at("21:15"),
            &AttendanceRules::default(),
        );
        assert_eq!(day.employee, "Aziz");
        assert_eq!(day.outcome, DayOutcome::OnTime);
        assert_eq!(day.arrival_limit, ClockTime::from_hm(9, 20));
        assert_eq!(day.departure_status, Some(DepartureStatus::Overtime));
        assert!(day.reasoning.contains("within limit 09:20"));
    }

    #[test]
    fn test_classify_day_late_reasoning() {
        let day = classify_day(
            "Aziz",
            monday(),
            at("08:45"),
            TimeMark::Missing,
            TimeMark::Missing,
            &AttendanceRules::default(),
        );
        assert_eq!(day.outcome, DayOutcome::UnexcusedLate);
        assert!(day.reasoning.contains("Arrived 08:45 after limit 08:10"));
        assert_eq!(day.departure_status, None);
    }

    #[test]
    fn test_classify_day_rest_day_has_no_limit() {
        let day = classify_day(
            "Aziz",
            sunday(),
            TimeMark::Missing,
            TimeMark::Missing,
            TimeMark::Missing,
            &AttendanceRules::default(),
        );
        assert_eq!(day.outcome, DayOutcome::RestDay);
        assert_eq!(day.arrival_limit, None);
        assert!(day.reasoning.contains("Sunday"));
    }

    #[test]
    fn test_classify_day_matches_classify() {
        let rules = AttendanceRules::default();
        let inputs = [
            (TimeMark::Missing, TimeMark::Missing, TimeMark::Missing),
            (at("08:30"), TimeMark::Missing, at("21:20")),
            (TimeMark::Missing, at("20:10"), TimeMark::Missing),
            (at("12:00"), at("20:00"), at("23:30")),
        ];
        for (arrival, departure, prev) in inputs {
            let detailed = classify_day("E", monday(), arrival, departure, prev, &rules);
            assert_eq!(
                detailed.outcome,
                classify(monday(), arrival, departure, prev, &rules)
            );
        }
    }
}
