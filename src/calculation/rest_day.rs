//! Rest day detection.

use chrono::{Datelike, NaiveDate};

use crate::config::AttendanceRules;

/// Returns true if `date` falls on the configured weekly rest day.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::is_rest_day;
/// use attendance_engine::config::AttendanceRules;
/// use chrono::NaiveDate;
///
/// let rules = AttendanceRules::default();
/// // 2025-03-16 is a Sunday
/// assert!(is_rest_day(NaiveDate::from_ymd_opt(2025, 3, 16).unwrap(), &rules));
/// assert!(!is_rest_day(NaiveDate::from_ymd_opt(2025, 3, 17).unwrap(), &rules));
/// ```
pub fn is_rest_day(date: NaiveDate, rules: &AttendanceRules) -> bool {
    date.weekday() == rules.schedule.rest_day
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_sunday_is_rest_day_by_default() {
        // 2025-03-16 is a Sunday
        assert!(is_rest_day(make_date("2025-03-16"), &AttendanceRules::default()));
    }

    #[test]
    fn test_saturday_is_working_day_by_default() {
        // 2025-03-15 is a Saturday
        assert!(!is_rest_day(make_date("2025-03-15"), &AttendanceRules::default()));
    }

    #[test]
    fn test_every_weekday_is_working_day() {
        let rules = AttendanceRules::default();
        // 2025-03-17 (Mon) .. 2025-03-21 (Fri)
        for day in 17..=21 {
            let date = NaiveDate::from_ymd_opt(2025, 3, day).unwrap();
            assert!(!is_rest_day(date, &rules), "{} should be a working day", date);
        }
    }

    #[test]
    fn test_configured_rest_day() {
        let mut rules = AttendanceRules::default();
        rules.schedule.rest_day = Weekday::Fri;
        // 2025-03-21 is a Friday
        assert!(is_rest_day(make_date("2025-03-21"), &rules));
        assert!(!is_rest_day(make_date("2025-03-16"), &rules));
    }
}
