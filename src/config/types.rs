//! Configuration types for attendance rules.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files, and the assembled
//! [`AttendanceRules`] every calculation reads from.

use chrono::Weekday;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::ClockTime;

/// Default start of the working day.
pub const WORK_START: ClockTime = ClockTime::at(8, 10);
/// Default end of the working day.
pub const WORK_END: ClockTime = ClockTime::at(20, 0);
/// Default end of regular overtime.
pub const OVERTIME_GREEN_END: ClockTime = ClockTime::at(21, 0);
/// Default start of late overtime; leaving at or after it extends the next arrival limit.
pub const OVERTIME_YELLOW_START: ClockTime = ClockTime::at(21, 10);
/// Default very late departure threshold.
pub const VERY_LATE_LEAVE: ClockTime = ClockTime::at(23, 30);
/// Default arrival limit after a late-overtime departure.
pub const EXTENDED_ARRIVAL_1: ClockTime = ClockTime::at(9, 20);
/// Default arrival limit after a very late departure.
pub const EXTENDED_ARRIVAL_2: ClockTime = ClockTime::at(11, 30);
/// Default fine per unexcused late day.
pub const FINE_PER_DAY: Decimal = Decimal::from_parts(20_000, 0, 0, false, 0);
/// Default fine per absent day.
pub const ABSENCE_FINE_PER_DAY: Decimal = Decimal::from_parts(200_000, 0, 0, false, 0);
/// Default text written into both fields of an absent day.
pub const ABSENCE_MARKER: &str = "200 000";

/// Working-day clock times and the weekly rest day, from `schedule.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Start of the working day; the base arrival limit.
    pub work_start: ClockTime,
    /// End of the working day.
    pub work_end: ClockTime,
    /// End of regular overtime.
    pub overtime_green_end: ClockTime,
    /// Start of late overtime.
    pub overtime_yellow_start: ClockTime,
    /// Departures at or after this time are very late.
    pub very_late_leave: ClockTime,
    /// Arrival limit after a late-overtime departure.
    pub extended_arrival_1: ClockTime,
    /// Arrival limit after a very late departure.
    pub extended_arrival_2: ClockTime,
    /// The weekday never fined.
    pub rest_day: Weekday,
}

/// Fine amounts, from `fines.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FineConfig {
    /// Fine per unexcused late day.
    pub late_per_day: Decimal,
    /// Fine per absent day.
    pub absence_per_day: Decimal,
    /// Text written into the fields of an absent day.
    #[serde(default = "default_absence_marker")]
    pub absence_marker: String,
}

fn default_absence_marker() -> String {
    ABSENCE_MARKER.to_string()
}

/// The complete set of attendance rules.
///
/// `Default` yields the standard rules: 08:10 start, 20:00 end, arrival
/// limits of 09:20 after leaving from 21:10 and 11:30 after leaving from
/// 23:30, fines of 20 000 per late day and 200 000 per absent day, Sunday off.
///
/// # Example
///
/// ```
/// use attendance_engine::config::AttendanceRules;
/// use chrono::Weekday;
///
/// let rules = AttendanceRules::default();
/// assert_eq!(rules.schedule.work_start.to_string(), "08:10");
/// assert_eq!(rules.schedule.rest_day, Weekday::Sun);
/// assert!(rules.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRules {
    /// Clock times and rest day.
    pub schedule: ScheduleConfig,
    /// Fine amounts.
    pub fines: FineConfig,
}

impl Default for AttendanceRules {
    fn default() -> Self {
        Self {
            schedule: ScheduleConfig {
                work_start: WORK_START,
                work_end: WORK_END,
                overtime_green_end: OVERTIME_GREEN_END,
                overtime_yellow_start: OVERTIME_YELLOW_START,
                very_late_leave: VERY_LATE_LEAVE,
                extended_arrival_1: EXTENDED_ARRIVAL_1,
                extended_arrival_2: EXTENDED_ARRIVAL_2,
                rest_day: Weekday::Sun,
            },
            fines: FineConfig {
                late_per_day: FINE_PER_DAY,
                absence_per_day: ABSENCE_FINE_PER_DAY,
                absence_marker: ABSENCE_MARKER.to_string(),
            },
        }
    }
}

impl AttendanceRules {
    /// Checks that the thresholds are mutually consistent.
    ///
    /// The arrival limit resolver tests the very-late threshold before the
    /// late-overtime one, which is only sound while
    /// `very_late_leave >= overtime_yellow_start`. The extended limits must
    /// widen in the same order, the departure windows must not overlap, and
    /// fines cannot be negative. The absence marker must not read as a time,
    /// or a marked day would stop being an absence.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfig`] naming the first violated rule.
    pub fn validate(&self) -> EngineResult<()> {
        let s = &self.schedule;

        let orderings = [
            ("overtime_yellow_start", s.overtime_yellow_start, "very_late_leave", s.very_late_leave),
            ("work_start", s.work_start, "extended_arrival_1", s.extended_arrival_1),
            ("extended_arrival_1", s.extended_arrival_1, "extended_arrival_2", s.extended_arrival_2),
            ("work_end", s.work_end, "overtime_green_end", s.overtime_green_end),
            ("overtime_green_end", s.overtime_green_end, "overtime_yellow_start", s.overtime_yellow_start),
        ];
        for (earlier_name, earlier, later_name, later) in orderings {
            ensure_ordered(earlier_name, earlier, later_name, later)?;
        }

        if self.fines.late_per_day.is_sign_negative()
            || self.fines.absence_per_day.is_sign_negative()
        {
            return Err(EngineError::InvalidConfig {
                message: "fine amounts must not be negative".to_string(),
            });
        }

        let marker = self.fines.absence_marker.trim();
        if marker.is_empty() || marker.parse::<ClockTime>().is_ok() {
            return Err(EngineError::InvalidConfig {
                message: format!(
                    "absence_marker '{}' must be non-empty and not a time",
                    self.fines.absence_marker
                ),
            });
        }

        Ok(())
    }
}

fn ensure_ordered(
    earlier_name: &str,
    earlier: ClockTime,
    later_name: &str,
    later: ClockTime,
) -> EngineResult<()> {
    if earlier > later {
        return Err(EngineError::InvalidConfig {
            message: format!("{later_name} ({later}) must not precede {earlier_name} ({earlier})"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules_match_standard_constants() {
        let rules = AttendanceRules::default();
        assert_eq!(rules.schedule.work_start.to_string(), "08:10");
        assert_eq!(rules.schedule.work_end.to_string(), "20:00");
        assert_eq!(rules.schedule.overtime_green_end.to_string(), "21:00");
        assert_eq!(rules.schedule.overtime_yellow_start.to_string(), "21:10");
        assert_eq!(rules.schedule.very_late_leave.to_string(), "23:30");
        assert_eq!(rules.schedule.extended_arrival_1.to_string(), "09:20");
        assert_eq!(rules.schedule.extended_arrival_2.to_string(), "11:30");
        assert_eq!(rules.fines.late_per_day, Decimal::from(20_000));
        assert_eq!(rules.fines.absence_per_day, Decimal::from(200_000));
        assert_eq!(rules.fines.absence_marker, "200 000");
    }

    #[test]
    fn test_default_rules_validate() {
        assert!(AttendanceRules::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_inverted_departure_thresholds() {
        let mut rules = AttendanceRules::default();
        rules.schedule.very_late_leave = ClockTime::at(21, 0);

        match rules.validate() {
            Err(EngineError::InvalidConfig { message }) => {
                assert!(message.contains("very_late_leave"));
            }
            other => panic!("Expected InvalidConfig, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_narrowing_extended_arrival() {
        let mut rules = AttendanceRules::default();
        rules.schedule.extended_arrival_2 = ClockTime::at(9, 0);
        assert!(matches!(
            rules.validate(),
            Err(EngineError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_overlapping_departure_windows() {
        let mut rules = AttendanceRules::default();
        rules.schedule.overtime_green_end = ClockTime::at(21, 30);
        assert!(rules.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_equal_thresholds() {
        let mut rules = AttendanceRules::default();
        rules.schedule.very_late_leave = rules.schedule.overtime_yellow_start;
        assert!(rules.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_negative_fine() {
        let mut rules = AttendanceRules::default();
        rules.fines.late_per_day = Decimal::from(-1);
        assert!(rules.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_time_like_marker() {
        let mut rules = AttendanceRules::default();
        rules.fines.absence_marker = "00:00".to_string();
        assert!(rules.validate().is_err());

        rules.fines.absence_marker = "  ".to_string();
        assert!(rules.validate().is_err());
    }

    #[test]
    fn test_deserialize_schedule_yaml() {
        let yaml = r#"
work_start: "08:10"
work_end: "20:00"
overtime_green_end: "21:00"
overtime_yellow_start: "21:10"
very_late_leave: "23:30"
extended_arrival_1: "09:20"
extended_arrival_2: "11:30"
rest_day: Sunday
"#;
        let schedule: ScheduleConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(schedule, AttendanceRules::default().schedule);
    }

    #[test]
    fn test_deserialize_fines_yaml_defaults_marker() {
        let yaml = r#"
late_per_day: "20000"
absence_per_day: "200000"
"#;
        let fines: FineConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(fines, AttendanceRules::default().fines);
    }
}
