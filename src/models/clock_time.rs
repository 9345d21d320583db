//! Clock-of-day values and the explicit presence marker for time fields.
//!
//! Times are naive minute-of-day values with no timezone. Raw fields coming
//! from the store are operator-entered strings; [`TimeMark`] turns them into
//! an explicit `Present`/`Missing` value instead of overloading the empty
//! string.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

const MINUTES_PER_HOUR: u32 = 60;
const HOURS_PER_DAY: u32 = 24;

/// Parses an `HH:MM` string into minutes since midnight.
///
/// Leading and trailing whitespace is ignored and the hour may be unpadded
/// (`"8:05"`). The string must split on `:` into exactly two numeric parts,
/// with the hour below 24 and the minute below 60.
///
/// # Errors
///
/// Returns [`EngineError::InvalidTimeFormat`] for anything else.
///
/// # Example
///
/// ```
/// use attendance_engine::models::to_minutes;
///
/// assert_eq!(to_minutes("08:10").unwrap(), 490);
/// assert_eq!(to_minutes(" 8:10 ").unwrap(), 490);
/// assert!(to_minutes("08:10:00").is_err());
/// assert!(to_minutes("200 000").is_err());
/// ```
pub fn to_minutes(value: &str) -> EngineResult<u32> {
    let invalid = || EngineError::InvalidTimeFormat {
        value: value.to_string(),
    };

    let mut parts = value.trim().split(':');
    let (Some(hours), Some(minutes), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(invalid());
    };

    let hours = parse_component(hours).ok_or_else(invalid)?;
    let minutes = parse_component(minutes).ok_or_else(invalid)?;

    if hours >= HOURS_PER_DAY || minutes >= MINUTES_PER_HOUR {
        return Err(invalid());
    }

    Ok(hours * MINUTES_PER_HOUR + minutes)
}

fn parse_component(part: &str) -> Option<u32> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

/// A naive time of day with minute resolution.
///
/// Ordering and equality are plain minute comparisons. Serialized as an
/// `HH:MM` string.
///
/// # Example
///
/// ```
/// use attendance_engine::models::ClockTime;
///
/// let arrival: ClockTime = "9:05".parse().unwrap();
/// assert_eq!(arrival.minutes(), 545);
/// assert_eq!(arrival.to_string(), "09:05");
/// assert!(arrival > "08:10".parse().unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime(u32);

impl ClockTime {
    /// Builds a time from hour and minute, returning `None` when out of range.
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        (hour < HOURS_PER_DAY && minute < MINUTES_PER_HOUR)
            .then(|| Self(hour * MINUTES_PER_HOUR + minute))
    }

    /// Builds a time for compile-time constants. Callers guarantee the range.
    pub(crate) const fn at(hour: u32, minute: u32) -> Self {
        Self(hour * MINUTES_PER_HOUR + minute)
    }

    /// Truncates a wall-clock time to the minute.
    pub fn from_naive(time: NaiveTime) -> Self {
        Self(time.hour() * MINUTES_PER_HOUR + time.minute())
    }

    /// Minutes since midnight.
    pub fn minutes(self) -> u32 {
        self.0
    }

    /// The hour component (0-23).
    pub fn hour(self) -> u32 {
        self.0 / MINUTES_PER_HOUR
    }

    /// The minute component (0-59).
    pub fn minute(self) -> u32 {
        self.0 % MINUTES_PER_HOUR
    }
}

impl FromStr for ClockTime {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        to_minutes(s).map(Self)
    }
}

impl TryFrom<String> for ClockTime {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ClockTime> for String {
    fn from(time: ClockTime) -> Self {
        time.to_string()
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// Whether a time field of a day record holds a usable time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeMark {
    /// A time was recorded and parsed.
    Present(ClockTime),
    /// Nothing usable was recorded.
    Missing,
}

impl TimeMark {
    /// Converts a raw store field into a mark.
    ///
    /// `None`, empty and whitespace-only values are `Missing`. Anything else
    /// must parse as a time.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidTimeFormat`] when a non-empty value does
    /// not parse. Callers evaluating attendance treat that as `Missing`.
    ///
    /// # Example
    ///
    /// ```
    /// use attendance_engine::models::{ClockTime, TimeMark};
    ///
    /// assert_eq!(TimeMark::from_raw(None).unwrap(), TimeMark::Missing);
    /// assert_eq!(TimeMark::from_raw(Some("  ")).unwrap(), TimeMark::Missing);
    /// assert_eq!(
    ///     TimeMark::from_raw(Some("21:15")).unwrap(),
    ///     TimeMark::Present(ClockTime::from_hm(21, 15).unwrap())
    /// );
    /// assert!(TimeMark::from_raw(Some("late")).is_err());
    /// ```
    pub fn from_raw(raw: Option<&str>) -> EngineResult<Self> {
        match raw.map(str::trim) {
            None | Some("") => Ok(Self::Missing),
            Some(value) => value.parse().map(Self::Present),
        }
    }

    /// Returns the recorded time, if any.
    pub fn time(self) -> Option<ClockTime> {
        match self {
            Self::Present(time) => Some(time),
            Self::Missing => None,
        }
    }

    /// Returns true if a time is present.
    pub fn is_present(self) -> bool {
        matches!(self, Self::Present(_))
    }
}

impl From<Option<ClockTime>> for TimeMark {
    fn from(time: Option<ClockTime>) -> Self {
        time.map_or(Self::Missing, Self::Present)
    }
}
