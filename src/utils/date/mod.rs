// Date utility functions
// Parsing and arithmetic for calendar-local date and date-time strings

use chrono::{Datelike, Duration, Months, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::{LayoutError, Result};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Number of time points in a full day. One hour equals 100 points.
pub const TIME_POINTS_PER_FULL_DAY: u32 = 2400;

/// A calendar-local point in time as written in event input.
///
/// `YYYY-MM-DD` parses to [`CalendarDateTime::Date`] and
/// `YYYY-MM-DD HH:mm` to [`CalendarDateTime::DateTime`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CalendarDateTime {
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl CalendarDateTime {
    pub fn parse(value: &str) -> Result<Self> {
        let trimmed = value.trim();
        let parse_error = || LayoutError::Parse {
            value: value.to_string(),
        };

        match trimmed.len() {
            10 => NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
                .map(CalendarDateTime::Date)
                .map_err(|_| parse_error()),
            16 => NaiveDateTime::parse_from_str(trimmed, DATE_TIME_FORMAT)
                .map(CalendarDateTime::DateTime)
                .map_err(|_| parse_error()),
            _ => Err(parse_error()),
        }
    }

    pub fn date(&self) -> NaiveDate {
        match self {
            CalendarDateTime::Date(date) => *date,
            CalendarDateTime::DateTime(date_time) => date_time.date(),
        }
    }

    pub fn is_date_only(&self) -> bool {
        matches!(self, CalendarDateTime::Date(_))
    }

    /// Instant this value denotes when used as an interval start.
    /// A bare date starts at midnight.
    pub fn as_start(&self) -> NaiveDateTime {
        match self {
            CalendarDateTime::Date(date) => date.and_time(NaiveTime::MIN),
            CalendarDateTime::DateTime(date_time) => *date_time,
        }
    }

    /// Instant this value denotes when used as an interval end.
    /// A bare date covers the whole day, so it ends at the following midnight.
    pub fn as_end(&self) -> NaiveDateTime {
        match self {
            CalendarDateTime::Date(date) => start_of_next_day(*date),
            CalendarDateTime::DateTime(date_time) => *date_time,
        }
    }
}

impl FromStr for CalendarDateTime {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self> {
        CalendarDateTime::parse(s)
    }
}

impl fmt::Display for CalendarDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalendarDateTime::Date(date) => write!(f, "{}", date.format(DATE_FORMAT)),
            CalendarDateTime::DateTime(date_time) => {
                write!(f, "{}", date_time.format(DATE_TIME_FORMAT))
            }
        }
    }
}

impl Serialize for CalendarDateTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CalendarDateTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        CalendarDateTime::parse(&raw).map_err(serde::de::Error::custom)
    }
}

pub fn to_date_string(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| LayoutError::Parse {
        value: value.to_string(),
    })
}

pub fn start_of_next_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN) + Duration::days(1)
}

pub fn add_days(to: NaiveDate, n_days: i64) -> Option<NaiveDate> {
    to.checked_add_signed(Duration::days(n_days))
}

/// Shift by whole months, clamping the day to the end of shorter months.
pub fn add_months(to: NaiveDate, n_months: i32) -> Option<NaiveDate> {
    let months = Months::new(n_months.unsigned_abs());
    if n_months >= 0 {
        to.checked_add_months(months)
    } else {
        to.checked_sub_months(months)
    }
}

/// Calculate the start of the week containing the given date.
///
/// # Arguments
/// * `date` - The date to find the week start for
/// * `first_day_of_week` - 0 = Sunday, 1 = Monday, etc.
pub fn get_week_start(date: NaiveDate, first_day_of_week: u8) -> NaiveDate {
    let weekday = date.weekday().num_days_from_sunday() as i64;
    let offset = (weekday - first_day_of_week as i64 + 7) % 7;
    date - Duration::days(offset)
}

pub fn first_day_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    add_months(first_day_of_month(date), 1)
        .and_then(|next| next.pred_opt())
        .unwrap_or(date)
}

/// Inclusive number of calendar days from `start` to `end`.
pub fn days_inclusive(start: NaiveDate, end: NaiveDate) -> u32 {
    ((end - start).num_days() + 1).max(0) as u32
}

/// Convert `HH:mm` into time points (`08:30` -> 850). `24:00` is accepted.
pub fn time_points_from_string(value: &str) -> Result<u32> {
    let parse_error = || LayoutError::Parse {
        value: value.to_string(),
    };
    let (hours, minutes) = value.trim().split_once(':').ok_or_else(parse_error)?;
    let hours: u32 = hours.parse().map_err(|_| parse_error())?;
    let minutes: u32 = minutes.parse().map_err(|_| parse_error())?;

    if minutes >= 60 || hours > 24 || (hours == 24 && minutes > 0) {
        return Err(parse_error());
    }

    Ok(hours * 100 + minutes * 100 / 60)
}

/// Minutes since midnight represented by a number of time points.
pub fn minutes_from_time_points(points: u32) -> i64 {
    (points as i64 / 100) * 60 + ((points as i64 % 100) * 60 + 50) / 100
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_date_only() {
        let parsed = CalendarDateTime::parse("2024-03-05").unwrap();
        assert_eq!(parsed, CalendarDateTime::Date(date(2024, 3, 5)));
        assert!(parsed.is_date_only());
    }

    #[test]
    fn test_parse_date_time() {
        let parsed = CalendarDateTime::parse("2024-03-05 14:30").unwrap();
        assert_eq!(parsed.date(), date(2024, 3, 5));
        assert!(!parsed.is_date_only());
        assert_eq!(parsed.to_string(), "2024-03-05 14:30");
    }

    #[test_case("2024-13-01" ; "month out of range")]
    #[test_case("2024-02-30" ; "day out of range")]
    #[test_case("2024-03-05 25:00" ; "hour out of range")]
    #[test_case("2024-03-05T10:00" ; "iso separator")]
    #[test_case("" ; "empty")]
    #[test_case("yesterday" ; "free text")]
    fn test_parse_rejects_malformed(value: &str) {
        assert_eq!(
            CalendarDateTime::parse(value),
            Err(LayoutError::Parse {
                value: value.to_string()
            })
        );
    }

    #[test]
    fn test_date_only_end_covers_whole_day() {
        let parsed = CalendarDateTime::parse("2024-03-05").unwrap();
        assert_eq!(parsed.as_start(), date(2024, 3, 5).and_hms_opt(0, 0, 0).unwrap());
        assert_eq!(parsed.as_end(), date(2024, 3, 6).and_hms_opt(0, 0, 0).unwrap());
    }

    #[test]
    fn test_get_week_start_sunday() {
        // Wednesday 2024-03-06
        assert_eq!(get_week_start(date(2024, 3, 6), 0), date(2024, 3, 3));
    }

    #[test]
    fn test_get_week_start_monday() {
        assert_eq!(get_week_start(date(2024, 3, 6), 1), date(2024, 3, 4));
        // A Sunday belongs to the week that started the previous Monday
        assert_eq!(get_week_start(date(2024, 3, 10), 1), date(2024, 3, 4));
    }

    #[test]
    fn test_add_months_clamps_day() {
        assert_eq!(add_months(date(2024, 1, 31), 1), Some(date(2024, 2, 29)));
        assert_eq!(add_months(date(2024, 3, 31), -1), Some(date(2024, 2, 29)));
    }

    #[test]
    fn test_month_boundaries() {
        assert_eq!(first_day_of_month(date(2023, 2, 14)), date(2023, 2, 1));
        assert_eq!(last_day_of_month(date(2023, 2, 14)), date(2023, 2, 28));
        assert_eq!(last_day_of_month(date(2023, 12, 3)), date(2023, 12, 31));
    }

    #[test]
    fn test_days_inclusive() {
        assert_eq!(days_inclusive(date(2024, 1, 1), date(2024, 1, 1)), 1);
        assert_eq!(days_inclusive(date(2024, 1, 30), date(2024, 2, 2)), 4);
        assert_eq!(days_inclusive(date(2024, 1, 3), date(2024, 1, 1)), 0);
    }

    #[test_case("00:00", 0)]
    #[test_case("08:30", 850)]
    #[test_case("17:45", 1775)]
    #[test_case("24:00", 2400)]
    fn test_time_points_from_string(value: &str, expected: u32) {
        assert_eq!(time_points_from_string(value).unwrap(), expected);
    }

    #[test]
    fn test_time_points_rejects_invalid() {
        assert!(time_points_from_string("24:30").is_err());
        assert!(time_points_from_string("12:60").is_err());
        assert!(time_points_from_string("noon").is_err());
    }

    #[test]
    fn test_minutes_round_trip_through_time_points() {
        assert_eq!(minutes_from_time_points(850), 510);
        assert_eq!(minutes_from_time_points(1775), 17 * 60 + 45);
        assert_eq!(minutes_from_time_points(2400), 24 * 60);
    }
}
