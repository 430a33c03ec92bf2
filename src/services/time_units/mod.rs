//! Calendar math that depends on the configured first day of week.

use chrono::{Duration, NaiveDate};

use crate::error::{LayoutError, Result};
use crate::models::settings::CalendarConfig;
use crate::utils::date::{get_week_start, last_day_of_month};

/// Enumerates days, weeks and months aligned to a first day of week.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeUnits {
    first_day_of_week: u8,
}

impl TimeUnits {
    /// `first_day_of_week`: 0 = Sunday, 1 = Monday, etc.
    pub fn new(first_day_of_week: u8) -> Self {
        Self {
            first_day_of_week: first_day_of_week % 7,
        }
    }

    pub fn from_config(config: &CalendarConfig) -> Self {
        Self::new(config.first_day_of_week)
    }

    pub fn first_day_of_week(&self) -> u8 {
        self.first_day_of_week
    }

    pub fn week_start(&self, date: NaiveDate) -> NaiveDate {
        get_week_start(date, self.first_day_of_week)
    }

    /// The seven dates of the week containing `date`
    pub fn get_week_for(&self, date: NaiveDate) -> Vec<NaiveDate> {
        let start = self.week_start(date);
        (0..7).map(|offset| start + Duration::days(offset)).collect()
    }

    /// Every displayed week of a month grid, including the leading days of the
    /// previous month and the trailing days of the next one.
    ///
    /// `month` is 1-based.
    pub fn get_month_with_trailing_and_leading_days(
        &self,
        year: i32,
        month: u32,
    ) -> Result<Vec<Vec<NaiveDate>>> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| LayoutError::InvalidPivotDate(format!("{:04}-{:02}", year, month)))?;
        let last = last_day_of_month(first);

        let mut weeks = Vec::new();
        let mut week_start = self.week_start(first);
        while week_start <= last {
            weeks.push(self.get_week_for(week_start));
            week_start += Duration::days(7);
        }

        Ok(weeks)
    }

    /// First day of each month of `year`
    pub fn get_months_for(&self, year: i32) -> Vec<NaiveDate> {
        (1..=12)
            .filter_map(|month| NaiveDate::from_ymd_opt(year, month, 1))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Weekday};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_week_for_sunday_start() {
        let units = TimeUnits::new(0);
        let week = units.get_week_for(date(2024, 5, 8));
        assert_eq!(week.len(), 7);
        assert_eq!(week[0], date(2024, 5, 5));
        assert_eq!(week[0].weekday(), Weekday::Sun);
        assert_eq!(week[6], date(2024, 5, 11));
    }

    #[test]
    fn test_week_for_monday_start() {
        let units = TimeUnits::new(1);
        let week = units.get_week_for(date(2024, 5, 5));
        assert_eq!(week[0], date(2024, 4, 29));
        assert_eq!(week[6], date(2024, 5, 5));
    }

    #[test]
    fn test_month_with_leading_and_trailing_days() {
        // February 2024 starts on a Thursday and ends on a Thursday
        let units = TimeUnits::new(1);
        let weeks = units.get_month_with_trailing_and_leading_days(2024, 2).unwrap();

        assert_eq!(weeks.len(), 5);
        assert_eq!(weeks[0][0], date(2024, 1, 29));
        assert_eq!(weeks[4][6], date(2024, 3, 3));
        assert!(weeks.iter().all(|week| week.len() == 7));
    }

    #[test]
    fn test_month_weeks_are_gap_free() {
        let units = TimeUnits::new(0);
        let weeks = units.get_month_with_trailing_and_leading_days(2023, 12).unwrap();
        let days: Vec<_> = weeks.iter().flatten().copied().collect();

        for pair in days.windows(2) {
            assert_eq!(pair[1] - pair[0], Duration::days(1));
        }
        assert!(days.contains(&date(2023, 12, 1)));
        assert!(days.contains(&date(2023, 12, 31)));
    }

    #[test]
    fn test_month_that_fills_exactly_four_weeks() {
        // February 2015 runs Sunday 1st through Saturday 28th
        let units = TimeUnits::new(0);
        let weeks = units.get_month_with_trailing_and_leading_days(2015, 2).unwrap();
        assert_eq!(weeks.len(), 4);
    }

    #[test]
    fn test_invalid_month() {
        let units = TimeUnits::new(0);
        assert!(units.get_month_with_trailing_and_leading_days(2024, 13).is_err());
    }

    #[test]
    fn test_months_for_year() {
        let months = TimeUnits::new(0).get_months_for(2024);
        assert_eq!(months.len(), 12);
        assert_eq!(months[0], date(2024, 1, 1));
        assert_eq!(months[11], date(2024, 12, 1));
    }
}
