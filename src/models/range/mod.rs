// Date range module
// Half-open window of dates a view displays

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Half-open `[start, end)` range of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date < self.end
    }

    /// Number of days in the range
    pub fn len(&self) -> usize {
        (self.end - self.start).num_days().max(0) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Last date inside the range
    pub fn last_day(&self) -> NaiveDate {
        self.end.pred_opt().unwrap_or(self.end)
    }

    /// Does the inclusive date span `[first, last]` touch this range?
    pub fn intersects(&self, first: NaiveDate, last: NaiveDate) -> bool {
        first < self.end && last >= self.start
    }

    /// Every date of the range in ascending order
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        (0..self.len() as i64).map(move |offset| self.start + Duration::days(offset))
    }
}
