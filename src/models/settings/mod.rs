// Settings module
// Layout configuration shared by every view

use serde::{Deserialize, Serialize};

use crate::utils::date::{time_points_from_string, TIME_POINTS_PER_FULL_DAY};

/// Visible part of a day as `HH:mm` strings.
///
/// When `end` is not after `start` the day crosses midnight (a hybrid day),
/// e.g. `18:00` to `06:00`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayBoundaries {
    pub start: String,
    pub end: String,
}

impl Default for DayBoundaries {
    fn default() -> Self {
        Self {
            start: "00:00".to_string(),
            end: "24:00".to_string(),
        }
    }
}

/// Day boundaries converted to time points (one hour = 100 points)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayBoundariesInternal {
    pub start: u32,
    pub end: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeekOptions {
    /// Height of the time grid in pixels
    pub grid_height: f64,
    /// Number of days shown by the week view, counted from the first day of week
    pub n_days: u32,
    /// Share of the day column (in percent) that timed events may fill
    pub event_width: f64,
}

impl Default for WeekOptions {
    fn default() -> Self {
        Self {
            grid_height: 1600.0,
            n_days: 7,
            event_width: 100.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonthGridOptions {
    /// Events rendered per day before the rest collapse into "+N more"
    pub n_events_per_day: usize,
}

impl Default for MonthGridOptions {
    fn default() -> Self {
        Self { n_events_per_day: 4 }
    }
}

/// Configuration read by every layout pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarConfig {
    /// 0 = Sunday, 1 = Monday, ... 6 = Saturday
    pub first_day_of_week: u8,
    /// View shown when no other view has been selected
    pub default_view: String,
    pub day_boundaries: DayBoundaries,
    pub week_options: WeekOptions,
    pub month_grid_options: MonthGridOptions,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            first_day_of_week: 1, // Monday
            default_view: "week".to_string(),
            day_boundaries: DayBoundaries::default(),
            week_options: WeekOptions::default(),
            month_grid_options: MonthGridOptions::default(),
        }
    }
}

impl CalendarConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.first_day_of_week > 6 {
            return Err("First day of week must be between 0 (Sunday) and 6 (Saturday)".to_string());
        }

        let boundaries = self.day_boundaries_internal()?;
        if boundaries.start == TIME_POINTS_PER_FULL_DAY {
            return Err("Day cannot start at 24:00".to_string());
        }

        if !(self.week_options.grid_height > 0.0) {
            return Err("Grid height must be positive".to_string());
        }

        if !(1..=7).contains(&self.week_options.n_days) {
            return Err("Week view must show between 1 and 7 days".to_string());
        }

        if !(self.week_options.event_width > 0.0 && self.week_options.event_width <= 100.0) {
            return Err("Event width must be within (0, 100] percent".to_string());
        }

        if self.default_view.trim().is_empty() {
            return Err("Default view cannot be empty".to_string());
        }

        Ok(())
    }

    pub fn day_boundaries_internal(&self) -> Result<DayBoundariesInternal, String> {
        let start = time_points_from_string(&self.day_boundaries.start).map_err(|e| e.to_string())?;
        let end = time_points_from_string(&self.day_boundaries.end).map_err(|e| e.to_string())?;
        Ok(DayBoundariesInternal { start, end })
    }

    /// A hybrid day runs past midnight into the following calendar date
    pub fn is_hybrid_day(&self) -> bool {
        self.day_boundaries_internal()
            .map(|b| b.end <= b.start)
            .unwrap_or(false)
    }

    /// Number of time points between the visible start and end of a day
    pub fn time_points_per_day(&self) -> u32 {
        match self.day_boundaries_internal() {
            Ok(b) if b.end <= b.start => TIME_POINTS_PER_FULL_DAY - b.start + b.end,
            Ok(b) => b.end - b.start,
            Err(_) => TIME_POINTS_PER_FULL_DAY,
        }
    }
}
