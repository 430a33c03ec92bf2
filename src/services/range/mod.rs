//! Range resolution and view definitions.
//!
//! A view turns a pivot date into the half-open [`DateRange`] it displays and
//! knows how far the backward/forward buttons move that pivot.

use chrono::{Datelike, NaiveDate};
use std::fmt;
use std::sync::Arc;

use crate::error::{LayoutError, Result};
use crate::models::range::DateRange;
use crate::models::settings::CalendarConfig;
use crate::models::ui::{Direction, LayoutKind, Navigation, NavigationUnit, ViewType};
use crate::services::time_units::TimeUnits;
use crate::utils::date::{add_days, add_months, to_date_string};

/// Maps a pivot date to the range a view displays.
pub trait RangeResolver: Send + Sync {
    fn resolve(
        &self,
        date: NaiveDate,
        time_units: &TimeUnits,
        config: &CalendarConfig,
    ) -> Result<DateRange>;
}

impl<F> RangeResolver for F
where
    F: Fn(NaiveDate, &TimeUnits, &CalendarConfig) -> Result<DateRange> + Send + Sync,
{
    fn resolve(
        &self,
        date: NaiveDate,
        time_units: &TimeUnits,
        config: &CalendarConfig,
    ) -> Result<DateRange> {
        self(date, time_units, config)
    }
}

fn shifted(date: NaiveDate, n_days: i64) -> Result<NaiveDate> {
    add_days(date, n_days).ok_or_else(|| LayoutError::InvalidPivotDate(to_date_string(date)))
}

/// `[date, date + 1)`
pub fn set_range_for_day(
    date: NaiveDate,
    _time_units: &TimeUnits,
    _config: &CalendarConfig,
) -> Result<DateRange> {
    Ok(DateRange::new(date, shifted(date, 1)?))
}

/// The first `week_options.n_days` days of the week containing `date`
pub fn set_range_for_week(
    date: NaiveDate,
    time_units: &TimeUnits,
    config: &CalendarConfig,
) -> Result<DateRange> {
    let start = time_units.week_start(date);
    let n_days = config.week_options.n_days.clamp(1, 7) as i64;
    Ok(DateRange::new(start, shifted(start, n_days)?))
}

/// Every displayed week that holds a day of the month containing `date`
pub fn set_range_for_month(
    date: NaiveDate,
    time_units: &TimeUnits,
    _config: &CalendarConfig,
) -> Result<DateRange> {
    let weeks = time_units.get_month_with_trailing_and_leading_days(date.year(), date.month())?;
    let first = weeks
        .first()
        .and_then(|week| week.first())
        .copied()
        .ok_or_else(|| LayoutError::InvalidPivotDate(to_date_string(date)))?;
    let last = weeks
        .last()
        .and_then(|week| week.last())
        .copied()
        .ok_or_else(|| LayoutError::InvalidPivotDate(to_date_string(date)))?;

    Ok(DateRange::new(first, shifted(last, 1)?))
}

/// A named view: range resolver, positioning algorithm and navigation step.
#[derive(Clone)]
pub struct View {
    pub name: String,
    pub layout_kind: LayoutKind,
    pub navigation: Navigation,
    resolver: Arc<dyn RangeResolver>,
}

impl View {
    pub fn builtin(view_type: ViewType) -> Self {
        let resolver: Arc<dyn RangeResolver> = match view_type {
            ViewType::Day => Arc::new(set_range_for_day),
            ViewType::Week => Arc::new(set_range_for_week),
            ViewType::MonthGrid | ViewType::MonthAgenda => Arc::new(set_range_for_month),
        };

        Self {
            name: view_type.name().to_string(),
            layout_kind: view_type.layout_kind(),
            navigation: view_type.navigation(),
            resolver,
        }
    }

    /// A view backed by a caller supplied resolver
    pub fn custom(
        name: impl Into<String>,
        layout_kind: LayoutKind,
        navigation: Navigation,
        resolver: impl RangeResolver + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            layout_kind,
            navigation,
            resolver: Arc::new(resolver),
        }
    }

    pub fn resolve_range(
        &self,
        date: NaiveDate,
        time_units: &TimeUnits,
        config: &CalendarConfig,
    ) -> Result<DateRange> {
        let range = self.resolver.resolve(date, time_units, config)?;
        if range.is_empty() {
            return Err(LayoutError::InvalidPivotDate(to_date_string(date)));
        }
        Ok(range)
    }

    /// Pivot date after pressing backward or forward
    pub fn step(&self, date: NaiveDate, direction: Direction) -> Result<NaiveDate> {
        let amount = match direction {
            Direction::Forwards => self.navigation.amount,
            Direction::Backwards => -self.navigation.amount,
        };

        let stepped = match self.navigation.unit {
            NavigationUnit::Days => add_days(date, amount as i64),
            NavigationUnit::Months => add_months(date, amount),
        };
        stepped.ok_or_else(|| LayoutError::InvalidPivotDate(to_date_string(date)))
    }
}

impl fmt::Debug for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("View")
            .field("name", &self.name)
            .field("layout_kind", &self.layout_kind)
            .field("navigation", &self.navigation)
            .finish_non_exhaustive()
    }
}

/// The four built-in views in their default order
pub fn default_views() -> Vec<View> {
    ViewType::ALL.into_iter().map(View::builtin).collect()
}
