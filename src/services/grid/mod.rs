//! Grid builder.
//!
//! Turns the classified events and the active range into an ordered sequence
//! of days, each with a date-grid bucket (bars) and a time-grid bucket (timed
//! events). Buckets hold shared references, so an event spanning several days
//! is one allocation seen from each of them.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use std::cmp::Ordering;

use crate::models::event::CalendarEventInternal;
use crate::models::layout::EventRef;
use crate::models::range::DateRange;
use crate::models::settings::CalendarConfig;
use crate::utils::date::{add_days, minutes_from_time_points};

/// Borrowed predicate over classified events. Used as the caller's filter and
/// to leave an event out of static layout while it is being dragged.
pub type EventPredicate<'a> = &'a dyn Fn(&CalendarEventInternal) -> bool;

/// The visible part of one day in the time grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl TimeWindow {
    /// Window of `date` for the configured day boundaries. Hybrid days end on
    /// the following calendar date.
    pub fn for_date(date: NaiveDate, config: &CalendarConfig) -> Self {
        let midnight = date.and_time(NaiveTime::MIN);
        let (start_points, end_points) = match config.day_boundaries_internal() {
            Ok(b) => (b.start, b.end),
            Err(_) => (0, 2400),
        };

        let start = midnight + Duration::minutes(minutes_from_time_points(start_points));
        let mut end = midnight + Duration::minutes(minutes_from_time_points(end_points));
        if end <= start {
            end += Duration::days(1);
        }

        Self { start, end }
    }

    /// Does `[start, end)` share time with this window? Zero-length events
    /// count when their instant lies inside the window.
    pub fn intersects(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        if start == end {
            return self.start <= start && start < self.end;
        }
        start < self.end && end > self.start
    }

    pub fn contains(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        self.start <= start && end <= self.end
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridDay {
    pub date: NaiveDate,
    pub window: TimeWindow,
    /// Full-day, multi-day and hybrid events, in layout order
    pub date_grid_events: Vec<EventRef>,
    /// Timed events intersecting the window, in layout order
    pub time_grid_events: Vec<EventRef>,
}

fn is_excluded(exclude: Option<EventPredicate<'_>>, event: &CalendarEventInternal) -> bool {
    exclude.map_or(false, |predicate| predicate(event))
}

/// Start ascending, longer events first, then identity
pub fn sort_events_by_start_and_end(a: &EventRef, b: &EventRef) -> Ordering {
    a.layout_order(b)
}

/// Does this event belong in the time grid?
///
/// Single-day timed events always do. With hybrid day boundaries a multi-day
/// timed event that fits inside one day's window (say 22:00 to 02:00 on an
/// 18:00-06:00 day) is shown there as well. Only the windows of the start date
/// and the day before can hold the start, and the decision ignores the
/// displayed range so the event looks the same from every week.
pub fn routes_to_time_grid(event: &CalendarEventInternal, config: &CalendarConfig) -> bool {
    if event.shape.is_time_grid() {
        return true;
    }
    if !(config.is_hybrid_day() && event.shape.is_multi_day_timed()) {
        return false;
    }

    let start_date = event.start_date();
    [add_days(start_date, -1), Some(start_date)]
        .into_iter()
        .flatten()
        .map(|date| TimeWindow::for_date(date, config))
        .any(|window| window.contains(event.start_instant(), event.end_instant()))
}

/// Build the ordered day sequence for `range`.
pub fn build_grid(
    events: &[EventRef],
    range: &DateRange,
    config: &CalendarConfig,
    exclude: Option<EventPredicate<'_>>,
) -> Vec<GridDay> {
    let mut days: Vec<GridDay> = range
        .days()
        .map(|date| GridDay {
            date,
            window: TimeWindow::for_date(date, config),
            date_grid_events: Vec::new(),
            time_grid_events: Vec::new(),
        })
        .collect();

    for event in events {
        if is_excluded(exclude, event) {
            log::debug!("Event {} excluded from static layout", event.id);
            continue;
        }

        if routes_to_time_grid(event, config) {
            for day in days.iter_mut() {
                if day.window.intersects(event.start_instant(), event.end_instant()) {
                    day.time_grid_events.push(EventRef::clone(event));
                }
            }
            continue;
        }

        if !range.intersects(event.start_date(), event.end_date()) {
            continue;
        }
        let first = event.start_date().max(range.start);
        let last = event.end_date().min(range.last_day());
        let first_index = (first - range.start).num_days() as usize;
        let last_index = (last - range.start).num_days() as usize;
        for day in &mut days[first_index..=last_index] {
            day.date_grid_events.push(EventRef::clone(event));
        }
    }

    for day in days.iter_mut() {
        day.date_grid_events.sort_by(sort_events_by_start_and_end);
        day.time_grid_events.sort_by(sort_events_by_start_and_end);
    }

    days
}

/// Events whose inclusive date span touches `range`, in layout order.
pub fn events_in_range(
    events: &[EventRef],
    range: &DateRange,
    exclude: Option<EventPredicate<'_>>,
) -> Vec<EventRef> {
    let mut selected: Vec<EventRef> = events
        .iter()
        .filter(|event| range.intersects(event.start_date(), event.end_date()))
        .filter(|event| !is_excluded(exclude, event))
        .cloned()
        .collect();
    selected.sort_by(sort_events_by_start_and_end);
    selected
}
