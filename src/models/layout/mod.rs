//! Positioned layout output.
//!
//! Everything here is plain data produced by a layout pass and read by
//! renderers. A snapshot is never modified after it has been built.

use chrono::NaiveDate;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt::Display;
use std::sync::Arc;

use crate::error::LayoutError;
use crate::models::event::{CalendarEventInternal, EventFragments, EventId};
use crate::models::range::DateRange;

/// Shared handle to a classified event. Every placement of the same event
/// points at the same allocation.
pub type EventRef = Arc<CalendarEventInternal>;

/// A timed event placed in one day column of the time grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeGridEvent {
    pub event: EventRef,
    /// Column index inside the overlap cluster
    pub previous_concurrent_events: usize,
    /// Number of columns the cluster is split into
    pub total_concurrent_events: usize,
    /// Offset from the top of the day column, in pixels
    pub top: f64,
    /// Height in pixels
    pub height: f64,
    /// Horizontal offset in percent of the day column
    pub left: f64,
    /// Width in percent of the day column
    pub width: f64,
}

/// One cell of a bar in the date grid (or a month grid week row).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateGridEvent {
    pub event: EventRef,
    pub row: usize,
    /// Length of the bar in days, clipped to the displayed week
    pub n_days_in_grid: u32,
    /// False on the first displayed day of the bar, true on the days it covers after that
    pub is_continuation: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Day {
    pub date: NaiveDate,
    /// Sorted by row
    pub date_grid_events: Vec<DateGridEvent>,
    /// Sorted by start, then column
    pub time_grid_events: Vec<TimeGridEvent>,
}

/// Day and week views: date grid bars above a time grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekLayout {
    pub days: Vec<Day>,
    /// Rows the date grid needs to show every bar
    pub date_grid_rows: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthGridDay {
    pub date: NaiveDate,
    /// False for the leading and trailing days borrowed from adjacent months
    pub in_month: bool,
    /// Rendered cells, at most `n_events_per_day`
    pub events: Vec<DateGridEvent>,
    /// Events on this day that did not fit; rendered as a single "+N" indicator
    pub more_events: usize,
}

impl MonthGridDay {
    pub fn total_events(&self) -> usize {
        self.events.len() + self.more_events
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthGridWeek {
    pub days: Vec<MonthGridDay>,
}

impl MonthGridWeek {
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.days.last().map(|day| day.date)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthGridLayout {
    pub weeks: Vec<MonthGridWeek>,
    /// Week fragments of every event placed in the grid
    pub event_fragments: BTreeMap<EventId, EventFragments>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgendaDay {
    pub date: NaiveDate,
    pub in_month: bool,
    pub events: Vec<EventRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthAgendaLayout {
    pub weeks: Vec<Vec<AgendaDay>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ViewLayout {
    TimeGrid(WeekLayout),
    MonthGrid(MonthGridLayout),
    MonthAgenda(MonthAgendaLayout),
}

/// An event left out of a layout pass, and why.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectedEvent {
    pub id: EventId,
    #[serde(serialize_with = "serialize_display")]
    pub error: LayoutError,
}

/// Result of one complete layout pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutSnapshot {
    pub view: String,
    pub range: DateRange,
    pub layout: ViewLayout,
    pub rejected: Vec<RejectedEvent>,
}

fn serialize_display<T: Display, S: Serializer>(value: &T, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}
