//! Month grid: per-week fragments of events and per-day overflow.

use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;

use crate::models::event::{EventFragments, EventId};
use crate::models::layout::{EventRef, MonthGridDay, MonthGridLayout, MonthGridWeek};
use crate::models::range::DateRange;
use crate::services::grid::{events_in_range, EventPredicate};
use crate::services::position::date_grid::{cells_per_day, pack_rows};

/// Lay out every event of `range` as week-row bars.
///
/// The range is cut into displayed weeks of seven days. Each week is packed
/// independently; an event crossing a week boundary gets one fragment per
/// week, starting at `max(event start, week start)`. Days whose occupied rows
/// exceed `n_events_per_day` show the first rows and count the rest as
/// overflow.
pub fn position_in_month_grid(
    events: &[EventRef],
    range: &DateRange,
    pivot: NaiveDate,
    n_events_per_day: usize,
    exclude: Option<EventPredicate<'_>>,
) -> MonthGridLayout {
    let dates: Vec<NaiveDate> = range.days().collect();
    let mut weeks = Vec::with_capacity(dates.len() / 7 + 1);
    let mut event_fragments: BTreeMap<EventId, EventFragments> = BTreeMap::new();

    for week_dates in dates.chunks(7) {
        let (week_first, week_last) = match (week_dates.first(), week_dates.last()) {
            (Some(first), Some(last)) => (*first, *last),
            _ => continue,
        };
        let week_range = DateRange::new(week_first, week_last + chrono::Duration::days(1));
        let week_events = events_in_range(events, &week_range, exclude);
        let placements = pack_rows(&week_events, week_first, week_last);

        for placement in &placements {
            event_fragments
                .entry(placement.event.id.clone())
                .or_default()
                .insert(placement.first, placement.n_days_in_grid());
        }

        let days = week_dates
            .iter()
            .zip(cells_per_day(&placements, week_dates))
            .map(|(date, mut cells)| {
                let more_events = cells.len().saturating_sub(n_events_per_day);
                cells.truncate(n_events_per_day);
                MonthGridDay {
                    date: *date,
                    in_month: date.year() == pivot.year() && date.month() == pivot.month(),
                    events: cells,
                    more_events,
                }
            })
            .collect();

        weeks.push(MonthGridWeek { days });
    }

    log::debug!(
        "Month grid for {} laid out {} weeks with {} events",
        pivot.format("%Y-%m"),
        weeks.len(),
        event_fragments.len()
    );

    MonthGridLayout {
        weeks,
        event_fragments,
    }
}
