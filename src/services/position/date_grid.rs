//! Row packing for full-day and multi-day bars across one displayed week.

use chrono::{Duration, NaiveDate};
use std::sync::Arc;

use crate::models::layout::{DateGridEvent, EventRef};
use crate::utils::date::days_inclusive;

/// Where one event's bar landed within a week.
#[derive(Debug, Clone, PartialEq)]
pub struct RowPlacement {
    pub event: EventRef,
    pub row: usize,
    /// First displayed date of the bar
    pub first: NaiveDate,
    /// Last displayed date of the bar
    pub last: NaiveDate,
}

impl RowPlacement {
    pub fn n_days_in_grid(&self) -> u32 {
        days_inclusive(self.first, self.last)
    }

    /// Cell of this bar on `date`, if the bar covers it
    pub fn cell_on(&self, date: NaiveDate) -> Option<DateGridEvent> {
        (self.first <= date && date <= self.last).then(|| DateGridEvent {
            event: EventRef::clone(&self.event),
            row: self.row,
            n_days_in_grid: self.n_days_in_grid(),
            is_continuation: date != self.first,
        })
    }
}

/// Greedy row packing over `events` in the given order.
///
/// Each row remembers the day after its latest bar ends. An event goes into
/// the lowest row that is free again by its (clipped) first day, otherwise a
/// new row opens. Events are expected in layout order (start ascending, longer
/// first); the packing is stable for that order but not a globally minimal
/// colouring.
pub fn pack_rows(events: &[EventRef], week_first: NaiveDate, week_last: NaiveDate) -> Vec<RowPlacement> {
    let mut row_free_from: Vec<NaiveDate> = Vec::new();
    let mut placements: Vec<RowPlacement> = Vec::with_capacity(events.len());

    for event in events {
        if placements.iter().any(|placed| Arc::ptr_eq(&placed.event, event)) {
            continue;
        }
        if event.end_date() < week_first || event.start_date() > week_last {
            continue;
        }

        let first = event.start_date().max(week_first);
        let last = event.end_date().min(week_last);
        let next_free = last + Duration::days(1);

        let row = match row_free_from.iter().position(|free_from| *free_from <= first) {
            Some(row) => {
                row_free_from[row] = next_free;
                row
            }
            None => {
                row_free_from.push(next_free);
                row_free_from.len() - 1
            }
        };

        placements.push(RowPlacement {
            event: EventRef::clone(event),
            row,
            first,
            last,
        });
    }

    placements
}

/// Number of rows used by a packing
pub fn row_count(placements: &[RowPlacement]) -> usize {
    placements.iter().map(|p| p.row + 1).max().unwrap_or(0)
}

/// Cells for each date of `dates`, sorted by row.
pub fn cells_per_day(placements: &[RowPlacement], dates: &[NaiveDate]) -> Vec<Vec<DateGridEvent>> {
    dates
        .iter()
        .map(|date| {
            let mut cells: Vec<DateGridEvent> =
                placements.iter().filter_map(|p| p.cell_on(*date)).collect();
            cells.sort_by_key(|cell| cell.row);
            cells
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::event::CalendarEvent;
    use crate::services::classifier::external_event_to_internal;
    use crate::services::grid::sort_events_by_start_and_end;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn event(id: i64, start: &str, end: &str) -> EventRef {
        Arc::new(external_event_to_internal(&CalendarEvent::new(id, start, end)).unwrap())
    }

    // Sunday 2024-01-07 to Saturday 2024-01-13
    fn pack(mut events: Vec<EventRef>) -> Vec<RowPlacement> {
        events.sort_by(sort_events_by_start_and_end);
        pack_rows(&events, date(2024, 1, 7), date(2024, 1, 13))
    }

    fn rows(placements: &[RowPlacement]) -> Vec<(String, usize, u32)> {
        placements
            .iter()
            .map(|p| (p.event.id.to_string(), p.row, p.n_days_in_grid()))
            .collect()
    }

    #[test]
    fn test_single_bar() {
        let placements = pack(vec![event(1, "2024-01-08", "2024-01-10")]);
        assert_eq!(rows(&placements), vec![("1".to_string(), 0, 3)]);
        assert_eq!(row_count(&placements), 1);
    }

    #[test]
    fn test_overlapping_bar_opens_second_row() {
        let placements = pack(vec![
            event(1, "2024-01-08", "2024-01-10"),
            event(2, "2024-01-09", "2024-01-11"),
        ]);
        assert_eq!(
            rows(&placements),
            vec![("1".to_string(), 0, 3), ("2".to_string(), 1, 3)]
        );
    }

    #[test]
    fn test_bar_reuses_row_after_previous_ends() {
        let placements = pack(vec![
            event(1, "2024-01-08", "2024-01-09"),
            event(2, "2024-01-08", "2024-01-12"),
            event(3, "2024-01-10", "2024-01-10"),
        ]);
        assert_eq!(
            rows(&placements),
            vec![
                ("2".to_string(), 0, 5),
                ("1".to_string(), 1, 2),
                ("3".to_string(), 1, 1),
            ]
        );
    }

    #[test]
    fn test_bar_ending_on_start_day_blocks_row() {
        // Both cover Wednesday, so they cannot share a row
        let placements = pack(vec![
            event(1, "2024-01-08", "2024-01-10"),
            event(2, "2024-01-10", "2024-01-12"),
        ]);
        assert_eq!(placements[1].row, 1);
    }

    #[test]
    fn test_bar_clipped_to_week() {
        let placements = pack(vec![event(1, "2024-01-01", "2024-01-09")]);
        assert_eq!(placements[0].first, date(2024, 1, 7));
        assert_eq!(placements[0].n_days_in_grid(), 3);
    }

    #[test]
    fn test_cells_mark_continuations() {
        let placements = pack(vec![event(1, "2024-01-08", "2024-01-09")]);
        let dates = [date(2024, 1, 7), date(2024, 1, 8), date(2024, 1, 9)];
        let cells = cells_per_day(&placements, &dates);

        assert!(cells[0].is_empty());
        assert!(!cells[1][0].is_continuation);
        assert!(cells[2][0].is_continuation);
        assert_eq!(cells[2][0].n_days_in_grid, 2);
    }

    #[test]
    fn test_duplicate_references_are_packed_once() {
        let shared = event(1, "2024-01-08", "2024-01-09");
        let placements = pack(vec![EventRef::clone(&shared), shared]);
        assert_eq!(placements.len(), 1);
    }
}
