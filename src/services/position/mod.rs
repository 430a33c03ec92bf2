//! Positioning algorithms fed by the grid builder.

pub mod date_grid;
pub mod month_agenda;
pub mod month_grid;
pub mod time_grid;

use crate::models::layout::{Day, WeekLayout};
use crate::models::settings::CalendarConfig;
use crate::services::grid::GridDay;

pub use month_agenda::position_in_month_agenda;
pub use month_grid::position_in_month_grid;
pub use time_grid::position_in_time_grid;

/// Position the date grid bars and the time grid of a day or week view.
///
/// The whole day sequence counts as one displayed week for row packing.
pub fn position_week(days: &[GridDay], config: &CalendarConfig) -> WeekLayout {
    let (first, last) = match (days.first(), days.last()) {
        (Some(first), Some(last)) => (first.date, last.date),
        _ => {
            return WeekLayout {
                days: Vec::new(),
                date_grid_rows: 0,
            }
        }
    };

    // Builder order per day is layout order, so merging keeps it
    let mut bars = Vec::new();
    for day in days {
        bars.extend(day.date_grid_events.iter().cloned());
    }
    bars.sort_by(crate::services::grid::sort_events_by_start_and_end);

    let placements = date_grid::pack_rows(&bars, first, last);
    let dates: Vec<_> = days.iter().map(|day| day.date).collect();
    let cells = date_grid::cells_per_day(&placements, &dates);

    let positioned_days = days
        .iter()
        .zip(cells)
        .map(|(day, date_grid_events)| Day {
            date: day.date,
            date_grid_events,
            time_grid_events: position_in_time_grid(&day.time_grid_events, &day.window, config),
        })
        .collect();

    WeekLayout {
        days: positioned_days,
        date_grid_rows: date_grid::row_count(&placements),
    }
}
