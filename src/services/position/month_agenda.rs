//! Month agenda: every event listed under each day it occurs on.

use chrono::{Datelike, NaiveDate};

use crate::models::layout::{AgendaDay, EventRef, MonthAgendaLayout};
use crate::models::range::DateRange;
use crate::services::grid::{events_in_range, EventPredicate};

pub fn position_in_month_agenda(
    events: &[EventRef],
    range: &DateRange,
    pivot: NaiveDate,
    exclude: Option<EventPredicate<'_>>,
) -> MonthAgendaLayout {
    let selected = events_in_range(events, range, exclude);
    let dates: Vec<NaiveDate> = range.days().collect();

    let weeks = dates
        .chunks(7)
        .map(|week| {
            week.iter()
                .map(|date| AgendaDay {
                    date: *date,
                    in_month: date.year() == pivot.year() && date.month() == pivot.month(),
                    events: selected
                        .iter()
                        .filter(|event| event.occurs_on(*date))
                        .cloned()
                        .collect(),
                })
                .collect()
        })
        .collect();

    MonthAgendaLayout { weeks }
}
