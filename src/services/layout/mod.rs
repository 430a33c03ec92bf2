//! One complete layout pass.
//!
//! `compute_layout` is a pure function of its inputs: the same events, view,
//! pivot date and configuration always give an equal snapshot.

use chrono::NaiveDate;
use std::sync::Arc;

use crate::error::Result;
use crate::models::event::{CalendarEvent, CalendarEventInternal};
use crate::models::layout::{EventRef, LayoutSnapshot, RejectedEvent, ViewLayout};
use crate::models::settings::CalendarConfig;
use crate::models::ui::LayoutKind;
use crate::services::classifier::classify_all;
use crate::services::grid::{build_grid, EventPredicate};
use crate::services::position::{position_in_month_agenda, position_in_month_grid, position_week};
use crate::services::range::View;
use crate::services::time_units::TimeUnits;

/// Everything a layout pass reads.
#[derive(Clone, Copy)]
pub struct LayoutInput<'a> {
    pub events: &'a [CalendarEvent],
    pub view: &'a View,
    pub date: NaiveDate,
    pub config: &'a CalendarConfig,
    /// Only events for which this returns true are laid out
    pub filter: Option<EventPredicate<'a>>,
    /// Events for which this returns true are left out of static layout
    pub exclude: Option<EventPredicate<'a>>,
}

impl<'a> LayoutInput<'a> {
    pub fn new(
        events: &'a [CalendarEvent],
        view: &'a View,
        date: NaiveDate,
        config: &'a CalendarConfig,
    ) -> Self {
        Self {
            events,
            view,
            date,
            config,
            filter: None,
            exclude: None,
        }
    }
}

fn keep(filter: Option<EventPredicate<'_>>, event: &CalendarEventInternal) -> bool {
    filter.map_or(true, |predicate| predicate(event))
}

/// Classify, select and position events for one view.
///
/// Events that fail to parse or classify are reported in
/// [`LayoutSnapshot::rejected`] and do not affect the rest of the pass. A
/// failure to resolve the view range fails the whole pass.
pub fn compute_layout(input: LayoutInput<'_>) -> Result<LayoutSnapshot> {
    let config = input.config;
    let time_units = TimeUnits::from_config(config);
    let range = input.view.resolve_range(input.date, &time_units, config)?;

    let (classified, rejected) = classify_all(input.events);
    let events: Vec<EventRef> = classified
        .into_iter()
        .filter(|event| keep(input.filter, event))
        .map(Arc::new)
        .collect();

    let layout = match input.view.layout_kind {
        LayoutKind::TimeGrid => {
            let days = build_grid(&events, &range, config, input.exclude);
            ViewLayout::TimeGrid(position_week(&days, config))
        }
        LayoutKind::MonthGrid => ViewLayout::MonthGrid(position_in_month_grid(
            &events,
            &range,
            input.date,
            config.month_grid_options.n_events_per_day,
            input.exclude,
        )),
        LayoutKind::MonthAgenda => ViewLayout::MonthAgenda(position_in_month_agenda(
            &events,
            &range,
            input.date,
            input.exclude,
        )),
    };

    log::debug!(
        "Laid out view '{}' for {} to {}: {} events, {} rejected",
        input.view.name,
        range.start,
        range.end,
        events.len(),
        rejected.len()
    );

    Ok(LayoutSnapshot {
        view: input.view.name.clone(),
        range,
        layout,
        rejected: rejected
            .into_iter()
            .map(|(event, error)| RejectedEvent { id: event.id, error })
            .collect(),
    })
}
