//! The calendar facade.
//!
//! [`CalendarApp`] owns the mutable state (events, selected view and date,
//! configuration, predicates) and recomputes a fresh [`LayoutSnapshot`] after
//! every change. A change that fails leaves the previous snapshot in place.

mod navigation;

use chrono::{Local, NaiveDate};
use std::sync::Arc;

use crate::error::{LayoutError, Result};
use crate::models::event::{CalendarEvent, CalendarEventInternal, EventId};
use crate::models::layout::LayoutSnapshot;
use crate::models::range::DateRange;
use crate::models::settings::CalendarConfig;
use crate::services::events::EventStore;
use crate::services::grid::EventPredicate;
use crate::services::layout::{compute_layout, LayoutInput};
use crate::services::range::{default_views, View};
use crate::utils::date::parse_date;

/// Owned event predicate held by the app
pub type BoxedPredicate = Box<dyn Fn(&CalendarEventInternal) -> bool>;

/// Called with the new range whenever a recompute changes the displayed range
pub type RangeCallback = Box<dyn FnMut(&DateRange)>;

struct AppState {
    config: CalendarConfig,
    views: Vec<View>,
    selected_view: String,
    selected_date: NaiveDate,
    events: EventStore,
    filter: Option<BoxedPredicate>,
    exclusion: Option<BoxedPredicate>,
}

impl AppState {
    fn find_view(&self, name: &str) -> Option<&View> {
        self.views.iter().find(|view| view.name == name)
    }

    fn compute(&self) -> Result<LayoutSnapshot> {
        let view = self
            .find_view(&self.selected_view)
            .ok_or_else(|| LayoutError::UnknownView(self.selected_view.clone()))?;

        let mut input = LayoutInput::new(self.events.get_all(), view, self.selected_date, &self.config);
        input.filter = self.filter.as_deref().map(|p| p as EventPredicate<'_>);
        input.exclude = self.exclusion.as_deref().map(|p| p as EventPredicate<'_>);

        compute_layout(input)
    }
}

pub struct CalendarApp {
    state: AppState,
    on_range_update: Option<RangeCallback>,
    snapshot: Arc<LayoutSnapshot>,
}

impl CalendarApp {
    pub fn builder() -> CalendarAppBuilder {
        CalendarAppBuilder::new()
    }

    pub fn config(&self) -> &CalendarConfig {
        &self.state.config
    }

    pub fn events(&self) -> &EventStore {
        &self.state.events
    }

    pub fn views(&self) -> &[View] {
        &self.state.views
    }

    pub fn selected_view(&self) -> &str {
        &self.state.selected_view
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.state.selected_date
    }

    /// The most recent successful layout
    pub fn snapshot(&self) -> Arc<LayoutSnapshot> {
        Arc::clone(&self.snapshot)
    }

    pub fn range(&self) -> DateRange {
        self.snapshot.range
    }

    /// Replace every event
    pub fn set_events(&mut self, events: Vec<CalendarEvent>) -> Result<Arc<LayoutSnapshot>> {
        self.state.events.set(events);
        self.recompute()
    }

    pub fn add_event(&mut self, event: CalendarEvent) -> Result<Arc<LayoutSnapshot>> {
        self.state.events.add(event).map_err(LayoutError::EventStore)?;
        self.recompute()
    }

    pub fn update_event(&mut self, event: CalendarEvent) -> Result<Arc<LayoutSnapshot>> {
        self.state.events.update(event).map_err(LayoutError::EventStore)?;
        self.recompute()
    }

    pub fn remove_event(&mut self, id: &EventId) -> Result<Arc<LayoutSnapshot>> {
        self.state
            .events
            .remove(id)
            .ok_or_else(|| LayoutError::EventStore(format!("No event with id {}", id)))?;
        self.recompute()
    }

    /// Switch to the view registered under `name`
    pub fn set_view(&mut self, name: &str) -> Result<Arc<LayoutSnapshot>> {
        if self.state.find_view(name).is_none() {
            return Err(LayoutError::UnknownView(name.to_string()));
        }
        let previous = std::mem::replace(&mut self.state.selected_view, name.to_string());
        self.recompute().map_err(|e| {
            self.state.selected_view = previous;
            e
        })
    }

    /// Select a new pivot date given as `YYYY-MM-DD`
    pub fn set_date(&mut self, date: &str) -> Result<Arc<LayoutSnapshot>> {
        let parsed = parse_date(date).map_err(|_| LayoutError::InvalidPivotDate(date.to_string()))?;
        self.select_date(parsed)
    }

    pub fn select_date(&mut self, date: NaiveDate) -> Result<Arc<LayoutSnapshot>> {
        let previous = std::mem::replace(&mut self.state.selected_date, date);
        self.recompute().map_err(|e| {
            self.state.selected_date = previous;
            e
        })
    }

    pub fn set_config(&mut self, config: CalendarConfig) -> Result<Arc<LayoutSnapshot>> {
        config.validate().map_err(LayoutError::Config)?;
        let previous = std::mem::replace(&mut self.state.config, config);
        self.recompute().map_err(|e| {
            self.state.config = previous;
            e
        })
    }

    /// Only events accepted by `predicate` are laid out. `None` shows everything.
    pub fn set_filter_predicate(
        &mut self,
        predicate: Option<BoxedPredicate>,
    ) -> Result<Arc<LayoutSnapshot>> {
        self.state.filter = predicate;
        self.recompute()
    }

    /// Events matched by `predicate` are left out of static layout, e.g. the
    /// event currently being dragged.
    pub fn set_exclusion(&mut self, predicate: Option<BoxedPredicate>) -> Result<Arc<LayoutSnapshot>> {
        self.state.exclusion = predicate;
        self.recompute()
    }

    /// Register an additional view, replacing any view with the same name.
    ///
    /// Replacing the selected view recomputes the snapshot. If that fails the
    /// previous view is restored.
    pub fn register_view(&mut self, view: View) -> Result<Arc<LayoutSnapshot>> {
        let is_selected = view.name == self.state.selected_view;
        let Some(index) = self.state.views.iter().position(|existing| existing.name == view.name) else {
            self.state.views.push(view);
            return Ok(self.snapshot());
        };

        let previous = std::mem::replace(&mut self.state.views[index], view);
        if !is_selected {
            return Ok(self.snapshot());
        }
        self.recompute().map_err(|e| {
            self.state.views[index] = previous;
            e
        })
    }

    /// Rebuild the snapshot from the current state and commit it on success
    pub fn recompute(&mut self) -> Result<Arc<LayoutSnapshot>> {
        let snapshot = self.state.compute().map_err(|e| {
            log::warn!("Layout failed, keeping the previous snapshot: {}", e);
            e
        })?;

        let range_changed = snapshot.range != self.snapshot.range;
        self.snapshot = Arc::new(snapshot);

        if range_changed {
            log::debug!(
                "Range changed to {} - {}",
                self.snapshot.range.start,
                self.snapshot.range.end
            );
            if let Some(callback) = self.on_range_update.as_mut() {
                callback(&self.snapshot.range);
            }
        }

        Ok(Arc::clone(&self.snapshot))
    }
}

/// Builder for creating a [`CalendarApp`]
#[derive(Default)]
pub struct CalendarAppBuilder {
    config: CalendarConfig,
    views: Vec<View>,
    selected_view: Option<String>,
    selected_date: Option<NaiveDate>,
    events: Vec<CalendarEvent>,
    filter: Option<BoxedPredicate>,
    exclusion: Option<BoxedPredicate>,
    on_range_update: Option<RangeCallback>,
}

impl CalendarAppBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: CalendarConfig) -> Self {
        self.config = config;
        self
    }

    /// Add a view on top of the built-in ones
    pub fn view(mut self, view: View) -> Self {
        self.views.push(view);
        self
    }

    pub fn selected_view(mut self, name: impl Into<String>) -> Self {
        self.selected_view = Some(name.into());
        self
    }

    pub fn selected_date(mut self, date: NaiveDate) -> Self {
        self.selected_date = Some(date);
        self
    }

    pub fn events(mut self, events: Vec<CalendarEvent>) -> Self {
        self.events = events;
        self
    }

    pub fn filter(mut self, predicate: impl Fn(&CalendarEventInternal) -> bool + 'static) -> Self {
        self.filter = Some(Box::new(predicate));
        self
    }

    pub fn exclusion(mut self, predicate: impl Fn(&CalendarEventInternal) -> bool + 'static) -> Self {
        self.exclusion = Some(Box::new(predicate));
        self
    }

    pub fn on_range_update(mut self, callback: impl FnMut(&DateRange) + 'static) -> Self {
        self.on_range_update = Some(Box::new(callback));
        self
    }

    /// Validate the setup and compute the first snapshot.
    ///
    /// The selected view defaults to `config.default_view` and the selected
    /// date to today. The range callback fires once for the initial range.
    pub fn build(self) -> Result<CalendarApp> {
        self.config.validate().map_err(LayoutError::Config)?;

        let mut views = default_views();
        for view in self.views {
            match views.iter_mut().find(|existing| existing.name == view.name) {
                Some(existing) => *existing = view,
                None => views.push(view),
            }
        }

        let selected_view = self
            .selected_view
            .unwrap_or_else(|| self.config.default_view.clone());
        if !views.iter().any(|view| view.name == selected_view) {
            return Err(LayoutError::UnknownView(selected_view));
        }

        let state = AppState {
            config: self.config,
            views,
            selected_view,
            selected_date: self.selected_date.unwrap_or_else(|| Local::now().date_naive()),
            events: EventStore::new(self.events),
            filter: self.filter,
            exclusion: self.exclusion,
        };
        let snapshot = state.compute()?;
        log::info!(
            "Calendar ready: view '{}', {} events",
            state.selected_view,
            state.events.len()
        );

        let mut app = CalendarApp {
            state,
            on_range_update: self.on_range_update,
            snapshot: Arc::new(snapshot),
        };
        if let Some(callback) = app.on_range_update.as_mut() {
            callback(&app.snapshot.range);
        }

        Ok(app)
    }
}
