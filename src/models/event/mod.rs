// Event module
// External calendar events and their classified internal form

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use crate::utils::date::CalendarDateTime;

/// Event identity as supplied by the caller, either numeric or textual.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventId {
    Number(i64),
    Text(String),
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventId::Number(n) => write!(f, "{}", n),
            EventId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for EventId {
    fn from(value: i64) -> Self {
        EventId::Number(value)
    }
}

impl From<&str> for EventId {
    fn from(value: &str) -> Self {
        EventId::Text(value.to_string())
    }
}

impl From<String> for EventId {
    fn from(value: String) -> Self {
        EventId::Text(value)
    }
}

/// Calendar event as supplied by the caller.
///
/// `start` and `end` are kept as raw strings so that events which fail
/// classification can still be stored and handed back unchanged. Fields the
/// engine does not understand are preserved in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: EventId,
    pub start: String,
    pub end: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub people: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calendar_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CalendarEvent {
    /// Create an event with only the required fields.
    ///
    /// No validation happens here; use [`CalendarEvent::validate`] or the
    /// classifier to check the boundaries.
    ///
    /// # Examples
    /// ```
    /// use calendar_layout::models::event::CalendarEvent;
    ///
    /// let event = CalendarEvent::new(1, "2024-05-06 10:00", "2024-05-06 11:00");
    /// assert!(event.validate().is_ok());
    /// ```
    pub fn new(id: impl Into<EventId>, start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            start: start.into(),
            end: end.into(),
            title: None,
            people: Vec::new(),
            location: None,
            description: None,
            calendar_id: None,
            extra: Map::new(),
        }
    }

    /// Create a builder for constructing events with optional fields
    pub fn builder() -> CalendarEventBuilder {
        CalendarEventBuilder::new()
    }

    /// Check that both boundaries parse and that the event does not end before it starts.
    pub fn validate(&self) -> Result<(), String> {
        let start = CalendarDateTime::parse(&self.start).map_err(|e| e.to_string())?;
        let end = CalendarDateTime::parse(&self.end).map_err(|e| e.to_string())?;

        if end.as_end() < start.as_start() {
            return Err("Event end must not precede its start".to_string());
        }

        Ok(())
    }
}

/// Builder for creating events with optional fields
#[derive(Default)]
pub struct CalendarEventBuilder {
    id: Option<EventId>,
    start: Option<String>,
    end: Option<String>,
    title: Option<String>,
    people: Vec<String>,
    location: Option<String>,
    description: Option<String>,
    calendar_id: Option<String>,
    extra: Map<String, Value>,
}

impl CalendarEventBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: impl Into<EventId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn start(mut self, start: impl Into<String>) -> Self {
        self.start = Some(start.into());
        self
    }

    pub fn end(mut self, end: impl Into<String>) -> Self {
        self.end = Some(end.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn person(mut self, person: impl Into<String>) -> Self {
        self.people.push(person.into());
        self
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn calendar_id(mut self, calendar_id: impl Into<String>) -> Self {
        self.calendar_id = Some(calendar_id.into());
        self
    }

    /// Attach an opaque field that is carried through layout untouched
    pub fn field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Build the event
    pub fn build(self) -> Result<CalendarEvent, String> {
        let id = self.id.ok_or("Event id is required")?;
        let start = self.start.ok_or("Event start is required")?;
        let end = self.end.ok_or("Event end is required")?;

        let event = CalendarEvent {
            id,
            start,
            end,
            title: self.title,
            people: self.people,
            location: self.location,
            description: self.description,
            calendar_id: self.calendar_id,
            extra: self.extra,
        };

        event.validate()?;
        Ok(event)
    }
}

/// Duration pattern of an event. Exactly one applies to every classified event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventShape {
    SingleDayTimed,
    SingleDayFullDay,
    /// One boundary is a bare date, the other carries a time of day, and both
    /// fall on the same calendar day. Laid out as a date-grid bar.
    SingleHybridDayTimed,
    MultiDayTimed,
    MultiDayFullDay,
}

impl EventShape {
    pub fn is_single_day_timed(self) -> bool {
        self == EventShape::SingleDayTimed
    }

    pub fn is_single_day_full_day(self) -> bool {
        self == EventShape::SingleDayFullDay
    }

    pub fn is_single_hybrid_day_timed(self) -> bool {
        self == EventShape::SingleHybridDayTimed
    }

    pub fn is_multi_day_timed(self) -> bool {
        self == EventShape::MultiDayTimed
    }

    pub fn is_multi_day_full_day(self) -> bool {
        self == EventShape::MultiDayFullDay
    }

    /// Shapes positioned in the time grid of day and week views
    pub fn is_time_grid(self) -> bool {
        self == EventShape::SingleDayTimed
    }

    /// Shapes positioned as bars in the date grid of day and week views
    pub fn is_date_grid(self) -> bool {
        !self.is_time_grid()
    }

    pub fn is_multi_day(self) -> bool {
        matches!(self, EventShape::MultiDayTimed | EventShape::MultiDayFullDay)
    }
}

/// Per-week fragments of an event in the month grid: fragment start date -> day count
pub type EventFragments = BTreeMap<NaiveDate, u32>;

/// A classified event ready for layout.
///
/// Layout output shares one `Arc<CalendarEventInternal>` per event across every
/// day it is placed on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarEventInternal {
    pub id: EventId,
    pub start: CalendarDateTime,
    pub end: CalendarDateTime,
    pub shape: EventShape,
    external: CalendarEvent,
}

impl CalendarEventInternal {
    pub(crate) fn new(
        external: CalendarEvent,
        start: CalendarDateTime,
        end: CalendarDateTime,
        shape: EventShape,
    ) -> Self {
        Self {
            id: external.id.clone(),
            start,
            end,
            shape,
            external,
        }
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start.date()
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end.date()
    }

    pub fn start_instant(&self) -> NaiveDateTime {
        self.start.as_start()
    }

    pub fn end_instant(&self) -> NaiveDateTime {
        self.end.as_end()
    }

    pub fn duration(&self) -> Duration {
        self.end_instant() - self.start_instant()
    }

    /// Does the event cover any part of `date`?
    pub fn occurs_on(&self, date: NaiveDate) -> bool {
        self.start_date() <= date && date <= self.end_date()
    }

    /// The event exactly as it was supplied
    pub fn external(&self) -> &CalendarEvent {
        &self.external
    }

    /// Fields the engine carries through without interpreting
    pub fn foreign_properties(&self) -> &Map<String, Value> {
        &self.external.extra
    }

    /// Layout order: start ascending, longer events first, then identity.
    pub fn layout_order(&self, other: &Self) -> Ordering {
        self.start_instant()
            .cmp(&other.start_instant())
            .then_with(|| other.duration().cmp(&self.duration()))
            .then_with(|| self.id.cmp(&other.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_event_keeps_raw_strings() {
        let event = CalendarEvent::new(7, "2024-01-01 10:00", "2024-01-01 11:00");
        assert_eq!(event.id, EventId::Number(7));
        assert_eq!(event.start, "2024-01-01 10:00");
        assert!(event.extra.is_empty());
    }

    #[test]
    fn test_validate_rejects_reversed_boundaries() {
        let event = CalendarEvent::new(1, "2024-01-02", "2024-01-01");
        let result = event.validate();
        assert!(result.is_err());
        assert_eq!(result.unwrap_err(), "Event end must not precede its start");
    }

    #[test]
    fn test_validate_rejects_malformed_strings() {
        let event = CalendarEvent::new(1, "2024/01/01", "2024-01-01");
        assert!(event.validate().unwrap_err().contains("malformed"));
    }

    #[test]
    fn test_builder_with_optional_fields() {
        let event = CalendarEvent::builder()
            .id("standup")
            .start("2024-01-01 09:00")
            .end("2024-01-01 09:15")
            .title("Standup")
            .person("Ada")
            .location("Room 1")
            .calendar_id("work")
            .field("priority", 2)
            .build()
            .unwrap();

        assert_eq!(event.id, EventId::Text("standup".to_string()));
        assert_eq!(event.title.as_deref(), Some("Standup"));
        assert_eq!(event.people, vec!["Ada".to_string()]);
        assert_eq!(event.extra.get("priority"), Some(&json!(2)));
    }

    #[test]
    fn test_builder_missing_id() {
        let result = CalendarEvent::builder()
            .start("2024-01-01")
            .end("2024-01-01")
            .build();
        assert_eq!(result.unwrap_err(), "Event id is required");
    }

    #[test]
    fn test_deserialize_preserves_unknown_fields() {
        let event: CalendarEvent = serde_json::from_value(json!({
            "id": "a",
            "start": "2024-01-01",
            "end": "2024-01-02",
            "calendarId": "personal",
            "_options": { "disableDND": true }
        }))
        .unwrap();

        assert_eq!(event.calendar_id.as_deref(), Some("personal"));
        assert_eq!(event.extra.get("_options"), Some(&json!({ "disableDND": true })));
    }

    #[test]
    fn test_event_id_ordering_is_stable() {
        let mut ids = vec![EventId::from("b"), EventId::from(2), EventId::from("a"), EventId::from(1)];
        ids.sort();
        assert_eq!(
            ids,
            vec![EventId::from(1), EventId::from(2), EventId::from("a"), EventId::from("b")]
        );
    }

    #[test]
    fn test_shape_grid_routing() {
        assert!(EventShape::SingleDayTimed.is_time_grid());
        assert!(EventShape::SingleHybridDayTimed.is_date_grid());
        assert!(EventShape::MultiDayTimed.is_date_grid());
        assert!(EventShape::MultiDayFullDay.is_multi_day());
        assert!(!EventShape::SingleDayFullDay.is_multi_day());
    }
}
