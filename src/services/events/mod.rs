// Events store
// Raw event collection behind the calendar facade

use crate::models::event::{CalendarEvent, EventId};

/// The raw event collection, in insertion order.
///
/// Events are stored exactly as supplied. Events that fail classification stay
/// here and are only left out of layout.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventStore {
    events: Vec<CalendarEvent>,
}

impl EventStore {
    pub fn new(events: Vec<CalendarEvent>) -> Self {
        Self { events }
    }

    pub fn get(&self, id: &EventId) -> Option<&CalendarEvent> {
        self.events.iter().find(|event| &event.id == id)
    }

    pub fn get_all(&self) -> &[CalendarEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Add an event. Fails when another event already uses the same id.
    pub fn add(&mut self, event: CalendarEvent) -> Result<(), String> {
        if self.get(&event.id).is_some() {
            return Err(format!("An event with id {} already exists", event.id));
        }
        self.events.push(event);
        Ok(())
    }

    /// Replace the event that has the same id, keeping its position.
    pub fn update(&mut self, event: CalendarEvent) -> Result<(), String> {
        let slot = self
            .events
            .iter_mut()
            .find(|existing| existing.id == event.id)
            .ok_or_else(|| format!("No event with id {}", event.id))?;
        *slot = event;
        Ok(())
    }

    pub fn remove(&mut self, id: &EventId) -> Option<CalendarEvent> {
        let index = self.events.iter().position(|event| &event.id == id)?;
        Some(self.events.remove(index))
    }

    /// Replace the whole collection
    pub fn set(&mut self, events: Vec<CalendarEvent>) {
        self.events = events;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(id: i64) -> CalendarEvent {
        CalendarEvent::new(id, "2024-01-01 10:00", "2024-01-01 11:00")
    }

    #[test]
    fn test_add_and_get() {
        let mut store = EventStore::default();
        store.add(sample(1)).unwrap();
        store.add(sample(2)).unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.get(&EventId::Number(2)), Some(&sample(2)));
        assert!(store.get(&EventId::Number(3)).is_none());
    }

    #[test]
    fn test_add_duplicate_id_fails() {
        let mut store = EventStore::new(vec![sample(1)]);
        let result = store.add(sample(1));
        assert_eq!(result.unwrap_err(), "An event with id 1 already exists");
    }

    #[test]
    fn test_update_keeps_position() {
        let mut store = EventStore::new(vec![sample(1), sample(2), sample(3)]);
        let mut changed = sample(2);
        changed.title = Some("Moved".to_string());
        store.update(changed).unwrap();

        assert_eq!(store.get_all()[1].title.as_deref(), Some("Moved"));
        assert!(store.update(sample(9)).is_err());
    }

    #[test]
    fn test_remove_and_set() {
        let mut store = EventStore::new(vec![sample(1), sample(2)]);
        assert_eq!(store.remove(&EventId::Number(1)), Some(sample(1)));
        assert_eq!(store.remove(&EventId::Number(1)), None);

        store.set(vec![sample(5)]);
        assert_eq!(store.get_all(), &[sample(5)]);
    }

    #[test]
    fn test_invalid_events_are_kept() {
        let broken = CalendarEvent::new(1, "2024-01-02", "2024-01-01");
        let store = EventStore::new(vec![broken.clone()]);
        assert_eq!(store.get(&EventId::Number(1)), Some(&broken));
    }
}
