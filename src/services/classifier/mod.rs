//! Event classification.
//!
//! Every event is tagged with exactly one [`EventShape`], which decides the
//! positioning algorithm it goes through.

use crate::error::{LayoutError, Result};
use crate::models::event::{CalendarEvent, CalendarEventInternal, EventShape};
use crate::utils::date::CalendarDateTime;

/// Derive the shape of an event from the form and dates of its boundaries.
///
/// | dates     | start      | end        | shape                   |
/// |-----------|------------|------------|-------------------------|
/// | same      | date       | date       | single-day full-day     |
/// | same      | date-time  | date-time  | single-day timed        |
/// | same      | mixed      | mixed      | single hybrid-day timed |
/// | different | date       | date       | multi-day full-day      |
/// | different | any other combination   | multi-day timed         |
///
/// In a multi-day timed event a bare start date begins at midnight and a bare
/// end date runs to the following midnight.
pub fn classify(
    event: &CalendarEvent,
    start: &CalendarDateTime,
    end: &CalendarDateTime,
) -> Result<EventShape> {
    if end.as_end() < start.as_start() || end.date() < start.date() {
        return Err(LayoutError::InvalidRange {
            id: event.id.clone(),
            start: event.start.clone(),
            end: event.end.clone(),
        });
    }

    let same_date = start.date() == end.date();
    match (same_date, start.is_date_only(), end.is_date_only()) {
        (true, true, true) => Ok(EventShape::SingleDayFullDay),
        (true, false, false) => Ok(EventShape::SingleDayTimed),
        (true, _, _) => Ok(EventShape::SingleHybridDayTimed),
        (false, true, true) => Ok(EventShape::MultiDayFullDay),
        (false, _, _) => Ok(EventShape::MultiDayTimed),
    }
}

/// Parse and classify an external event.
pub fn external_event_to_internal(event: &CalendarEvent) -> Result<CalendarEventInternal> {
    let start = CalendarDateTime::parse(&event.start)?;
    let end = CalendarDateTime::parse(&event.end)?;
    let shape = classify(event, &start, &end)?;

    Ok(CalendarEventInternal::new(event.clone(), start, end, shape))
}

/// Classify every event, isolating failures per event.
///
/// Returns the classified events in input order and the events that were
/// excluded together with the reason.
pub fn classify_all(
    events: &[CalendarEvent],
) -> (Vec<CalendarEventInternal>, Vec<(CalendarEvent, LayoutError)>) {
    let mut classified = Vec::with_capacity(events.len());
    let mut rejected = Vec::new();

    for event in events {
        match external_event_to_internal(event) {
            Ok(internal) => classified.push(internal),
            Err(err) => {
                debug_assert!(
                    !matches!(err, LayoutError::Unclassifiable { .. }),
                    "event {} matched no shape: {}",
                    event.id,
                    err
                );
                match &err {
                    LayoutError::Unclassifiable { .. } => {
                        log::error!("Excluding event {} from layout: {}", event.id, err)
                    }
                    _ => log::warn!("Excluding event {} from layout: {}", event.id, err),
                }
                rejected.push((event.clone(), err));
            }
        }
    }

    (classified, rejected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn shape_of(start: &str, end: &str) -> Result<EventShape> {
        external_event_to_internal(&CalendarEvent::new(1, start, end)).map(|e| e.shape)
    }

    #[test_case("2024-01-01", "2024-01-01", EventShape::SingleDayFullDay ; "single day full day")]
    #[test_case("2024-01-01 10:00", "2024-01-01 11:00", EventShape::SingleDayTimed ; "single day timed")]
    #[test_case("2024-01-01 10:00", "2024-01-01 10:00", EventShape::SingleDayTimed ; "zero length timed")]
    #[test_case("2024-01-01", "2024-01-01 11:00", EventShape::SingleHybridDayTimed ; "hybrid date start")]
    #[test_case("2024-01-01 10:00", "2024-01-01", EventShape::SingleHybridDayTimed ; "hybrid date end")]
    #[test_case("2024-01-01 22:00", "2024-01-02 02:00", EventShape::MultiDayTimed ; "timed across midnight")]
    #[test_case("2024-01-01", "2024-01-03", EventShape::MultiDayFullDay ; "multi day full day")]
    fn test_classification_rules(start: &str, end: &str, expected: EventShape) {
        assert_eq!(shape_of(start, end), Ok(expected));
    }

    #[test]
    fn test_end_before_start_is_invalid_range() {
        let result = shape_of("2024-01-02 10:00", "2024-01-02 09:00");
        assert!(matches!(result, Err(LayoutError::InvalidRange { .. })));

        let result = shape_of("2024-01-03", "2024-01-01");
        assert!(matches!(result, Err(LayoutError::InvalidRange { .. })));
    }

    #[test]
    fn test_malformed_boundary_is_parse_error() {
        let result = shape_of("2024-01-01 9am", "2024-01-01 10:00");
        assert_eq!(
            result,
            Err(LayoutError::Parse {
                value: "2024-01-01 9am".to_string()
            })
        );
    }

    #[test_case("2024-01-01", "2024-01-03 10:00" ; "date start, timed end")]
    #[test_case("2024-01-01 10:00", "2024-01-03" ; "timed start, date end")]
    fn test_mixed_forms_over_several_days_are_timed(start: &str, end: &str) {
        assert_eq!(shape_of(start, end), Ok(EventShape::MultiDayTimed));
    }

    #[test]
    fn test_mixed_multi_day_bare_dates_are_midnight_boundaries() {
        let event = external_event_to_internal(&CalendarEvent::new(1, "2024-01-01", "2024-01-03 10:00")).unwrap();
        assert_eq!(event.start_instant().to_string(), "2024-01-01 00:00:00");
        assert_eq!(event.end_date().to_string(), "2024-01-03");

        let event = external_event_to_internal(&CalendarEvent::new(2, "2024-01-01 10:00", "2024-01-03")).unwrap();
        assert_eq!(event.end_instant().to_string(), "2024-01-04 00:00:00");
    }

    #[test]
    fn test_every_boundary_combination_classifies() {
        let boundaries = ["2024-01-01", "2024-01-01 09:00", "2024-01-02", "2024-01-02 09:00"];
        for start in boundaries {
            for end in boundaries {
                let result = shape_of(start, end);
                assert!(
                    !matches!(result, Err(LayoutError::Unclassifiable { .. })),
                    "{} - {} gave {:?}",
                    start,
                    end,
                    result
                );
            }
        }
    }

    #[test]
    fn test_internal_event_keeps_external_fields() {
        let external = CalendarEvent::builder()
            .id("x")
            .start("2024-01-01 10:00")
            .end("2024-01-01 11:00")
            .title("Review")
            .field("color", "red")
            .build()
            .unwrap();

        let internal = external_event_to_internal(&external).unwrap();
        assert_eq!(internal.external(), &external);
        assert_eq!(internal.foreign_properties().get("color").unwrap(), "red");
    }

    #[test]
    fn test_classify_all_isolates_failures() {
        let events = vec![
            CalendarEvent::new(1, "2024-01-01 10:00", "2024-01-01 11:00"),
            CalendarEvent::new(2, "not a date", "2024-01-01"),
            CalendarEvent::new(3, "2024-01-05", "2024-01-04"),
            CalendarEvent::new(4, "2024-01-01", "2024-01-02"),
        ];

        let (classified, rejected) = classify_all(&events);

        let ids: Vec<_> = classified.iter().map(|e| e.id.to_string()).collect();
        assert_eq!(ids, vec!["1", "4"]);
        assert_eq!(rejected.len(), 2);
        assert!(matches!(rejected[0].1, LayoutError::Parse { .. }));
        assert!(matches!(rejected[1].1, LayoutError::InvalidRange { .. }));
    }
}
