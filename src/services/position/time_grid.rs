//! Concurrency and column placement for timed events within one day.

use chrono::NaiveDateTime;

use crate::models::layout::{EventRef, TimeGridEvent};
use crate::models::settings::CalendarConfig;
use crate::services::grid::{sort_events_by_start_and_end, TimeWindow};

/// Portion of an event visible inside the day window.
#[derive(Debug, Clone)]
struct Segment {
    event: EventRef,
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl Segment {
    fn clip(event: &EventRef, window: &TimeWindow) -> Self {
        Self {
            event: EventRef::clone(event),
            start: event.start_instant().clamp(window.start, window.end),
            end: event.end_instant().clamp(window.start, window.end),
        }
    }
}

/// Split segments sorted by start into overlap clusters.
///
/// A segment joins the current cluster when it starts before the latest end
/// seen so far, which makes clustering transitive. Segments that merely touch
/// (one ends at 10:00, the next starts at 10:00) do not overlap.
fn build_clusters(segments: Vec<Segment>) -> Vec<Vec<Segment>> {
    let mut clusters: Vec<Vec<Segment>> = Vec::new();
    let mut cluster_end: Option<NaiveDateTime> = None;

    for segment in segments {
        match (clusters.last_mut(), cluster_end) {
            (Some(cluster), Some(end)) if segment.start < end => {
                cluster_end = Some(end.max(segment.end));
                cluster.push(segment);
            }
            _ => {
                cluster_end = Some(segment.end);
                clusters.push(vec![segment]);
            }
        }
    }

    clusters
}

fn minutes_between(from: NaiveDateTime, to: NaiveDateTime) -> f64 {
    (to - from).num_seconds() as f64 / 60.0
}

/// Position the timed events of one day.
///
/// Within a cluster, events take columns in layout order (start ascending,
/// longer first, then identity); `previous_concurrent_events` is the column
/// and `total_concurrent_events` the cluster size.
pub fn position_in_time_grid(
    events: &[EventRef],
    window: &TimeWindow,
    config: &CalendarConfig,
) -> Vec<TimeGridEvent> {
    let mut sorted: Vec<EventRef> = events.to_vec();
    sorted.sort_by(sort_events_by_start_and_end);

    let segments: Vec<Segment> = sorted.iter().map(|event| Segment::clip(event, window)).collect();

    let time_points_per_day = config.time_points_per_day().max(1) as f64;
    let grid_height = config.week_options.grid_height;
    let event_width = config.week_options.event_width;
    let points_per_minute = 100.0 / 60.0;

    let mut positioned = Vec::with_capacity(segments.len());
    for cluster in build_clusters(segments) {
        let total = cluster.len();
        let column_width = event_width / total as f64;

        for (column, segment) in cluster.into_iter().enumerate() {
            let offset_points = minutes_between(window.start, segment.start) * points_per_minute;
            let length_points = minutes_between(segment.start, segment.end) * points_per_minute;

            positioned.push(TimeGridEvent {
                event: segment.event,
                previous_concurrent_events: column,
                total_concurrent_events: total,
                top: offset_points / time_points_per_day * grid_height,
                height: length_points / time_points_per_day * grid_height,
                left: column as f64 * column_width,
                width: column_width,
            });
        }
    }

    positioned
}
