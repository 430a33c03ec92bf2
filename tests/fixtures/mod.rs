// Test fixtures - reusable test data
// Provides consistent events and configurations across the integration tests

#![allow(dead_code)]

use calendar_layout::models::event::CalendarEvent;
use calendar_layout::models::settings::CalendarConfig;
use chrono::NaiveDate;

/// Sample dates for testing
pub mod dates {
    use super::*;

    pub fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    /// Monday, May 6 2024
    pub fn monday_may_6_2024() -> NaiveDate {
        ymd(2024, 5, 6)
    }

    /// Sunday, May 5 2024
    pub fn sunday_may_5_2024() -> NaiveDate {
        ymd(2024, 5, 5)
    }

    /// Feb 29, 2024 (leap year)
    pub fn leap_day_2024() -> NaiveDate {
        ymd(2024, 2, 29)
    }
}

/// Sample events for testing
pub mod events {
    use super::*;

    pub fn timed(id: i64, start: &str, end: &str) -> CalendarEvent {
        CalendarEvent::new(id, start, end)
    }

    pub fn full_day(id: i64, first: &str, last: &str) -> CalendarEvent {
        CalendarEvent::new(id, first, last)
    }

    /// A[09:00-10:00], B[09:30-10:30], C[10:15-11:00] on Monday May 6 2024
    pub fn chained_overlaps() -> Vec<CalendarEvent> {
        vec![
            timed(1, "2024-05-06 09:00", "2024-05-06 10:00"),
            timed(2, "2024-05-06 09:30", "2024-05-06 10:30"),
            timed(3, "2024-05-06 10:15", "2024-05-06 11:00"),
        ]
    }

    /// Five one-hour events on the same day
    pub fn busy_day(date: &str) -> Vec<CalendarEvent> {
        (0..5)
            .map(|i| {
                timed(
                    100 + i,
                    &format!("{} {:02}:00", date, 8 + i),
                    &format!("{} {:02}:30", date, 8 + i),
                )
            })
            .collect()
    }

    /// An event whose end precedes its start
    pub fn reversed() -> CalendarEvent {
        timed(999, "2024-05-06 12:00", "2024-05-06 11:00")
    }
}

/// Sample configurations for testing
pub mod configs {
    use super::*;

    pub fn sunday_start() -> CalendarConfig {
        CalendarConfig {
            first_day_of_week: 0,
            ..CalendarConfig::default()
        }
    }

    pub fn max_events_per_day(n: usize) -> CalendarConfig {
        let mut config = sunday_start();
        config.month_grid_options.n_events_per_day = n;
        config
    }
}
