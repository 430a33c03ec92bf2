// Calendar Layout Library
// Exports all modules for testing and reuse

pub mod error;
pub mod models;
pub mod services;
pub mod utils;

pub use error::{LayoutError, Result};
pub use models::event::{CalendarEvent, CalendarEventInternal, EventId, EventShape};
pub use models::layout::{LayoutSnapshot, ViewLayout};
pub use models::settings::CalendarConfig;
pub use services::app::CalendarApp;
pub use services::layout::{compute_layout, LayoutInput};
