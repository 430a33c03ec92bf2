// Layout errors
// Failures raised while classifying events or resolving view ranges

use thiserror::Error;

use crate::models::event::EventId;

/// Errors produced by the layout engine.
///
/// Per-event failures (`Parse`, `InvalidRange`, `Unclassifiable`) exclude only
/// the offending event from a layout pass. Range failures abort the pass.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("malformed date/time string '{value}': expected YYYY-MM-DD or YYYY-MM-DD HH:mm")]
    Parse { value: String },

    #[error("event {id} ends ({end}) before it starts ({start})")]
    InvalidRange {
        id: EventId,
        start: String,
        end: String,
    },

    #[error("event {id} matches no known duration shape ({start} - {end})")]
    Unclassifiable {
        id: EventId,
        start: String,
        end: String,
    },

    #[error("invalid pivot date '{0}'")]
    InvalidPivotDate(String),

    #[error("unknown view '{0}'")]
    UnknownView(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("event store: {0}")]
    EventStore(String),
}

pub type Result<T> = std::result::Result<T, LayoutError>;
