//! Observable events
//!
//! Every log line names one of these events. Events are explicit and typed.

use std::fmt;

/// Observable events in the query service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Lifecycle
    /// Configuration loaded
    ConfigLoaded,
    /// Dataset loaded into memory
    DatasetLoaded,
    /// Dataset could not be loaded
    DatasetLoadFailed,
    /// HTTP listener bound, ready to serve
    Serving,

    // Query operations
    /// Query completed
    QueryExecuted,
    /// Query rejected before reaching the engine
    QueryRejected,
    /// Lookup by id found nothing
    RecordNotFound,
}

impl Event {
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::DatasetLoaded => "DATASET_LOADED",
            Event::DatasetLoadFailed => "DATASET_LOAD_FAILED",
            Event::Serving => "SERVER_STARTED",
            Event::QueryExecuted => "QUERY_EXECUTED",
            Event::QueryRejected => "REQUEST_REJECTED",
            Event::RecordNotFound => "RECORD_NOT_FOUND",
        }
    }

    /// Whether the process cannot continue after this event
    pub fn is_fatal(&self) -> bool {
        matches!(self, Event::DatasetLoadFailed)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
