//! Observability
//!
//! Structured JSON logging of typed events.
//!
//! # Principles
//!
//! 1. One log line = one event
//! 2. Deterministic key ordering
//! 3. Logging never changes query results
//!
//! # Usage
//!
//! ```ignore
//! use datatable::observability::{Event, Logger};
//!
//! Logger::event(Event::QueryExecuted, &[("total", "42")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};
