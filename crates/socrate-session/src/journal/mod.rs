//! Event log for session transitions.

pub mod entry;
pub mod log;

pub use entry::{LogEntry, LogEvent};
pub use log::{EventSink, Journal, LogFile, NullSink};
