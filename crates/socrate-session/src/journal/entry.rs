//! Log entry types.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::outcome::Outcome;

/// Timestamp layout used in log lines.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A session transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogEvent {
    /// The roster was loaded and the session began.
    Started,
    /// A member was called on.
    Called,
    /// The called-on member's outcome was recorded.
    Resolved(Outcome),
    /// The session closed and the roster was persisted.
    Finished,
}

impl std::fmt::Display for LogEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Started => write!(f, "started"),
            Self::Called => write!(f, "called"),
            Self::Resolved(outcome) => write!(f, "{outcome}"),
            Self::Finished => write!(f, "finished"),
        }
    }
}

/// One line of the event log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    /// When the transition happened.
    pub timestamp: DateTime<Local>,
    /// What happened.
    pub event: LogEvent,
    /// Display form of the member involved, e.g. `Ada Lovelace (1)`.
    pub subject: Option<String>,
}

impl LogEntry {
    /// An entry stamped with the current time.
    pub fn now(event: LogEvent, subject: Option<String>) -> Self {
        Self {
            timestamp: Local::now(),
            event,
            subject,
        }
    }
}

/// `<timestamp>: <event>` followed by ` <subject>` when there is one.
impl std::fmt::Display for LogEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {}",
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.event
        )?;
        if let Some(subject) = &self.subject {
            write!(f, " {subject}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at_noon(event: LogEvent, subject: Option<&str>) -> LogEntry {
        LogEntry {
            timestamp: Local.with_ymd_and_hms(2011, 9, 26, 12, 0, 5).unwrap(),
            event,
            subject: subject.map(str::to_string),
        }
    }

    #[test]
    fn event_names() {
        assert_eq!(LogEvent::Started.to_string(), "started");
        assert_eq!(LogEvent::Called.to_string(), "called");
        assert_eq!(LogEvent::Resolved(Outcome::Absent).to_string(), "absent");
        assert_eq!(LogEvent::Finished.to_string(), "finished");
    }

    #[test]
    fn line_with_subject() {
        let entry = at_noon(LogEvent::Called, Some("Ada Lovelace (1)"));
        assert_eq!(entry.to_string(), "2011-09-26 12:00:05: called Ada Lovelace (1)");
    }

    #[test]
    fn line_without_subject() {
        let entry = at_noon(LogEvent::Started, None);
        assert_eq!(entry.to_string(), "2011-09-26 12:00:05: started");
    }

    #[test]
    fn entry_serializes() {
        let entry = at_noon(LogEvent::Resolved(Outcome::Failed), Some("Ada Lovelace (1)"));
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["event"]["resolved"], "failed");
        assert_eq!(json["subject"], "Ada Lovelace (1)");
        let back: LogEntry = serde_json::from_value(json).unwrap();
        assert_eq!(back.event, entry.event);
        assert_eq!(back.timestamp, entry.timestamp);
    }
}
