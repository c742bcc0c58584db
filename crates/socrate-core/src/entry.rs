//! Roster entries: one record per roster member.

use serde::{Deserialize, Serialize};

use crate::weight::weight;

/// One member of the roster and their participation history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    /// Identifier, unique within the roster and stable across sessions.
    pub index: u32,
    /// Family name.
    pub last_name: String,
    /// Given name.
    pub first_name: String,
    /// Times this member has been called on.
    pub count_called: u32,
    /// Times this member failed to answer when called on.
    pub count_failed: u32,
    /// Times this member was marked absent.
    pub count_absent: u32,
}

impl RosterEntry {
    /// Create an entry with no participation history.
    pub fn new(index: u32, last_name: impl Into<String>, first_name: impl Into<String>) -> Self {
        Self {
            index,
            last_name: last_name.into(),
            first_name: first_name.into(),
            count_called: 0,
            count_failed: 0,
            count_absent: 0,
        }
    }

    /// Set all three counters at once.
    pub fn with_counts(mut self, called: u32, failed: u32, absent: u32) -> Self {
        self.count_called = called;
        self.count_failed = failed;
        self.count_absent = absent;
        self
    }

    /// Current selection weight, always derived from the counters.
    pub fn weight(&self) -> f64 {
        weight(self.count_called, self.count_failed, self.count_absent)
    }

    /// `"First Last"`.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Record that this member was called on.
    pub fn mark_called(&mut self) {
        self.count_called = self.count_called.saturating_add(1);
    }

    /// Record a failed answer.
    pub fn mark_failed(&mut self) {
        self.count_failed = self.count_failed.saturating_add(1);
    }

    /// Record an absence.
    pub fn mark_absent(&mut self) {
        self.count_absent = self.count_absent.saturating_add(1);
    }
}

/// Log-facing form: `First Last (index)`.
impl std::fmt::Display for RosterEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} ({})", self.first_name, self.last_name, self.index)
    }
}
