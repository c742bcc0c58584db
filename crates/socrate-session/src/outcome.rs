//! Call outcomes and how they update a member's history.

use serde::{Deserialize, Serialize};
use socrate_core::RosterEntry;

/// How a called-on member responded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Answered.
    Ok,
    /// Not present.
    Absent,
    /// Present but could not answer.
    Failed,
}

impl Outcome {
    /// Parse a console word: `ok`, `absent`, `failed` (and short forms).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "ok" | "o" | "yes" => Some(Self::Ok),
            "absent" | "a" => Some(Self::Absent),
            "failed" | "fail" | "f" => Some(Self::Failed),
            _ => None,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ok => write!(f, "ok"),
            Self::Absent => write!(f, "absent"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// Which outcomes count as having been called on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CallPolicy {
    /// `ok` and `failed` count as calls; `absent` only records the absence.
    #[default]
    Answered,
    /// Every outcome counts as a call, including `absent`.
    EverySelection,
}

impl CallPolicy {
    /// Apply `outcome` to `entry`'s counters.
    pub fn apply(self, outcome: Outcome, entry: &mut RosterEntry) {
        match outcome {
            Outcome::Ok => entry.mark_called(),
            Outcome::Failed => {
                entry.mark_called();
                entry.mark_failed();
            }
            Outcome::Absent => {
                if self == Self::EverySelection {
                    entry.mark_called();
                }
                entry.mark_absent();
            }
        }
    }
}
