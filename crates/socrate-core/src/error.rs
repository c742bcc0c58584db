//! Error types for the roster model and selector.

use thiserror::Error;

/// Result type for roster operations.
pub type RosterResult<T> = Result<T, RosterError>;

/// Errors that can occur while building a roster or drawing from it.
#[derive(Debug, Error, PartialEq)]
pub enum RosterError {
    /// The roster has no entries to draw from.
    #[error("roster is empty")]
    EmptyRoster,

    /// Two entries share the same index.
    #[error("duplicate roster index {0}")]
    DuplicateIndex(u32),

    /// No entry with the given index exists.
    #[error("no roster entry with index {0}")]
    UnknownIndex(u32),

    /// A draw target fell outside `[0, total_weight)`.
    ///
    /// The target and the total were computed over different eligible sets,
    /// which is a defect in the caller.
    #[error("draw target {target} outside [0, {total})")]
    TargetOutOfRange {
        /// The requested target.
        target: f64,
        /// The total weight of the eligible entries.
        total: f64,
    },
}
