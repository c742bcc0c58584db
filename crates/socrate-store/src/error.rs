//! Error types for roster loading and persistence.

use std::io;
use std::path::PathBuf;

use socrate_core::RosterError;
use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised while reading, parsing, or writing a roster file.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A record did not have exactly six fields.
    #[error("{}:{line}: expected {expected} fields, found {found}", .path.display())]
    FieldCount {
        /// The roster file.
        path: PathBuf,
        /// 1-based line the record starts on.
        line: usize,
        /// Required field count.
        expected: usize,
        /// Fields actually present.
        found: usize,
    },

    /// A numeric field did not parse as a non-negative integer.
    #[error("{}:{line}: invalid {field} '{value}'", .path.display())]
    InvalidNumber {
        /// The roster file.
        path: PathBuf,
        /// 1-based line the record starts on.
        line: usize,
        /// Name of the offending field.
        field: &'static str,
        /// The raw field text.
        value: String,
    },

    /// A quoted field was still open at end of input.
    #[error("{}:{line}: unterminated quoted field", .path.display())]
    UnterminatedQuote {
        /// The roster file.
        path: PathBuf,
        /// 1-based line the record starts on.
        line: usize,
    },

    /// The parsed records do not form a valid roster.
    #[error("{}: {source}", .path.display())]
    InvalidRoster {
        /// The roster file.
        path: PathBuf,
        /// What was wrong with the roster.
        source: RosterError,
    },

    /// The live file is gone but a backup or pending copy is still on disk.
    #[error(
        "{} is missing but {} exists; an earlier save was interrupted, restore it before saving",
        .path.display(),
        .leftover.display()
    )]
    Interrupted {
        /// The live roster file.
        path: PathBuf,
        /// The surviving `.bak` or `.new` file.
        leftover: PathBuf,
    },

    /// A filesystem operation failed.
    #[error("cannot {action} {}: {source}", .path.display())]
    Io {
        /// What was being attempted.
        action: &'static str,
        /// The file involved.
        path: PathBuf,
        /// The underlying error.
        source: io::Error,
    },
}

impl StoreError {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            action,
            path: path.into(),
            source,
        }
    }
}
