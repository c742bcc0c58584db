//! Error types for session control.

use std::io;

use thiserror::Error;

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Errors that can occur during a session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// An outcome was given while nobody was called on.
    #[error("nobody has been called on")]
    NoPendingCallout,

    /// Unknown console command.
    #[error("unknown command: {0} (try 'help')")]
    UnknownCommand(String),

    /// Writing the event log failed.
    #[error("cannot write session log: {0}")]
    Log(#[from] io::Error),

    /// Roster model error.
    #[error("{0}")]
    Roster(#[from] socrate_core::RosterError),

    /// Roster file error.
    #[error("{0}")]
    Store(#[from] socrate_store::StoreError),
}
