//! Session control for socrate.
//!
//! A [`SessionController`] owns the roster for one run: it draws members,
//! applies call outcomes, records every transition to an event log, and
//! persists the roster at close. Two front-ends drive it: the batch driver
//! (N callouts up front) and the console driver (one action per command).

pub mod batch;
pub mod config;
pub mod console;
pub mod error;
pub mod journal;
pub mod outcome;
pub mod session;

pub use config::SessionConfig;
pub use console::{Console, ConsoleAction};
pub use error::{SessionError, SessionResult};
pub use journal::{EventSink, Journal, LogEntry, LogEvent, LogFile, NullSink};
pub use outcome::{CallPolicy, Outcome};
pub use session::{Callout, SessionController, SessionState};
