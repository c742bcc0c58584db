//! Core types for socrate.
//!
//! Provides the roster model (entries, the roster itself, the per-run
//! exclusion set), the weight function that turns participation history into
//! a selection weight, and the weighted random draw over a roster.

pub mod entry;
pub mod error;
pub mod roster;
pub mod selector;
pub mod weight;

pub use entry::RosterEntry;
pub use error::{RosterError, RosterResult};
pub use roster::{ExclusionSet, Roster};
pub use selector::{Draw, draw, pick_at};
pub use weight::weight;
