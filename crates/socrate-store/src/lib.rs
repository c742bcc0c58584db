//! Roster persistence for socrate.
//!
//! Reads and writes the roster file (one CSV record per member) and replaces
//! it atomically, keeping the previous version as `<path>.bak`.

pub mod error;
pub mod fs;
pub mod record;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use fs::{FileSystem, StdFs};
pub use store::{RosterStore, StoreConfig};
