pub mod batch;
pub mod init;
pub mod roster;
pub mod session;

use std::path::Path;

use socrate_core::Roster;
use socrate_store::{RosterStore, StoreConfig};

/// Load a roster without starting a session.
fn load_roster(path: &Path) -> Result<Roster, String> {
    RosterStore::new(StoreConfig::new(path))
        .load()
        .map_err(|e| e.to_string())
}
