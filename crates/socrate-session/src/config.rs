//! Configuration for a session run.

use std::path::PathBuf;

use socrate_store::StoreConfig;

use crate::outcome::CallPolicy;

/// Configuration for a session.
#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    /// Where the roster is loaded from and persisted to.
    pub store: StoreConfig,
    /// RNG seed for reproducible draws. Seeded from the OS when unset.
    pub seed: Option<u64>,
    /// Skip members already called on this run until everyone has had a turn.
    pub exclusion: bool,
    /// Which outcomes count as calls.
    pub call_policy: CallPolicy,
}

impl SessionConfig {
    /// Interactive defaults: exclusion on, answered outcomes count as calls.
    pub fn interactive() -> Self {
        Self {
            exclusion: true,
            ..Self::default()
        }
    }

    /// Batch defaults: repeats allowed within the run.
    pub fn batch() -> Self {
        Self {
            exclusion: false,
            ..Self::default()
        }
    }

    /// Set the roster file.
    pub fn with_roster_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.store = StoreConfig::new(path);
        self
    }

    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Turn per-run exclusion on or off.
    pub fn with_exclusion(mut self, exclusion: bool) -> Self {
        self.exclusion = exclusion;
        self
    }

    /// Set the call policy.
    pub fn with_call_policy(mut self, policy: CallPolicy) -> Self {
        self.call_policy = policy;
        self
    }
}
