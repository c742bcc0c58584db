//! Loading and atomically replacing the roster file.
//!
//! Each record holds `index, last_name, first_name, count_called,
//! count_failed, count_absent`. Saving writes `<path>.new`, drops any old
//! `<path>.bak`, moves the live file to `<path>.bak`, then moves `<path>.new`
//! into place. At every step either the old roster or the new one is intact
//! on disk.

use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use socrate_core::{Roster, RosterEntry};
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};
use crate::fs::{FileSystem, StdFs};
use crate::record::{self, Record};

/// Number of fields in a roster record.
pub const FIELD_COUNT: usize = 6;

/// Default roster file name.
pub const DEFAULT_ROSTER_PATH: &str = "socrate.txt";

/// Where the roster lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// The live roster file.
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ROSTER_PATH)
    }
}

impl StoreConfig {
    /// Store the roster at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<path>.new`, the file the next version is written to.
    pub fn temp_path(&self) -> PathBuf {
        with_suffix(&self.path, ".new")
    }

    /// `<path>.bak`, the previous version.
    pub fn backup_path(&self) -> PathBuf {
        with_suffix(&self.path, ".bak")
    }
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

/// Reads and writes one roster file.
#[derive(Debug, Clone)]
pub struct RosterStore<F = StdFs> {
    config: StoreConfig,
    fs: F,
}

impl RosterStore<StdFs> {
    /// A store backed by the real filesystem.
    pub fn new(config: StoreConfig) -> Self {
        Self::with_fs(config, StdFs)
    }
}

impl<F: FileSystem> RosterStore<F> {
    /// A store backed by a custom filesystem.
    pub fn with_fs(config: StoreConfig, fs: F) -> Self {
        Self { config, fs }
    }

    /// The store configuration.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// The live roster path.
    pub fn path(&self) -> &Path {
        &self.config.path
    }

    /// Read and parse the roster file.
    ///
    /// Fails without touching the filesystem further if any record is
    /// malformed, a counter is not a number, an index repeats, or the file
    /// holds no records.
    pub fn load(&self) -> StoreResult<Roster> {
        let path = self.path();
        let text = self
            .fs
            .read_to_string(path)
            .map_err(|e| StoreError::io("read", path, e))?;
        let roster = parse_roster(&text, path)?;
        info!(path = %path.display(), entries = roster.len(), "loaded roster");
        Ok(roster)
    }

    /// The `.bak` or `.new` file left by an interrupted save, if the live
    /// file is missing while one of them survives.
    pub fn leftover(&self) -> StoreResult<Option<PathBuf>> {
        let live = self.path();
        if self.exists(live)? {
            return Ok(None);
        }
        for candidate in [self.config.backup_path(), self.config.temp_path()] {
            if self.exists(&candidate)? {
                return Ok(Some(candidate));
            }
        }
        Ok(None)
    }

    /// Atomically replace the roster file with `roster`.
    ///
    /// Refuses to run when the live file is missing but a `.bak` or `.new`
    /// from an interrupted save is present, since the next steps would
    /// overwrite the only remaining copy.
    pub fn persist(&self, roster: &Roster) -> StoreResult<()> {
        let live = self.path();
        let temp = self.config.temp_path();
        let backup = self.config.backup_path();

        let live_present = self.exists(live)?;
        let leftover = if live_present { None } else { self.leftover()? };
        if let Some(leftover) = leftover {
            return Err(StoreError::Interrupted {
                path: live.to_path_buf(),
                leftover,
            });
        }

        if let Err(e) = self.fs.write_synced(&temp, serialize(roster).as_bytes()) {
            self.fs.remove_file(&temp).ok();
            return Err(StoreError::io("write", temp, e));
        }

        match self.fs.remove_file(&backup) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(StoreError::io("remove", backup, e)),
        }

        if live_present {
            self.fs
                .rename(live, &backup)
                .map_err(|e| StoreError::io("back up", live, e))?;
        } else {
            debug!(path = %live.display(), "no live roster to back up");
        }

        self.fs
            .rename(&temp, live)
            .map_err(|e| StoreError::io("replace", live, e))?;

        info!(path = %live.display(), entries = roster.len(), "persisted roster");
        Ok(())
    }

    fn exists(&self, path: &Path) -> StoreResult<bool> {
        self.fs
            .exists(path)
            .map_err(|e| StoreError::io("check", path, e))
    }
}

/// Parse roster text. `path` is only used in error messages.
pub fn parse_roster(text: &str, path: &Path) -> StoreResult<Roster> {
    let records = record::parse(text).map_err(|e| StoreError::UnterminatedQuote {
        path: path.to_path_buf(),
        line: e.line,
    })?;

    let entries = records
        .iter()
        .map(|r| entry_from_record(r, path))
        .collect::<StoreResult<Vec<_>>>()?;

    Roster::new(entries).map_err(|source| StoreError::InvalidRoster {
        path: path.to_path_buf(),
        source,
    })
}

fn entry_from_record(record: &Record, path: &Path) -> StoreResult<RosterEntry> {
    let fields = &record.fields;
    if fields.len() != FIELD_COUNT {
        return Err(StoreError::FieldCount {
            path: path.to_path_buf(),
            line: record.line,
            expected: FIELD_COUNT,
            found: fields.len(),
        });
    }

    let number = |i: usize, field: &'static str| -> StoreResult<u32> {
        fields[i]
            .trim()
            .parse()
            .map_err(|_| StoreError::InvalidNumber {
                path: path.to_path_buf(),
                line: record.line,
                field,
                value: fields[i].clone(),
            })
    };

    Ok(
        RosterEntry::new(number(0, "index")?, fields[1].as_str(), fields[2].as_str()).with_counts(
            number(3, "count_called")?,
            number(4, "count_failed")?,
            number(5, "count_absent")?,
        ),
    )
}

/// Serialize a roster in file order.
pub fn serialize(roster: &Roster) -> String {
    let mut out = String::new();
    for e in roster {
        record::write(
            &mut out,
            &[
                e.index.to_string(),
                e.last_name.clone(),
                e.first_name.clone(),
                e.count_called.to_string(),
                e.count_failed.to_string(),
                e.count_absent.to_string(),
            ],
        );
    }
    out
}
