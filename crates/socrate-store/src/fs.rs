//! The filesystem operations used by the store.
//!
//! Persistence goes through this trait so each step of the replace protocol
//! can be made to fail in tests.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

/// Filesystem primitives needed to load and atomically replace a roster.
pub trait FileSystem {
    /// Read a whole file as UTF-8.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Create (or truncate) a file, write all of `contents`, and flush it to disk.
    fn write_synced(&self, path: &Path, contents: &[u8]) -> io::Result<()>;

    /// Delete a file.
    fn remove_file(&self, path: &Path) -> io::Result<()>;

    /// Rename a file, replacing the destination.
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;

    /// Whether anything exists at `path`.
    fn exists(&self, path: &Path) -> io::Result<bool>;
}

/// The real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdFs;

impl FileSystem for StdFs {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn write_synced(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        let mut file = File::create(path)?;
        file.write_all(contents)?;
        file.sync_all()
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        fs::rename(from, to)
    }

    fn exists(&self, path: &Path) -> io::Result<bool> {
        path.try_exists()
    }
}
