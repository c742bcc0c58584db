//! Event sinks: where session log entries go.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use super::entry::LogEntry;

/// Default interactive log file name.
pub const DEFAULT_LOG_PATH: &str = "socrate-log.txt";

/// Receives one entry per session transition.
pub trait EventSink {
    /// Record an entry.
    fn record(&mut self, entry: &LogEntry) -> io::Result<()>;
}

/// Discards every entry.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn record(&mut self, _entry: &LogEntry) -> io::Result<()> {
        Ok(())
    }
}

/// A chronological in-memory log of session transitions.
#[derive(Debug, Clone, Default)]
pub struct Journal {
    entries: Vec<LogEntry>,
}

impl Journal {
    /// Create an empty journal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all entries.
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the journal is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render every entry as a log line.
    pub fn export_text(&self) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            out.push_str(&entry.to_string());
            out.push('\n');
        }
        out
    }
}

impl EventSink for Journal {
    fn record(&mut self, entry: &LogEntry) -> io::Result<()> {
        self.entries.push(entry.clone());
        Ok(())
    }
}

/// Writes each entry as a line, flushing after every write so the log
/// survives an abrupt exit.
#[derive(Debug)]
pub struct LogFile<W: Write = BufWriter<File>> {
    writer: W,
}

impl LogFile {
    /// Open `path` for appending, creating it if needed.
    pub fn append(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> LogFile<W> {
    /// Log to an arbitrary writer.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Recover the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> EventSink for LogFile<W> {
    fn record(&mut self, entry: &LogEntry) -> io::Result<()> {
        writeln!(self.writer, "{entry}")?;
        self.writer.flush()
    }
}
