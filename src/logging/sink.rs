//! Output sinks for log records
//!
//! A sink is a writer with its own minimum severity and formatter. The
//! console sink writes styled lines to stdout; the file sink appends plain
//! lines to a log file.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::{LoggerError, Result};
use crate::severity::Severity;

use super::format::{Record, RecordFormatter};

/// A destination for formatted records
pub struct Sink {
    min_level: Severity,
    formatter: RecordFormatter,
    writer: Box<dyn Write + Send>,
    /// Set for file sinks
    path: Option<PathBuf>,
}

impl Sink {
    /// Create a sink writing to stdout
    pub fn console(min_level: Severity, formatter: RecordFormatter) -> Self {
        Self::with_writer(min_level, formatter, Box::new(io::stdout()))
    }

    /// Open (or create) a log file for appending
    pub fn file(path: &Path, min_level: Severity, formatter: RecordFormatter) -> Result<Self> {
        let file = open_append(path)?;
        Ok(Self {
            min_level,
            formatter,
            writer: Box::new(file),
            path: Some(path.to_path_buf()),
        })
    }

    /// Create a sink over any writer
    pub fn with_writer(
        min_level: Severity,
        formatter: RecordFormatter,
        writer: Box<dyn Write + Send>,
    ) -> Self {
        Self {
            min_level,
            formatter,
            writer,
            path: None,
        }
    }

    pub fn min_level(&self) -> Severity {
        self.min_level
    }

    pub fn formatter(&self) -> &RecordFormatter {
        &self.formatter
    }

    /// Path of the log file, for file sinks
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Replace the formatter, keeping the underlying writer
    pub fn set_formatter(&mut self, formatter: RecordFormatter) {
        self.formatter = formatter;
    }

    /// Write a record if it passes the sink's minimum severity
    ///
    /// Returns whether the record was written.
    pub fn write_record(&mut self, record: &Record<'_>) -> io::Result<bool> {
        if record.severity < self.min_level {
            return Ok(false);
        }
        let line = self.formatter.format(record);
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(true)
    }
}

fn open_append(path: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| LoggerError::LogFile {
            path: path.to_path_buf(),
            source,
        })
}

/// Emit a record as a `tracing` event
pub fn forward_to_tracing(identifier: &str, record: &Record<'_>) {
    let severity = record.severity.as_str();
    match record.severity {
        Severity::Debug => tracing::debug!(
            logger = identifier,
            severity,
            file = record.file,
            line = record.line,
            "{}",
            record.message
        ),
        Severity::Info => tracing::info!(
            logger = identifier,
            severity,
            file = record.file,
            line = record.line,
            "{}",
            record.message
        ),
        Severity::Warning => tracing::warn!(
            logger = identifier,
            severity,
            file = record.file,
            line = record.line,
            "{}",
            record.message
        ),
        Severity::Error | Severity::Critical | Severity::Fatal => tracing::error!(
            logger = identifier,
            severity,
            file = record.file,
            line = record.line,
            "{}",
            record.message
        ),
    }
}
