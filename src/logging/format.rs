//! Column-aligned record formatting
//!
//! A record renders as
//! `date | identifier | file:line | LEVEL | message`, each column padded to
//! the widths reconciled by the manager.

use std::panic::Location;
use std::path::Path;

use chrono::{DateTime, Local};

use crate::config::Widths;
use crate::severity::Severity;
use crate::theme::{ColorTheme, Palette};

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const SEPARATOR: &str = " | ";

/// A single log record, borrowed from the call site
#[derive(Debug, Clone)]
pub struct Record<'a> {
    pub timestamp: DateTime<Local>,
    pub severity: Severity,
    /// File name of the call site, without directories
    pub file: &'a str,
    pub line: u32,
    pub message: &'a str,
}

impl<'a> Record<'a> {
    /// Create a record stamped with the current local time
    pub fn new(severity: Severity, location: &'a Location<'a>, message: &'a str) -> Self {
        Self {
            timestamp: Local::now(),
            severity,
            file: short_file_name(location.file()),
            line: location.line(),
            message,
        }
    }
}

fn short_file_name(path: &str) -> &str {
    Path::new(path)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(path)
}

/// Formatter bound to one sink
///
/// Rebuilt whenever the owning logger's identifier, widths or theme change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFormatter {
    identifier: String,
    widths: Widths,
    palette: Option<Palette>,
}

impl RecordFormatter {
    /// Create a formatter; `theme` is `None` for uncolored output
    pub fn new(identifier: impl Into<String>, widths: Widths, theme: Option<ColorTheme>) -> Self {
        Self {
            identifier: identifier.into(),
            widths,
            palette: theme.map(|t| t.palette()),
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn widths(&self) -> Widths {
        self.widths
    }

    /// Render a record as one line, without the trailing newline
    pub fn format(&self, record: &Record<'_>) -> String {
        let date = record.timestamp.format(DATE_FORMAT).to_string();
        let identifier = pad(&self.identifier, self.widths.identifier);
        let level = pad(record.severity.as_str(), self.widths.level);
        let line = record.line.to_string();
        let location_len = record.file.chars().count() + 1 + line.len();
        let location_pad = " ".repeat(self.widths.location.saturating_sub(location_len));

        match &self.palette {
            None => [
                date,
                identifier,
                format!("{}:{}{}", record.file, line, location_pad),
                level,
                record.message.to_string(),
            ]
            .join(SEPARATOR),
            Some(p) => [
                p.date.apply(date).to_string(),
                p.identifier.apply(identifier).to_string(),
                format!(
                    "{}:{}{}",
                    p.filename.apply(record.file),
                    p.lineno.apply(line),
                    location_pad
                ),
                p.level(record.severity).apply(level).to_string(),
                p.message.apply(record.message).to_string(),
            ]
            .join(SEPARATOR),
        }
    }
}

fn pad(text: &str, width: usize) -> String {
    format!("{:<width$}", text, width = width)
}
