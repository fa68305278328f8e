//! Severity levels owned by logwarden
//!
//! `Fatal` sits above `Critical` as its own level. External primitives are
//! reached through the explicit mapping in [`Severity::tracing_level`].

use serde::{Deserialize, Serialize};

use crate::error::LoggerError;

/// Ordered log importance
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Severity {
    #[default]
    Debug,
    Info,
    Warning,
    Error,
    Critical,
    Fatal,
}

impl Severity {
    /// All severities from least to most severe
    pub const ALL: [Severity; 6] = [
        Severity::Debug,
        Severity::Info,
        Severity::Warning,
        Severity::Error,
        Severity::Critical,
        Severity::Fatal,
    ];

    /// Get the label printed in the level column
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
            Severity::Critical => "CRITICAL",
            Severity::Fatal => "FATAL",
        }
    }

    /// Parse a severity name, case-insensitively
    pub fn try_parse(name: &str) -> Result<Self, LoggerError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(Severity::Debug),
            "info" => Ok(Severity::Info),
            "warning" | "warn" => Ok(Severity::Warning),
            "error" => Ok(Severity::Error),
            "critical" => Ok(Severity::Critical),
            "fatal" => Ok(Severity::Fatal),
            _ => Err(LoggerError::InvalidSeverity(name.to_string())),
        }
    }

    /// Level used when forwarding to `tracing`
    ///
    /// `tracing` tops out at ERROR, so the three most severe levels share it.
    pub fn tracing_level(&self) -> tracing::Level {
        match self {
            Severity::Debug => tracing::Level::DEBUG,
            Severity::Info => tracing::Level::INFO,
            Severity::Warning => tracing::Level::WARN,
            Severity::Error | Severity::Critical | Severity::Fatal => tracing::Level::ERROR,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<tracing::Level> for Severity {
    fn from(level: tracing::Level) -> Self {
        match level {
            tracing::Level::TRACE | tracing::Level::DEBUG => Severity::Debug,
            tracing::Level::INFO => Severity::Info,
            tracing::Level::WARN => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

impl From<String> for Severity {
    fn from(s: String) -> Self {
        Severity::try_parse(&s).unwrap_or_else(|_| {
            let fallback = Severity::default();
            tracing::warn!(
                "{}",
                LoggerError::ConfigurationDefault {
                    field: "severity",
                    value: s,
                    default: fallback.as_str().to_string(),
                }
            );
            fallback
        })
    }
}

impl From<Severity> for String {
    fn from(severity: Severity) -> Self {
        severity.as_str().to_string()
    }
}
