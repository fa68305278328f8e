//! Disk usage monitoring for a log directory
//!
//! Measures the free space on the volume holding a logger's directory and
//! evicts whole log files, oldest first, until the configured free-space
//! threshold is met. Eviction approximates LRU by write time; files are never
//! truncated.

mod probe;

pub use probe::{SpaceProbe, VolumeProbe};

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use crate::config::{MonitorPolicy, LOG_EXTENSION};
use crate::error::{LoggerError, Result};

/// Where the monitor sends its reports
pub trait MonitorChannel {
    fn info(&self, message: &str);
    fn warning(&self, message: &str);

    /// Bytes the channel's sweep reports may add to the monitored volume
    ///
    /// Eviction keeps this much space on top of the threshold, so that
    /// reporting a sweep cannot push free space back under it.
    fn reserve_bytes(&self) -> u64 {
        0
    }
}

/// Snapshot of the log directory and its volume
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiskUsage {
    /// Free bytes on the volume
    pub free_bytes: u64,
    /// Bytes used by log files in the directory
    pub used_bytes: u64,
    /// Number of log files in the directory
    pub file_count: usize,
}

/// A log file considered for eviction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFile {
    pub path: PathBuf,
    pub size: u64,
    pub modified: SystemTime,
}

/// Outcome of one eviction sweep
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanupReport {
    /// Deleted files, oldest first
    pub deleted: Vec<PathBuf>,
    /// Files whose deletion failed
    pub failed: usize,
    /// Free bytes on the volume after the sweep
    pub free_bytes: u64,
    /// Whether the free-space threshold is met after the sweep
    pub threshold_met: bool,
}

/// Eviction monitor bound to one log directory
#[derive(Clone)]
pub struct DiskMonitor {
    directory: PathBuf,
    policy: MonitorPolicy,
    probe: Arc<dyn SpaceProbe>,
    /// File the owning logger is appending to; never evicted
    protected: Option<PathBuf>,
}

impl std::fmt::Debug for DiskMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiskMonitor")
            .field("directory", &self.directory)
            .field("policy", &self.policy)
            .field("protected", &self.protected)
            .finish_non_exhaustive()
    }
}

impl DiskMonitor {
    /// Create a monitor using the operating system's free-space query
    pub fn new(directory: impl Into<PathBuf>, policy: MonitorPolicy) -> Self {
        Self {
            directory: directory.into(),
            policy,
            probe: Arc::new(VolumeProbe),
            protected: None,
        }
    }

    /// Use a different free-space source
    pub fn with_probe(mut self, probe: Arc<dyn SpaceProbe>) -> Self {
        self.probe = probe;
        self
    }

    /// Never evict this file
    pub fn with_protected(mut self, path: Option<PathBuf>) -> Self {
        self.protected = path;
        self
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn policy(&self) -> &MonitorPolicy {
        &self.policy
    }

    fn unavailable(&self, source: io::Error) -> LoggerError {
        LoggerError::FilesystemUnavailable {
            path: self.directory.clone(),
            source,
        }
    }

    fn free_bytes(&self) -> Result<u64> {
        self.probe
            .free_bytes(&self.directory)
            .map_err(|e| self.unavailable(e))
    }

    /// List log files, oldest first, ties broken by file name
    pub fn log_files(&self) -> Result<Vec<LogFile>> {
        let entries = fs::read_dir(&self.directory).map_err(|e| self.unavailable(e))?;

        let mut files = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(LOG_EXTENSION) {
                continue;
            }
            let Ok(metadata) = entry.metadata() else {
                continue;
            };
            if !metadata.is_file() {
                continue;
            }
            files.push(LogFile {
                path,
                size: metadata.len(),
                modified: metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH),
            });
        }

        files.sort_by(|a, b| {
            a.modified
                .cmp(&b.modified)
                .then_with(|| a.path.file_name().cmp(&b.path.file_name()))
        });
        Ok(files)
    }

    /// Measure the volume's free space and the space used by log files
    pub fn measure(&self) -> Result<DiskUsage> {
        let metadata = fs::metadata(&self.directory).map_err(|e| self.unavailable(e))?;
        if !metadata.is_dir() {
            return Err(self.unavailable(io::Error::other("not a directory")));
        }

        let files = self.log_files()?;
        Ok(DiskUsage {
            free_bytes: self.free_bytes()?,
            used_bytes: files.iter().map(|f| f.size).sum(),
            file_count: files.len(),
        })
    }

    /// Report disk usage through the channel's info output
    ///
    /// Does nothing and returns `Ok(None)` unless display monitoring is on.
    pub fn display_monitoring(&self, channel: &dyn MonitorChannel) -> Result<Option<DiskUsage>> {
        if !self.policy.display_monitoring.value() {
            return Ok(None);
        }

        let usage = self.measure()?;
        let unit = self.policy.unit.value();
        channel.info(&format!(
            "Disk monitoring {}: {:.2} {unit} free, logs use {:.2} {unit} in {} file(s), threshold {} {unit}",
            self.directory.display(),
            unit.convert(usage.free_bytes),
            unit.convert(usage.used_bytes),
            usage.file_count,
            self.policy.threshold.value(),
        ));
        Ok(Some(usage))
    }

    /// Delete log files, oldest first, until the free-space threshold is met
    ///
    /// Sweeping stops once free space also covers the channel's
    /// [`reserve_bytes`](MonitorChannel::reserve_bytes). Does nothing and
    /// returns `Ok(None)` unless files monitoring is on. A file that cannot
    /// be deleted is reported and skipped.
    pub fn clean_logs(&self, channel: &dyn MonitorChannel) -> Result<Option<CleanupReport>> {
        if !self.policy.files_monitoring.value() {
            return Ok(None);
        }

        let threshold = self.policy.threshold_bytes();
        let target = threshold.saturating_add(channel.reserve_bytes());
        let mut report = CleanupReport {
            free_bytes: self.measure()?.free_bytes,
            ..CleanupReport::default()
        };

        if report.free_bytes < threshold {
            for file in self.log_files()? {
                if self.protected.as_ref() == Some(&file.path) {
                    continue;
                }

                if let Err(source) = fs::remove_file(&file.path) {
                    let err = LoggerError::FileDeletionFailed {
                        path: file.path,
                        source,
                    };
                    channel.warning(&err.to_string());
                    report.failed += 1;
                    continue;
                }

                tracing::debug!("Evicted log file {}", file.path.display());
                report.deleted.push(file.path);

                report.free_bytes = self.free_bytes()?;
                if report.free_bytes >= target {
                    break;
                }
            }
        }

        report.threshold_met = report.free_bytes >= threshold;

        let unit = self.policy.unit.value();
        if !report.deleted.is_empty() {
            channel.info(&format!(
                "Deleted {} old log file(s) from {}, {:.2} {unit} free",
                report.deleted.len(),
                self.directory.display(),
                unit.convert(report.free_bytes),
            ));
        }
        if !report.threshold_met {
            channel.warning(&format!(
                "Free space {:.2} {unit} is still below the {} {unit} threshold, no log files left to delete",
                unit.convert(report.free_bytes),
                self.policy.threshold.value(),
            ));
        }

        Ok(Some(report))
    }
}
