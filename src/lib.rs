//! logwarden - coordinated loggers with disk-usage monitoring
//!
//! Loggers register with a [`LoggerManager`] that keeps their columns
//! aligned, their identifiers unique and lets a single logger evict old log
//! files when the volume runs low on space.

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod logging;
pub mod manager;
pub mod monitor;
pub mod severity;
pub mod theme;
pub mod units;

#[cfg(test)]
mod test_support;

pub use config::{LoggerConfig, LoggerOptions, ManagerSettings, Setting};
pub use error::{LoggerError, Result};
pub use logging::{Logger, LoggerId, MonitoringState, TimeGuard};
pub use manager::LoggerManager;
pub use monitor::{CleanupReport, DiskMonitor, DiskUsage, MonitorChannel, SpaceProbe, VolumeProbe};
pub use severity::Severity;
pub use theme::ColorTheme;
pub use units::Unit;
