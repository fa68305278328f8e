//! Configuration model for loggers and the logger manager
//!
//! Every logger field is a [`Setting`], which remembers whether the caller
//! supplied it or whether it still holds the factory default. The manager
//! only ever overwrites defaulted settings.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::severity::Severity;
use crate::theme::ColorTheme;
use crate::units::Unit;

/// Identifier given to loggers that were not named
pub const DEFAULT_IDENTIFIER: &str = "Logger";
/// Default width of the identifier column
pub const DEFAULT_IDENTIFIER_WIDTH: usize = 10;
/// Default width of the `file:line` column
pub const DEFAULT_LOCATION_WIDTH: usize = 20;
/// Default width of the level column ("CRITICAL" fits)
pub const DEFAULT_LEVEL_WIDTH: usize = 8;
/// Default free-space threshold, in [`DEFAULT_UNIT`]
pub const DEFAULT_THRESHOLD: u64 = 1;
/// Default threshold unit
pub const DEFAULT_UNIT: Unit = Unit::Giga;
/// Extension of the files written and evicted by loggers
pub const LOG_EXTENSION: &str = "log";

/// A configuration value that knows whether the caller set it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Setting<T> {
    /// Still the factory default, or inherited from the manager
    Defaulted(T),
    /// Supplied by the caller, even if equal to the default
    Explicit(T),
}

impl<T> Setting<T> {
    /// Get the current value
    pub fn get(&self) -> &T {
        match self {
            Setting::Defaulted(v) | Setting::Explicit(v) => v,
        }
    }

    /// Check if the caller supplied this value
    pub fn is_explicit(&self) -> bool {
        matches!(self, Setting::Explicit(_))
    }

    /// Set the value explicitly
    pub fn set(&mut self, value: T) {
        *self = Setting::Explicit(value);
    }

    /// Replace the value, keeping whether it was explicit
    pub fn replace(&mut self, value: T) {
        match self {
            Setting::Defaulted(v) | Setting::Explicit(v) => *v = value,
        }
    }

    /// Replace the value only if it is still defaulted
    ///
    /// Returns true if the value was replaced.
    pub fn inherit(&mut self, value: T) -> bool {
        if self.is_explicit() {
            return false;
        }
        *self = Setting::Defaulted(value);
        true
    }

    /// Consume the setting, returning its value
    pub fn into_inner(self) -> T {
        match self {
            Setting::Defaulted(v) | Setting::Explicit(v) => v,
        }
    }
}

impl<T: Copy> Setting<T> {
    /// Get a copy of the current value
    pub fn value(&self) -> T {
        *self.get()
    }
}

impl<T: Ord + Copy> Setting<T> {
    /// Grow the value to at least `other`, keeping its tag
    pub fn widen(&mut self, other: T) {
        let widened = self.value().max(other);
        self.replace(widened);
    }
}

impl<T: Default> Default for Setting<T> {
    fn default() -> Self {
        Setting::Defaulted(T::default())
    }
}

/// Per-sink severity filtering and sink enablement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelPolicy {
    /// Minimum severity printed to the console
    pub print_level: Setting<Severity>,
    /// Minimum severity written to the log file
    pub file_level: Setting<Severity>,
    /// Whether the console sink is enabled
    pub print_log: Setting<bool>,
    /// Whether the file sink is enabled
    pub write_to_file: Setting<bool>,
    /// Severity of call and timing records
    pub decorator_level: Setting<Severity>,
}

impl Default for LevelPolicy {
    fn default() -> Self {
        Self {
            print_level: Setting::Defaulted(Severity::Debug),
            file_level: Setting::Defaulted(Severity::Debug),
            print_log: Setting::Defaulted(true),
            write_to_file: Setting::Defaulted(true),
            decorator_level: Setting::Defaulted(Severity::Debug),
        }
    }
}

/// Column widths used to align records across loggers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementPolicy {
    pub identifier_width: Setting<usize>,
    /// Width of the `file:line` column
    pub location_width: Setting<usize>,
    pub level_width: Setting<usize>,
}

impl Default for PlacementPolicy {
    fn default() -> Self {
        Self {
            identifier_width: Setting::Defaulted(DEFAULT_IDENTIFIER_WIDTH),
            location_width: Setting::Defaulted(DEFAULT_LOCATION_WIDTH),
            level_width: Setting::Defaulted(DEFAULT_LEVEL_WIDTH),
        }
    }
}

impl PlacementPolicy {
    /// Current widths as plain values
    pub fn widths(&self) -> Widths {
        Widths {
            identifier: self.identifier_width.value(),
            location: self.location_width.value(),
            level: self.level_width.value(),
        }
    }
}

/// Plain column widths, as consumed by the formatter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Widths {
    pub identifier: usize,
    pub location: usize,
    pub level: usize,
}

/// Disk monitoring switches and free-space threshold
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorPolicy {
    /// Report disk usage through the info channel
    pub display_monitoring: Setting<bool>,
    /// Evict old log files until the threshold is met
    pub files_monitoring: Setting<bool>,
    /// Free space to keep on the volume, in `unit`
    pub threshold: Setting<u64>,
    pub unit: Setting<Unit>,
}

impl Default for MonitorPolicy {
    fn default() -> Self {
        Self {
            display_monitoring: Setting::Defaulted(false),
            files_monitoring: Setting::Defaulted(false),
            threshold: Setting::Defaulted(DEFAULT_THRESHOLD),
            unit: Setting::Defaulted(DEFAULT_UNIT),
        }
    }
}

impl MonitorPolicy {
    /// Check if any kind of monitoring is requested
    pub fn is_monitoring_enabled(&self) -> bool {
        self.display_monitoring.value() || self.files_monitoring.value()
    }

    /// Threshold converted to bytes
    pub fn threshold_bytes(&self) -> u64 {
        self.threshold.value().saturating_mul(self.unit.value().factor())
    }

    /// Turn both monitoring switches off
    pub fn disable(&mut self) {
        self.display_monitoring.set(false);
        self.files_monitoring.set(false);
    }
}

/// Complete configuration of one logger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerConfig {
    /// Name printed in the identifier column and used for the log file name
    pub identifier: Setting<String>,
    pub levels: LevelPolicy,
    pub placement: PlacementPolicy,
    pub monitor: MonitorPolicy,
    /// Directory holding the log files
    pub directory: Setting<PathBuf>,
    /// Shared file name; `<identifier>.log` when unset
    pub file_name: Setting<Option<String>>,
    pub theme: Setting<ColorTheme>,
    /// Also emit every record as a `tracing` event
    pub forward_to_tracing: Setting<bool>,
    /// Let the manager fill in defaulted fields
    pub follow_manager_rules: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            identifier: Setting::Defaulted(DEFAULT_IDENTIFIER.to_string()),
            levels: LevelPolicy::default(),
            placement: PlacementPolicy::default(),
            monitor: MonitorPolicy::default(),
            directory: Setting::Defaulted(logs_dir()),
            file_name: Setting::Defaulted(None),
            theme: Setting::Defaulted(ColorTheme::default()),
            forward_to_tracing: Setting::Defaulted(false),
            follow_manager_rules: true,
        }
    }
}

impl LoggerConfig {
    /// Get the identifier
    pub fn identifier(&self) -> &str {
        self.identifier.get()
    }

    /// Get the log directory
    pub fn directory(&self) -> &Path {
        self.directory.get()
    }

    /// Path of the file this logger appends to
    pub fn file_path(&self) -> PathBuf {
        let name = match self.file_name.get() {
            Some(name) => name.clone(),
            None => format!("{}.{}", self.identifier(), LOG_EXTENSION),
        };
        self.directory().join(name)
    }

    /// Whether this configuration needs the log directory to exist
    pub fn needs_directory(&self) -> bool {
        self.levels.write_to_file.value() || self.monitor.is_monitoring_enabled()
    }

    /// Adopt every value of `global` that is still defaulted here
    ///
    /// Returns the number of fields that were replaced.
    pub fn inherit_from(&mut self, global: &LoggerConfig) -> usize {
        let replaced = [
            self.identifier.inherit(global.identifier.get().clone()),
            self.levels.print_level.inherit(global.levels.print_level.value()),
            self.levels.file_level.inherit(global.levels.file_level.value()),
            self.levels.print_log.inherit(global.levels.print_log.value()),
            self.levels
                .write_to_file
                .inherit(global.levels.write_to_file.value()),
            self.levels
                .decorator_level
                .inherit(global.levels.decorator_level.value()),
            self.placement
                .identifier_width
                .inherit(global.placement.identifier_width.value()),
            self.placement
                .location_width
                .inherit(global.placement.location_width.value()),
            self.placement
                .level_width
                .inherit(global.placement.level_width.value()),
            self.monitor
                .display_monitoring
                .inherit(global.monitor.display_monitoring.value()),
            self.monitor
                .files_monitoring
                .inherit(global.monitor.files_monitoring.value()),
            self.monitor.threshold.inherit(global.monitor.threshold.value()),
            self.monitor.unit.inherit(global.monitor.unit.value()),
            self.directory.inherit(global.directory.get().clone()),
            self.file_name.inherit(global.file_name.get().clone()),
            self.theme.inherit(global.theme.value()),
            self.forward_to_tracing
                .inherit(global.forward_to_tracing.value()),
        ];
        replaced.iter().filter(|r| **r).count()
    }
}

/// Named options accepted when constructing a logger
///
/// Every option left as `None` keeps the factory default and stays eligible
/// for manager rules. Options can be built in code or read from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggerOptions {
    pub identifier: Option<String>,
    pub print_level: Option<Severity>,
    pub file_level: Option<Severity>,
    pub print_log: Option<bool>,
    pub write_to_file: Option<bool>,
    pub decorator_level: Option<Severity>,
    pub identifier_width: Option<usize>,
    pub location_width: Option<usize>,
    pub level_width: Option<usize>,
    pub display_monitoring: Option<bool>,
    pub files_monitoring: Option<bool>,
    pub threshold: Option<u64>,
    pub unit: Option<Unit>,
    pub directory: Option<PathBuf>,
    pub file_name: Option<String>,
    pub theme: Option<ColorTheme>,
    pub forward_to_tracing: Option<bool>,
    pub follow_manager_rules: Option<bool>,
}

impl LoggerOptions {
    /// Create an empty option set
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse options from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse logger options")
    }

    /// Load options from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read logger options {}", path.display()))?;
        Self::from_toml_str(&content)
    }

    pub fn identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    pub fn print_level(mut self, level: Severity) -> Self {
        self.print_level = Some(level);
        self
    }

    pub fn file_level(mut self, level: Severity) -> Self {
        self.file_level = Some(level);
        self
    }

    pub fn print_log(mut self, enabled: bool) -> Self {
        self.print_log = Some(enabled);
        self
    }

    pub fn write_to_file(mut self, enabled: bool) -> Self {
        self.write_to_file = Some(enabled);
        self
    }

    /// Severity used by [`Logger::track_time`](crate::Logger::track_time) and
    /// [`Logger::log_call`](crate::Logger::log_call)
    pub fn decorator_level(mut self, level: Severity) -> Self {
        self.decorator_level = Some(level);
        self
    }

    pub fn identifier_width(mut self, width: usize) -> Self {
        self.identifier_width = Some(width);
        self
    }

    pub fn location_width(mut self, width: usize) -> Self {
        self.location_width = Some(width);
        self
    }

    pub fn level_width(mut self, width: usize) -> Self {
        self.level_width = Some(width);
        self
    }

    pub fn display_monitoring(mut self, enabled: bool) -> Self {
        self.display_monitoring = Some(enabled);
        self
    }

    pub fn files_monitoring(mut self, enabled: bool) -> Self {
        self.files_monitoring = Some(enabled);
        self
    }

    /// Free space to keep on the log volume
    pub fn threshold(mut self, count: u64, unit: Unit) -> Self {
        self.threshold = Some(count);
        self.unit = Some(unit);
        self
    }

    pub fn directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = Some(directory.into());
        self
    }

    /// Write to a file shared with other loggers instead of `<identifier>.log`
    pub fn file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = Some(name.into());
        self
    }

    pub fn theme(mut self, theme: ColorTheme) -> Self {
        self.theme = Some(theme);
        self
    }

    pub fn forward_to_tracing(mut self, enabled: bool) -> Self {
        self.forward_to_tracing = Some(enabled);
        self
    }

    pub fn follow_manager_rules(mut self, follow: bool) -> Self {
        self.follow_manager_rules = Some(follow);
        self
    }

    /// Build the configuration, tagging every supplied option as explicit
    pub fn into_config(self) -> LoggerConfig {
        let mut config = LoggerConfig::default();

        if let Some(v) = self.identifier {
            config.identifier.set(v);
        }
        if let Some(v) = self.print_level {
            config.levels.print_level.set(v);
        }
        if let Some(v) = self.file_level {
            config.levels.file_level.set(v);
        }
        if let Some(v) = self.print_log {
            config.levels.print_log.set(v);
        }
        if let Some(v) = self.write_to_file {
            config.levels.write_to_file.set(v);
        }
        if let Some(v) = self.decorator_level {
            config.levels.decorator_level.set(v);
        }
        if let Some(v) = self.identifier_width {
            config.placement.identifier_width.set(v);
        }
        if let Some(v) = self.location_width {
            config.placement.location_width.set(v);
        }
        if let Some(v) = self.level_width {
            config.placement.level_width.set(v);
        }
        if let Some(v) = self.display_monitoring {
            config.monitor.display_monitoring.set(v);
        }
        if let Some(v) = self.files_monitoring {
            config.monitor.files_monitoring.set(v);
        }
        if let Some(v) = self.threshold {
            config.monitor.threshold.set(v);
        }
        if let Some(v) = self.unit {
            config.monitor.unit.set(v);
        }
        if let Some(v) = self.directory {
            config.directory.set(expand_dir(&v));
        }
        if let Some(v) = self.file_name {
            config.file_name.set(Some(v));
        }
        if let Some(v) = self.theme {
            config.theme.set(v);
        }
        if let Some(v) = self.forward_to_tracing {
            config.forward_to_tracing.set(v);
        }
        if let Some(v) = self.follow_manager_rules {
            config.follow_manager_rules = v;
        }

        config
    }
}

/// Process-wide switches of the logger manager
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ManagerSettings {
    /// Fold every registered logger's column widths into the global widths
    pub enable_dynamic_config_update: bool,
    /// Prefix loggers sharing an identifier with their ordinal
    pub enable_unique_logger_identifier: bool,
    /// Let only the first logger requesting monitoring keep it
    pub enable_files_logs_monitoring_only_for_one_logger: bool,
}

impl ManagerSettings {
    /// Every switch turned on
    pub fn all_enabled() -> Self {
        Self {
            enable_dynamic_config_update: true,
            enable_unique_logger_identifier: true,
            enable_files_logs_monitoring_only_for_one_logger: true,
        }
    }

    /// Load settings from a TOML file, or return defaults if not found
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            let content =
                std::fs::read_to_string(path).context("Failed to read manager settings")?;
            toml::from_str(&content).context("Failed to parse manager settings")
        } else {
            Ok(Self::default())
        }
    }
}

/// Expand a leading `~` in a configured directory
pub fn expand_dir(path: &Path) -> PathBuf {
    match path.to_str() {
        Some(s) => PathBuf::from(shellexpand::tilde(s).into_owned()),
        None => path.to_path_buf(),
    }
}

/// Get the base data directory (<data_local_dir>/logwarden)
/// Falls back to ./.logwarden if the data directory cannot be determined
pub fn data_dir() -> PathBuf {
    try_data_dir().unwrap_or_else(|| {
        tracing::warn!("Could not determine data directory, using current directory for logs");
        PathBuf::from(".logwarden")
    })
}

/// Try to get the base data directory, returning None if it is unavailable
pub fn try_data_dir() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("logwarden"))
}

/// Get the default logs directory
pub fn logs_dir() -> PathBuf {
    data_dir().join("logs")
}
