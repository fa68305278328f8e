//! Logger instances
//!
//! A [`Logger`] owns its configuration, its console and file sinks and,
//! when monitoring is active, a [`DiskMonitor`]. Loggers are cheap handles;
//! clones share the same state, so the manager can rename or reformat a
//! logger after it was handed out.

use std::fmt::Debug;
use std::panic::Location;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use uuid::Uuid;

use crate::config::{LoggerConfig, LoggerOptions, Widths};
use crate::error::{LoggerError, Result};
use crate::manager::LoggerManager;
use crate::monitor::{CleanupReport, DiskMonitor, DiskUsage, MonitorChannel, SpaceProbe};
use crate::severity::Severity;
use crate::theme::ColorTheme;

use super::format::{Record, RecordFormatter};
use super::sink::{forward_to_tracing, Sink};
use super::tracking::TimeGuard;

/// Space kept free for the report of a sweep written to the logger's own file
const REPORT_RESERVE: u64 = 1024;

/// Unique identifier for a logger instance
pub type LoggerId = Uuid;

/// Monitoring lifecycle of a logger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MonitoringState {
    /// Monitoring was never requested
    #[default]
    Unset,
    /// Monitoring was requested and kept
    Enabled,
    /// Monitoring was requested but another logger already holds it
    ForciblyDisabled,
}

/// Mutable state of a logger, guarded by its mutex
pub(crate) struct LoggerState {
    pub(crate) config: LoggerConfig,
    /// Identifier before any collision prefix was applied
    pub(crate) base_identifier: String,
    pub(crate) monitoring: MonitoringState,
    console: Option<Sink>,
    file: Option<Sink>,
    monitor: Option<DiskMonitor>,
}

impl LoggerState {
    fn new(config: LoggerConfig) -> Self {
        Self {
            base_identifier: config.identifier().to_string(),
            config,
            monitoring: MonitoringState::Unset,
            console: None,
            file: None,
            monitor: None,
        }
    }

    fn formatter(&self, colored: bool) -> RecordFormatter {
        RecordFormatter::new(
            self.config.identifier(),
            self.config.placement.widths(),
            colored.then(|| self.config.theme.value()),
        )
    }

    /// Point existing sinks at a formatter built from the current config
    pub(crate) fn rebuild_formatters(&mut self) {
        let console_formatter = self.formatter(true);
        let file_formatter = self.formatter(false);
        if let Some(console) = self.console.as_mut() {
            console.set_formatter(console_formatter);
        }
        if let Some(file) = self.file.as_mut() {
            file.set_formatter(file_formatter);
        }
    }

    /// Apply a new identifier decided by the manager
    pub(crate) fn apply_identifier(&mut self, identifier: String) {
        self.config.identifier.replace(identifier);
        self.rebuild_formatters();
    }

    /// Create missing sinks and refresh the formatters of existing ones
    fn configure_sinks(&mut self) -> Result<()> {
        if self.config.levels.print_log.value() && self.console.is_none() {
            self.console = Some(Sink::console(
                self.config.levels.print_level.value(),
                self.formatter(true),
            ));
        }

        if self.config.levels.write_to_file.value() && self.file.is_none() {
            self.file = Some(Sink::file(
                &self.config.file_path(),
                self.config.levels.file_level.value(),
                self.formatter(false),
            )?);
        }

        self.rebuild_formatters();
        Ok(())
    }

    fn write(&mut self, record: &Record<'_>) {
        for sink in [self.console.as_mut(), self.file.as_mut()].into_iter().flatten() {
            if let Err(e) = sink.write_record(record) {
                tracing::warn!(
                    "Logger '{}' failed to write a record: {}",
                    self.config.identifier(),
                    e
                );
            }
        }

        if self.config.forward_to_tracing.value() {
            forward_to_tracing(self.config.identifier(), record);
        }
    }
}

struct Inner {
    id: LoggerId,
    state: Mutex<LoggerState>,
}

/// A logger instance registered with a [`LoggerManager`]
#[derive(Clone)]
pub struct Logger {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("id", &self.inner.id)
            .field("identifier", &self.identifier())
            .finish()
    }
}

impl Logger {
    /// Create a logger registered with the process-wide manager
    pub fn new(options: LoggerOptions) -> Result<Self> {
        Self::with_manager(options, LoggerManager::global())
    }

    /// Create a logger registered with `manager`
    ///
    /// Fails only if the log directory or log file cannot be created.
    pub fn with_manager(options: LoggerOptions, manager: &LoggerManager) -> Result<Self> {
        let logger = Self {
            inner: Arc::new(Inner {
                id: Uuid::new_v4(),
                state: Mutex::new(LoggerState::new(options.into_config())),
            }),
        };

        manager.register(&logger);

        if let Err(e) = logger.setup() {
            manager.unregister(logger.id());
            return Err(e);
        }

        logger.start_monitoring();
        Ok(logger)
    }

    fn setup(&self) -> Result<()> {
        let mut state = self.lock_state();
        if state.config.needs_directory() {
            let directory = state.config.directory().to_path_buf();
            std::fs::create_dir_all(&directory).map_err(|source| LoggerError::LogDirectory {
                path: directory,
                source,
            })?;
        }
        state.configure_sinks()
    }

    fn start_monitoring(&self) {
        {
            let mut state = self.lock_state();
            if !state.config.monitor.is_monitoring_enabled() {
                return;
            }
            let protected = state
                .file
                .as_ref()
                .and_then(|f| f.path().map(|p| p.to_path_buf()));
            let monitor =
                DiskMonitor::new(state.config.directory(), state.config.monitor.clone())
                    .with_protected(protected);
            state.monitor = Some(monitor);
        }

        self.display_monitoring();
        self.clean_logs();
    }

    pub(crate) fn lock_state(&self) -> MutexGuard<'_, LoggerState> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Get the unique id of this logger
    pub fn id(&self) -> LoggerId {
        self.inner.id
    }

    /// Get the current identifier, including any collision prefix
    pub fn identifier(&self) -> String {
        self.lock_state().config.identifier().to_string()
    }

    /// Get a snapshot of the configuration
    pub fn config(&self) -> LoggerConfig {
        self.lock_state().config.clone()
    }

    /// Get the column widths currently configured
    pub fn widths(&self) -> Widths {
        self.lock_state().config.placement.widths()
    }

    /// Widths the sink formatters are currently using
    pub fn formatter_widths(&self) -> Option<Widths> {
        let state = self.lock_state();
        state
            .console
            .as_ref()
            .or(state.file.as_ref())
            .map(|s| s.formatter().widths())
    }

    /// Path of the file this logger appends to, if file output is enabled
    pub fn log_file_path(&self) -> Option<PathBuf> {
        self.lock_state()
            .file
            .as_ref()
            .and_then(|f| f.path().map(|p| p.to_path_buf()))
    }

    pub fn monitoring_state(&self) -> MonitoringState {
        self.lock_state().monitoring
    }

    /// Check if this logger currently owns a working disk monitor
    pub fn is_monitoring_active(&self) -> bool {
        self.lock_state().monitor.is_some()
    }

    /// Rename the logger and rebuild its formatters
    ///
    /// The log file keeps its path; only subsequent records show the new name.
    pub fn rename(&self, identifier: impl Into<String>) {
        let identifier = identifier.into();
        let mut state = self.lock_state();
        state.base_identifier = identifier.clone();
        state.config.identifier.set(identifier);
        state.rebuild_formatters();
    }

    /// Change column widths and rebuild the formatters
    pub fn set_placement(
        &self,
        identifier_width: Option<usize>,
        location_width: Option<usize>,
        level_width: Option<usize>,
    ) {
        let mut state = self.lock_state();
        let placement = &mut state.config.placement;
        if let Some(w) = identifier_width {
            placement.identifier_width.set(w);
        }
        if let Some(w) = location_width {
            placement.location_width.set(w);
        }
        if let Some(w) = level_width {
            placement.level_width.set(w);
        }
        state.rebuild_formatters();
    }

    /// Change the console color theme
    pub fn set_theme(&self, theme: ColorTheme) {
        let mut state = self.lock_state();
        state.config.theme.set(theme);
        state.rebuild_formatters();
    }

    /// Replace the free-space source of the disk monitor
    pub fn set_space_probe(&self, probe: Arc<dyn SpaceProbe>) {
        let mut state = self.lock_state();
        if let Some(monitor) = state.monitor.take() {
            state.monitor = Some(monitor.with_probe(probe));
        }
    }

    fn monitor(&self) -> Option<DiskMonitor> {
        self.lock_state().monitor.clone()
    }

    /// Monitoring failed: report it and stop monitoring this directory
    fn degrade(&self, err: LoggerError) {
        self.warning(format!("{}; disk monitoring disabled", err));
        self.lock_state().monitor = None;
    }

    /// Measure disk usage of the log directory
    pub fn disk_usage(&self) -> Option<DiskUsage> {
        let monitor = self.monitor()?;
        match monitor.measure() {
            Ok(usage) => Some(usage),
            Err(e) => {
                self.degrade(e);
                None
            }
        }
    }

    /// Report disk usage through the info channel, if display monitoring is on
    pub fn display_monitoring(&self) -> Option<DiskUsage> {
        let monitor = self.monitor()?;
        match monitor.display_monitoring(self) {
            Ok(usage) => usage,
            Err(e) => {
                self.degrade(e);
                None
            }
        }
    }

    /// Evict old log files, if files monitoring is on
    ///
    /// Blocks on filesystem I/O.
    pub fn clean_logs(&self) -> Option<CleanupReport> {
        let monitor = self.monitor()?;
        match monitor.clean_logs(self) {
            Ok(report) => report,
            Err(e) => {
                self.degrade(e);
                None
            }
        }
    }

    pub(super) fn emit(&self, severity: Severity, location: &Location<'_>, message: &str) {
        let record = Record::new(severity, location, message);
        self.lock_state().write(&record);
    }

    /// Log a message at the given severity
    #[track_caller]
    pub fn log(&self, severity: Severity, message: impl AsRef<str>) {
        self.emit(severity, Location::caller(), message.as_ref());
    }

    /// Log a message at a severity given by name
    ///
    /// An unknown name is reported on the warning channel with the message
    /// embedded, so nothing is dropped.
    #[track_caller]
    pub fn log_named(&self, severity: &str, message: impl AsRef<str>) {
        let location = Location::caller();
        match Severity::try_parse(severity) {
            Ok(severity) => self.emit(severity, location, message.as_ref()),
            Err(e) => self.emit(
                Severity::Warning,
                location,
                &format!("{} [log message: {}]", e, message.as_ref()),
            ),
        }
    }

    #[track_caller]
    pub fn fatal(&self, message: impl AsRef<str>) {
        self.emit(Severity::Fatal, Location::caller(), message.as_ref());
    }

    #[track_caller]
    pub fn critical(&self, message: impl AsRef<str>) {
        self.emit(Severity::Critical, Location::caller(), message.as_ref());
    }

    #[track_caller]
    pub fn error(&self, message: impl AsRef<str>) {
        self.emit(Severity::Error, Location::caller(), message.as_ref());
    }

    #[track_caller]
    pub fn warning(&self, message: impl AsRef<str>) {
        self.emit(Severity::Warning, Location::caller(), message.as_ref());
    }

    #[track_caller]
    pub fn info(&self, message: impl AsRef<str>) {
        self.emit(Severity::Info, Location::caller(), message.as_ref());
    }

    #[track_caller]
    pub fn debug(&self, message: impl AsRef<str>) {
        self.emit(Severity::Debug, Location::caller(), message.as_ref());
    }
}

impl Logger {
    /// Severity of timing and call records
    pub fn decorator_level(&self) -> Severity {
        self.lock_state().config.levels.decorator_level.value()
    }

    /// Start timing a scope; the elapsed time is logged when the guard drops
    #[track_caller]
    pub fn time_guard(&self, name: impl Into<String>) -> TimeGuard {
        TimeGuard::new(self.clone(), name.into(), Location::caller())
    }

    /// Run `f` and log how long it took
    #[track_caller]
    pub fn track_time<T>(&self, name: &str, f: impl FnOnce() -> T) -> T {
        let _guard = self.time_guard(name);
        f()
    }

    /// Run `f`, logging the call and its return value
    #[track_caller]
    pub fn log_call<T: Debug>(&self, name: &str, f: impl FnOnce() -> T) -> T {
        let location = Location::caller();
        let level = self.decorator_level();

        self.emit(level, location, &format!("Calling '{}'", name));
        let value = f();
        self.emit(level, location, &format!("'{}' returned {:?}", name, value));
        value
    }
}

impl MonitorChannel for Logger {
    fn info(&self, message: &str) {
        Logger::info(self, message);
    }

    fn warning(&self, message: &str) {
        Logger::warning(self, message);
    }

    fn reserve_bytes(&self) -> u64 {
        let state = self.lock_state();
        match &state.file {
            Some(_) => REPORT_RESERVE + state.config.directory().as_os_str().len() as u64,
            None => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ManagerSettings;
    use crate::units::Unit;
    use std::io;
    use std::path::Path;
    use tempfile::TempDir;

    fn options(dir: &TempDir, identifier: &str) -> LoggerOptions {
        LoggerOptions::new()
            .identifier(identifier)
            .directory(dir.path())
            .print_log(false)
    }

    fn read_log(logger: &Logger) -> String {
        std::fs::read_to_string(logger.log_file_path().unwrap()).unwrap()
    }

    struct FullVolume;

    impl SpaceProbe for FullVolume {
        fn free_bytes(&self, _directory: &Path) -> io::Result<u64> {
            Ok(0)
        }
    }

    #[test]
    fn test_logger_writes_file_records() {
        let temp_dir = TempDir::new().unwrap();
        let manager = LoggerManager::new();
        let logger = Logger::with_manager(options(&temp_dir, "Main"), &manager).unwrap();

        logger.debug("Hello World");
        logger.info("Hello World");
        logger.fatal("Houston");

        assert_eq!(
            logger.log_file_path(),
            Some(temp_dir.path().join("Main.log"))
        );
        let contents = read_log(&logger);
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("| DEBUG    | Hello World"));
        assert!(lines[2].contains("| FATAL    | Houston"));
        assert!(lines[2].contains("logger.rs:"));
    }

    #[test]
    fn test_file_level_filters_records() {
        let temp_dir = TempDir::new().unwrap();
        let manager = LoggerManager::new();
        let logger = Logger::with_manager(
            options(&temp_dir, "Main").file_level(Severity::Error),
            &manager,
        )
        .unwrap();

        logger.warning("dropped");
        logger.critical("kept");

        let contents = read_log(&logger);
        assert!(!contents.contains("dropped"));
        assert!(contents.contains("kept"));
    }

    #[test]
    fn test_log_named_invalid_severity_becomes_warning() {
        let temp_dir = TempDir::new().unwrap();
        let manager = LoggerManager::new();
        let logger = Logger::with_manager(options(&temp_dir, "Main"), &manager).unwrap();

        logger.log_named("error", "real error");
        logger.log_named("loud", "keep me");

        let contents = read_log(&logger);
        assert!(contents.contains("| ERROR    | real error"));
        assert!(contents.contains("| WARNING  | Invalid log level 'loud' [log message: keep me]"));
    }

    #[test]
    fn test_rename_rebuilds_formatters() {
        let temp_dir = TempDir::new().unwrap();
        let manager = LoggerManager::new();
        let logger = Logger::with_manager(options(&temp_dir, "Main"), &manager).unwrap();

        logger.info("before");
        logger.rename("Renamed");
        logger.info("after");

        let contents = read_log(&logger);
        let lines: Vec<&str> = contents.lines().collect();
        assert!(lines[0].contains("| Main       |"));
        assert!(lines[1].contains("| Renamed    |"));
        // Same file, same path
        assert_eq!(logger.log_file_path(), Some(temp_dir.path().join("Main.log")));
    }

    #[test]
    fn test_set_placement_rebuilds_formatters() {
        let temp_dir = TempDir::new().unwrap();
        let manager = LoggerManager::new();
        let logger = Logger::with_manager(options(&temp_dir, "Main"), &manager).unwrap();

        logger.set_placement(Some(4), None, Some(5));
        assert_eq!(logger.formatter_widths().unwrap().identifier, 4);
        logger.info("narrow");

        let contents = read_log(&logger);
        assert!(contents.contains("| Main | "));
        assert!(contents.contains("| INFO  | narrow"));
    }

    #[test]
    fn test_no_sinks_without_outputs() {
        let temp_dir = TempDir::new().unwrap();
        let manager = LoggerManager::new();
        let logger = Logger::with_manager(
            options(&temp_dir, "Quiet").write_to_file(false),
            &manager,
        )
        .unwrap();

        logger.info("nowhere");
        assert!(logger.log_file_path().is_none());
        assert!(logger.formatter_widths().is_none());
        assert!(!temp_dir.path().join("Quiet.log").exists());
    }

    #[test]
    fn test_unwritable_directory_is_a_hard_failure() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        std::fs::write(&blocker, "a file, not a directory").unwrap();

        let manager = LoggerManager::new();
        let result = Logger::with_manager(
            LoggerOptions::new()
                .directory(blocker.join("logs"))
                .print_log(false),
            &manager,
        );

        assert!(matches!(result, Err(LoggerError::LogDirectory { .. })));
        assert!(manager.is_empty());
    }

    #[test]
    fn test_monitoring_runs_at_construction() {
        let temp_dir = TempDir::new().unwrap();
        let manager = LoggerManager::new();
        let logger = Logger::with_manager(
            options(&temp_dir, "Main").display_monitoring(true),
            &manager,
        )
        .unwrap();

        assert_eq!(logger.monitoring_state(), MonitoringState::Enabled);
        assert!(logger.is_monitoring_active());
        assert!(read_log(&logger).contains("Disk monitoring"));
    }

    #[test]
    fn test_clean_logs_never_evicts_active_file() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("old.log"), "old").unwrap();

        let manager = LoggerManager::new();
        let logger = Logger::with_manager(
            options(&temp_dir, "Main")
                .files_monitoring(true)
                .threshold(1, Unit::Kilo),
            &manager,
        )
        .unwrap();
        logger.set_space_probe(Arc::new(FullVolume));

        let report = logger.clean_logs().unwrap();
        assert_eq!(report.deleted, vec![temp_dir.path().join("old.log")]);
        assert!(!report.threshold_met);
        assert!(temp_dir.path().join("Main.log").exists());

        let again = logger.clean_logs().unwrap();
        assert!(again.deleted.is_empty());
    }

    /// Volume of fixed capacity whose only contents are the directory's files
    struct SimulatedVolume {
        capacity: u64,
    }

    impl SpaceProbe for SimulatedVolume {
        fn free_bytes(&self, directory: &Path) -> io::Result<u64> {
            let mut used = 0;
            for entry in std::fs::read_dir(directory)? {
                used += entry?.metadata()?.len();
            }
            Ok(self.capacity.saturating_sub(used))
        }
    }

    #[test]
    fn test_clean_logs_is_stable_across_own_reports() {
        let temp_dir = TempDir::new().unwrap();
        let old = std::time::SystemTime::now() - std::time::Duration::from_secs(3600);
        for i in 0..5 {
            let path = temp_dir.path().join(format!("old_{}.log", i));
            let file = std::fs::File::create(&path).unwrap();
            file.set_len(1024).unwrap();
            file.set_modified(old + std::time::Duration::from_secs(i * 60))
                .unwrap();
        }

        let manager = LoggerManager::new();
        let logger = Logger::with_manager(
            options(&temp_dir, "Main")
                .files_monitoring(true)
                .threshold(7, Unit::Kilo),
            &manager,
        )
        .unwrap();
        logger.set_space_probe(Arc::new(SimulatedVolume {
            capacity: 10 * 1024,
        }));

        let first = logger.clean_logs().unwrap();
        assert!(first.deleted.len() >= 2);
        assert!(first.threshold_met);
        // The sweep report landed in Main.log, inside the watched directory
        assert!(read_log(&logger).contains("Deleted"));

        let second = logger.clean_logs().unwrap();
        assert!(second.deleted.is_empty());
        assert!(logger.disk_usage().unwrap().free_bytes >= 7 * 1024);
    }

    #[test]
    fn test_no_reserve_without_file_sink() {
        let temp_dir = TempDir::new().unwrap();
        let manager = LoggerManager::new();
        let quiet = Logger::with_manager(
            options(&temp_dir, "Quiet").write_to_file(false),
            &manager,
        )
        .unwrap();
        let filed = Logger::with_manager(options(&temp_dir, "Filed"), &manager).unwrap();

        assert_eq!(quiet.reserve_bytes(), 0);
        assert!(filed.reserve_bytes() >= REPORT_RESERVE);
    }

    #[test]
    fn test_track_time_logs_at_decorator_level() {
        let temp_dir = TempDir::new().unwrap();
        let manager = LoggerManager::new();
        let logger = Logger::with_manager(
            options(&temp_dir, "Main").decorator_level(Severity::Info),
            &manager,
        )
        .unwrap();

        let value = logger.track_time("compute", || 6 * 7);
        assert_eq!(value, 42);

        let contents = read_log(&logger);
        let line = contents.lines().next().unwrap();
        assert!(line.contains("| INFO     | Time tracker: 'compute' finished in "));
        assert!(line.contains("logger.rs:"));
        let (name, _) = crate::logging::parse_tracked_time(line).unwrap();
        assert_eq!(name, "compute");
    }

    #[test]
    fn test_time_guard_logs_on_drop() {
        let temp_dir = TempDir::new().unwrap();
        let manager = LoggerManager::new();
        let logger = Logger::with_manager(options(&temp_dir, "Main"), &manager).unwrap();

        {
            let guard = logger.time_guard("scope");
            assert_eq!(guard.name(), "scope");
            logger.info("inside");
        }

        let contents = read_log(&logger);
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("inside"));
        assert!(lines[1].contains("| DEBUG    | Time tracker: 'scope'"));
    }

    #[test]
    fn test_log_call_records_entry_and_result() {
        let temp_dir = TempDir::new().unwrap();
        let manager = LoggerManager::new();
        let logger = Logger::with_manager(
            options(&temp_dir, "Main").file_level(Severity::Info),
            &manager,
        )
        .unwrap();

        // Debug decorator records are below the file level
        logger.log_call("hidden", || ());
        let logger = Logger::with_manager(
            options(&temp_dir, "Calls").decorator_level(Severity::Warning),
            &manager,
        )
        .unwrap();
        let result = logger.log_call("parse", || "42".parse::<u32>());
        assert_eq!(result, Ok(42));

        let contents = read_log(&logger);
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("| WARNING  | Calling 'parse'"));
        assert!(lines[1].contains("| WARNING  | 'parse' returned Ok(42)"));
        assert!(!std::fs::read_to_string(temp_dir.path().join("Main.log"))
            .unwrap()
            .contains("hidden"));
    }

    #[test]
    fn test_filesystem_unavailable_degrades_monitoring() {
        let temp_dir = TempDir::new().unwrap();
        let manager = LoggerManager::new();
        let logger = Logger::with_manager(
            options(&temp_dir, "Main").display_monitoring(true),
            &manager,
        )
        .unwrap();
        let log_path = logger.log_file_path().unwrap();

        struct BrokenVolume;
        impl SpaceProbe for BrokenVolume {
            fn free_bytes(&self, _directory: &Path) -> io::Result<u64> {
                Err(io::Error::from(io::ErrorKind::PermissionDenied))
            }
        }
        logger.set_space_probe(Arc::new(BrokenVolume));

        assert!(logger.display_monitoring().is_none());
        assert!(!logger.is_monitoring_active());
        assert_eq!(logger.monitoring_state(), MonitoringState::Enabled);

        let contents = std::fs::read_to_string(log_path).unwrap();
        assert!(contents.contains("Filesystem unavailable"));
        assert!(contents.contains("disk monitoring disabled"));
    }

    #[test]
    fn test_new_registers_with_global_manager() {
        let temp_dir = TempDir::new().unwrap();
        let logger = Logger::new(options(&temp_dir, "GlobalProbe").write_to_file(false)).unwrap();

        let global = LoggerManager::global();
        assert!(global.loggers().iter().any(|l| l.id() == logger.id()));
        assert!(global.unregister(logger.id()));
    }

    #[test]
    fn test_forward_to_tracing() {
        let temp_dir = TempDir::new().unwrap();
        let manager = LoggerManager::with_settings(ManagerSettings::default());
        let logger = Logger::with_manager(
            options(&temp_dir, "Bridge")
                .write_to_file(false)
                .forward_to_tracing(true),
            &manager,
        )
        .unwrap();

        let ((), events) = crate::test_support::capture(|| logger.critical("forwarded"));
        let errors = events.at(tracing::Level::ERROR);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("forwarded"));
        assert!(errors[0].contains("logger=\"Bridge\""));
    }
}
