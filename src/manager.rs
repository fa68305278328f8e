//! Process-wide coordination of loggers
//!
//! Every [`Logger`] registers itself with a [`LoggerManager`] exactly once,
//! at construction. Registration reconciles column widths, applies the
//! manager's global configuration to defaulted fields, resolves identifier
//! collisions and elects the single logger allowed to monitor disk usage.
//! Registration order is the tie-break for all of these.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

use crate::config::{LoggerConfig, ManagerSettings};
use crate::logging::{Logger, LoggerId, MonitoringState};

static GLOBAL: OnceLock<LoggerManager> = OnceLock::new();

#[derive(Debug, Default)]
struct ManagerState {
    /// Registered loggers, in registration order
    loggers: Vec<Logger>,
    /// Policy inherited by rule-following loggers
    global: LoggerConfig,
    elected_monitor: Option<LoggerId>,
    settings: ManagerSettings,
}

impl ManagerState {
    /// Number loggers sharing a base identifier in registration order
    fn make_identifiers_unique(&self) {
        let mut ordinals: HashMap<String, usize> = HashMap::new();

        for logger in &self.loggers {
            let mut state = logger.lock_state();
            let ordinal = ordinals.entry(state.base_identifier.clone()).or_default();
            *ordinal += 1;

            let identifier = match *ordinal {
                1 => state.base_identifier.clone(),
                n => format!("{}_{}", n, state.base_identifier),
            };
            if state.config.identifier() != identifier {
                tracing::debug!(
                    "Renaming logger '{}' to '{}'",
                    state.config.identifier(),
                    identifier
                );
                state.apply_identifier(identifier);
            }
        }
    }
}

/// Registry of loggers and the policies applied to them
#[derive(Debug, Default)]
pub struct LoggerManager {
    state: Mutex<ManagerState>,
}

impl LoggerManager {
    /// Create a manager with every switch off
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a manager with the given switches
    pub fn with_settings(settings: ManagerSettings) -> Self {
        Self {
            state: Mutex::new(ManagerState {
                settings,
                ..ManagerState::default()
            }),
        }
    }

    /// Get the process-wide manager used by [`Logger::new`]
    pub fn global() -> &'static LoggerManager {
        GLOBAL.get_or_init(LoggerManager::new)
    }

    fn lock(&self) -> MutexGuard<'_, ManagerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn settings(&self) -> ManagerSettings {
        self.lock().settings
    }

    /// Replace all switches; affects subsequent registrations only
    pub fn set_settings(&self, settings: ManagerSettings) {
        self.lock().settings = settings;
    }

    pub fn enable_dynamic_config_update(&self) -> bool {
        self.lock().settings.enable_dynamic_config_update
    }

    pub fn set_enable_dynamic_config_update(&self, enabled: bool) {
        self.lock().settings.enable_dynamic_config_update = enabled;
    }

    pub fn enable_unique_logger_identifier(&self) -> bool {
        self.lock().settings.enable_unique_logger_identifier
    }

    pub fn set_enable_unique_logger_identifier(&self, enabled: bool) {
        self.lock().settings.enable_unique_logger_identifier = enabled;
    }

    pub fn enable_files_logs_monitoring_only_for_one_logger(&self) -> bool {
        self.lock()
            .settings
            .enable_files_logs_monitoring_only_for_one_logger
    }

    pub fn set_enable_files_logs_monitoring_only_for_one_logger(&self, enabled: bool) {
        self.lock()
            .settings
            .enable_files_logs_monitoring_only_for_one_logger = enabled;
    }

    /// Edit the configuration that rule-following loggers inherit
    pub fn configure_global(&self, configure: impl FnOnce(&mut LoggerConfig)) {
        configure(&mut self.lock().global);
    }

    /// Get a snapshot of the global configuration
    pub fn global_config(&self) -> LoggerConfig {
        self.lock().global.clone()
    }

    /// Get the registered loggers, in registration order
    pub fn loggers(&self) -> Vec<Logger> {
        self.lock().loggers.clone()
    }

    pub fn len(&self) -> usize {
        self.lock().loggers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().loggers.is_empty()
    }

    /// Get the logger holding the monitoring election, if any
    pub fn elected_monitor(&self) -> Option<LoggerId> {
        self.lock().elected_monitor
    }

    /// Remove a logger from the registry
    ///
    /// Releases the monitoring election if the logger held it. Returns
    /// whether the logger was registered.
    pub fn unregister(&self, id: LoggerId) -> bool {
        let mut manager = self.lock();
        let before = manager.loggers.len();
        manager.loggers.retain(|l| l.id() != id);

        if manager.elected_monitor == Some(id) {
            manager.elected_monitor = None;
        }
        manager.loggers.len() != before
    }

    /// Forget every logger and restore the default policy and switches
    pub fn reset(&self) {
        *self.lock() = ManagerState::default();
    }

    /// Apply the manager's policies to a newly constructed logger
    pub(crate) fn register(&self, logger: &Logger) {
        let mut manager = self.lock();
        let settings = manager.settings;
        manager.loggers.push(logger.clone());

        {
            let mut state = logger.lock_state();

            if settings.enable_dynamic_config_update {
                let widths = state.config.placement.widths();
                let global = &mut manager.global.placement;
                global.identifier_width.widen(widths.identifier);
                global.location_width.widen(widths.location);
                global.level_width.widen(widths.level);
            }

            if state.config.follow_manager_rules {
                let inherited = state.config.inherit_from(&manager.global);
                tracing::debug!(
                    "Logger '{}' inherited {} setting(s) from the manager",
                    state.config.identifier(),
                    inherited
                );
            }
            state.base_identifier = state.config.identifier().to_string();
        }

        if settings.enable_unique_logger_identifier {
            manager.make_identifiers_unique();
        }

        let mut state = logger.lock_state();
        if !state.config.monitor.is_monitoring_enabled() {
            state.monitoring = MonitoringState::Unset;
            return;
        }

        if !settings.enable_files_logs_monitoring_only_for_one_logger {
            state.monitoring = MonitoringState::Enabled;
            return;
        }

        if manager.elected_monitor.is_some() {
            tracing::info!(
                "Disk monitoring disabled for logger '{}', another logger already monitors",
                state.config.identifier()
            );
            state.config.monitor.disable();
            state.monitoring = MonitoringState::ForciblyDisabled;
        } else {
            manager.elected_monitor = Some(logger.id());
            state.monitoring = MonitoringState::Enabled;
        }
    }
}
