//! The `log` module defines the crate's logging facilities. These are diagnostics about loading,
//! validating and exporting scenarios. The scenario itself is written by the `loader` and `report`
//! modules, not through the logger.
//!
//! This module (re)exports the five logging macros: `error!`, `warn!`, `info!`, `debug!` and
//! `trace!` where `error!` represents the highest-priority log messages and `trace!` the lowest.
//!
//! ```rust
//! use seir_scenario::log::info;
//!
//! pub fn do_a_thing() {
//!     info!("A thing is being done.");
//! }
//! ```
//!
//! Logging is _disabled_ by default. The `seir-scenario` binary enables it with
//! `--log-level <level>` or `-v`. From code, logging can be enabled/disabled using the functions:
//!
//!  - `enable_logging()`: turns on all log messages
//!  - `disable_logging()`: turns off all log messages
//!  - `set_log_level(level: LevelFilter)`: enables only log messages with priority at least `level`
//!
//! In addition, per-module filtering of messages can be configured using `set_module_filter()` /
//! `set_module_filters()` and `remove_module_filter()`:
//!
//! ```rust
//! use seir_scenario::log::{set_module_filter, LevelFilter, set_log_level};
//!
//! pub fn setup_logging() {
//!     // Enable `warn` log messages globally.
//!     set_log_level(LevelFilter::Warn);
//!     // Enable all log messages about schedule expansion.
//!     set_module_filter("seir_scenario::schedule", LevelFilter::Trace);
//! }
//! ```
#[cfg(feature = "logging")]
mod standard_logger;

#[cfg(not(feature = "logging"))]
mod null_logger;

pub use log::{debug, error, info, trace, warn, LevelFilter};

use crate::error::ScenarioError;
#[cfg(feature = "logging")]
use log4rs::Handle;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::LazyLock;
use std::sync::{Mutex, MutexGuard};

// Logging disabled
const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Off;

/// A global instance of the logging configuration.
static LOG_CONFIGURATION: LazyLock<Mutex<LogConfiguration>> = LazyLock::new(Mutex::default);

/// Different log level filters can be applied to the log messages emitted from different modules
/// according to the module path (e.g. `"seir_scenario::loader"`). These are stored in the global
/// `LogConfiguration`.
#[derive(Debug, PartialEq)]
struct ModuleLogConfiguration {
    /// The module path this configuration applies to
    module: String,
    /// The maximum log level for this module path
    level: LevelFilter,
}

impl From<(&str, LevelFilter)> for ModuleLogConfiguration {
    fn from((module, level): (&str, LevelFilter)) -> Self {
        Self {
            module: module.to_string(),
            level,
        }
    }
}

/// Holds logging configuration. Its primary responsibility is to keep track of the filter levels
/// of modules and hold a handle to the global logger.
///
/// Because loggers are globally installed, only one instance of this struct should exist. The
/// public API are free functions which fetch the singleton and call the appropriate member
/// function.
#[derive(Debug)]
pub(in crate::log) struct LogConfiguration {
    /// The "default" level filter for modules ("targets") without an explicitly set filter. A
    /// global filter level of `LevelFilter::Off` disables logging.
    pub(in crate::log) global_log_level: LevelFilter,
    pub(in crate::log) module_configurations: HashMap<String, ModuleLogConfiguration>,

    #[cfg(feature = "logging")]
    /// Handle to the `log4rs` logger.
    root_handle: Option<Handle>,
}

impl Default for LogConfiguration {
    fn default() -> Self {
        Self {
            global_log_level: DEFAULT_LOG_LEVEL,
            module_configurations: HashMap::new(),

            #[cfg(feature = "logging")]
            root_handle: None,
        }
    }
}

impl LogConfiguration {
    pub(in crate::log) fn set_log_level(&mut self, level: LevelFilter) {
        self.global_log_level = level;
        self.set_config();
    }

    /// Returns true if the configuration was mutated, false otherwise.
    fn insert_module_filter(&mut self, module: &String, level: LevelFilter) -> bool {
        match self.module_configurations.entry(module.clone()) {
            Entry::Occupied(mut entry) => {
                let module_config = entry.get_mut();
                if module_config.level == level {
                    return false;
                }
                module_config.level = level;
            }

            Entry::Vacant(entry) => {
                entry.insert((module.as_str(), level).into());
            }
        }
        true
    }

    pub(in crate::log) fn set_module_filter<S: ToString>(
        &mut self,
        module: &S,
        level: LevelFilter,
    ) {
        if self.insert_module_filter(&module.to_string(), level) {
            self.set_config();
        }
    }

    pub(in crate::log) fn set_module_filters<S: ToString>(
        &mut self,
        module_filters: &[(&S, LevelFilter)],
    ) {
        let mut mutated: bool = false;
        for (module, level) in module_filters {
            mutated |= self.insert_module_filter(&module.to_string(), *level);
        }
        if mutated {
            self.set_config();
        }
    }

    pub(in crate::log) fn remove_module_filter(&mut self, module: &str) {
        if self.module_configurations.remove(module).is_some() {
            self.set_config();
        }
    }
}

/// A parsed `--log-level` argument: an optional global level and any per-module levels.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogLevelSpec {
    pub global: Option<LevelFilter>,
    pub modules: Vec<(String, LevelFilter)>,
}

impl FromStr for LogLevelSpec {
    type Err = ScenarioError;

    /// Accepts a comma separated list of `level` and `module=level` items, e.g.
    /// `"warn,seir_scenario::loader=debug"`. Level names are case-insensitive.
    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let mut parsed = LogLevelSpec::default();
        for item in spec.split(',').map(str::trim).filter(|item| !item.is_empty()) {
            let (module, level) = match item.split_once('=') {
                Some((module, level)) => (Some(module.trim()), level.trim()),
                None => (None, item),
            };
            let level = LevelFilter::from_str(level).map_err(|_| {
                ScenarioError::ScenarioError(format!("Invalid log level: {level}"))
            })?;
            match module {
                Some("") => {
                    return Err(ScenarioError::ScenarioError(format!(
                        "Missing module name in log level: {item}"
                    )))
                }
                Some(module) => parsed.modules.push((module.to_string(), level)),
                None => parsed.global = Some(level),
            }
        }
        Ok(parsed)
    }
}

impl LogLevelSpec {
    /// Installs the parsed levels. Module levels are installed on top of the global level, which
    /// defaults to `Error` when only module levels are given.
    pub fn apply(&self) {
        set_log_level(self.global.unwrap_or(LevelFilter::Error));
        let filters: Vec<(&String, LevelFilter)> = self
            .modules
            .iter()
            .map(|(module, level)| (module, *level))
            .collect();
        set_module_filters(&filters);
    }
}

// The public API

/// Enables the logger with no global level filter / full logging. Equivalent to
/// `set_log_level(LevelFilter::Trace)`.
pub fn enable_logging() {
    set_log_level(LevelFilter::Trace);
}

/// Disables logging completely. Equivalent to `set_log_level(LevelFilter::Off)`.
pub fn disable_logging() {
    set_log_level(LevelFilter::Off);
}

/// Sets the global log level. A global filter level of `LevelFilter::Off` disables logging.
pub fn set_log_level(level: LevelFilter) {
    let mut log_configuration = get_log_configuration();
    log_configuration.set_log_level(level);
}

/// Sets a level filter for the given module path.
pub fn set_module_filter(module_path: &str, level_filter: LevelFilter) {
    let mut log_configuration = get_log_configuration();
    log_configuration.set_module_filter(&module_path, level_filter);
}

/// Removes a module-specific level filter for the given module path. The global level filter will
/// apply to the module.
pub fn remove_module_filter(module_path: &str) {
    let mut log_configuration = get_log_configuration();
    log_configuration.remove_module_filter(module_path);
}

/// Sets the level filters for a set of modules according to the provided map. Use this instead of
/// `set_module_filter()` to set filters in bulk.
pub fn set_module_filters<S: ToString>(module_filters: &[(&S, LevelFilter)]) {
    let mut log_configuration = get_log_configuration();
    log_configuration.set_module_filters(module_filters);
}

/// The current global level and module levels, sorted by module path.
pub fn current_log_levels() -> (LevelFilter, Vec<(String, LevelFilter)>) {
    let log_configuration = get_log_configuration();
    let mut modules: Vec<(String, LevelFilter)> = log_configuration
        .module_configurations
        .values()
        .map(|config| (config.module.clone(), config.level))
        .collect();
    modules.sort();
    (log_configuration.global_log_level, modules)
}

/// Fetches a mutable reference to the global `LogConfiguration`.
fn get_log_configuration() -> MutexGuard<'static, LogConfiguration> {
    LOG_CONFIGURATION.lock().expect("Mutex poisoned")
}
