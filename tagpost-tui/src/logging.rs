//! File logging with per-category switches.
//!
//! Everything goes through the `log` facade into a simplelog
//! [`WriteLogger`]. The category macros (`log_tagging!` and friends) check
//! [`LogConfig::allows`] before emitting, so chatty categories can be turned
//! off without touching the global level.

use log::LevelFilter;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

pub const DEFAULT_LOG_FILE: &str = "tagpost_debug.log";

/// Crates whose debug output drowns ours
const QUIET_CRATES: [&str; 3] = ["hyper", "reqwest", "mio"];

/// A category of log lines that can be switched off on its own
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    ModalState,
    KeyEvents,
    ApiCalls,
    Tagging,
}

impl LogTarget {
    pub const ALL: [LogTarget; 4] = [
        LogTarget::ModalState,
        LogTarget::KeyEvents,
        LogTarget::ApiCalls,
        LogTarget::Tagging,
    ];

    /// The `target:` the category macros log under
    pub fn as_str(self) -> &'static str {
        match self {
            LogTarget::ModalState => "modal_state",
            LogTarget::KeyEvents => "key_events",
            LogTarget::ApiCalls => "api_calls",
            LogTarget::Tagging => "tagging",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFeatures {
    pub modal_state: bool,
    pub key_events: bool,
    pub api_calls: bool,
    /// Tag toggles, chip removal, location commits, fetch outcomes
    pub tagging: bool,
}

impl LogFeatures {
    pub fn all() -> Self {
        Self {
            modal_state: true,
            key_events: true,
            api_calls: true,
            tagging: true,
        }
    }

    pub fn none() -> Self {
        Self {
            modal_state: false,
            key_events: false,
            api_calls: false,
            tagging: false,
        }
    }

    pub fn allows(&self, target: LogTarget) -> bool {
        match target {
            LogTarget::ModalState => self.modal_state,
            LogTarget::KeyEvents => self.key_events,
            LogTarget::ApiCalls => self.api_calls,
            LogTarget::Tagging => self.tagging,
        }
    }
}

impl Default for LogFeatures {
    // Key events are per keystroke, off unless verbose
    fn default() -> Self {
        Self {
            key_events: false,
            ..Self::all()
        }
    }
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub enabled: bool,
    pub log_file: PathBuf,
    /// Truncate the file when logging starts
    pub clear_on_startup: bool,
    pub features: LogFeatures,
    pub level: LevelFilter,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            clear_on_startup: true,
            features: LogFeatures::default(),
            level: LevelFilter::Debug,
        }
    }
}

impl LogConfig {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            features: LogFeatures::none(),
            level: LevelFilter::Off,
            ..Default::default()
        }
    }

    /// Warnings and errors only
    pub fn minimal() -> Self {
        Self {
            features: LogFeatures::none(),
            level: LevelFilter::Warn,
            ..Default::default()
        }
    }

    pub fn verbose() -> Self {
        Self {
            features: LogFeatures::all(),
            level: LevelFilter::Trace,
            ..Default::default()
        }
    }

    /// Preset for the `--verbose` flag
    pub fn for_verbosity(verbose: bool) -> Self {
        if verbose {
            Self::verbose()
        } else {
            Self::default()
        }
    }

    /// Whether lines of `target` reach the log file
    pub fn allows(&self, target: LogTarget) -> bool {
        self.enabled && self.level != LevelFilter::Off && self.features.allows(target)
    }
}

fn open_log_file(path: &Path, truncate: bool) -> std::io::Result<File> {
    if truncate {
        return File::create(path);
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Install the global logger described by `config`
pub fn init_logging(config: &LogConfig) -> anyhow::Result<()> {
    if !config.enabled {
        log::set_max_level(LevelFilter::Off);
        return Ok(());
    }

    let file = open_log_file(&config.log_file, config.clear_on_startup)?;

    let mut builder = ConfigBuilder::new();
    builder.set_time_format_rfc3339();
    for krate in QUIET_CRATES {
        builder.add_filter_ignore_str(krate);
    }
    // Falls back to UTC when the local offset cannot be determined
    let _ = builder.set_time_offset_to_local();

    WriteLogger::init(config.level, builder.build(), file)?;

    let enabled: Vec<&str> = LogTarget::ALL
        .iter()
        .filter(|t| config.features.allows(**t))
        .map(|t| t.as_str())
        .collect();
    log::info!(
        "Logging to {} at {:?}, categories: {}",
        config.log_file.display(),
        config.level,
        enabled.join(",")
    );
    Ok(())
}

#[macro_export]
macro_rules! log_modal_state {
    ($config:expr, $($arg:tt)*) => {
        if $config.allows($crate::logging::LogTarget::ModalState) {
            log::debug!(target: "modal_state", $($arg)*);
        }
    };
}

/// Per-keystroke tracing
#[macro_export]
macro_rules! log_key_event {
    ($config:expr, $($arg:tt)*) => {
        if $config.allows($crate::logging::LogTarget::KeyEvents) {
            log::trace!(target: "key_events", $($arg)*);
        }
    };
}

#[macro_export]
macro_rules! log_api_call {
    ($config:expr, $($arg:tt)*) => {
        if $config.allows($crate::logging::LogTarget::ApiCalls) {
            log::info!(target: "api_calls", $($arg)*);
        }
    };
}

#[macro_export]
macro_rules! log_tagging {
    ($config:expr, $($arg:tt)*) => {
        if $config.allows($crate::logging::LogTarget::Tagging) {
            log::debug!(target: "tagging", $($arg)*);
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_presets() {
        assert!(!LogConfig::disabled().allows(LogTarget::Tagging));
        assert_eq!(LogConfig::minimal().level, LevelFilter::Warn);
        assert!(!LogConfig::minimal().allows(LogTarget::Tagging));
        assert!(LogConfig::verbose().allows(LogTarget::KeyEvents));
        assert!(!LogConfig::for_verbosity(false).allows(LogTarget::KeyEvents));
        assert!(LogConfig::for_verbosity(false).allows(LogTarget::Tagging));
    }

    #[test]
    fn test_master_switch_beats_features() {
        let config = LogConfig {
            enabled: false,
            features: LogFeatures::all(),
            ..Default::default()
        };
        for target in LogTarget::ALL {
            assert!(!config.allows(target), "{:?} should be off", target);
        }
    }

    #[test]
    fn test_targets_match_macro_literals() {
        let names: Vec<_> = LogTarget::ALL.iter().map(|t| t.as_str()).collect();
        assert_eq!(names, vec!["modal_state", "key_events", "api_calls", "tagging"]);
    }

    #[test]
    fn test_open_log_file_truncates_or_appends() {
        use std::io::Write;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join(DEFAULT_LOG_FILE);
        std::fs::write(&path, "old line\n").unwrap();

        let mut file = open_log_file(&path, false).unwrap();
        writeln!(file, "new line").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "old line\nnew line\n");

        open_log_file(&path, true).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    }
}
