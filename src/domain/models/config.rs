use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure for Questlog
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Activity history configuration
    #[serde(default)]
    pub history: HistoryConfig,

    /// Completion bonus configuration
    #[serde(default)]
    pub bonuses: BonusConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory for rolling log files (stderr only when unset)
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
        }
    }
}

/// Activity history configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct HistoryConfig {
    /// Number of daily buckets kept in the active window before archiving
    #[serde(default = "default_active_window")]
    pub active_window: usize,
}

const fn default_active_window() -> usize {
    365
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            active_window: default_active_window(),
        }
    }
}

/// Completion bonus configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct BonusConfig {
    /// Hold quest bonuses reached by toggling a task until explicitly confirmed
    #[serde(default = "default_true")]
    pub require_quest_confirmation: bool,
}

const fn default_true() -> bool {
    true
}

impl Default for BonusConfig {
    fn default() -> Self {
        Self {
            require_quest_confirmation: default_true(),
        }
    }
}
