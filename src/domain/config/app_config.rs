//! Application configuration value object

use serde::{Deserialize, Serialize};

use crate::domain::flavor::LINE_SEPARATOR;

/// Default log filter when neither env nor file set one
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Valid `log_level` values
pub const VALID_LOG_LEVELS: &[&str] = &["off", "error", "warn", "info", "debug", "trace"];

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Delimiter used when printing file lists (unset = platform line separator)
    pub delimiter: Option<String>,
    pub log_level: Option<String>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            delimiter: None,
            log_level: Some(DEFAULT_LOG_LEVEL.to_string()),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            delimiter: other.delimiter.or(self.delimiter),
            log_level: other.log_level.or(self.log_level),
        }
    }

    /// Get the file list delimiter, or the platform line separator
    pub fn delimiter_or_default(&self) -> &str {
        self.delimiter.as_deref().unwrap_or(LINE_SEPARATOR)
    }

    /// Get the log filter, or "warn" if not set
    pub fn log_level_or_default(&self) -> &str {
        self.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }
}
