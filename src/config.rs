use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{Result, Severity, Tier};

/// Configuration for the logging bootstrap
///
/// Field names follow the JSON document read from `configlog.json`; the
/// struct can equally be embedded in an application's own TOML or YAML
/// config. Any field left out falls back to its default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Minimum severity written to stderr (e.g. "DEBUG", "ERROR")
    #[serde(rename = "ConsoleLevel", alias = "StderrLvl")]
    pub console_level: String,
    /// Log directory; relative paths are taken from the executable's directory
    #[serde(rename = "LogDirectory", alias = "Logpath")]
    pub log_directory: PathBuf,
    /// File name per tier, keyed by "ERROR", "INFO" and "DEBUG"
    #[serde(rename = "Filenames")]
    pub filenames: BTreeMap<String, String>,
    /// Output format for every destination
    #[serde(rename = "Format", alias = "format")]
    pub format: LogFormat,
}

impl LogConfig {
    /// Create a new LogConfig with defaults
    pub fn new() -> Self {
        Self {
            console_level: default_console_level(),
            log_directory: PathBuf::new(),
            filenames: default_filenames(),
            format: LogFormat::Text,
        }
    }

    /// Set the console level
    pub fn with_console_level(mut self, level: impl Into<String>) -> Self {
        self.console_level = level.into();
        self
    }

    /// Set the log directory
    pub fn with_log_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.log_directory = dir.into();
        self
    }

    /// Set the file name for one tier
    pub fn with_filename(mut self, tier: Tier, name: impl Into<String>) -> Self {
        self.filenames.insert(tier.key().to_string(), name.into());
        self
    }

    /// Set the output format
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Fill every empty field from the defaults, one field at a time.
    ///
    /// Tier file names are filled individually, so a config naming only the
    /// ERROR file keeps that name and gets the default INFO and DEBUG files.
    pub fn fill_defaults(mut self) -> Self {
        if self.console_level.trim().is_empty() {
            self.console_level = default_console_level();
        }
        for tier in Tier::ALL {
            let entry = self.filenames.entry(tier.key().to_string()).or_default();
            if entry.trim().is_empty() {
                *entry = tier.default_filename().to_string();
            }
        }
        self
    }

    /// File name configured for `tier`, or its default when unset.
    pub fn filename(&self, tier: Tier) -> &str {
        match self.filenames.get(tier.key()) {
            Some(name) if !name.trim().is_empty() => name,
            _ => tier.default_filename(),
        }
    }

    /// Configured log directory (empty means "derive from the executable").
    pub fn log_directory(&self) -> &Path {
        &self.log_directory
    }

    /// Parse the console level.
    pub fn console_severity(&self) -> Result<Severity> {
        self.console_level.parse()
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Format of each log line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human readable text
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

fn default_console_level() -> String {
    Severity::Debug.name().to_string()
}

fn default_filenames() -> BTreeMap<String, String> {
    Tier::ALL
        .into_iter()
        .map(|tier| (tier.key().to_string(), tier.default_filename().to_string()))
        .collect()
}
