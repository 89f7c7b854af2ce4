//! Where the logging configuration comes from.
//!
//! A process either points at a JSON file, hands over a [`LogConfig`] it
//! parsed itself, or relies on the conventional lookup:
//!
//! 1. the `TIERLOG_CONFIG` environment variable at runtime,
//! 2. the `TIERLOG_CONFIG` environment variable at build time,
//! 3. `configlog.json` next to the executable.
//!
//! Resolution never fails. A missing or broken source is reported on
//! stderr and the defaults are used instead.

use std::fs;
use std::path::{Path, PathBuf};

use crate::paths::executable_dir;
use crate::{LogConfig, Result, report};

/// Conventional configuration file name.
pub const CONFIG_FILE_NAME: &str = "configlog.json";

/// Environment variable naming the configuration file.
pub const CONFIG_ENV: &str = "TIERLOG_CONFIG";

const BUILD_CONFIG: Option<&str> = option_env!("TIERLOG_CONFIG");

/// A source of logging configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ConfigSource {
    /// Built-in defaults only.
    #[default]
    Defaults,
    /// A JSON document on disk.
    File(PathBuf),
    /// A config produced by an external loader; empty fields are still
    /// filled from the defaults.
    Value(LogConfig),
}

impl ConfigSource {
    /// Source picked by the conventional lookup order.
    pub fn conventional() -> Self {
        let runtime = std::env::var(CONFIG_ENV).ok();
        let path = conventional_path(runtime.as_deref(), BUILD_CONFIG);
        eprintln!("{}", lookup_notice(&path));
        ConfigSource::File(path)
    }
}

fn lookup_notice(path: &Path) -> String {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.display().to_string(),
        _ => ".".to_string(),
    };
    format!(
        "[tierlog] {} will be looked up in {} directory",
        path.file_name().unwrap_or(path.as_os_str()).to_string_lossy(),
        dir
    )
}

fn conventional_path(runtime: Option<&str>, build: Option<&str>) -> PathBuf {
    if let Some(path) = [runtime, build]
        .into_iter()
        .flatten()
        .find(|path| !path.trim().is_empty())
    {
        return PathBuf::from(path);
    }

    match executable_dir() {
        Ok(dir) => dir.join(CONFIG_FILE_NAME),
        Err(e) => {
            report(&e);
            PathBuf::from(CONFIG_FILE_NAME)
        }
    }
}

/// Parse a JSON configuration document without filling defaults.
pub fn parse_config(text: &str) -> Result<LogConfig> {
    Ok(serde_json::from_str(text)?)
}

/// Read and parse a JSON configuration file without filling defaults.
pub fn load_config_file(path: &Path) -> Result<LogConfig> {
    let text = fs::read_to_string(path)?;
    parse_config(&text)
}

/// Produce a complete configuration from `source`.
///
/// Errors are printed to stderr and the all-default configuration is
/// returned in their place.
pub fn resolve_config(source: &ConfigSource) -> LogConfig {
    let loaded = match source {
        ConfigSource::Defaults => return LogConfig::default(),
        ConfigSource::File(path) => load_config_file(path).map_err(|e| {
            eprintln!("[tierlog] Config logfile error ({}): {}", path.display(), e);
        }),
        ConfigSource::Value(config) => Ok(config.clone()),
    };

    loaded.map(LogConfig::fill_defaults).unwrap_or_default()
}
