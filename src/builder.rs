//! Builder pattern for initializing logging configuration.
//!
//! This module provides a convenient builder API for configuring and initializing
//! logging in a single chain of method calls.
//!
//! # Example
//!
//! ```rust,no_run
//! use tierlog::Tier;
//!
//! let _logging = tierlog::builder()
//!     .with_console_level("INFO")
//!     .with_log_directory("/var/log/app")
//!     .with_filename(Tier::Error, "failures.log")
//!     .init()
//!     .expect("Failed to initialize logging");
//! ```

use std::path::PathBuf;

use tracing::Dispatch;

use crate::init::{build, install};
use crate::source::{ConfigSource, resolve_config};
use crate::{LogConfig, LogFormat, LogHandle, Result, Tier};

/// A builder for configuring and initializing logging.
#[derive(Debug, Clone)]
pub struct LogBuilder {
    config: LogConfig,
    origin: Option<PathBuf>,
}

impl LogBuilder {
    /// Create a new LogBuilder with default configuration.
    pub fn new() -> Self {
        Self::from_config(LogConfig::new())
    }

    /// Create a LogBuilder from an existing configuration.
    pub fn from_config(config: LogConfig) -> Self {
        Self {
            config,
            origin: None,
        }
    }

    /// Create a LogBuilder from a config source, reporting failures on stderr.
    pub fn from_source(source: &ConfigSource) -> Self {
        Self::from_config(resolve_config(source))
    }

    /// Set the minimum console level (e.g. "DEBUG", "WARN", "ERROR").
    pub fn with_console_level(mut self, level: impl Into<String>) -> Self {
        self.config = self.config.with_console_level(level);
        self
    }

    /// Set the log directory.
    pub fn with_log_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config = self.config.with_log_directory(dir);
        self
    }

    /// Set the file name for one tier.
    pub fn with_filename(mut self, tier: Tier, name: impl Into<String>) -> Self {
        self.config = self.config.with_filename(tier, name);
        self
    }

    /// Set the log output format.
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.config = self.config.with_format(format);
        self
    }

    /// Resolve relative log directories against `origin` instead of the
    /// executable's directory.
    pub fn with_origin(mut self, origin: impl Into<PathBuf>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// Get the current configuration without initializing.
    pub fn build(self) -> LogConfig {
        self.config
    }

    /// Build the subscriber without installing it, e.g. for
    /// `tracing::dispatcher::with_default`.
    pub fn dispatch(self) -> (Dispatch, LogHandle) {
        build(&self.config, self.origin.as_deref())
    }

    /// Initialize logging with the configured settings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Init`](crate::Error::Init) if a global subscriber is
    /// already installed. Directory and file failures do not abort; they are
    /// listed in [`LogHandle::errors`].
    pub fn init(self) -> Result<LogHandle> {
        install(&self.config, self.origin.as_deref())
    }
}

impl Default for LogBuilder {
    fn default() -> Self {
        Self::new()
    }
}
