//! # Tierlog
//!
//! One-shot logging bootstrap on top of `tracing`.
//!
//! ## Features
//!
//! - Configuration from a JSON file, a build-time path, or an embedded value
//! - Field-by-field merge with built-in defaults
//! - Log directory resolved next to the running executable
//! - One append-mode file per tier: DEBUG, INFO and ERROR
//! - Console output on stderr gated by a minimum level
//!
//! ## Example
//!
//! ```rust,no_run
//! let _logging = tierlog::bootstrap();
//!
//! tracing::info!("This goes to stderr and info.log");
//! tracing::error!("This goes to stderr and errors.log");
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod handler;
pub mod init;
pub mod level;
pub mod paths;
pub mod source;

pub use builder::LogBuilder;
pub use config::{LogConfig, LogFormat};
pub use error::{Error, Result};
pub use handler::{Destination, Handler, HandlerSet, LevelMatch};
pub use init::{LogHandle, bootstrap, bootstrap_from, build, init_logging, prepare};
pub use level::{Severity, Tier};
pub use paths::{ResolvedPaths, ensure_dir, resolve_log_dir};
pub use source::{ConfigSource, load_config_file, parse_config, resolve_config};

pub(crate) use error::report;

/// Start a [`LogBuilder`] with default configuration.
pub fn builder() -> LogBuilder {
    LogBuilder::new()
}
