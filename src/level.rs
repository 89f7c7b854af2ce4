//! Severity names and the file tiers built on top of them.

use std::fmt;
use std::str::FromStr;

use tracing::Level;
use tracing_subscriber::filter::LevelFilter;

use crate::Error;

/// A severity name as it appears in configuration.
///
/// `tracing` stops at ERROR, so FATAL and PANIC filter the same as ERROR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Severity {
    #[default]
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
    Panic,
}

impl Severity {
    /// All severities, most verbose first.
    pub const ALL: [Severity; 6] = [
        Severity::Debug,
        Severity::Info,
        Severity::Warn,
        Severity::Error,
        Severity::Fatal,
        Severity::Panic,
    ];

    /// Upper-case configuration name.
    pub fn name(self) -> &'static str {
        match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
            Severity::Fatal => "FATAL",
            Severity::Panic => "PANIC",
        }
    }

    /// Minimum-level filter passing this severity and everything above it.
    pub fn level_filter(self) -> LevelFilter {
        match self {
            Severity::Debug => LevelFilter::DEBUG,
            Severity::Info => LevelFilter::INFO,
            Severity::Warn => LevelFilter::WARN,
            Severity::Error | Severity::Fatal | Severity::Panic => LevelFilter::ERROR,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Severity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Severity::ALL
            .into_iter()
            .find(|severity| severity.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::Config(format!("unknown severity level: {:?}", s)))
    }
}

/// One of the severities that gets its own log file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tier {
    Debug,
    Info,
    Error,
}

impl Tier {
    /// Tiers in the order their file handlers are registered.
    pub const ALL: [Tier; 3] = [Tier::Debug, Tier::Info, Tier::Error];

    /// Key used in the `Filenames` map.
    pub fn key(self) -> &'static str {
        match self {
            Tier::Debug => "DEBUG",
            Tier::Info => "INFO",
            Tier::Error => "ERROR",
        }
    }

    /// File name used when configuration leaves this tier unset.
    pub fn default_filename(self) -> &'static str {
        match self {
            Tier::Debug => "debug.log",
            Tier::Info => "info.log",
            Tier::Error => "errors.log",
        }
    }

    /// The single `tracing` level written to this tier's file.
    pub fn level(self) -> Level {
        match self {
            Tier::Debug => Level::DEBUG,
            Tier::Info => Level::INFO,
            Tier::Error => Level::ERROR,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
