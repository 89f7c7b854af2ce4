//! Destinations and the level filters attached to them.
//!
//! A [`HandlerSet`] is plain data describing what will be installed: the
//! console handler first, then one file handler per tier. [`HandlerSet::open`]
//! turns it into `tracing-subscriber` layers.

use std::fmt;
use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};

use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::{Layer, Registry, fmt as tfmt};

use crate::{Error, LogFormat, Result, Severity, Tier, report};

/// A layer ready to be stacked onto the registry.
pub type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Where a handler writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// Process standard error.
    Stderr,
    /// Append-mode log file.
    File(PathBuf),
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::Stderr => f.write_str("stderr"),
            Destination::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Which events a handler accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelMatch {
    /// The given severity and everything more severe.
    AtLeast(Severity),
    /// Exactly the tier's level, nothing else.
    Exactly(Tier),
}

impl LevelMatch {
    /// Whether an event at `level` passes this filter.
    pub fn accepts(&self, level: &Level) -> bool {
        match self {
            LevelMatch::AtLeast(severity) => *level <= severity.level_filter(),
            LevelMatch::Exactly(tier) => *level == tier.level(),
        }
    }
}

impl fmt::Display for LevelMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelMatch::AtLeast(severity) => write!(f, ">={}", severity),
            LevelMatch::Exactly(tier) => write!(f, "={}", tier),
        }
    }
}

/// One destination plus its filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Handler {
    pub destination: Destination,
    pub filter: LevelMatch,
}

impl Handler {
    /// Console handler.
    pub fn console(filter: LevelMatch) -> Self {
        Self {
            destination: Destination::Stderr,
            filter,
        }
    }

    /// File handler bound to a single tier.
    pub fn file(tier: Tier, path: impl Into<PathBuf>) -> Self {
        Self {
            destination: Destination::File(path.into()),
            filter: LevelMatch::Exactly(tier),
        }
    }

    /// Tier this handler is bound to, if any.
    pub fn tier(&self) -> Option<Tier> {
        match self.filter {
            LevelMatch::Exactly(tier) => Some(tier),
            _ => None,
        }
    }

    /// File written by this handler, if any.
    pub fn path(&self) -> Option<&Path> {
        match &self.destination {
            Destination::File(path) => Some(path),
            Destination::Stderr => None,
        }
    }

    fn layer(&self, format: LogFormat) -> Result<(BoxedLayer, Option<WorkerGuard>)> {
        match &self.destination {
            Destination::Stderr => {
                let layer = tfmt::layer::<Registry>()
                    .with_writer(io::stderr)
                    .with_target(false);
                let layer = match format {
                    LogFormat::Json => filtered(layer.json(), &self.filter),
                    LogFormat::Text => filtered(layer, &self.filter),
                };
                Ok((layer, None))
            }
            Destination::File(path) => {
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .map_err(|source| Error::OpenFile {
                        path: path.clone(),
                        source,
                    })?;
                let (non_blocking, guard) = tracing_appender::non_blocking(file);

                let layer = tfmt::layer::<Registry>()
                    .with_writer(non_blocking)
                    .with_ansi(false);
                #[cfg(feature = "time")]
                let layer = layer.with_timer(tfmt::time::UtcTime::new(
                    time::format_description::well_known::Rfc3339,
                ));

                let layer = match format {
                    LogFormat::Json => filtered(layer.json(), &self.filter),
                    LogFormat::Text => filtered(layer, &self.filter),
                };
                Ok((layer, Some(guard)))
            }
        }
    }
}

fn filtered<L>(layer: L, filter: &LevelMatch) -> BoxedLayer
where
    L: Layer<Registry> + Send + Sync + 'static,
{
    match filter {
        LevelMatch::AtLeast(severity) => layer.with_filter(severity.level_filter()).boxed(),
        LevelMatch::Exactly(_) => {
            let filter = *filter;
            layer
                .with_filter(filter_fn(move |meta| filter.accepts(meta.level())))
                .boxed()
        }
    }
}

/// Ordered collection of handlers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HandlerSet {
    handlers: Vec<Handler>,
}

impl HandlerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, handler: Handler) {
        self.handlers.push(handler);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Handler> {
        self.handlers.iter()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// The console handler, if one was added.
    pub fn console(&self) -> Option<&Handler> {
        self.handlers
            .iter()
            .find(|h| h.destination == Destination::Stderr)
    }

    /// The file handler for `tier`, if one was added.
    pub fn file(&self, tier: Tier) -> Option<&Handler> {
        self.handlers.iter().find(|h| h.tier() == Some(tier))
    }

    /// All file handlers in registration order.
    pub fn files(&self) -> impl Iterator<Item = &Handler> {
        self.handlers.iter().filter(|h| h.path().is_some())
    }

    /// Build one layer per handler.
    ///
    /// A handler whose file cannot be opened is reported on stderr and left
    /// out; the rest are still returned.
    pub fn open(&self, format: LogFormat) -> OpenedHandlers {
        let mut opened = OpenedHandlers::default();
        for handler in &self.handlers {
            match handler.layer(format) {
                Ok((layer, guard)) => {
                    opened.layers.push(layer);
                    opened.guards.extend(guard);
                    opened.handlers.push(handler.clone());
                }
                Err(e) => {
                    report(&e);
                    opened.errors.push(e);
                }
            }
        }
        opened
    }
}

impl<'a> IntoIterator for &'a HandlerSet {
    type Item = &'a Handler;
    type IntoIter = std::slice::Iter<'a, Handler>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Layers built by [`HandlerSet::open`].
#[derive(Default)]
pub struct OpenedHandlers {
    /// One layer per handler that opened, in order.
    pub layers: Vec<BoxedLayer>,
    /// Flush guards for the file writers.
    pub guards: Vec<WorkerGuard>,
    /// The handlers behind `layers`.
    pub handlers: HandlerSet,
    /// Handlers that could not be opened.
    pub errors: Vec<Error>,
}
