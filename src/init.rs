use std::path::Path;

use tracing::Dispatch;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;

use crate::handler::{Handler, HandlerSet, LevelMatch, OpenedHandlers};
use crate::paths::{ResolvedPaths, ensure_dir};
use crate::source::{ConfigSource, resolve_config};
use crate::{Error, LogConfig, Result, Severity, Tier, report};

/// Everything the bootstrap produced, owned by the program's entry point.
///
/// Keep it alive for as long as the process logs: dropping it flushes and
/// stops the file writers.
pub struct LogHandle {
    config: LogConfig,
    handlers: HandlerSet,
    errors: Vec<Error>,
    _guards: Vec<WorkerGuard>,
}

impl LogHandle {
    /// Effective configuration, defaults filled in.
    pub fn config(&self) -> &LogConfig {
        &self.config
    }

    /// Handlers that were actually installed.
    pub fn handlers(&self) -> &HandlerSet {
        &self.handlers
    }

    /// Setup failures reported on stderr.
    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    /// Whether some tier file is missing from the installed handlers.
    pub fn is_degraded(&self) -> bool {
        Tier::ALL
            .into_iter()
            .any(|tier| self.handlers.file(tier).is_none())
    }
}

impl std::fmt::Debug for LogHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogHandle")
            .field("config", &self.config)
            .field("handlers", &self.handlers)
            .field("errors", &self.errors)
            .finish_non_exhaustive()
    }
}

/// Plan the handler set for `config`.
///
/// The console handler is always present. File handlers are added only when
/// the log directory resolves and exists; otherwise the failure is reported
/// and returned alongside a console-only set.
pub fn prepare(config: &LogConfig, origin: Option<&Path>) -> (HandlerSet, Vec<Error>) {
    let mut errors = Vec::new();

    let severity = match config.console_severity() {
        Ok(severity) => severity,
        Err(e) => {
            report(&e);
            errors.push(e);
            Severity::Debug
        }
    };

    let mut handlers = HandlerSet::new();
    handlers.push(Handler::console(LevelMatch::AtLeast(severity)));

    if let Err(e) = attach_files(&mut handlers, config, origin) {
        report(&e);
        errors.push(e);
    }

    (handlers, errors)
}

fn attach_files(handlers: &mut HandlerSet, config: &LogConfig, origin: Option<&Path>) -> Result<()> {
    let paths = ResolvedPaths::resolve(config, origin)?;
    ensure_dir(&paths.directory)?;

    for tier in Tier::ALL {
        handlers.push(Handler::file(tier, paths.file(tier)));
    }
    Ok(())
}

/// Build the subscriber for `config` without installing it.
///
/// Relative log directories are resolved against `origin`, or the
/// executable's directory when `origin` is `None`.
pub fn build(config: &LogConfig, origin: Option<&Path>) -> (Dispatch, LogHandle) {
    let config = config.clone().fill_defaults();
    let (planned, mut errors) = prepare(&config, origin);

    let OpenedHandlers {
        layers,
        guards,
        handlers,
        errors: open_errors,
    } = planned.open(config.format);
    errors.extend(open_errors);

    let subscriber = tracing_subscriber::registry()
        .with(layers)
        .with(LevelFilter::DEBUG);

    let handle = LogHandle {
        config,
        handlers,
        errors,
        _guards: guards,
    };
    (Dispatch::new(subscriber), handle)
}

/// Initialize logging with the given configuration.
///
/// Setup failures short of installation degrade the handler set and are
/// listed in [`LogHandle::errors`]. Installing a second time fails with
/// [`Error::Init`].
pub fn init_logging(config: &LogConfig) -> Result<LogHandle> {
    install(config, None)
}

pub(crate) fn install(config: &LogConfig, origin: Option<&Path>) -> Result<LogHandle> {
    let (dispatch, handle) = build(config, origin);
    set_global(dispatch, &handle)?;
    Ok(handle)
}

/// One-shot startup hook.
///
/// Reads the conventional config source, builds the handlers and installs
/// them. Never fails: every problem is printed to stderr and the process
/// carries on with whatever logging could be set up.
pub fn bootstrap() -> LogHandle {
    bootstrap_from(&ConfigSource::conventional())
}

/// [`bootstrap`] with an explicit config source.
pub fn bootstrap_from(source: &ConfigSource) -> LogHandle {
    let config = resolve_config(source);
    let (dispatch, mut handle) = build(&config, None);
    if let Err(e) = set_global(dispatch, &handle) {
        report(&e);
        handle.errors.push(e);
    }
    handle
}

fn set_global(dispatch: Dispatch, handle: &LogHandle) -> Result<()> {
    tracing::dispatcher::set_global_default(dispatch).map_err(|e| Error::Init(e.to_string()))?;

    for handler in handle.handlers() {
        tracing::debug!(
            destination = %handler.destination,
            filter = %handler.filter,
            "log handler installed"
        );
    }
    if !handle.errors().is_empty() {
        tracing::warn!(
            errors = handle.errors().len(),
            "logging initialized with setup errors"
        );
    }
    Ok(())
}
