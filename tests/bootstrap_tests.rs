use std::io::Write;
use std::path::Path;

use tracing::Level;

use tierlog::paths::executable_dir;
use tierlog::{
    ConfigSource, Handler, LevelMatch, LogBuilder, LogConfig, ResolvedPaths, Severity, Tier,
    resolve_config,
};

fn write_config(dir: &Path, body: &str) -> ConfigSource {
    let path = dir.join("configlog.json");
    let mut file = std::fs::File::create(&path).expect("create config");
    file.write_all(body.as_bytes()).expect("write config");
    ConfigSource::File(path)
}

#[test]
fn test_no_config_uses_defaults_next_to_executable() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let config = resolve_config(&ConfigSource::File(tmp.path().join("configlog.json")));
    assert_eq!(config, LogConfig::default());

    let paths = ResolvedPaths::resolve(&config, None).expect("resolve");
    let logs = executable_dir().expect("exe dir").join("logs");
    assert_eq!(paths.debug, logs.join("debug.log"));
    assert_eq!(paths.info, logs.join("info.log"));
    assert_eq!(paths.error, logs.join("errors.log"));

    let (_dispatch, handle) = LogBuilder::from_config(config)
        .with_origin(tmp.path())
        .dispatch();
    let handlers = handle.handlers();
    assert_eq!(
        handlers.console().expect("console").filter,
        LevelMatch::AtLeast(Severity::Debug)
    );
    let logs = tmp.path().join("logs");
    assert_eq!(
        handlers.files().cloned().collect::<Vec<_>>(),
        vec![
            Handler::file(Tier::Debug, logs.join("debug.log")),
            Handler::file(Tier::Info, logs.join("info.log")),
            Handler::file(Tier::Error, logs.join("errors.log")),
        ]
    );
}

#[test]
fn test_console_level_only_keeps_default_files() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let source = write_config(tmp.path(), r#"{"ConsoleLevel": "ERROR"}"#);

    let (_dispatch, handle) = LogBuilder::from_source(&source)
        .with_origin(tmp.path())
        .dispatch();

    let console = handle.handlers().console().expect("console");
    assert_eq!(console.filter, LevelMatch::AtLeast(Severity::Error));
    assert!(!console.filter.accepts(&Level::DEBUG));
    assert!(!console.filter.accepts(&Level::INFO));
    assert!(!console.filter.accepts(&Level::WARN));
    assert!(console.filter.accepts(&Level::ERROR));
    let logs = tmp.path().join("logs");
    for tier in Tier::ALL {
        assert_eq!(
            handle.handlers().file(tier).expect("file handler").path(),
            Some(logs.join(tier.default_filename()).as_path())
        );
    }
}

#[test]
fn test_absolute_log_directory_ignores_executable() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let target = tmp.path().join("absolute-logs");
    let body = format!(
        r#"{{"LogDirectory": {}}}"#,
        serde_json::to_string(&target).expect("encode path")
    );
    let source = write_config(tmp.path(), &body);

    let config = resolve_config(&source);
    assert_eq!(config.log_directory, target);

    let paths = ResolvedPaths::resolve(&config, Some(Path::new("/unused/origin"))).expect("resolve");
    assert_eq!(paths.directory, target);

    let (_dispatch, handle) = LogBuilder::from_config(config).dispatch();
    assert!(handle.errors().is_empty());
    assert!(target.join("info.log").exists());
}

#[test]
fn test_invalid_config_falls_back_to_defaults() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let source = write_config(tmp.path(), r#"{"ConsoleLevel": "ERROR", "Filenames": "#);

    assert_eq!(resolve_config(&source), LogConfig::default());
}

#[test]
fn test_tier_files_receive_exact_levels() {
    let tmp = tempfile::tempdir().expect("tempdir");

    let (dispatch, handle) = LogBuilder::new()
        .with_log_directory(tmp.path())
        .with_filename(Tier::Error, "failures.log")
        .dispatch();

    tracing::dispatcher::with_default(&dispatch, || {
        tracing::info!(request_id = 7, "tier-test: accepted");
        tracing::error!("tier-test: failed");
    });

    drop(dispatch);
    drop(handle);

    let info = std::fs::read_to_string(tmp.path().join("info.log")).expect("read info");
    let failures = std::fs::read_to_string(tmp.path().join("failures.log")).expect("read errors");
    let debug = std::fs::read_to_string(tmp.path().join("debug.log")).expect("read debug");

    assert!(info.contains("tier-test: accepted"));
    assert!(info.contains("request_id=7"));
    assert!(!info.contains("tier-test: failed"));
    assert!(failures.contains("tier-test: failed"));
    assert!(!debug.contains("tier-test"));
    assert!(!failures.contains("\x1b"), "ANSI escape found in log file");
}

#[test]
fn test_files_are_appended() {
    let tmp = tempfile::tempdir().expect("tempdir");
    std::fs::write(tmp.path().join("info.log"), "earlier run\n").expect("seed file");

    let (dispatch, handle) = LogBuilder::new().with_log_directory(tmp.path()).dispatch();
    tracing::dispatcher::with_default(&dispatch, || {
        tracing::info!("append-test: later run");
    });
    drop(dispatch);
    drop(handle);

    let info = std::fs::read_to_string(tmp.path().join("info.log")).expect("read info");
    assert!(info.starts_with("earlier run\n"));
    assert!(info.contains("append-test: later run"));
}
