//! Log directory resolution relative to the running executable.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::{Error, LogConfig, Result, Tier};

/// Directory used under the executable's directory when none is configured.
pub const DEFAULT_LOG_SUBDIR: &str = "logs";

/// Directory containing the running executable.
pub fn executable_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe().map_err(Error::ExecutablePath)?;
    exe.parent().map(Path::to_path_buf).ok_or_else(|| {
        Error::ExecutablePath(io::Error::other(format!(
            "{} has no parent directory",
            exe.display()
        )))
    })
}

/// Turn a configured log directory into an absolute one.
///
/// Absolute paths come back unchanged. Relative paths are joined onto
/// `origin`, or onto the executable's directory when no origin is given.
/// An empty path stands for [`DEFAULT_LOG_SUBDIR`].
pub fn resolve_log_dir(configured: &Path, origin: Option<&Path>) -> Result<PathBuf> {
    if configured.is_absolute() {
        return Ok(configured.to_path_buf());
    }

    let base = match origin {
        Some(origin) => origin.to_path_buf(),
        None => executable_dir()?,
    };

    if configured.as_os_str().is_empty() {
        Ok(base.join(DEFAULT_LOG_SUBDIR))
    } else {
        Ok(base.join(configured))
    }
}

/// Make sure `path` is an existing directory, creating it if absent.
pub fn ensure_dir(path: &Path) -> Result<()> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => return Ok(()),
        Ok(_) => {
            return Err(Error::CreateDir {
                path: path.to_path_buf(),
                source: io::Error::new(io::ErrorKind::AlreadyExists, "not a directory"),
            });
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(Error::Io(e)),
    }

    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o755);
    }

    builder.create(path).map_err(|source| Error::CreateDir {
        path: path.to_path_buf(),
        source,
    })
}

/// Absolute log directory plus one file per tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    pub directory: PathBuf,
    pub debug: PathBuf,
    pub info: PathBuf,
    pub error: PathBuf,
}

impl ResolvedPaths {
    /// Resolve the directory and tier files for `config`.
    pub fn resolve(config: &LogConfig, origin: Option<&Path>) -> Result<Self> {
        let directory = resolve_log_dir(config.log_directory(), origin)?;
        Ok(Self::in_directory(directory, config))
    }

    /// Tier files for `config` inside an already resolved directory.
    pub fn in_directory(directory: PathBuf, config: &LogConfig) -> Self {
        Self {
            debug: directory.join(config.filename(Tier::Debug)),
            info: directory.join(config.filename(Tier::Info)),
            error: directory.join(config.filename(Tier::Error)),
            directory,
        }
    }

    /// File path for one tier.
    pub fn file(&self, tier: Tier) -> &Path {
        match tier {
            Tier::Debug => &self.debug,
            Tier::Info => &self.info,
            Tier::Error => &self.error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_dir_is_unchanged() {
        let dir = std::env::temp_dir().join("tierlog-abs");
        let resolved = resolve_log_dir(&dir, Some(Path::new("/ignored"))).unwrap();
        assert_eq!(resolved, dir);
        assert_eq!(resolve_log_dir(&resolved, None).unwrap(), dir);
    }

    #[test]
    fn test_relative_dir_joins_origin() {
        let origin = std::env::temp_dir().join("bin");
        let first = resolve_log_dir(Path::new("var/log"), Some(&origin)).unwrap();
        let second = resolve_log_dir(Path::new("var/log"), Some(&origin)).unwrap();
        assert_eq!(first, origin.join("var/log"));
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_dir_defaults_to_logs() {
        let origin = std::env::temp_dir();
        let resolved = resolve_log_dir(Path::new(""), Some(&origin)).unwrap();
        assert_eq!(resolved, origin.join(DEFAULT_LOG_SUBDIR));
    }

    #[test]
    fn test_relative_dir_uses_executable() {
        let resolved = resolve_log_dir(Path::new("logs"), None).unwrap();
        assert!(resolved.is_absolute());
        assert_eq!(resolved, executable_dir().unwrap().join("logs"));
    }

    #[test]
    fn test_ensure_dir_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("a/b");
        ensure_dir(&dir).unwrap();
        ensure_dir(&dir).unwrap();
        assert!(dir.is_dir());
    }

    #[cfg(unix)]
    #[test]
    fn test_ensure_dir_mode() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("logs");
        ensure_dir(&dir).unwrap();
        let mode = fs::metadata(&dir).unwrap().permissions().mode() & 0o777;
        // umask can only remove bits
        assert_eq!(mode & !0o755, 0);
        assert_ne!(mode & 0o700, 0);
    }

    #[test]
    fn test_ensure_dir_rejects_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let err = ensure_dir(file.path()).unwrap_err();
        assert!(matches!(err, Error::CreateDir { .. }));
    }

    #[test]
    fn test_resolved_paths() {
        let origin = std::env::temp_dir();
        let config = LogConfig::new().with_filename(Tier::Info, "app.log");
        let paths = ResolvedPaths::resolve(&config, Some(&origin)).unwrap();

        let dir = origin.join("logs");
        assert_eq!(paths.directory, dir);
        assert_eq!(paths.file(Tier::Debug), dir.join("debug.log"));
        assert_eq!(paths.file(Tier::Info), dir.join("app.log"));
        assert_eq!(paths.file(Tier::Error), dir.join("errors.log"));
    }
}
