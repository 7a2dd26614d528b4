//! Where the parking database lives and how long writers wait for it.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};

/// File name of the database inside the data directory.
pub const DATABASE_FILE_NAME: &str = "parkade.db";

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "PARKADE_DATA_DIR";

/// Busy timeout used when configuration does not set one.
const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Settings for opening a [`Database`](super::Database).
///
/// Every HTTP worker opens its own connection from a clone of the same
/// `DatabaseConfig`.
///
/// ```
/// use parkade::database::DatabaseConfig;
/// use std::time::Duration;
///
/// let config = DatabaseConfig::new("/srv/lots/parkade.db")
///     .with_busy_timeout(Duration::from_millis(10000));
/// assert_eq!(config.busy_timeout, Duration::from_secs(10));
/// ```
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Database file; its parent directory is created on open.
    pub path: PathBuf,
    /// How long a writer waits on a locked database before
    /// [`Error::LockTimeout`].
    pub busy_timeout: Duration,
}

impl DatabaseConfig {
    /// Settings for the file at `path` with a five second busy timeout.
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
        }
    }

    /// Sets how long writers wait on a locked database.
    #[must_use]
    pub fn with_busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    /// Configuration for `parkade.db` inside `data_dir`.
    #[must_use]
    pub fn in_data_dir(data_dir: impl AsRef<Path>) -> Self {
        Self::new(data_dir.as_ref().join(DATABASE_FILE_NAME))
    }
}

/// `~/.parkade`.
///
/// # Errors
///
/// Fails when the home directory cannot be determined.
pub fn default_data_dir() -> Result<PathBuf> {
    home::home_dir()
        .map(|home| home.join(".parkade"))
        .ok_or_else(|| Error::DataDirectoryNotFound {
            path: PathBuf::from("~/.parkade"),
        })
}

/// Resolves the data directory from `PARKADE_DATA_DIR`, falling back to
/// [`default_data_dir`]. A blank variable counts as unset.
///
/// # Errors
///
/// Fails when the variable is unset and there is no home directory.
pub fn resolve_data_dir() -> Result<PathBuf> {
    match std::env::var(DATA_DIR_ENV) {
        Ok(dir) if !dir.trim().is_empty() => Ok(PathBuf::from(dir)),
        _ => default_data_dir(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_defaults() {
        let config = DatabaseConfig::new("/var/lib/parkade/parkade.db");
        assert_eq!(config.path, PathBuf::from("/var/lib/parkade/parkade.db"));
        assert_eq!(config.busy_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_in_data_dir() {
        let config = DatabaseConfig::in_data_dir("/data");
        assert_eq!(config.path, PathBuf::from("/data/parkade.db"));
    }

    #[test]
    #[serial]
    fn test_resolve_data_dir() {
        std::env::remove_var(DATA_DIR_ENV);
        if home::home_dir().is_some() {
            assert!(resolve_data_dir().unwrap().ends_with(".parkade"));
        }

        std::env::set_var(DATA_DIR_ENV, "/custom/data");
        assert_eq!(resolve_data_dir().unwrap(), PathBuf::from("/custom/data"));

        std::env::set_var(DATA_DIR_ENV, "   ");
        if home::home_dir().is_some() {
            assert!(resolve_data_dir().unwrap().ends_with(".parkade"));
        }

        std::env::remove_var(DATA_DIR_ENV);
    }
}
