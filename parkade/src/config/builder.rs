//! Configuration assembly.

use std::path::{Path, PathBuf};

use crate::config::environment::EnvironmentConfig;
use crate::config::loader::ConfigLoader;
use crate::config::merger::ConfigMerger;
use crate::config::schema::Config;
use crate::config::validator::ConfigValidator;
use crate::error::Result;

/// Builds the effective configuration from defaults, files, environment
/// and programmatic overrides.
///
/// # Examples
///
/// ```
/// use parkade::config::{Config, ConfigBuilder};
///
/// let config = ConfigBuilder::new()
///     .skip_files()
///     .skip_env()
///     .with_config(Config {
///         maximum_lock_wait_seconds: Some(30),
///         ..Default::default()
///     })
///     .build()
///     .unwrap();
///
/// assert_eq!(config.maximum_lock_wait_seconds, Some(30));
/// assert_eq!(config.workers(), 4);
/// ```
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    working_dir: Option<PathBuf>,
    data_dir: Option<PathBuf>,
    skip_files: bool,
    skip_env: bool,
    overrides: Vec<Config>,
}

impl ConfigBuilder {
    /// Creates a builder that reads files from the current directory and
    /// the default data directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the directory project files are discovered from.
    #[must_use]
    pub fn with_working_dir(mut self, dir: &Path) -> Self {
        self.working_dir = Some(dir.to_path_buf());
        self
    }

    /// Sets the data directory holding the user `config.yaml`.
    #[must_use]
    pub fn with_data_dir(mut self, dir: &Path) -> Self {
        self.data_dir = Some(dir.to_path_buf());
        self
    }

    /// Ignores configuration files.
    #[must_use]
    pub fn skip_files(mut self) -> Self {
        self.skip_files = true;
        self
    }

    /// Ignores `PARKADE_*` environment variables.
    #[must_use]
    pub fn skip_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Adds a programmatic override, applied after every other source.
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.overrides.push(config);
        self
    }

    /// Merges every source and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be read or parsed, an environment
    /// variable is malformed, or the merged configuration is invalid.
    pub fn build(self) -> Result<Config> {
        let mut config = Config::defaults();

        if !self.skip_files {
            let working_dir = match self.working_dir {
                Some(dir) => dir,
                None => std::env::current_dir()?,
            };
            let sources = ConfigLoader::load_all(&working_dir, self.data_dir.as_deref())?;
            for source in &sources {
                ConfigValidator::validate(&source.config).map_err(|e| {
                    log::debug!("invalid configuration in {}", source.path.display());
                    e
                })?;
            }
            ConfigMerger::merge_into(&mut config, &ConfigMerger::merge(sources));
        }

        if !self.skip_env {
            EnvironmentConfig::apply_overrides(&mut config)?;
        }

        for overrides in &self.overrides {
            ConfigMerger::merge_into(&mut config, overrides);
        }

        ConfigValidator::validate(&config)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::loader::{LOCAL_CONFIG_FILE, PROJECT_CONFIG_FILE, USER_CONFIG_FILE};
    use crate::config::schema::{OutputFormat, ServerConfig, DEFAULT_BIND};
    use crate::error::Error;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_only() {
        let config = ConfigBuilder::new().skip_files().skip_env().build().unwrap();
        assert_eq!(config, Config::defaults());
    }

    #[test]
    fn test_file_precedence() {
        let data = TempDir::new().unwrap();
        let work = TempDir::new().unwrap();
        fs::write(
            data.path().join(USER_CONFIG_FILE),
            "maximum_lock_wait_seconds: 3\noutput_format: json\n",
        )
        .unwrap();
        fs::write(
            work.path().join(PROJECT_CONFIG_FILE),
            "maximum_lock_wait_seconds: 7\nserver:\n  workers: 2\n",
        )
        .unwrap();
        fs::write(work.path().join(LOCAL_CONFIG_FILE), "server:\n  workers: 6\n").unwrap();

        let config = ConfigBuilder::new()
            .with_working_dir(work.path())
            .with_data_dir(data.path())
            .skip_env()
            .build()
            .unwrap();

        assert_eq!(config.maximum_lock_wait_seconds, Some(7));
        assert_eq!(config.output_format(), OutputFormat::Json);
        assert_eq!(config.workers(), 6);
        assert_eq!(config.bind(), DEFAULT_BIND);
    }

    #[test]
    fn test_overrides_win() {
        let work = TempDir::new().unwrap();
        fs::write(work.path().join(PROJECT_CONFIG_FILE), "server:\n  workers: 2\n").unwrap();

        let config = ConfigBuilder::new()
            .with_working_dir(work.path())
            .with_data_dir(work.path())
            .skip_env()
            .with_config(Config {
                server: Some(ServerConfig {
                    bind: None,
                    workers: Some(9),
                }),
                ..Default::default()
            })
            .build()
            .unwrap();
        assert_eq!(config.workers(), 9);
    }

    #[test]
    fn test_invalid_file_rejected() {
        let work = TempDir::new().unwrap();
        fs::write(work.path().join(PROJECT_CONFIG_FILE), "server:\n  workers: 0\n").unwrap();

        let result = ConfigBuilder::new()
            .with_working_dir(work.path())
            .with_data_dir(work.path())
            .skip_env()
            .build();
        assert!(matches!(result, Err(Error::Validation { ref field, .. }) if field == "server.workers"));
    }

    #[test]
    fn test_invalid_override_rejected() {
        let result = ConfigBuilder::new()
            .skip_files()
            .skip_env()
            .with_config(Config {
                maximum_lock_wait_seconds: Some(0),
                ..Default::default()
            })
            .build();
        assert!(result.is_err());
    }
}
