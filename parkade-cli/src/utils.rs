//! Utility functions for CLI operations.
//!
//! Shared plumbing for commands: data directory resolution, configuration
//! loading, database opening and output rendering.

use crate::error::CliError;
use parkade::config::OutputFormat;
use parkade::output::OutputFormatter;
use parkade::{Config, ConfigBuilder, Database, DatabaseConfig};
use std::path::PathBuf;

/// Global CLI options shared across all commands.
#[derive(Debug, Clone, Default)]
#[allow(dead_code)] // verbose only matters to the logger, installed in main.rs
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Override the data directory location.
    pub data_dir: Option<PathBuf>,

    /// Override the database busy timeout (in seconds).
    pub busy_timeout: Option<u64>,

    /// Disable automatic database initialization.
    pub disable_autoinit: bool,

    /// Override the output format.
    pub format: Option<OutputFormat>,
}

impl GlobalOptions {
    /// Configuration values set on the command line.
    fn as_overrides(&self) -> Config {
        Config {
            maximum_lock_wait_seconds: self.busy_timeout,
            disable_autoinit: self.disable_autoinit.then_some(true),
            output_format: self.format,
            ..Default::default()
        }
    }
}

/// Resolve the data directory.
///
/// Priority: `--data-dir` (or `PARKADE_DATA_DIR`) > `~/.parkade`.
pub fn resolve_data_dir(global: &GlobalOptions) -> Result<PathBuf, CliError> {
    match global.data_dir {
        Some(ref dir) => Ok(dir.clone()),
        None => parkade::database::resolve_data_dir().map_err(|e| CliError::Config(e.to_string())),
    }
}

/// Load hierarchical configuration.
///
/// Configuration is merged from multiple sources with precedence:
/// 1. Global options (highest priority)
/// 2. Environment variables
/// 3. Project `parkade.yaml`, then the data directory's `config.yaml`
/// 4. Built-in defaults (lowest priority)
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    let data_dir = resolve_data_dir(global)?;

    ConfigBuilder::new()
        .with_data_dir(&data_dir)
        .with_config(global.as_overrides())
        .build()
        .map_err(|e| CliError::Config(e.to_string()))
}

/// Database settings derived from the configuration.
pub fn database_config(global: &GlobalOptions, config: &Config) -> Result<DatabaseConfig, CliError> {
    let db_config = DatabaseConfig::in_data_dir(resolve_data_dir(global)?);

    if !db_config.path.exists() && !config.autoinit_enabled() {
        return Err(CliError::NoDataDirectory);
    }

    Ok(db_config.with_busy_timeout(config.lock_timeout()))
}

/// Open database with configuration.
///
/// # Errors
///
/// Returns `NoDataDirectory` if the database doesn't exist and auto-init is disabled.
pub fn open_database(global: &GlobalOptions, config: &Config) -> Result<Database, CliError> {
    Database::open(database_config(global, config)?).map_err(CliError::from)
}

/// Formatter for the configured output format.
pub fn formatter(config: &Config) -> Box<dyn OutputFormatter> {
    config.output_format().create_formatter()
}

/// Print rendered output to stdout.
pub fn emit(rendered: parkade::Result<String>) -> Result<(), CliError> {
    println!("{}", rendered?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use parkade::database::DATABASE_FILE_NAME;
    use tempfile::TempDir;

    #[test]
    fn test_overrides_only_carry_set_flags() {
        let overrides = GlobalOptions::default().as_overrides();
        assert_eq!(overrides, Config::default());

        let global = GlobalOptions {
            busy_timeout: Some(9),
            disable_autoinit: true,
            format: Some(OutputFormat::Json),
            ..Default::default()
        };
        let overrides = global.as_overrides();
        assert_eq!(overrides.maximum_lock_wait_seconds, Some(9));
        assert_eq!(overrides.disable_autoinit, Some(true));
        assert_eq!(overrides.output_format, Some(OutputFormat::Json));
    }

    #[test]
    fn test_explicit_data_dir_wins() {
        let temp = TempDir::new().unwrap();
        let global = GlobalOptions {
            data_dir: Some(temp.path().to_path_buf()),
            ..Default::default()
        };
        assert_eq!(resolve_data_dir(&global).unwrap(), temp.path());
    }

    #[test]
    fn test_missing_database_without_autoinit() {
        let temp = TempDir::new().unwrap();
        let global = GlobalOptions {
            data_dir: Some(temp.path().join("missing")),
            ..Default::default()
        };
        let config = Config {
            disable_autoinit: Some(true),
            ..Default::default()
        };

        let err = database_config(&global, &config).unwrap_err();
        assert!(matches!(err, CliError::NoDataDirectory));
    }

    #[test]
    fn test_database_config_uses_lock_timeout() {
        let temp = TempDir::new().unwrap();
        let global = GlobalOptions {
            data_dir: Some(temp.path().to_path_buf()),
            ..Default::default()
        };
        let config = Config {
            maximum_lock_wait_seconds: Some(12),
            ..Default::default()
        };

        let db_config = database_config(&global, &config).unwrap();
        assert_eq!(db_config.path, temp.path().join(DATABASE_FILE_NAME));
        assert_eq!(db_config.busy_timeout, std::time::Duration::from_secs(12));
    }
}
