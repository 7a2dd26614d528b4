//! Environment variable handling for configuration overrides.
//!
//! This module provides support for `PARKADE_*` environment variables that
//! override configuration file values.

use std::env;

use crate::config::schema::{Config, OutputFormat};
use crate::error::{Error, Result};

/// Overrides `server.bind`.
pub const BIND_ENV: &str = "PARKADE_BIND";
/// Overrides `server.workers`.
pub const WORKERS_ENV: &str = "PARKADE_WORKERS";
/// Overrides `maximum_lock_wait_seconds`.
pub const LOCK_WAIT_ENV: &str = "PARKADE_MAXIMUM_LOCK_WAIT_SECONDS";
/// Overrides `disable_autoinit`.
pub const DISABLE_AUTOINIT_ENV: &str = "PARKADE_DISABLE_AUTOINIT";
/// Overrides `output_format`.
pub const OUTPUT_FORMAT_ENV: &str = "PARKADE_OUTPUT_FORMAT";

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use parkade::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply environment variable overrides to config.
    ///
    /// # Errors
    ///
    /// Returns an error if any environment variable value is invalid
    /// (e.g., non-numeric worker count, invalid boolean).
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Ok(bind) = env::var(BIND_ENV) {
            config.server.get_or_insert_with(Default::default).bind = Some(bind);
        }

        if let Ok(workers) = env::var(WORKERS_ENV) {
            let workers = workers.trim().parse().map_err(|_| Error::Validation {
                field: WORKERS_ENV.into(),
                message: "Must be a positive integer".into(),
            })?;
            config.server.get_or_insert_with(Default::default).workers = Some(workers);
        }

        if let Ok(seconds) = env::var(LOCK_WAIT_ENV) {
            config.maximum_lock_wait_seconds =
                Some(seconds.trim().parse().map_err(|_| Error::Validation {
                    field: LOCK_WAIT_ENV.into(),
                    message: "Must be a positive integer".into(),
                })?);
        }

        if let Ok(val) = env::var(DISABLE_AUTOINIT_ENV) {
            config.disable_autoinit = Some(Self::parse_bool(DISABLE_AUTOINIT_ENV, &val)?);
        }

        if let Ok(val) = env::var(OUTPUT_FORMAT_ENV) {
            let format: OutputFormat = val.parse().map_err(|message| Error::Validation {
                field: OUTPUT_FORMAT_ENV.into(),
                message,
            })?;
            config.output_format = Some(format);
        }

        Ok(())
    }

    /// Parse a boolean value from a string.
    ///
    /// Accepts: true/1/yes/on for true, false/0/no/off for false (case-insensitive).
    pub(crate) fn parse_bool(field: &str, s: &str) -> Result<bool> {
        match s.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(Error::Validation {
                field: field.into(),
                message: format!(
                    "Invalid boolean value: '{s}' (expected true/false/1/0/yes/no/on/off)"
                ),
            }),
        }
    }
}
