//! Configuration merging and precedence handling.

use crate::config::loader::ConfigSource;
use crate::config::schema::{Config, ServerConfig};

/// Merges configuration sources according to precedence rules.
///
/// # Examples
///
/// ```
/// use parkade::config::{Config, ConfigMerger};
///
/// let low = Config { maximum_lock_wait_seconds: Some(5), ..Default::default() };
/// let high = Config { maximum_lock_wait_seconds: Some(30), ..Default::default() };
///
/// let mut result = low;
/// ConfigMerger::merge_into(&mut result, &high);
/// assert_eq!(result.maximum_lock_wait_seconds, Some(30));
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge multiple configuration sources into final config.
    ///
    /// Sources should be provided in order from lowest to highest precedence.
    #[must_use]
    pub fn merge(sources: Vec<ConfigSource>) -> Config {
        let mut result = Config::default();
        for source in sources {
            Self::merge_into(&mut result, &source.config);
        }
        result
    }

    /// Merge source config into target (source overwrites target).
    ///
    /// # Merging Rules
    ///
    /// - Simple fields: source overwrites if Some
    /// - Server config: field-by-field merge
    /// - Layout: complete replacement, lots are never combined across files
    pub fn merge_into(target: &mut Config, source: &Config) {
        if source.maximum_lock_wait_seconds.is_some() {
            target.maximum_lock_wait_seconds = source.maximum_lock_wait_seconds;
        }

        if source.disable_autoinit.is_some() {
            target.disable_autoinit = source.disable_autoinit;
        }

        if source.output_format.is_some() {
            target.output_format = source.output_format;
        }

        if let Some(ref source_server) = source.server {
            target.server = Some(match &target.server {
                Some(target_server) => Self::merge_server(target_server, source_server),
                None => source_server.clone(),
            });
        }

        if source.layout.is_some() {
            target.layout.clone_from(&source.layout);
        }
    }

    fn merge_server(target: &ServerConfig, source: &ServerConfig) -> ServerConfig {
        ServerConfig {
            bind: source.bind.clone().or_else(|| target.bind.clone()),
            workers: source.workers.or(target.workers),
        }
    }
}
