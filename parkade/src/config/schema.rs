//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for parkade:
//! HTTP server settings, database lock behavior, output format, and the
//! lot/floor/spot layout used for seeding.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::spot::SpotType;

/// Default HTTP bind address.
pub const DEFAULT_BIND: &str = "127.0.0.1:8080";

/// Default number of HTTP worker threads.
pub const DEFAULT_WORKERS: usize = 4;

/// Default maximum time to wait for the database write lock, in seconds.
pub const DEFAULT_LOCK_WAIT_SECONDS: u64 = 5;

/// Complete configuration structure.
///
/// Every field is optional so that partial files can be layered; use the
/// accessor methods to read a value with its default applied.
///
/// # Examples
///
/// ```
/// use parkade::config::{Config, ServerConfig};
///
/// let config = Config {
///     server: Some(ServerConfig {
///         bind: Some("0.0.0.0:9000".to_string()),
///         workers: None,
///     }),
///     ..Default::default()
/// };
/// assert_eq!(config.bind(), "0.0.0.0:9000");
/// assert_eq!(config.workers(), 4);
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// HTTP server settings.
    pub server: Option<ServerConfig>,

    /// Maximum time to wait for database lock acquisition (seconds).
    pub maximum_lock_wait_seconds: Option<u64>,

    /// Disable automatic database initialization.
    pub disable_autoinit: Option<bool>,

    /// Output format for CLI commands.
    pub output_format: Option<OutputFormat>,

    /// Lots to register with `parkade seed`.
    pub layout: Option<Vec<LotLayout>>,
}

impl Config {
    /// Returns the built-in defaults as a fully populated configuration.
    #[must_use]
    pub fn defaults() -> Self {
        Self {
            server: Some(ServerConfig {
                bind: Some(DEFAULT_BIND.to_string()),
                workers: Some(DEFAULT_WORKERS),
            }),
            maximum_lock_wait_seconds: Some(DEFAULT_LOCK_WAIT_SECONDS),
            disable_autoinit: Some(false),
            output_format: Some(OutputFormat::Human),
            layout: None,
        }
    }

    /// HTTP bind address.
    #[must_use]
    pub fn bind(&self) -> &str {
        self.server
            .as_ref()
            .and_then(|s| s.bind.as_deref())
            .unwrap_or(DEFAULT_BIND)
    }

    /// Number of HTTP worker threads.
    #[must_use]
    pub fn workers(&self) -> usize {
        self.server
            .as_ref()
            .and_then(|s| s.workers)
            .unwrap_or(DEFAULT_WORKERS)
    }

    /// Busy timeout for database connections.
    #[must_use]
    pub fn lock_timeout(&self) -> Duration {
        Duration::from_secs(
            self.maximum_lock_wait_seconds
                .unwrap_or(DEFAULT_LOCK_WAIT_SECONDS),
        )
    }

    /// Whether a missing database may be created on first use.
    #[must_use]
    pub fn autoinit_enabled(&self) -> bool {
        !self.disable_autoinit.unwrap_or(false)
    }

    /// Output format, human by default.
    #[must_use]
    pub fn output_format(&self) -> OutputFormat {
        self.output_format.unwrap_or_default()
    }

    /// Configured layout, empty if none.
    #[must_use]
    pub fn layout(&self) -> &[LotLayout] {
        self.layout.as_deref().unwrap_or_default()
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Address to bind, `host:port`.
    pub bind: Option<String>,

    /// Number of worker threads, each with its own database connection.
    pub workers: Option<usize>,
}

/// A lot to register.
///
/// # Examples
///
/// ```
/// use parkade::config::Config;
///
/// let yaml = r#"
/// layout:
///   - name: Central
///     address: 1 Main St
///     floors:
///       - number: 0
///         spots:
///           - { prefix: "C-", count: 10, type: COMPACT }
///           - { number: "H-1", type: HANDICAPPED }
/// "#;
/// let config: Config = serde_yaml::from_str(yaml).unwrap();
/// let floor = &config.layout()[0].floors[0];
/// let numbers: Vec<_> = floor.spots.iter().flat_map(|s| s.expand()).collect();
/// assert_eq!(numbers.len(), 11);
/// assert_eq!(numbers[0].0, "C-1");
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LotLayout {
    /// Lot name. Seeding skips lots whose name is already registered.
    pub name: String,

    /// Street address.
    pub address: String,

    /// Floors of the lot.
    #[serde(default)]
    pub floors: Vec<FloorLayout>,
}

/// A floor to register.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FloorLayout {
    /// Floor number.
    pub number: i32,

    /// Spots on the floor.
    #[serde(default)]
    pub spots: Vec<SpotLayout>,
}

/// One spot, or a numbered series of spots of the same type.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum SpotLayout {
    /// `count` spots numbered `{prefix}{start}`, `{prefix}{start + 1}`, ...
    Series(SpotSeries),
    /// A single spot with an explicit number.
    Single(SingleSpot),
}

/// A numbered series of spots.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct SpotSeries {
    /// Text placed before each number.
    pub prefix: String,
    /// Number of spots.
    pub count: u32,
    /// First number, 1 if omitted.
    pub start: Option<u32>,
    /// Type of every spot in the series.
    #[serde(rename = "type")]
    pub spot_type: SpotType,
}

/// A single spot.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct SingleSpot {
    /// Spot number.
    pub number: String,
    /// Spot type.
    #[serde(rename = "type")]
    pub spot_type: SpotType,
}

impl SpotLayout {
    /// Expands the entry into `(spot number, type)` pairs.
    #[must_use]
    pub fn expand(&self) -> Vec<(String, SpotType)> {
        match self {
            Self::Single(spot) => vec![(spot.number.clone(), spot.spot_type)],
            Self::Series(series) => {
                let start = series.start.unwrap_or(1);
                (0..series.count)
                    .map(|i| {
                        (
                            format!("{}{}", series.prefix, u64::from(start) + u64::from(i)),
                            series.spot_type,
                        )
                    })
                    .collect()
            }
        }
    }
}

/// Output format for CLI commands.
///
/// # Examples
///
/// ```
/// use parkade::config::OutputFormat;
///
/// let format: OutputFormat = "json".parse().unwrap();
/// assert_eq!(format, OutputFormat::Json);
/// assert_eq!(format.to_string(), "json");
/// ```
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text and tables.
    #[default]
    Human,
    /// Pretty-printed JSON using the HTTP view shapes.
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Human => write!(f, "human"),
            Self::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" => Ok(Self::Human),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid output format: {s} (expected human or json)")),
        }
    }
}
