//! Configuration validation.
//!
//! This module checks field values and the internal consistency of the
//! seeding layout before any of it reaches the database.

use std::collections::HashSet;

use crate::config::schema::{Config, FloorLayout, LotLayout, ServerConfig, SpotLayout};
use crate::error::{Error, Result};

/// Upper bound on HTTP worker threads.
pub const MAX_WORKERS: usize = 256;

/// Validates configuration values.
///
/// # Examples
///
/// ```
/// use parkade::config::{Config, ConfigValidator};
///
/// ConfigValidator::validate(&Config::defaults()).unwrap();
///
/// let bad = Config { maximum_lock_wait_seconds: Some(0), ..Default::default() };
/// assert!(ConfigValidator::validate(&bad).is_err());
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] naming the first offending field.
    pub fn validate(config: &Config) -> Result<()> {
        if let Some(ref server) = config.server {
            Self::validate_server(server)?;
        }

        if let Some(timeout) = config.maximum_lock_wait_seconds {
            if timeout == 0 {
                return Err(Error::Validation {
                    field: "maximum_lock_wait_seconds".into(),
                    message: "Timeout must be greater than 0".into(),
                });
            }
        }

        if let Some(ref layout) = config.layout {
            Self::validate_layout(layout)?;
        }

        Ok(())
    }

    fn validate_server(server: &ServerConfig) -> Result<()> {
        if let Some(ref bind) = server.bind {
            let valid = bind
                .rsplit_once(':')
                .is_some_and(|(host, port)| !host.trim().is_empty() && port.parse::<u16>().is_ok());
            if !valid {
                return Err(Error::Validation {
                    field: "server.bind".into(),
                    message: format!("Expected host:port, got '{bind}'"),
                });
            }
        }

        if let Some(workers) = server.workers {
            if workers == 0 || workers > MAX_WORKERS {
                return Err(Error::Validation {
                    field: "server.workers".into(),
                    message: format!("Worker count must be between 1 and {MAX_WORKERS}"),
                });
            }
        }

        Ok(())
    }

    fn validate_layout(layout: &[LotLayout]) -> Result<()> {
        let mut names = HashSet::new();
        for (i, lot) in layout.iter().enumerate() {
            let field = format!("layout[{i}]");
            Self::validate_text(&format!("{field}.name"), &lot.name)?;
            Self::validate_text(&format!("{field}.address"), &lot.address)?;
            if !names.insert(lot.name.trim()) {
                return Err(Error::Validation {
                    field: format!("{field}.name"),
                    message: format!("Duplicate lot name '{}'", lot.name.trim()),
                });
            }
            Self::validate_floors(&field, &lot.floors)?;
        }
        Ok(())
    }

    fn validate_floors(lot_field: &str, floors: &[FloorLayout]) -> Result<()> {
        let mut numbers = HashSet::new();
        for (i, floor) in floors.iter().enumerate() {
            let field = format!("{lot_field}.floors[{i}]");
            if !numbers.insert(floor.number) {
                return Err(Error::Validation {
                    field: format!("{field}.number"),
                    message: format!("Duplicate floor number {}", floor.number),
                });
            }
            Self::validate_spots(&field, &floor.spots)?;
        }
        Ok(())
    }

    fn validate_spots(floor_field: &str, spots: &[SpotLayout]) -> Result<()> {
        let mut numbers = HashSet::new();
        for (i, spot) in spots.iter().enumerate() {
            let field = format!("{floor_field}.spots[{i}]");
            match spot {
                SpotLayout::Single(single) => {
                    Self::validate_text(&format!("{field}.number"), &single.number)?;
                }
                SpotLayout::Series(series) if series.count == 0 => {
                    return Err(Error::Validation {
                        field: format!("{field}.count"),
                        message: "Series count must be greater than 0".into(),
                    });
                }
                SpotLayout::Series(_) => {}
            }

            for (number, _) in spot.expand() {
                if !numbers.insert(number.trim().to_string()) {
                    return Err(Error::Validation {
                        field,
                        message: format!("Duplicate spot number '{}'", number.trim()),
                    });
                }
            }
        }
        Ok(())
    }

    fn validate_text(field: &str, value: &str) -> Result<()> {
        if value.trim().is_empty() {
            return Err(Error::Validation {
                field: field.into(),
                message: "Value cannot be empty".into(),
            });
        }
        if value.contains('\0') {
            return Err(Error::Validation {
                field: field.into(),
                message: "Value cannot contain null bytes".into(),
            });
        }
        Ok(())
    }
}
