//! Parking spot types.
//!
//! This module provides the closed enumeration of spot categories and the
//! spot record returned by the registry.

use std::fmt;
use std::str::FromStr;

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::ids::{FloorId, SpotId};

/// Category of a parking spot.
///
/// The set is fixed. [`SpotType::ALL`] lists every variant in declaration
/// order, which is also the iteration order of availability snapshots.
///
/// # Examples
///
/// ```
/// use parkade::SpotType;
///
/// assert_eq!(SpotType::Large.as_str(), "LARGE");
/// assert_eq!("handicapped".parse::<SpotType>().unwrap(), SpotType::Handicapped);
/// assert!("VALET".parse::<SpotType>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SpotType {
    /// Standard car spot.
    Compact,
    /// Spot for larger vehicles.
    Large,
    /// Two-wheeler spot.
    Motorbike,
    /// Spot with a charging point.
    Electric,
    /// Accessible spot.
    Handicapped,
}

impl SpotType {
    /// Every spot type, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Compact,
        Self::Large,
        Self::Motorbike,
        Self::Electric,
        Self::Handicapped,
    ];

    /// Returns the canonical upper-case name stored in the database and
    /// used on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Compact => "COMPACT",
            Self::Large => "LARGE",
            Self::Motorbike => "MOTORBIKE",
            Self::Electric => "ELECTRIC",
            Self::Handicapped => "HANDICAPPED",
        }
    }

    /// Parses a spot type, reporting failures against the given field name.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the value does not name a spot type.
    pub fn parse_field(field: &str, value: &str) -> Result<Self, ValidationError> {
        value.parse().map_err(|_| ValidationError {
            field: field.to_string(),
            message: format!(
                "unknown spot type '{value}' (expected one of {})",
                Self::ALL.map(Self::as_str).join(", ")
            ),
        })
    }
}

impl fmt::Display for SpotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SpotType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == upper)
            .ok_or_else(|| format!("invalid spot type: {s}"))
    }
}

impl ToSql for SpotType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for SpotType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let text = value.as_str()?;
        text.parse()
            .map_err(|e: String| FromSqlError::Other(e.into()))
    }
}

/// A registered parking spot together with the number of its floor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParkingSpot {
    /// Spot identifier.
    pub id: SpotId,
    /// Spot number, unique within its floor.
    pub spot_number: String,
    /// Spot category.
    #[serde(rename = "type")]
    pub spot_type: SpotType,
    /// Whether the spot is currently held by an open vehicle session.
    pub is_occupied: bool,
    /// Owning floor.
    pub floor_id: FloorId,
    /// Number of the owning floor.
    pub floor_number: i32,
}

/// Validates and normalizes a spot number.
///
/// # Errors
///
/// Returns a validation error if the number is blank after trimming.
pub fn normalize_spot_number(spot_number: &str) -> Result<String, ValidationError> {
    let trimmed = spot_number.trim();
    if trimmed.is_empty() {
        return Err(ValidationError {
            field: "spotNumber".into(),
            message: "Spot number is required".into(),
        });
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_lists_every_variant_once() {
        let mut seen = std::collections::HashSet::new();
        for t in SpotType::ALL {
            assert!(seen.insert(t));
        }
        assert_eq!(seen.len(), 5);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("Compact".parse::<SpotType>().unwrap(), SpotType::Compact);
        assert_eq!(" ELECTRIC ".parse::<SpotType>().unwrap(), SpotType::Electric);
        assert!("".parse::<SpotType>().is_err());
    }

    #[test]
    fn test_parse_field_reports_field_name() {
        let err = SpotType::parse_field("spotType", "VALET").unwrap_err();
        assert_eq!(err.field, "spotType");
        assert!(err.message.contains("VALET"));
        assert!(err.message.contains("COMPACT"));
    }

    #[test]
    fn test_serde_uses_upper_case_names() {
        let json = serde_json::to_string(&SpotType::Motorbike).unwrap();
        assert_eq!(json, "\"MOTORBIKE\"");
        let parsed: SpotType = serde_json::from_str("\"HANDICAPPED\"").unwrap();
        assert_eq!(parsed, SpotType::Handicapped);
    }

    #[test]
    fn test_spot_serializes_type_field() {
        let spot = ParkingSpot {
            id: SpotId::new(1),
            spot_number: "C-1".into(),
            spot_type: SpotType::Compact,
            is_occupied: false,
            floor_id: FloorId::new(2),
            floor_number: 1,
        };
        let value = serde_json::to_value(&spot).unwrap();
        assert_eq!(value["type"], "COMPACT");
        assert_eq!(value["spotNumber"], "C-1");
        assert_eq!(value["isOccupied"], false);
        assert_eq!(value["floorNumber"], 1);
    }

    #[test]
    fn test_normalize_spot_number() {
        assert_eq!(normalize_spot_number(" C-1 ").unwrap(), "C-1");
        assert!(normalize_spot_number("   ").is_err());
    }
}
