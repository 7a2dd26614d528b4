//! Vehicle session types.
//!
//! A session is the record of one stay: it is opened when a vehicle parks
//! and closed, never reopened, when the vehicle exits.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::ids::{SpotId, VehicleId};
use crate::spot::SpotType;

/// Kind of vehicle recorded on a session.
///
/// The vehicle type is informational. It does not restrict which spot type
/// may be requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VehicleType {
    /// Passenger car.
    Car,
    /// Motorbike or scooter.
    Motorbike,
    /// Truck.
    Truck,
    /// Van.
    Van,
}

impl VehicleType {
    /// Every vehicle type, in declaration order.
    pub const ALL: [Self; 4] = [Self::Car, Self::Motorbike, Self::Truck, Self::Van];

    /// Returns the canonical upper-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Car => "CAR",
            Self::Motorbike => "MOTORBIKE",
            Self::Truck => "TRUCK",
            Self::Van => "VAN",
        }
    }

    /// Parses a vehicle type, reporting failures against the given field name.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the value does not name a vehicle type.
    pub fn parse_field(field: &str, value: &str) -> Result<Self, ValidationError> {
        value.parse().map_err(|_| {
            ValidationError::new(
                field,
                format!(
                    "unknown vehicle type '{value}' (expected one of {})",
                    Self::ALL.map(Self::as_str).join(", ")
                ),
            )
        })
    }
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VehicleType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == upper)
            .ok_or_else(|| format!("invalid vehicle type: {s}"))
    }
}

impl ToSql for VehicleType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for VehicleType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|e: String| FromSqlError::Other(e.into()))
    }
}

/// A validated license plate.
///
/// Plates are trimmed of surrounding whitespace and must not be empty.
/// Comparison is exact on the trimmed text.
///
/// # Examples
///
/// ```
/// use parkade::LicensePlate;
///
/// let plate = LicensePlate::new(" MH-12-AB-1234 ").unwrap();
/// assert_eq!(plate.as_str(), "MH-12-AB-1234");
/// assert!(LicensePlate::new("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LicensePlate(String);

impl LicensePlate {
    /// Maximum accepted plate length, in characters.
    pub const MAX_LEN: usize = 32;

    /// Validates and wraps a plate.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the plate is blank or too long.
    pub fn new(plate: impl AsRef<str>) -> Result<Self, ValidationError> {
        let trimmed = plate.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ValidationError::new(
                "licensePlate",
                "License plate is required",
            ));
        }
        if trimmed.chars().count() > Self::MAX_LEN {
            return Err(ValidationError::new(
                "licensePlate",
                format!("License plate must be at most {} characters", Self::MAX_LEN),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the plate text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LicensePlate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for LicensePlate {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<LicensePlate> for String {
    fn from(plate: LicensePlate) -> Self {
        plate.0
    }
}

impl ToSql for LicensePlate {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.0.as_str()))
    }
}

/// A persisted vehicle session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VehicleSession {
    /// Session identifier.
    pub id: VehicleId,
    /// Plate of the parked vehicle.
    pub license_plate: String,
    /// Recorded vehicle type.
    pub vehicle_type: VehicleType,
    /// When the vehicle parked.
    pub entry_time: DateTime<Utc>,
    /// When the vehicle left, `None` while the session is open.
    pub exit_time: Option<DateTime<Utc>>,
    /// Spot held by the session. Cleared when the session closes.
    pub spot_id: Option<SpotId>,
}

impl VehicleSession {
    /// Returns true while the vehicle is still parked.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.exit_time.is_none()
    }
}

/// Result of closing a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClosedSession {
    /// The session that was closed.
    pub vehicle_id: VehicleId,
    /// The spot the session held, now free. `None` for a session whose spot
    /// reference was already gone.
    pub spot_id: Option<SpotId>,
}

/// Caller-facing view of a session.
///
/// `spot_number` and `spot_type` describe the spot held during the session,
/// so they remain populated in the view returned on exit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    /// Session identifier.
    pub id: VehicleId,
    /// Plate of the vehicle.
    pub license_plate: String,
    /// Recorded vehicle type.
    pub vehicle_type: VehicleType,
    /// Entry timestamp.
    pub entry_time: DateTime<Utc>,
    /// Exit timestamp, `null` while parked.
    pub exit_time: Option<DateTime<Utc>>,
    /// Number of the spot held during the session.
    pub spot_number: Option<String>,
    /// Type of the spot held during the session.
    pub spot_type: Option<SpotType>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vehicle_type_parse() {
        assert_eq!("car".parse::<VehicleType>().unwrap(), VehicleType::Car);
        assert_eq!("VAN".parse::<VehicleType>().unwrap(), VehicleType::Van);
        assert!("BICYCLE".parse::<VehicleType>().is_err());
    }

    #[test]
    fn test_vehicle_type_parse_field() {
        let err = VehicleType::parse_field("vehicleType", "tank").unwrap_err();
        assert_eq!(err.field, "vehicleType");
        assert!(err.message.contains("TRUCK"));
    }

    #[test]
    fn test_license_plate_trims() {
        let plate = LicensePlate::new("\tA-1\n").unwrap();
        assert_eq!(plate.as_str(), "A-1");
        assert_eq!(plate.to_string(), "A-1");
    }

    #[test]
    fn test_license_plate_rejects_blank_and_long() {
        let err = LicensePlate::new("").unwrap_err();
        assert_eq!(err.field, "licensePlate");
        assert!(LicensePlate::new("X".repeat(LicensePlate::MAX_LEN + 1)).is_err());
        assert!(LicensePlate::new("X".repeat(LicensePlate::MAX_LEN)).is_ok());
    }

    #[test]
    fn test_license_plate_deserialize_validates() {
        let plate: LicensePlate = serde_json::from_str("\" B-2 \"").unwrap();
        assert_eq!(plate.as_str(), "B-2");
        assert!(serde_json::from_str::<LicensePlate>("\"  \"").is_err());
    }

    #[test]
    fn test_session_view_serializes_camel_case() {
        let view = SessionView {
            id: VehicleId::new(1),
            license_plate: "A-1".into(),
            vehicle_type: VehicleType::Car,
            entry_time: DateTime::from_timestamp_millis(0).unwrap(),
            exit_time: None,
            spot_number: Some("C-1".into()),
            spot_type: Some(SpotType::Compact),
        };
        let value = serde_json::to_value(&view).unwrap();
        assert_eq!(value["licensePlate"], "A-1");
        assert_eq!(value["vehicleType"], "CAR");
        assert!(value["exitTime"].is_null());
        assert_eq!(value["spotType"], "COMPACT");
        assert!(value["entryTime"].as_str().unwrap().starts_with("1970-01-01T00:00:00"));
    }

    #[test]
    fn test_session_is_open() {
        let mut session = VehicleSession {
            id: VehicleId::new(1),
            license_plate: "A-1".into(),
            vehicle_type: VehicleType::Truck,
            entry_time: Utc::now(),
            exit_time: None,
            spot_id: Some(SpotId::new(3)),
        };
        assert!(session.is_open());
        session.exit_time = Some(Utc::now());
        assert!(!session.is_open());
    }
}
