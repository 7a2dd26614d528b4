//! Request and error bodies of the HTTP API.
//!
//! Request fields are all optional on the wire so that a missing field is
//! reported as a validation failure naming the field, not as a malformed
//! body.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use crate::allocation::ParkOptions;
use crate::error::ValidationError;
use crate::ids::{FloorId, LotId};
use crate::layout::required_text;
use crate::spot::{normalize_spot_number, SpotType};
use crate::vehicle::{LicensePlate, VehicleType};

/// Accumulates field errors while a request is checked.
#[derive(Debug, Default)]
struct FieldErrors(Vec<ValidationError>);

impl FieldErrors {
    fn check<T>(&mut self, result: Result<T, ValidationError>) -> Option<T> {
        result.map_err(|e| self.0.push(e)).ok()
    }

    fn required<T>(&mut self, value: Option<T>, field: &str, label: &str) -> Option<T> {
        if value.is_none() {
            self.0
                .push(ValidationError::new(field, format!("{label} is required")));
        }
        value
    }

    fn finish<T>(self, value: Option<T>) -> Result<T, Vec<ValidationError>> {
        match value {
            Some(value) if self.0.is_empty() => Ok(value),
            _ => Err(self.0),
        }
    }
}

/// Body of `POST /api/vehicles/park`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParkRequest {
    /// Plate of the arriving vehicle.
    pub license_plate: Option<String>,
    /// One of `CAR`, `MOTORBIKE`, `TRUCK`, `VAN`.
    pub vehicle_type: Option<String>,
    /// Requested spot type.
    pub spot_type: Option<String>,
}

impl ParkRequest {
    /// Checks every field and builds the engine request.
    ///
    /// # Errors
    ///
    /// Returns one error per invalid or missing field.
    pub fn validate(&self) -> Result<ParkOptions, Vec<ValidationError>> {
        let mut errors = FieldErrors::default();

        let plate = errors.check(LicensePlate::new(
            self.license_plate.as_deref().unwrap_or_default(),
        ));
        let vehicle_type = errors
            .required(self.vehicle_type.as_deref(), "vehicleType", "Vehicle type")
            .and_then(|v| errors.check(VehicleType::parse_field("vehicleType", v)));
        let spot_type = errors
            .required(self.spot_type.as_deref(), "spotType", "Spot type")
            .and_then(|v| errors.check(SpotType::parse_field("spotType", v)));

        let options = match (plate, vehicle_type, spot_type) {
            (Some(plate), Some(vehicle_type), Some(spot_type)) => {
                Some(ParkOptions::new(plate, vehicle_type, spot_type))
            }
            _ => None,
        };
        errors.finish(options)
    }
}

/// Body of `POST /api/parking-lots`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LotRequest {
    /// Lot name.
    pub name: Option<String>,
    /// Street address.
    pub address: Option<String>,
}

impl LotRequest {
    /// Returns the trimmed `(name, address)`.
    ///
    /// # Errors
    ///
    /// Returns one error per blank or missing field.
    pub fn validate(&self) -> Result<(String, String), Vec<ValidationError>> {
        let mut errors = FieldErrors::default();
        let name = errors.check(required_text(
            "name",
            "Name",
            self.name.as_deref().unwrap_or_default(),
        ));
        let address = errors.check(required_text(
            "address",
            "Address",
            self.address.as_deref().unwrap_or_default(),
        ));
        errors.finish(name.zip(address))
    }
}

/// Body of `POST /api/floors`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FloorRequest {
    /// Floor number within the lot.
    pub floor_number: Option<i32>,
    /// Owning lot.
    pub parking_lot_id: Option<i64>,
}

impl FloorRequest {
    /// Returns `(lot, floor number)`.
    ///
    /// # Errors
    ///
    /// Returns one error per missing field.
    pub fn validate(&self) -> Result<(LotId, i32), Vec<ValidationError>> {
        let mut errors = FieldErrors::default();
        let number = errors.required(self.floor_number, "floorNumber", "Floor number");
        let lot = errors.required(self.parking_lot_id, "parkingLotId", "Parking lot ID");
        errors.finish(lot.map(LotId::new).zip(number))
    }
}

/// Body of `POST /api/spots`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotRequest {
    /// Spot number, unique within the floor.
    pub spot_number: Option<String>,
    /// Spot type.
    #[serde(rename = "type")]
    pub spot_type: Option<String>,
    /// Owning floor.
    pub floor_id: Option<i64>,
}

impl SpotRequest {
    /// Returns `(floor, spot number, spot type)`.
    ///
    /// # Errors
    ///
    /// Returns one error per invalid or missing field.
    pub fn validate(&self) -> Result<(FloorId, String, SpotType), Vec<ValidationError>> {
        let mut errors = FieldErrors::default();
        let number = errors.check(normalize_spot_number(
            self.spot_number.as_deref().unwrap_or_default(),
        ));
        let spot_type = errors
            .required(self.spot_type.as_deref(), "type", "Spot type")
            .and_then(|v| errors.check(SpotType::parse_field("type", v)));
        let floor = errors.required(self.floor_id, "floorId", "Floor ID");

        let spot = match (floor, number, spot_type) {
            (Some(floor), Some(number), Some(spot_type)) => {
                Some((FloorId::new(floor), number, spot_type))
            }
            _ => None,
        };
        errors.finish(spot)
    }
}

/// Body of every non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// HTTP status code, repeated in the body.
    pub status: u16,
    /// Human-readable summary.
    pub message: String,
    /// When the error was produced.
    pub timestamp: DateTime<Utc>,
    /// `field: message` entries for validation failures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl ErrorBody {
    /// An error without field details.
    #[must_use]
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            timestamp: Utc::now().trunc_subsecs(3),
            errors: None,
        }
    }

    /// A 400 listing each invalid field.
    #[must_use]
    pub fn validation(errors: &[ValidationError]) -> Self {
        Self {
            errors: Some(errors.iter().map(ToString::to_string).collect()),
            ..Self::new(400, "Validation failed")
        }
    }
}
