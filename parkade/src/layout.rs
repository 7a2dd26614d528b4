//! Lot and floor records.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::ids::{FloorId, LotId};

/// A registered parking lot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParkingLot {
    /// Lot identifier.
    pub id: LotId,
    /// Display name.
    pub name: String,
    /// Street address.
    pub address: String,
    /// Number of floors registered under the lot.
    pub total_floors: u64,
}

/// A floor within a lot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParkingFloor {
    /// Floor identifier.
    pub id: FloorId,
    /// Floor number as signposted (may be negative for basements).
    pub floor_number: i32,
    /// Owning lot.
    #[serde(rename = "parkingLotId")]
    pub lot_id: LotId,
    /// Name of the owning lot.
    #[serde(rename = "parkingLotName")]
    pub lot_name: String,
    /// Number of spots registered on the floor.
    pub total_spots: u64,
}

/// Trims a required text field, rejecting blank values.
pub(crate) fn required_text(
    field: &str,
    label: &str,
    value: &str,
) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new(field, format!("{label} is required")));
    }
    Ok(trimmed.to_string())
}
