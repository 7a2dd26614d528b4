//! Output formatter implementations.

use serde::Serialize;

use crate::allocation::Availability;
use crate::layout::{ParkingFloor, ParkingLot};
use crate::operations::ExecutionResult;
use crate::spot::{ParkingSpot, SpotType};
use crate::vehicle::SessionView;
use crate::Result;

use super::OutputFormatter;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// Formatter for pretty-printed JSON.
pub struct JsonFormatter;

impl JsonFormatter {
    fn render<T: Serialize + ?Sized>(value: &T) -> Result<String> {
        Ok(serde_json::to_string_pretty(value)?)
    }
}

impl OutputFormatter for JsonFormatter {
    fn lots(&self, lots: &[ParkingLot]) -> Result<String> {
        Self::render(lots)
    }

    fn floors(&self, floors: &[ParkingFloor]) -> Result<String> {
        Self::render(floors)
    }

    fn spots(&self, spots: &[ParkingSpot]) -> Result<String> {
        Self::render(spots)
    }

    fn session(&self, session: &SessionView) -> Result<String> {
        Self::render(session)
    }

    fn availability(&self, availability: &Availability) -> Result<String> {
        Self::render(availability)
    }

    fn seed(&self, result: &ExecutionResult) -> Result<String> {
        Self::render(result)
    }
}

/// Formatter for human-readable output.
pub struct HumanFormatter;

impl OutputFormatter for HumanFormatter {
    fn lots(&self, lots: &[ParkingLot]) -> Result<String> {
        if lots.is_empty() {
            return Ok("No parking lots registered.".to_string());
        }

        let mut lines = vec![format!(
            "{:<6} {:<24} {:<32} {}",
            "ID", "NAME", "ADDRESS", "FLOORS"
        )];
        for lot in lots {
            lines.push(format!(
                "{:<6} {:<24} {:<32} {}",
                lot.id, lot.name, lot.address, lot.total_floors
            ));
        }
        Ok(lines.join("\n"))
    }

    fn floors(&self, floors: &[ParkingFloor]) -> Result<String> {
        if floors.is_empty() {
            return Ok("No floors registered.".to_string());
        }

        let mut lines = vec![format!("{:<6} {:<6} {:<24} {}", "ID", "FLOOR", "LOT", "SPOTS")];
        for floor in floors {
            lines.push(format!(
                "{:<6} {:<6} {:<24} {}",
                floor.id,
                floor.floor_number,
                format!("{} ({})", floor.lot_name, floor.lot_id),
                floor.total_spots
            ));
        }
        Ok(lines.join("\n"))
    }

    fn spots(&self, spots: &[ParkingSpot]) -> Result<String> {
        if spots.is_empty() {
            return Ok("No spots found.".to_string());
        }

        let mut lines = vec![format!(
            "{:<6} {:<12} {:<12} {:<6} {}",
            "ID", "NUMBER", "TYPE", "FLOOR", "STATUS"
        )];
        for spot in spots {
            let status = if spot.is_occupied { "occupied" } else { "free" };
            lines.push(format!(
                "{:<6} {:<12} {:<12} {:<6} {}",
                spot.id,
                spot.spot_number,
                spot.spot_type.as_str(),
                spot.floor_number,
                status
            ));
        }
        Ok(lines.join("\n"))
    }

    fn session(&self, session: &SessionView) -> Result<String> {
        let spot = match (&session.spot_number, session.spot_type) {
            (Some(number), Some(spot_type)) => format!("{number} ({spot_type})"),
            (Some(number), None) => number.clone(),
            _ => "-".to_string(),
        };
        let exit = session
            .exit_time
            .map_or_else(|| "-".to_string(), |t| t.format(TIME_FORMAT).to_string());

        Ok([
            format!("Session:  {}", session.id),
            format!("Plate:    {}", session.license_plate),
            format!("Vehicle:  {}", session.vehicle_type),
            format!("Spot:     {spot}"),
            format!("Entered:  {}", session.entry_time.format(TIME_FORMAT)),
            format!("Exited:   {exit}"),
        ]
        .join("\n"))
    }

    fn availability(&self, availability: &Availability) -> Result<String> {
        let mut lines = vec!["Available spots:".to_string()];
        for spot_type in SpotType::ALL {
            lines.push(format!(
                "  {:<12} {}",
                spot_type.as_str(),
                availability.count(spot_type)
            ));
        }
        lines.push(format!("  {:<12} {}", "TOTAL", availability.total));
        Ok(lines.join("\n"))
    }

    fn seed(&self, result: &ExecutionResult) -> Result<String> {
        let mut lines: Vec<String> = result
            .warnings
            .iter()
            .map(|w| format!("warning: {w}"))
            .collect();

        if result.dry_run {
            lines.push("Dry run, no changes made. Planned actions:".to_string());
            lines.extend(result.actions_taken.iter().map(|a| format!("  {a}")));
        }
        let verb = if result.dry_run { "Would register" } else { "Registered" };
        lines.push(format!(
            "{verb} {} lots, {} floors, {} spots.",
            result.lots_created, result.floors_created, result.spots_created
        ));
        Ok(lines.join("\n"))
    }
}
