//! Park command implementation.

use crate::error::CliError;
use crate::utils::{emit, formatter, load_configuration, open_database, GlobalOptions};
use clap::Args;
use parkade::{AllocationEngine, LicensePlate, ParkOptions, SpotType, VehicleType};

/// Park a vehicle in a free spot of the requested type.
#[derive(Args)]
pub struct ParkCommand {
    /// License plate of the arriving vehicle
    pub plate: String,

    /// Vehicle type (CAR, MOTORBIKE, TRUCK, VAN)
    #[arg(long, value_name = "TYPE")]
    pub vehicle_type: String,

    /// Spot type to claim (COMPACT, LARGE, MOTORBIKE, ELECTRIC, HANDICAPPED)
    #[arg(long, value_name = "TYPE")]
    pub spot_type: String,
}

impl ParkCommand {
    /// Execute the park command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let options = ParkOptions::new(
            LicensePlate::new(&self.plate)?,
            VehicleType::parse_field("vehicleType", &self.vehicle_type)?,
            SpotType::parse_field("spotType", &self.spot_type)?,
        );

        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        let session = AllocationEngine::new(&db, &db).park(&options)?;
        emit(formatter(&config).session(&session))
    }
}
