//! Exit command implementation.

use crate::error::CliError;
use crate::utils::{emit, formatter, load_configuration, open_database, GlobalOptions};
use clap::Args;
use parkade::{AllocationEngine, LicensePlate};

/// Record a vehicle leaving and free its spot.
#[derive(Args)]
pub struct ExitCommand {
    /// License plate of the departing vehicle
    pub plate: String,
}

impl ExitCommand {
    /// Execute the exit command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let plate = LicensePlate::new(&self.plate)?;

        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        let session = AllocationEngine::new(&db, &db).exit(&plate)?;
        emit(formatter(&config).session(&session))
    }
}
