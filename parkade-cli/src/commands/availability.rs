//! Availability command implementation.

use crate::error::CliError;
use crate::utils::{emit, formatter, load_configuration, open_database, GlobalOptions};
use clap::Args;
use parkade::AllocationEngine;

/// Show how many spots of each type are free.
#[derive(Args)]
pub struct AvailabilityCommand {}

impl AvailabilityCommand {
    /// Execute the availability command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        let availability = AllocationEngine::new(&db, &db).availability()?;
        emit(formatter(&config).availability(&availability))
    }
}
