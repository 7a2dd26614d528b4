//! Floor command implementation.

use crate::error::CliError;
use crate::utils::{emit, formatter, load_configuration, open_database, GlobalOptions};
use clap::{Args, Subcommand};
use parkade::{FloorId, LotId};

/// Manage floors of a lot.
#[derive(Args)]
pub struct FloorCommand {
    #[command(subcommand)]
    pub action: FloorAction,
}

/// Floor subcommands.
#[derive(Subcommand)]
pub enum FloorAction {
    /// Add a floor to a lot
    Add {
        /// Lot the floor belongs to
        #[arg(long, value_name = "ID")]
        lot: i64,

        /// Floor number (may be negative for basements)
        #[arg(long, allow_hyphen_values = true)]
        number: i32,
    },

    /// List the floors of a lot
    List {
        /// Lot id
        #[arg(long, value_name = "ID")]
        lot: i64,
    },

    /// Show one floor
    Show {
        /// Floor id
        id: i64,
    },
}

impl FloorCommand {
    /// Execute the floor command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;
        let output = formatter(&config);

        match self.action {
            FloorAction::Add { lot, number } => {
                let floor = db.add_floor(LotId::new(lot), number)?;
                emit(output.floors(&[floor]))
            }
            FloorAction::List { lot } => emit(output.floors(&db.list_floors(LotId::new(lot))?)),
            FloorAction::Show { id } => {
                let floor = db.get_floor(FloorId::new(id))?;
                emit(output.floors(&[floor]))
            }
        }
    }
}
