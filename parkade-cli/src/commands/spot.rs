//! Spot command implementation.

use crate::error::CliError;
use crate::utils::{emit, formatter, load_configuration, open_database, GlobalOptions};
use clap::{Args, Subcommand};
use parkade::{FloorId, SpotId, SpotType};

/// Manage parking spots.
#[derive(Args)]
pub struct SpotCommand {
    #[command(subcommand)]
    pub action: SpotAction,
}

/// Spot subcommands.
#[derive(Subcommand)]
pub enum SpotAction {
    /// Register a free spot on a floor
    Add {
        /// Floor the spot is on
        #[arg(long, value_name = "ID")]
        floor: i64,

        /// Spot number, unique on its floor
        #[arg(long)]
        number: String,

        /// Spot type (COMPACT, LARGE, MOTORBIKE, ELECTRIC, HANDICAPPED)
        #[arg(long = "type", value_name = "TYPE")]
        spot_type: String,
    },

    /// List the spots of a floor
    List {
        /// Floor id
        #[arg(long, value_name = "ID")]
        floor: i64,
    },

    /// List free spots of a type
    Available {
        /// Spot type
        #[arg(long = "type", value_name = "TYPE")]
        spot_type: String,
    },

    /// Show one spot
    Show {
        /// Spot id
        id: i64,
    },
}

impl SpotCommand {
    /// Execute the spot command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;
        let output = formatter(&config);

        match self.action {
            SpotAction::Add {
                floor,
                number,
                spot_type,
            } => {
                let spot_type = SpotType::parse_field("type", &spot_type)?;
                let spot = db.add_spot(FloorId::new(floor), &number, spot_type)?;
                emit(output.spots(&[spot]))
            }
            SpotAction::List { floor } => emit(output.spots(&db.list_spots(FloorId::new(floor))?)),
            SpotAction::Available { spot_type } => {
                let spot_type = SpotType::parse_field("type", &spot_type)?;
                emit(output.spots(&db.list_free_spots(spot_type)?))
            }
            SpotAction::Show { id } => {
                let spot = db.get_spot(SpotId::new(id))?;
                emit(output.spots(&[spot]))
            }
        }
    }
}
