//! Lot command implementation.

use crate::error::CliError;
use crate::utils::{emit, formatter, load_configuration, open_database, GlobalOptions};
use clap::{Args, Subcommand};
use parkade::LotId;

/// Manage parking lots.
#[derive(Args)]
pub struct LotCommand {
    #[command(subcommand)]
    pub action: LotAction,
}

/// Lot subcommands.
#[derive(Subcommand)]
pub enum LotAction {
    /// Register a new lot
    Create {
        /// Lot name
        #[arg(long)]
        name: String,

        /// Street address
        #[arg(long)]
        address: String,
    },

    /// List every lot
    List,

    /// Show one lot
    Show {
        /// Lot id
        id: i64,
    },
}

impl LotCommand {
    /// Execute the lot command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;
        let output = formatter(&config);

        match self.action {
            LotAction::Create { name, address } => {
                let lot = db.create_lot(&name, &address)?;
                emit(output.lots(&[lot]))
            }
            LotAction::List => emit(output.lots(&db.list_lots()?)),
            LotAction::Show { id } => {
                let lot = db.get_lot(LotId::new(id))?;
                emit(output.lots(&[lot]))
            }
        }
    }
}
