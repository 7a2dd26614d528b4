//! Seed command implementation.
//!
//! Registers the `layout` section of the effective configuration. Lots that
//! already exist by name are skipped, so re-running after editing the layout
//! only adds the new lots.

use crate::error::CliError;
use crate::utils::{emit, formatter, load_configuration, open_database, GlobalOptions};
use clap::Args;
use parkade::{PlanExecutor, SeedPlan};

/// Register the lots, floors and spots described in configuration.
#[derive(Args)]
pub struct SeedCommand {
    /// Show what would be registered without changing the database
    #[arg(long)]
    pub dry_run: bool,
}

impl SeedCommand {
    /// Execute the seed command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        let plan = SeedPlan::new(config.layout()).build_plan(&db)?;
        let executor = if self.dry_run {
            PlanExecutor::new(&db).dry_run()
        } else {
            PlanExecutor::new(&db)
        };
        let result = executor.execute(&plan)?;

        emit(formatter(&config).seed(&result))
    }
}
