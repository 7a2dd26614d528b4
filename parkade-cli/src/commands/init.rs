//! Init command implementation.
//!
//! Explicitly creates the parkade data directory and database, for setups
//! that run with auto-initialization disabled.

use crate::error::CliError;
use crate::utils::{resolve_data_dir, GlobalOptions};
use clap::Args;
use parkade::database::DATABASE_FILE_NAME;
use parkade::operations::{init_database, InitOptions};
use std::path::PathBuf;

/// Initialize the parkade data directory and database.
#[derive(Args)]
pub struct InitCommand {
    /// Data directory to initialize
    #[arg(long = "dir", value_name = "PATH")]
    pub dir: Option<PathBuf>,

    /// Replace an existing database (all lots and sessions are lost)
    #[arg(long)]
    pub overwrite: bool,

    /// Create a commented configuration file
    #[arg(long)]
    pub with_config: bool,

    /// Preview actions without executing
    #[arg(long)]
    pub dry_run: bool,
}

impl InitCommand {
    /// Execute the init command.
    ///
    /// Auto-initialization settings are ignored here: creating the database
    /// is the point of the command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let data_dir = match self.dir {
            Some(dir) => dir,
            None => resolve_data_dir(global)?,
        };

        if self.dry_run {
            println!("Dry run, no changes made.");
            println!("Would initialize parkade in: {}", data_dir.display());

            if data_dir.exists() {
                println!("  - Data directory already exists");
            } else {
                println!("  - Create data directory");
            }

            let db_path = data_dir.join(DATABASE_FILE_NAME);
            match (db_path.exists(), self.overwrite) {
                (true, true) => println!("  - Replace existing database: {}", db_path.display()),
                (true, false) => println!(
                    "  - Database already exists (use --overwrite to replace): {}",
                    db_path.display()
                ),
                (false, _) => println!("  - Create database: {}", db_path.display()),
            }

            if self.with_config {
                let config_path = data_dir.join("config.yaml");
                if config_path.exists() {
                    println!("  - Keep existing configuration file");
                } else {
                    println!("  - Create configuration file: {}", config_path.display());
                }
            }

            return Ok(());
        }

        let options = InitOptions::new(data_dir)
            .with_overwrite(self.overwrite)
            .with_create_config(self.with_config);
        let result = init_database(&options)?;

        if global.quiet {
            return Ok(());
        }

        println!("Initialized parkade in: {}", result.data_dir.display());
        if result.data_dir_created {
            println!("  - Created data directory");
        }
        if self.overwrite {
            println!("  - Recreated database");
        } else {
            println!("  - Created database");
        }
        if result.config_created {
            println!("  - Created configuration file");
        } else if self.with_config {
            println!("  - Configuration file already exists (not overwritten)");
        }

        Ok(())
    }
}
