//! Serve command implementation.

use crate::error::CliError;
use crate::utils::{database_config, load_configuration, GlobalOptions};
use clap::Args;
use parkade::api::ApiServer;
use parkade::Database;

/// Serve the JSON HTTP API until interrupted.
#[derive(Args)]
pub struct ServeCommand {
    /// Address to listen on (overrides `server.bind`)
    #[arg(long, value_name = "ADDR")]
    pub bind: Option<String>,

    /// Number of worker threads (overrides `server.workers`)
    #[arg(long, value_name = "N")]
    pub workers: Option<usize>,
}

impl ServeCommand {
    /// Execute the serve command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;

        let bind = self.bind.unwrap_or_else(|| config.bind().to_string());
        let workers = match self.workers {
            Some(0) => {
                return Err(CliError::InvalidArguments(
                    "--workers must be at least 1".to_string(),
                ))
            }
            Some(n) => n,
            None => config.workers(),
        };

        let db_config = database_config(global, &config)?;
        // Opening once up front creates the schema before workers race to it.
        Database::open(db_config.clone())?;

        let server = ApiServer::bind(&bind, db_config, workers)?;
        if !global.quiet {
            match server.local_addr() {
                Some(addr) => eprintln!("Listening on http://{addr}"),
                None => eprintln!("Listening on {bind}"),
            }
        }

        server.run().map_err(CliError::from)
    }
}
