//! Main entry point for the parkade CLI.
//!
//! Drives the parkade library from the command line:
//! - `lot`, `floor`, `spot`: register and inspect the layout
//! - `park` / `exit`: open and close vehicle sessions
//! - `availability`: free spots per type
//! - `seed`: register the configured layout
//! - `serve`: run the JSON HTTP API

mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;
use utils::GlobalOptions;

fn main() {
    let cli = Cli::parse();

    // Route the library's log records to stderr at the chosen verbosity.
    parkade::init_logger(cli.verbose, cli.quiet).install();

    let global = GlobalOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
        data_dir: cli.data_dir,
        busy_timeout: cli.busy_timeout,
        disable_autoinit: cli.disable_autoinit,
        format: cli.format,
    };

    let result = match cli.command {
        cli::Command::Init(cmd) => cmd.execute(&global),
        cli::Command::Serve(cmd) => cmd.execute(&global),
        cli::Command::Lot(cmd) => cmd.execute(&global),
        cli::Command::Floor(cmd) => cmd.execute(&global),
        cli::Command::Spot(cmd) => cmd.execute(&global),
        cli::Command::Park(cmd) => cmd.execute(&global),
        cli::Command::Exit(cmd) => cmd.execute(&global),
        cli::Command::Availability(cmd) => cmd.execute(&global),
        cli::Command::Seed(cmd) => cmd.execute(&global),
    };

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
