//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    AvailabilityCommand, ExitCommand, FloorCommand, InitCommand, LotCommand, ParkCommand,
    SeedCommand, ServeCommand, SpotCommand,
};
use clap::{Parser, Subcommand};
use parkade::config::OutputFormat;
use std::path::PathBuf;

/// Command-line tool for allocating parking spots.
#[derive(Parser)]
#[command(name = "parkade")]
#[command(version, about = "Allocate parking spots across lots and floors", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Override the data directory location
    #[arg(long, value_name = "PATH", global = true, env = "PARKADE_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Override the database busy timeout (in seconds)
    #[arg(long, value_name = "SECONDS", global = true)]
    pub busy_timeout: Option<u64>,

    /// Disable automatic database initialization
    #[arg(long, global = true)]
    pub disable_autoinit: bool,

    /// Output format (human or json)
    #[arg(long, value_name = "FORMAT", global = true)]
    pub format: Option<OutputFormat>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Initialize the data directory and database
    Init(InitCommand),

    /// Serve the JSON HTTP API
    Serve(ServeCommand),

    /// Manage parking lots
    Lot(LotCommand),

    /// Manage floors of a lot
    Floor(FloorCommand),

    /// Manage parking spots
    Spot(SpotCommand),

    /// Park a vehicle in a free spot
    Park(ParkCommand),

    /// Record a vehicle leaving and free its spot
    Exit(ExitCommand),

    /// Show free spots per type
    Availability(AvailabilityCommand),

    /// Register the configured layout
    Seed(SeedCommand),
}
