//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `init`: Create the data directory, database and optional config file
//! - `serve`: Run the JSON HTTP API
//! - `lot`, `floor`, `spot`: Register and inspect the lot layout
//! - `park`: Claim a free spot for an arriving vehicle
//! - `exit`: Close a vehicle's session and free its spot
//! - `availability`: Free spot counts per type
//! - `seed`: Register the layout from configuration

pub mod availability;
pub mod exit;
pub mod floor;
pub mod init;
pub mod lot;
pub mod park;
pub mod seed;
pub mod serve;
pub mod spot;

pub use availability::AvailabilityCommand;
pub use exit::ExitCommand;
pub use floor::FloorCommand;
pub use init::InitCommand;
pub use lot::LotCommand;
pub use park::ParkCommand;
pub use seed::SeedCommand;
pub use serve::ServeCommand;
pub use spot::SpotCommand;
