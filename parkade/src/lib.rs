#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # parkade
//!
//! A library for arbitrating parking spot allocation across lots and floors.
//!
//! The library tracks the occupancy of every registered spot, hands out free
//! spots to arriving vehicles, frees them on exit, and reports how many spots
//! of each type are currently available.
//!
//! ## Core Types
//!
//! - [`SpotType`] and [`ParkingSpot`]: the closed set of spot categories and spot records
//! - [`VehicleType`], [`LicensePlate`] and [`SessionView`]: vehicle sessions
//! - [`AllocationEngine`]: park and exit with race-safe claim and compensating release
//! - [`Availability`]: per-type and total free-spot snapshot
//! - [`Database`]: `SQLite` persistence implementing both allocation stores
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use parkade::{LicensePlate, SpotType};
//!
//! let plate = LicensePlate::new("  KA-01-1234 ").unwrap();
//! assert_eq!(plate.as_str(), "KA-01-1234");
//!
//! let spot_type: SpotType = "compact".parse().unwrap();
//! assert_eq!(spot_type, SpotType::Compact);
//! assert_eq!(SpotType::ALL.len(), 5);
//! ```

pub mod allocation;
pub mod api;
pub mod config;
pub mod database;
pub mod error;
pub mod ids;
pub mod layout;
pub mod logging;
pub mod operations;
pub mod output;
pub mod spot;
pub mod vehicle;

// Re-export key types at crate root for convenience
pub use allocation::{AllocationEngine, Availability, ParkOptions, SessionStore, SpotStore};
pub use config::{Config, ConfigBuilder};
pub use database::{Database, DatabaseConfig};
pub use error::{Error, Result, ValidationError};
pub use ids::{FloorId, LotId, SpotId, VehicleId};
pub use layout::{ParkingFloor, ParkingLot};
pub use logging::{init_logger, LogLevel, Logger};
pub use operations::{ExecutionResult, OperationPlan, PlanAction, PlanExecutor, SeedPlan};
pub use spot::{ParkingSpot, SpotType};
pub use vehicle::{ClosedSession, LicensePlate, SessionView, VehicleSession, VehicleType};
