//! Database layer for persistent storage of the parking registry and
//! vehicle sessions.
//!
//! This module provides a SQLite-based storage layer: connection management,
//! schema versioning, lot/floor/spot registration, and the implementations
//! of [`SpotStore`](crate::SpotStore) and [`SessionStore`](crate::SessionStore)
//! used by the allocation engine.
//!
//! # Examples
//!
//! ```no_run
//! use parkade::database::{Database, DatabaseConfig};
//! use parkade::{SpotStore, SpotType};
//!
//! let db = Database::open(DatabaseConfig::new("/tmp/parkade.db")).unwrap();
//!
//! let lot = db.create_lot("Central", "1 Main St").unwrap();
//! let floor = db.add_floor(lot.id, 0).unwrap();
//! db.add_spot(floor.id, "C-1", SpotType::Compact).unwrap();
//!
//! let spot_id = db.try_claim(SpotType::Compact).unwrap();
//! db.release(spot_id).unwrap();
//! ```

mod config;
mod connection;
pub mod migrations;
pub(crate) mod registry;
mod schema;
mod sessions;
mod spots;

#[cfg(test)]
pub(crate) mod test_util;

pub use config::{
    default_data_dir, resolve_data_dir, DatabaseConfig, DATABASE_FILE_NAME, DATA_DIR_ENV,
};
pub use connection::Database;
pub use migrations::{check_schema_compatibility, get_schema_version, initialize_schema};
pub use schema::CURRENT_SCHEMA_VERSION;
