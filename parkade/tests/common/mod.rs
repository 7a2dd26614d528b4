//! Common test utilities for integration tests.

use std::path::PathBuf;
use std::time::Duration;

use parkade::{Database, DatabaseConfig, FloorId, SpotId, SpotType};
use tempfile::TempDir;

/// A database file in a temporary directory that several connections can
/// open at once.
pub struct TestDb {
    #[allow(dead_code)]
    dir: TempDir,
    /// Path of the database file.
    pub path: PathBuf,
}

#[allow(dead_code)]
impl TestDb {
    /// Creates the directory; the file is created by the first `open`.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join("parkade.db");
        Self { dir, path }
    }

    /// Connection settings with a busy timeout long enough for contended tests.
    pub fn config(&self) -> DatabaseConfig {
        DatabaseConfig::new(&self.path).with_busy_timeout(Duration::from_secs(30))
    }

    /// Opens a new connection.
    pub fn open(&self) -> Database {
        Database::open(self.config()).expect("failed to open database")
    }
}

/// Registers a lot with a single floor and returns the floor id.
#[allow(dead_code)]
pub fn single_floor(db: &Database, lot_name: &str) -> FloorId {
    let lot = db
        .create_lot(lot_name, "1 Test Street")
        .expect("failed to create lot");
    db.add_floor(lot.id, 0).expect("failed to add floor").id
}

/// Registers `count` spots of a type on a floor, numbered `{prefix}{n}`.
#[allow(dead_code)]
pub fn add_spots(
    db: &Database,
    floor: FloorId,
    prefix: &str,
    spot_type: SpotType,
    count: usize,
) -> Vec<SpotId> {
    (1..=count)
        .map(|n| {
            db.add_spot(floor, &format!("{prefix}{n}"), spot_type)
                .expect("failed to add spot")
                .id
        })
        .collect()
}
