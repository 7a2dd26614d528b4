//! Shared test utilities for database unit tests.

use std::collections::BTreeMap;

use tempfile::tempdir;

use crate::database::{Database, DatabaseConfig};
use crate::ids::SpotId;
use crate::spot::SpotType;

/// Creates a temporary test database that will be cleaned up automatically.
///
/// # Panics
///
/// Panics if the temporary directory or database cannot be created.
#[must_use]
pub fn create_test_database() -> Database {
    let dir = tempdir().unwrap();
    let path = dir.path().join("test.db");
    let db = Database::open(DatabaseConfig::new(path)).unwrap();

    // Prevent the TempDir from being dropped immediately
    std::mem::forget(dir);

    db
}

/// Registers one lot with one floor holding `count` spots of each listed
/// type, and returns the spot ids in registration order.
///
/// Spot numbers are `<TYPE>-<n>`, numbered from 1 per type.
///
/// # Panics
///
/// Panics if any registration fails.
pub fn register_spots(db: &Database, spots: &[(SpotType, usize)]) -> Vec<SpotId> {
    let lot = db.create_lot("Test Lot", "1 Test Street").unwrap();
    let floor = db.add_floor(lot.id, 0).unwrap();

    let mut numbers: BTreeMap<SpotType, usize> = BTreeMap::new();
    let mut ids = Vec::new();
    for &(spot_type, count) in spots {
        for _ in 0..count {
            let n = numbers.entry(spot_type).or_insert(0);
            *n += 1;
            let spot = db
                .add_spot(floor.id, &format!("{spot_type}-{n}"), spot_type)
                .unwrap();
            ids.push(spot.id);
        }
    }
    ids
}
