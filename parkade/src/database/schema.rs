//! Database schema definitions and SQL constants.
//!
//! This module contains all SQL table definitions and indices for the
//! lot/floor/spot registry and the vehicle session table.

/// Current schema version for the database.
///
/// This version is stored in the metadata table and is used to ensure
/// compatibility between the database and the application.
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// SQL statement to create the metadata table.
pub const CREATE_METADATA_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS metadata (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL
    )";

/// SQL statement to create the parking lots table.
pub const CREATE_LOTS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS parking_lots (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        address TEXT NOT NULL
    )";

/// SQL statement to create the floors table.
///
/// Floors cascade with their lot.
pub const CREATE_FLOORS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS parking_floors (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        floor_number INTEGER NOT NULL,
        lot_id INTEGER NOT NULL REFERENCES parking_lots(id) ON DELETE CASCADE
    )";

/// SQL statement to create the spots table.
///
/// Spot numbers are unique per floor. `is_occupied` is 0 or 1.
pub const CREATE_SPOTS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS parking_spots (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        spot_number TEXT NOT NULL,
        spot_type TEXT NOT NULL,
        is_occupied INTEGER NOT NULL DEFAULT 0 CHECK (is_occupied IN (0, 1)),
        floor_id INTEGER NOT NULL REFERENCES parking_floors(id) ON DELETE CASCADE,
        UNIQUE (floor_id, spot_number)
    )";

/// SQL statement to create the vehicle sessions table.
///
/// Timestamps are Unix milliseconds.
pub const CREATE_VEHICLES_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS vehicles (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        license_plate TEXT NOT NULL,
        vehicle_type TEXT NOT NULL,
        entry_time INTEGER NOT NULL,
        exit_time INTEGER,
        spot_id INTEGER REFERENCES parking_spots(id) ON DELETE SET NULL
    )";

/// Index backing the free-spot lookup and the availability aggregate.
pub const CREATE_SPOT_TYPE_INDEX: &str = "CREATE INDEX IF NOT EXISTS idx_spots_type_occupied \
     ON parking_spots(spot_type, is_occupied)";

/// Index for listing the floors of a lot.
pub const CREATE_FLOOR_LOT_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_floors_lot ON parking_floors(lot_id)";

/// At most one open session per plate.
pub const CREATE_OPEN_PLATE_INDEX: &str = "CREATE UNIQUE INDEX IF NOT EXISTS \
     idx_vehicles_open_plate ON vehicles(license_plate) WHERE exit_time IS NULL";

/// At most one open session per spot.
pub const CREATE_OPEN_SPOT_INDEX: &str = "CREATE UNIQUE INDEX IF NOT EXISTS \
     idx_vehicles_open_spot ON vehicles(spot_id) WHERE exit_time IS NULL AND spot_id IS NOT NULL";

/// SQL statement to select the schema version from the metadata table.
pub const SELECT_SCHEMA_VERSION: &str = "SELECT value FROM metadata WHERE key = 'schema_version'";

/// SQL statement to insert or update the schema version in the metadata table.
pub const INSERT_SCHEMA_VERSION: &str =
    "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?)";

/// Spot columns joined with the owning floor number, in `row_to_spot` order.
pub const SELECT_SPOT: &str = r"
    SELECT s.id, s.spot_number, s.spot_type, s.is_occupied, s.floor_id, f.floor_number
    FROM parking_spots s
    JOIN parking_floors f ON f.id = s.floor_id
";

/// Vehicle columns, in `row_to_session` order.
pub const SELECT_SESSION: &str = r"
    SELECT id, license_plate, vehicle_type, entry_time, exit_time, spot_id
    FROM vehicles
";
