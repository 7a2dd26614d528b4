//! Database schema management and migrations.
//!
//! This module handles schema initialization and version checking.

use rusqlite::{Connection, Transaction, TransactionBehavior};

use crate::error::{Error, Result};

use super::schema::{
    CREATE_FLOORS_TABLE, CREATE_FLOOR_LOT_INDEX, CREATE_LOTS_TABLE, CREATE_METADATA_TABLE,
    CREATE_OPEN_PLATE_INDEX, CREATE_OPEN_SPOT_INDEX, CREATE_SPOTS_TABLE, CREATE_SPOT_TYPE_INDEX,
    CREATE_VEHICLES_TABLE, CURRENT_SCHEMA_VERSION, INSERT_SCHEMA_VERSION, SELECT_SCHEMA_VERSION,
};

/// Initializes the database schema.
///
/// Creates every table and index and records the schema version. All
/// statements use `IF NOT EXISTS`, so running this on an initialized
/// database is harmless.
///
/// # Errors
///
/// Returns an error if any SQL statement fails to execute.
///
/// # Examples
///
/// ```
/// use rusqlite::Connection;
/// use parkade::database::migrations::{get_schema_version, initialize_schema};
///
/// let conn = Connection::open_in_memory().unwrap();
/// initialize_schema(&conn).unwrap();
/// assert_eq!(get_schema_version(&conn).unwrap(), 1);
/// ```
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    for statement in [
        CREATE_METADATA_TABLE,
        CREATE_LOTS_TABLE,
        CREATE_FLOORS_TABLE,
        CREATE_SPOTS_TABLE,
        CREATE_VEHICLES_TABLE,
        CREATE_SPOT_TYPE_INDEX,
        CREATE_FLOOR_LOT_INDEX,
        CREATE_OPEN_PLATE_INDEX,
        CREATE_OPEN_SPOT_INDEX,
    ] {
        conn.execute(statement, [])?;
    }

    conn.execute(INSERT_SCHEMA_VERSION, [CURRENT_SCHEMA_VERSION])?;

    Ok(())
}

/// Gets the current schema version from the database.
///
/// Returns `Ok(0)` if the metadata table doesn't exist or has no version.
///
/// # Errors
///
/// Returns an error if the query fails for any other reason.
pub fn get_schema_version(conn: &Connection) -> Result<i32> {
    match conn.query_row(SELECT_SCHEMA_VERSION, [], |row| {
        let value: String = row.get(0)?;
        value
            .parse::<i32>()
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
    }) {
        Ok(version) => Ok(version),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(0),
        Err(rusqlite::Error::SqliteFailure(ref failure, _))
            if failure.code == rusqlite::ErrorCode::Unknown =>
        {
            // "no such table: metadata"
            Ok(0)
        }
        Err(e) => Err(e.into()),
    }
}

/// Checks schema compatibility and initializes if needed.
///
/// A fresh database is initialized inside an IMMEDIATE transaction so that
/// two processes opening the same new file do not interleave their DDL.
///
/// # Errors
///
/// Returns [`Error::UnsupportedSchemaVersion`] if the stored version differs
/// from [`CURRENT_SCHEMA_VERSION`], or any database error.
pub fn check_schema_compatibility(conn: &Connection) -> Result<()> {
    let mut version = get_schema_version(conn)?;

    if version == 0 {
        let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)?;
        version = get_schema_version(&tx)?;
        if version == 0 {
            initialize_schema(&tx)?;
            version = CURRENT_SCHEMA_VERSION;
        }
        tx.commit()?;
    }

    if version != CURRENT_SCHEMA_VERSION {
        return Err(Error::UnsupportedSchemaVersion {
            expected: CURRENT_SCHEMA_VERSION,
            found: version,
        });
    }

    Ok(())
}
