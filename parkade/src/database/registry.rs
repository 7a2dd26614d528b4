//! Lot, floor and spot registration and lookups.
//!
//! The `&Connection` functions are shared between the public methods and the
//! seeding executor, which runs many registrations inside one transaction.

use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::error::{Error, Result};
use crate::ids::{FloorId, LotId, SpotId};
use crate::layout::{required_text, ParkingFloor, ParkingLot};
use crate::spot::{normalize_spot_number, ParkingSpot, SpotType};

use super::connection::Database;
use super::schema::SELECT_SPOT;

const SELECT_LOT: &str = r"
    SELECT l.id, l.name, l.address,
           (SELECT COUNT(*) FROM parking_floors f WHERE f.lot_id = l.id)
    FROM parking_lots l
";

const SELECT_FLOOR: &str = r"
    SELECT f.id, f.floor_number, f.lot_id, l.name,
           (SELECT COUNT(*) FROM parking_spots s WHERE s.floor_id = f.id)
    FROM parking_floors f
    JOIN parking_lots l ON l.id = f.lot_id
";

fn count_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<u64> {
    let count: i64 = row.get(idx)?;
    Ok(u64::try_from(count).unwrap_or_default())
}

fn row_to_lot(row: &Row<'_>) -> rusqlite::Result<ParkingLot> {
    Ok(ParkingLot {
        id: row.get(0)?,
        name: row.get(1)?,
        address: row.get(2)?,
        total_floors: count_column(row, 3)?,
    })
}

fn row_to_floor(row: &Row<'_>) -> rusqlite::Result<ParkingFloor> {
    Ok(ParkingFloor {
        id: row.get(0)?,
        floor_number: row.get(1)?,
        lot_id: row.get(2)?,
        lot_name: row.get(3)?,
        total_spots: count_column(row, 4)?,
    })
}

pub(crate) fn row_to_spot(row: &Row<'_>) -> rusqlite::Result<ParkingSpot> {
    Ok(ParkingSpot {
        id: row.get(0)?,
        spot_number: row.get(1)?,
        spot_type: row.get(2)?,
        is_occupied: row.get(3)?,
        floor_id: row.get(4)?,
        floor_number: row.get(5)?,
    })
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

pub(crate) fn insert_lot(conn: &Connection, name: &str, address: &str) -> Result<LotId> {
    let name = required_text("name", "Name", name)?;
    let address = required_text("address", "Address", address)?;
    conn.execute(
        "INSERT INTO parking_lots (name, address) VALUES (?1, ?2)",
        params![name, address],
    )?;
    Ok(LotId::new(conn.last_insert_rowid()))
}

pub(crate) fn select_lot(conn: &Connection, id: LotId) -> Result<Option<ParkingLot>> {
    Ok(conn
        .query_row(&format!("{SELECT_LOT} WHERE l.id = ?1"), [id], row_to_lot)
        .optional()?)
}

pub(crate) fn select_lot_by_name(conn: &Connection, name: &str) -> Result<Option<ParkingLot>> {
    Ok(conn
        .query_row(
            &format!("{SELECT_LOT} WHERE l.name = ?1 ORDER BY l.id LIMIT 1"),
            [name.trim()],
            row_to_lot,
        )
        .optional()?)
}

pub(crate) fn insert_floor(conn: &Connection, lot_id: LotId, floor_number: i32) -> Result<FloorId> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM parking_lots WHERE id = ?1)",
        [lot_id],
        |row| row.get(0),
    )?;
    if !exists {
        return Err(Error::NotFound {
            resource: format!("parking lot {lot_id}"),
        });
    }
    conn.execute(
        "INSERT INTO parking_floors (floor_number, lot_id) VALUES (?1, ?2)",
        params![floor_number, lot_id],
    )?;
    Ok(FloorId::new(conn.last_insert_rowid()))
}

pub(crate) fn select_floor(conn: &Connection, id: FloorId) -> Result<Option<ParkingFloor>> {
    Ok(conn
        .query_row(&format!("{SELECT_FLOOR} WHERE f.id = ?1"), [id], row_to_floor)
        .optional()?)
}

pub(crate) fn insert_spot(
    conn: &Connection,
    floor_id: FloorId,
    spot_number: &str,
    spot_type: SpotType,
) -> Result<SpotId> {
    let spot_number = normalize_spot_number(spot_number)?;
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM parking_floors WHERE id = ?1)",
        [floor_id],
        |row| row.get(0),
    )?;
    if !exists {
        return Err(Error::NotFound {
            resource: format!("floor {floor_id}"),
        });
    }

    let duplicate = || Error::Validation {
        field: "spotNumber".into(),
        message: format!("Spot number {spot_number} already exists on floor {floor_id}"),
    };

    match conn.execute(
        "INSERT INTO parking_spots (spot_number, spot_type, is_occupied, floor_id) \
         VALUES (?1, ?2, 0, ?3)",
        params![spot_number, spot_type, floor_id],
    ) {
        Ok(_) => Ok(SpotId::new(conn.last_insert_rowid())),
        Err(e) if is_unique_violation(&e) => Err(duplicate()),
        Err(e) => Err(e.into()),
    }
}

pub(crate) fn select_spot(conn: &Connection, id: SpotId) -> Result<Option<ParkingSpot>> {
    Ok(conn
        .query_row(&format!("{SELECT_SPOT} WHERE s.id = ?1"), [id], row_to_spot)
        .optional()?)
}

impl Database {
    /// Registers a new parking lot.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the name or address is blank.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use parkade::database::{Database, DatabaseConfig};
    ///
    /// let db = Database::open(DatabaseConfig::new("/tmp/parkade.db")).unwrap();
    /// let lot = db.create_lot("Central", "1 Main St").unwrap();
    /// assert_eq!(lot.total_floors, 0);
    /// ```
    pub fn create_lot(&self, name: &str, address: &str) -> Result<ParkingLot> {
        let id = insert_lot(&self.conn, name, address)?;
        log::info!("registered parking lot {id}");
        self.get_lot(id)
    }

    /// Returns a lot by id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the lot does not exist.
    pub fn get_lot(&self, id: LotId) -> Result<ParkingLot> {
        select_lot(&self.conn, id)?.ok_or_else(|| Error::NotFound {
            resource: format!("parking lot {id}"),
        })
    }

    /// Returns the first lot with the given name, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_lot_by_name(&self, name: &str) -> Result<Option<ParkingLot>> {
        select_lot_by_name(&self.conn, name)
    }

    /// Lists every lot ordered by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_lots(&self) -> Result<Vec<ParkingLot>> {
        let mut stmt = self.conn.prepare(&format!("{SELECT_LOT} ORDER BY l.id"))?;
        let lots = stmt
            .query_map([], row_to_lot)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(lots)
    }

    /// Adds a floor to a lot.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the lot does not exist.
    pub fn add_floor(&self, lot_id: LotId, floor_number: i32) -> Result<ParkingFloor> {
        let id = insert_floor(&self.conn, lot_id, floor_number)?;
        log::info!("added floor {floor_number} to lot {lot_id}");
        self.get_floor(id)
    }

    /// Returns a floor by id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the floor does not exist.
    pub fn get_floor(&self, id: FloorId) -> Result<ParkingFloor> {
        select_floor(&self.conn, id)?.ok_or_else(|| Error::NotFound {
            resource: format!("floor {id}"),
        })
    }

    /// Lists the floors of a lot ordered by floor number.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the lot does not exist.
    pub fn list_floors(&self, lot_id: LotId) -> Result<Vec<ParkingFloor>> {
        self.get_lot(lot_id)?;
        let mut stmt = self.conn.prepare(&format!(
            "{SELECT_FLOOR} WHERE f.lot_id = ?1 ORDER BY f.floor_number, f.id"
        ))?;
        let floors = stmt
            .query_map([lot_id], row_to_floor)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(floors)
    }

    /// Registers a free spot on a floor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the floor does not exist and
    /// [`Error::Validation`] if the spot number is blank or already used on
    /// that floor.
    pub fn add_spot(
        &self,
        floor_id: FloorId,
        spot_number: &str,
        spot_type: SpotType,
    ) -> Result<ParkingSpot> {
        let id = insert_spot(&self.conn, floor_id, spot_number, spot_type)?;
        log::info!("registered {spot_type} spot {id} on floor {floor_id}");
        self.get_spot(id)
    }

    /// Returns a spot by id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the spot does not exist.
    pub fn get_spot(&self, id: SpotId) -> Result<ParkingSpot> {
        select_spot(&self.conn, id)?.ok_or_else(|| Error::NotFound {
            resource: format!("spot {id}"),
        })
    }

    /// Lists the spots of a floor ordered by id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the floor does not exist.
    pub fn list_spots(&self, floor_id: FloorId) -> Result<Vec<ParkingSpot>> {
        self.get_floor(floor_id)?;
        let mut stmt = self
            .conn
            .prepare(&format!("{SELECT_SPOT} WHERE s.floor_id = ?1 ORDER BY s.id"))?;
        let spots = stmt
            .query_map([floor_id], row_to_spot)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(spots)
    }

    /// Lists the free spots of a type, lowest id first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_free_spots(&self, spot_type: SpotType) -> Result<Vec<ParkingSpot>> {
        let mut stmt = self.conn.prepare(&format!(
            "{SELECT_SPOT} WHERE s.spot_type = ?1 AND s.is_occupied = 0 ORDER BY s.id"
        ))?;
        let spots = stmt
            .query_map([spot_type], row_to_spot)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(spots)
    }
}
