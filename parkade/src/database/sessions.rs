//! Vehicle session persistence.
//!
//! Timestamps are stored as Unix milliseconds.

use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension, Row};

use crate::allocation::SessionStore;
use crate::error::{Error, Result};
use crate::ids::{SpotId, VehicleId};
use crate::vehicle::{ClosedSession, LicensePlate, VehicleSession, VehicleType};

use super::connection::Database;
use super::schema::SELECT_SESSION;
use super::spots::MARK_FREE;

fn millis_to_datetime(idx: usize, millis: i64) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            rusqlite::types::Type::Integer,
            format!("timestamp out of range: {millis}").into(),
        )
    })
}

fn row_to_session(row: &Row<'_>) -> rusqlite::Result<VehicleSession> {
    let entry: i64 = row.get(3)?;
    let exit: Option<i64> = row.get(4)?;
    Ok(VehicleSession {
        id: row.get(0)?,
        license_plate: row.get(1)?,
        vehicle_type: row.get(2)?,
        entry_time: millis_to_datetime(3, entry)?,
        exit_time: exit.map(|ms| millis_to_datetime(4, ms)).transpose()?,
        spot_id: row.get(5)?,
    })
}

fn is_open_plate_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(failure, Some(message))
            if failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                && message.contains("license_plate")
    )
}

impl SessionStore for Database {
    fn find_open_session(&self, plate: &LicensePlate) -> Result<Option<VehicleSession>> {
        Ok(self
            .conn
            .query_row(
                &format!("{SELECT_SESSION} WHERE license_plate = ?1 AND exit_time IS NULL"),
                [plate],
                row_to_session,
            )
            .optional()?)
    }

    fn open_session(
        &self,
        plate: &LicensePlate,
        vehicle_type: VehicleType,
        spot_id: SpotId,
        entry_time: DateTime<Utc>,
    ) -> Result<VehicleId> {
        let tx = self.immediate()?;

        let open: bool = tx.query_row(
            "SELECT EXISTS(SELECT 1 FROM vehicles WHERE license_plate = ?1 AND exit_time IS NULL)",
            [plate],
            |row| row.get(0),
        )?;
        if open {
            return Err(Error::AlreadyParked {
                plate: plate.to_string(),
            });
        }

        match tx.execute(
            "INSERT INTO vehicles (license_plate, vehicle_type, entry_time, exit_time, spot_id) \
             VALUES (?1, ?2, ?3, NULL, ?4)",
            params![plate, vehicle_type, entry_time.timestamp_millis(), spot_id],
        ) {
            Ok(_) => {}
            // The partial unique index is the final word on open plates.
            Err(e) if is_open_plate_violation(&e) => {
                return Err(Error::AlreadyParked {
                    plate: plate.to_string(),
                })
            }
            Err(e) => return Err(e.into()),
        }
        let id = VehicleId::new(tx.last_insert_rowid());
        tx.commit()?;

        log::debug!("opened session {id} for {plate} on spot {spot_id}");
        Ok(id)
    }

    fn close_session(
        &self,
        plate: &LicensePlate,
        exit_time: DateTime<Utc>,
    ) -> Result<ClosedSession> {
        let tx = self.immediate()?;

        let open: Option<(VehicleId, Option<SpotId>)> = tx
            .query_row(
                "SELECT id, spot_id FROM vehicles WHERE license_plate = ?1 AND exit_time IS NULL",
                [plate],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;
        let Some((vehicle_id, spot_id)) = open else {
            return Err(Error::VehicleNotFound {
                plate: plate.to_string(),
            });
        };

        tx.execute(
            "UPDATE vehicles SET exit_time = ?1, spot_id = NULL WHERE id = ?2",
            params![exit_time.timestamp_millis(), vehicle_id],
        )?;
        // Same transaction: a closed session never leaves its spot occupied.
        if let Some(spot_id) = spot_id {
            tx.execute(MARK_FREE, [spot_id])?;
        }
        tx.commit()?;

        log::debug!("closed session {vehicle_id} for {plate}, freed spot {spot_id:?}");
        Ok(ClosedSession {
            vehicle_id,
            spot_id,
        })
    }

    fn session(&self, id: VehicleId) -> Result<VehicleSession> {
        self.conn
            .query_row(
                &format!("{SELECT_SESSION} WHERE id = ?1"),
                [id],
                row_to_session,
            )
            .optional()?
            .ok_or_else(|| Error::NotFound {
                resource: format!("vehicle session {id}"),
            })
    }
}
