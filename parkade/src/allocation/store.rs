//! Storage seams used by the allocation engine.
//!
//! The engine only talks to these traits. [`Database`](crate::Database)
//! implements both against `SQLite`; tests substitute their own session store
//! to exercise the compensating release.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::ids::{SpotId, VehicleId};
use crate::spot::{ParkingSpot, SpotType};
use crate::vehicle::{ClosedSession, LicensePlate, VehicleSession, VehicleType};

/// Authoritative occupancy state of every spot.
pub trait SpotStore {
    /// Atomically marks the lowest-id free spot of `spot_type` occupied and
    /// returns its id.
    ///
    /// No two calls can return the same spot while it stays occupied.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoAvailableSpot`](crate::Error::NoAvailableSpot) if
    /// every spot of the type is occupied or none is registered.
    fn try_claim(&self, spot_type: SpotType) -> Result<SpotId>;

    /// Marks a spot free.
    ///
    /// Returns `Ok(true)` if the spot was occupied and is now free, and
    /// `Ok(false)` if it was already free.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`](crate::Error::NotFound) if the spot does
    /// not exist.
    fn release(&self, spot_id: SpotId) -> Result<bool>;

    /// Loads a spot record.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`](crate::Error::NotFound) if the spot does
    /// not exist.
    fn spot(&self, spot_id: SpotId) -> Result<ParkingSpot>;

    /// Counts free spots per type in one consistent read.
    ///
    /// Types with no free spot may be absent from the map.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails.
    fn free_counts(&self) -> Result<BTreeMap<SpotType, u64>>;
}

/// The set of currently parked vehicles, keyed by plate.
pub trait SessionStore {
    /// Returns the open session for a plate, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails.
    fn find_open_session(&self, plate: &LicensePlate) -> Result<Option<VehicleSession>>;

    /// Opens a session holding `spot_id`.
    ///
    /// The check for an existing open session and the insert are atomic.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlreadyParked`](crate::Error::AlreadyParked) if the
    /// plate already has an open session.
    fn open_session(
        &self,
        plate: &LicensePlate,
        vehicle_type: VehicleType,
        spot_id: SpotId,
        entry_time: DateTime<Utc>,
    ) -> Result<VehicleId>;

    /// Closes the open session for a plate, detaches its spot and marks that
    /// spot free, all in one atomic step.
    ///
    /// Either everything happens or nothing does, so a failed close can be
    /// retried and a closed session never leaves its spot occupied.
    ///
    /// # Errors
    ///
    /// Returns [`Error::VehicleNotFound`](crate::Error::VehicleNotFound) if the
    /// plate has no open session.
    fn close_session(&self, plate: &LicensePlate, exit_time: DateTime<Utc>)
        -> Result<ClosedSession>;

    /// Loads a session by id, open or closed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`](crate::Error::NotFound) if no such session
    /// exists.
    fn session(&self, id: VehicleId) -> Result<VehicleSession>;
}
