//! The allocation engine: park and exit.
//!
//! A park is a claim on the spot registry followed by a session open. The
//! two steps are separate transactions, so a failed open is followed by a
//! compensating release of the claimed spot before the error reaches the
//! caller. An exit is a single store call: closing the session frees its
//! spot atomically, so there is nothing to compensate.

use chrono::{DateTime, SubsecRound, Utc};

use crate::error::{Error, Result};
use crate::spot::SpotType;
use crate::vehicle::{LicensePlate, SessionView, VehicleSession, VehicleType};

use super::availability::{availability, Availability};
use super::store::{SessionStore, SpotStore};

/// A validated park request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParkOptions {
    /// Plate of the arriving vehicle.
    pub plate: LicensePlate,
    /// Vehicle type recorded on the session.
    pub vehicle_type: VehicleType,
    /// Spot type to claim.
    pub spot_type: SpotType,
}

impl ParkOptions {
    /// Bundles a park request.
    #[must_use]
    pub const fn new(plate: LicensePlate, vehicle_type: VehicleType, spot_type: SpotType) -> Self {
        Self {
            plate,
            vehicle_type,
            spot_type,
        }
    }
}

/// Orchestrates park and exit against a spot store and a session store.
///
/// # Examples
///
/// ```no_run
/// use parkade::database::{Database, DatabaseConfig};
/// use parkade::{AllocationEngine, LicensePlate, ParkOptions, SpotType, VehicleType};
///
/// let db = Database::open(DatabaseConfig::new("/tmp/parkade.db")).unwrap();
/// let engine = AllocationEngine::new(&db, &db);
///
/// let plate = LicensePlate::new("KA-01-1234").unwrap();
/// let view = engine
///     .park(&ParkOptions::new(plate.clone(), VehicleType::Car, SpotType::Compact))
///     .unwrap();
/// println!("parked in {:?}", view.spot_number);
///
/// engine.exit(&plate).unwrap();
/// ```
#[derive(Debug)]
pub struct AllocationEngine<'a, S: SpotStore + ?Sized, T: SessionStore + ?Sized> {
    spots: &'a S,
    sessions: &'a T,
}

impl<'a, S: SpotStore + ?Sized, T: SessionStore + ?Sized> AllocationEngine<'a, S, T> {
    /// Creates an engine over the given stores.
    #[must_use]
    pub const fn new(spots: &'a S, sessions: &'a T) -> Self {
        Self { spots, sessions }
    }

    /// Parks a vehicle in the lowest-id free spot of the requested type.
    ///
    /// # Errors
    ///
    /// - [`Error::AlreadyParked`] if the plate has an open session
    /// - [`Error::NoAvailableSpot`] if no spot of the type is free
    /// - any store error; the claimed spot is released first
    pub fn park(&self, options: &ParkOptions) -> Result<SessionView> {
        let plate = &options.plate;

        if self.sessions.find_open_session(plate)?.is_some() {
            return Err(Error::AlreadyParked {
                plate: plate.to_string(),
            });
        }

        let spot_id = self.spots.try_claim(options.spot_type)?;
        let entry_time = now();

        let vehicle_id = match self
            .sessions
            .open_session(plate, options.vehicle_type, spot_id, entry_time)
        {
            Ok(id) => id,
            Err(err) => {
                match self.spots.release(spot_id) {
                    Ok(_) => log::debug!("released spot {spot_id} after failed park of {plate}"),
                    Err(release_err) => log::warn!(
                        "failed to release spot {spot_id} after failed park of {plate}: {release_err}"
                    ),
                }
                return Err(err);
            }
        };

        let spot = self.spots.spot(spot_id)?;
        log::info!(
            "parked {plate} in {} spot {} (floor {})",
            spot.spot_type,
            spot.spot_number,
            spot.floor_number
        );

        Ok(SessionView {
            id: vehicle_id,
            license_plate: plate.to_string(),
            vehicle_type: options.vehicle_type,
            entry_time,
            exit_time: None,
            spot_number: Some(spot.spot_number),
            spot_type: Some(spot.spot_type),
        })
    }

    /// Closes the open session for a plate and frees its spot.
    ///
    /// If the close fails (for instance with [`Error::LockTimeout`]) the
    /// session stays open and the spot stays occupied, so the exit can be
    /// retried. The returned view carries the exit time and the spot held during the
    /// session.
    ///
    /// # Errors
    ///
    /// - [`Error::VehicleNotFound`] if the plate has no open session
    /// - any store error
    pub fn exit(&self, plate: &LicensePlate) -> Result<SessionView> {
        let closed = self.sessions.close_session(plate, now())?;

        let spot = match closed.spot_id {
            Some(spot_id) => Some(self.spots.spot(spot_id)?),
            None => {
                log::warn!("session {} for {plate} held no spot", closed.vehicle_id);
                None
            }
        };

        let session = self.sessions.session(closed.vehicle_id)?;
        log::info!("{plate} exited");

        Ok(view(session, spot.map(|s| (s.spot_number, s.spot_type))))
    }

    /// Returns the current free-spot snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the spot store read fails.
    pub fn availability(&self) -> Result<Availability> {
        availability(self.spots)
    }

    /// Returns the open session for a plate as a view, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if a store read fails.
    pub fn open_session(&self, plate: &LicensePlate) -> Result<Option<SessionView>> {
        let Some(session) = self.sessions.find_open_session(plate)? else {
            return Ok(None);
        };
        let spot = match session.spot_id {
            Some(spot_id) => Some(self.spots.spot(spot_id)?),
            None => None,
        };
        Ok(Some(view(
            session,
            spot.map(|s| (s.spot_number, s.spot_type)),
        )))
    }
}

fn view(session: VehicleSession, spot: Option<(String, SpotType)>) -> SessionView {
    let (spot_number, spot_type) = spot.unzip();
    SessionView {
        id: session.id,
        license_plate: session.license_plate,
        vehicle_type: session.vehicle_type,
        entry_time: session.entry_time,
        exit_time: session.exit_time,
        spot_number,
        spot_type,
    }
}

// Millisecond precision matches what the session table stores.
fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}
