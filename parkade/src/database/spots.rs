//! Spot occupancy: claim, release and free counts.

use std::collections::BTreeMap;

use rusqlite::OptionalExtension;

use crate::allocation::SpotStore;
use crate::error::{Error, Result};
use crate::ids::SpotId;
use crate::spot::{ParkingSpot, SpotType};

use super::connection::Database;

const SELECT_FIRST_FREE: &str = r"
    SELECT id FROM parking_spots
    WHERE spot_type = ?1 AND is_occupied = 0
    ORDER BY id
    LIMIT 1
";

const MARK_OCCUPIED: &str =
    "UPDATE parking_spots SET is_occupied = 1 WHERE id = ?1 AND is_occupied = 0";

pub(super) const MARK_FREE: &str =
    "UPDATE parking_spots SET is_occupied = 0 WHERE id = ?1 AND is_occupied = 1";

const COUNT_FREE_BY_TYPE: &str = r"
    SELECT spot_type, COUNT(*) FROM parking_spots
    WHERE is_occupied = 0
    GROUP BY spot_type
";

impl SpotStore for Database {
    fn try_claim(&self, spot_type: SpotType) -> Result<SpotId> {
        let tx = self.immediate()?;

        let candidate: Option<SpotId> = tx
            .query_row(SELECT_FIRST_FREE, [spot_type], |row| row.get(0))
            .optional()?;
        let Some(spot_id) = candidate else {
            return Err(Error::NoAvailableSpot { spot_type });
        };

        // Holding the write lock, the conditional update cannot miss; the
        // guard keeps the statement correct on its own.
        if tx.execute(MARK_OCCUPIED, [spot_id])? != 1 {
            return Err(Error::NoAvailableSpot { spot_type });
        }
        tx.commit()?;

        log::debug!("claimed {spot_type} spot {spot_id}");
        Ok(spot_id)
    }

    fn release(&self, spot_id: SpotId) -> Result<bool> {
        let changed = self.conn.execute(MARK_FREE, [spot_id])? == 1;
        if changed {
            log::debug!("released spot {spot_id}");
            return Ok(true);
        }

        let exists: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM parking_spots WHERE id = ?1)",
            [spot_id],
            |row| row.get(0),
        )?;
        if exists {
            log::debug!("spot {spot_id} was already free");
            Ok(false)
        } else {
            Err(Error::NotFound {
                resource: format!("spot {spot_id}"),
            })
        }
    }

    fn spot(&self, spot_id: SpotId) -> Result<ParkingSpot> {
        self.get_spot(spot_id)
    }

    fn free_counts(&self) -> Result<BTreeMap<SpotType, u64>> {
        let mut stmt = self.conn.prepare(COUNT_FREE_BY_TYPE)?;
        let rows = stmt.query_map([], |row| {
            let spot_type: SpotType = row.get(0)?;
            let count: i64 = row.get(1)?;
            Ok((spot_type, u64::try_from(count).unwrap_or_default()))
        })?;

        let mut counts = BTreeMap::new();
        for row in rows {
            let (spot_type, count) = row?;
            counts.insert(spot_type, count);
        }
        Ok(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_util::{create_test_database, register_spots};

    #[test]
    fn test_claim_takes_lowest_free_id() {
        let db = create_test_database();
        let ids = register_spots(&db, &[(SpotType::Compact, 3)]);

        assert_eq!(db.try_claim(SpotType::Compact).unwrap(), ids[0]);
        assert_eq!(db.try_claim(SpotType::Compact).unwrap(), ids[1]);
        assert!(db.get_spot(ids[0]).unwrap().is_occupied);
    }

    #[test]
    fn test_claim_reuses_released_lower_id() {
        let db = create_test_database();
        let ids = register_spots(&db, &[(SpotType::Large, 2)]);
        db.try_claim(SpotType::Large).unwrap();
        db.try_claim(SpotType::Large).unwrap();
        db.release(ids[0]).unwrap();

        assert_eq!(db.try_claim(SpotType::Large).unwrap(), ids[0]);
    }

    #[test]
    fn test_claim_exhausted() {
        let db = create_test_database();
        register_spots(&db, &[(SpotType::Motorbike, 1)]);
        db.try_claim(SpotType::Motorbike).unwrap();

        let err = db.try_claim(SpotType::Motorbike).unwrap_err();
        assert!(matches!(
            err,
            Error::NoAvailableSpot {
                spot_type: SpotType::Motorbike
            }
        ));
        // A type with no registered spots behaves the same.
        assert!(db.try_claim(SpotType::Electric).unwrap_err().is_conflict());
    }

    #[test]
    fn test_release_is_idempotent() {
        let db = create_test_database();
        let ids = register_spots(&db, &[(SpotType::Compact, 1)]);
        db.try_claim(SpotType::Compact).unwrap();

        assert!(db.release(ids[0]).unwrap());
        assert!(!db.release(ids[0]).unwrap());
        assert!(!db.get_spot(ids[0]).unwrap().is_occupied);
    }

    #[test]
    fn test_release_unknown_spot() {
        let db = create_test_database();
        assert!(db.release(SpotId::new(404)).unwrap_err().is_not_found());
    }

    #[test]
    fn test_free_counts() {
        let db = create_test_database();
        register_spots(&db, &[(SpotType::Compact, 2), (SpotType::Large, 1)]);
        db.try_claim(SpotType::Compact).unwrap();

        let counts = db.free_counts().unwrap();
        assert_eq!(counts.get(&SpotType::Compact), Some(&1));
        assert_eq!(counts.get(&SpotType::Large), Some(&1));
        assert_eq!(counts.get(&SpotType::Electric), None);
    }
}
