//! Property-based tests for claim/release sequences and availability.

use std::collections::BTreeSet;

use proptest::prelude::*;

use super::{availability, AllocationEngine, ParkOptions, SpotStore};
use crate::database::test_util::{create_test_database, register_spots};
use crate::ids::SpotId;
use crate::spot::SpotType;
use crate::vehicle::{LicensePlate, VehicleType};

#[derive(Debug, Clone)]
enum Step {
    Claim(SpotType),
    Release(usize),
}

fn spot_type_strategy() -> impl Strategy<Value = SpotType> {
    prop::sample::select(SpotType::ALL.to_vec())
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        spot_type_strategy().prop_map(Step::Claim),
        (0usize..16).prop_map(Step::Release),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    // The snapshot always equals registered minus held, per type.
    #[test]
    fn availability_tracks_claims(
        layout in prop::collection::vec((spot_type_strategy(), 0usize..4), 1..5),
        steps in prop::collection::vec(step_strategy(), 0..40),
    ) {
        let db = create_test_database();
        let ids = register_spots(&db, &layout);
        let registered: Vec<(SpotId, SpotType)> = ids
            .iter()
            .map(|&id| (id, db.get_spot(id).unwrap().spot_type))
            .collect();

        let mut held: BTreeSet<SpotId> = BTreeSet::new();
        for step in steps {
            match step {
                Step::Claim(spot_type) => match db.try_claim(spot_type) {
                    Ok(id) => {
                        // Never hands out a spot that is already held.
                        prop_assert!(held.insert(id));
                        let lowest_free = registered
                            .iter()
                            .filter(|(sid, t)| (*t == spot_type && !held.contains(sid)) || *sid == id)
                            .map(|(sid, _)| *sid)
                            .min();
                        prop_assert_eq!(lowest_free, Some(id));
                    }
                    Err(e) => {
                        prop_assert!(e.is_conflict());
                        prop_assert!(registered
                            .iter()
                            .filter(|(_, t)| *t == spot_type)
                            .all(|(sid, _)| held.contains(sid)));
                    }
                },
                Step::Release(idx) => {
                    if let Some(&(id, _)) = registered.get(idx) {
                        let changed = db.release(id).unwrap();
                        prop_assert_eq!(changed, held.remove(&id));
                    }
                }
            }

            let snapshot = availability(&db).unwrap();
            prop_assert_eq!(snapshot.total, snapshot.per_type.values().sum::<u64>());
            for spot_type in SpotType::ALL {
                let expected = registered
                    .iter()
                    .filter(|(sid, t)| *t == spot_type && !held.contains(sid))
                    .count() as u64;
                prop_assert_eq!(snapshot.count(spot_type), expected);
            }
        }
    }

    // Parking then exiting every vehicle restores the starting snapshot.
    #[test]
    fn park_exit_round_trip(plates in prop::collection::btree_set("[A-Z]{2}-[0-9]{2}", 1..6)) {
        let db = create_test_database();
        register_spots(&db, &[(SpotType::Compact, 3)]);
        let engine = AllocationEngine::new(&db, &db);
        let before = engine.availability().unwrap();

        let mut parked = Vec::new();
        for p in &plates {
            let plate = LicensePlate::new(p).unwrap();
            let options = ParkOptions::new(plate.clone(), VehicleType::Car, SpotType::Compact);
            if engine.park(&options).is_ok() {
                parked.push(plate);
            }
        }
        prop_assert_eq!(parked.len(), plates.len().min(3));

        for plate in &parked {
            engine.exit(plate).unwrap();
        }
        prop_assert_eq!(engine.availability().unwrap(), before);
    }
}
