//! Integration tests for `park`, `exit` and `availability`.

mod common;

use common::TestEnv;
use predicates::prelude::*;

fn park(env: &TestEnv, plate: &str, spot_type: &str) -> assert_cmd::assert::Assert {
    env.command()
        .args(["park", plate, "--vehicle-type", "CAR", "--spot-type", spot_type])
        .assert()
}

#[test]
fn test_park_claims_lowest_free_spot() {
    let env = TestEnv::new();
    let (_, floor_id) = env.lot_with_floor("Central");
    env.add_spot(floor_id, "C-1", "COMPACT");
    env.add_spot(floor_id, "C-2", "COMPACT");

    let session = env.json(&[
        "park",
        "KA-01-1234",
        "--vehicle-type",
        "car",
        "--spot-type",
        "compact",
    ]);
    assert_eq!(session["licensePlate"], "KA-01-1234");
    assert_eq!(session["vehicleType"], "CAR");
    assert_eq!(session["spotNumber"], "C-1");
    assert!(session["exitTime"].is_null());

    let free = env.json(&["spot", "available", "--type", "COMPACT"]);
    let free = free.as_array().unwrap();
    assert_eq!(free.len(), 1);
    assert_eq!(free[0]["spotNumber"], "C-2");
}

#[test]
fn test_park_human_output() {
    let env = TestEnv::new();
    let (_, floor_id) = env.lot_with_floor("Central");
    env.add_spot(floor_id, "L-1", "LARGE");

    park(&env, "TRUCK-9", "LARGE")
        .success()
        .stdout(predicate::str::contains("Plate:    TRUCK-9"))
        .stdout(predicate::str::contains("L-1 (LARGE)"));
}

#[test]
fn test_park_twice_is_conflict() {
    let env = TestEnv::new();
    let (_, floor_id) = env.lot_with_floor("Central");
    env.add_spot(floor_id, "C-1", "COMPACT");
    env.add_spot(floor_id, "C-2", "COMPACT");

    park(&env, "KA-01", "COMPACT").success();
    park(&env, "KA-01", "COMPACT")
        .code(1)
        .stderr(predicate::str::contains("already parked"));

    // The rejected request must not hold a spot.
    let free = env.json(&["spot", "available", "--type", "COMPACT"]);
    assert_eq!(free.as_array().unwrap().len(), 1);
}

#[test]
fn test_park_when_full() {
    let env = TestEnv::new();
    let (_, floor_id) = env.lot_with_floor("Central");
    env.add_spot(floor_id, "E-1", "ELECTRIC");

    park(&env, "EV-1", "ELECTRIC").success();
    park(&env, "EV-2", "ELECTRIC")
        .code(1)
        .stderr(predicate::str::contains("no available spot of type ELECTRIC"));
}

#[test]
fn test_park_validates_before_opening_database() {
    let env = TestEnv::new();

    env.command()
        .args(["park", "   ", "--vehicle-type", "CAR", "--spot-type", "COMPACT"])
        .assert()
        .code(4);
    env.command()
        .args(["park", "KA-01", "--vehicle-type", "BUS", "--spot-type", "COMPACT"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("vehicle type"));

    assert!(!env.data_dir.exists());
}

#[test]
fn test_exit_frees_spot() {
    let env = TestEnv::new();
    let (_, floor_id) = env.lot_with_floor("Central");
    env.add_spot(floor_id, "M-1", "MOTORBIKE");
    park(&env, "BIKE-1", "MOTORBIKE").success();

    let closed = env.json(&["exit", "BIKE-1"]);
    assert!(!closed["exitTime"].is_null());
    assert_eq!(closed["spotNumber"], "M-1");

    let availability = env.json(&["availability"]);
    assert_eq!(availability["availableSpots"]["MOTORBIKE"], 1);

    // The plate may park again once it has left.
    park(&env, "BIKE-1", "MOTORBIKE").success();
}

#[test]
fn test_exit_unknown_plate() {
    let env = TestEnv::new();

    env.command()
        .args(["exit", "NOPE-1"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("NOPE-1"));
}

#[test]
fn test_availability_counts_every_type() {
    let env = TestEnv::new();
    let (_, floor_id) = env.lot_with_floor("Central");
    env.add_spot(floor_id, "C-1", "COMPACT");
    env.add_spot(floor_id, "C-2", "COMPACT");
    env.add_spot(floor_id, "H-1", "HANDICAPPED");
    park(&env, "KA-01", "COMPACT").success();

    let availability = env.json(&["availability"]);
    assert_eq!(availability["availableSpots"]["COMPACT"], 1);
    assert_eq!(availability["availableSpots"]["HANDICAPPED"], 1);
    assert_eq!(availability["availableSpots"]["LARGE"], 0);
    assert_eq!(availability["totalAvailable"], 2);

    env.command()
        .arg("availability")
        .assert()
        .success()
        .stdout(predicate::str::contains("Available spots:"))
        .stdout(predicate::str::is_match(r"TOTAL\s+2").unwrap());
}
