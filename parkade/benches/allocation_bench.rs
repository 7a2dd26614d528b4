use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tempfile::TempDir;

use parkade::database::{Database, DatabaseConfig};
use parkade::{AllocationEngine, LicensePlate, ParkOptions, SpotStore, SpotType, VehicleType};

const LOT_SIZES: &[usize] = &[10, 100, 1000];

fn setup_database(spots_per_type: usize) -> (TempDir, Database) {
    let temp_dir = TempDir::new().expect("failed to create temporary directory");
    let db = Database::open(DatabaseConfig::new(temp_dir.path().join("parkade.db")))
        .expect("failed to open temporary database");

    let lot = db
        .create_lot("Bench", "1 Bench Street")
        .expect("failed to create lot");
    let floor = db.add_floor(lot.id, 0).expect("failed to add floor");
    for spot_type in SpotType::ALL {
        for n in 0..spots_per_type {
            db.add_spot(floor.id, &format!("{spot_type}-{n}"), spot_type)
                .expect("failed to add spot");
        }
    }

    (temp_dir, db)
}

fn bench_claim_release(c: &mut Criterion) {
    let mut group = c.benchmark_group("claim_release");
    for &size in LOT_SIZES {
        let (_dir, db) = setup_database(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                let spot = db.try_claim(black_box(SpotType::Compact)).expect("claim failed");
                db.release(spot).expect("release failed");
            });
        });
    }
    group.finish();
}

fn bench_park_exit(c: &mut Criterion) {
    let (_dir, db) = setup_database(100);
    let engine = AllocationEngine::new(&db, &db);
    let plate = LicensePlate::new("BENCH-1").expect("valid plate");
    let options = ParkOptions::new(plate.clone(), VehicleType::Car, SpotType::Large);

    c.bench_function("park_exit", |b| {
        b.iter(|| {
            engine.park(black_box(&options)).expect("park failed");
            engine.exit(&plate).expect("exit failed");
        });
    });
}

fn bench_availability(c: &mut Criterion) {
    let mut group = c.benchmark_group("availability");
    for &size in LOT_SIZES {
        let (_dir, db) = setup_database(size);
        // Occupy half of each type so the counts are not trivial.
        for spot_type in SpotType::ALL {
            for _ in 0..size / 2 {
                db.try_claim(spot_type).expect("claim failed");
            }
        }
        let engine = AllocationEngine::new(&db, &db);

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| black_box(engine.availability().expect("availability failed")));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_claim_release,
    bench_park_exit,
    bench_availability
);
criterion_main!(benches);
