#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use nasch::{Cell, Lane, Trace, Velocity, EMPTY};

fn snapshot_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("snapshots")
}

pub fn assert_snapshot(name: &str, actual: &str) {
    let path = snapshot_root().join(name);
    if std::env::var("NASCH_UPDATE_SNAPSHOTS").is_ok() {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create snapshot directory");
        }
        fs::write(&path, actual).expect("write snapshot");
        return;
    }

    let expected =
        fs::read_to_string(&path).unwrap_or_else(|_| panic!("snapshot {:?} not found", path));
    if normalize(&expected) != normalize(actual) {
        panic!(
            "Snapshot mismatch for {:?}. Set NASCH_UPDATE_SNAPSHOTS=1 to regenerate.\nExpected:\n{}\nActual:\n{}",
            path,
            expected,
            actual
        );
    }
}

fn normalize(input: &str) -> String {
    input.replace("\r\n", "\n")
}

/// Lane with stopped cars on `cars` and nothing else
pub fn stopped_cars(length: usize, cars: &[usize]) -> Vec<Cell> {
    let mut cells = vec![EMPTY; length];
    for &idx in cars {
        cells[idx] = 0;
    }
    cells
}

/// Every cell of every row is empty or a velocity in [0, v_max]
pub fn assert_cells_in_range(trace: &Trace, v_max: Velocity) {
    for (t, lane) in trace.iter().enumerate() {
        for (i, &cell) in lane.cells().iter().enumerate() {
            assert!(
                cell == EMPTY || (0..=v_max).contains(&cell),
                "cell {} at t={} holds {}",
                i,
                t,
                cell
            );
        }
    }
}

/// Velocities of the cars on `lane`, ordered by cell
pub fn velocities(lane: &Lane) -> Vec<Velocity> {
    lane.car_positions()
        .into_iter()
        .filter_map(|idx| lane.velocity(idx))
        .collect()
}
