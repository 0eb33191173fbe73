//! Tests that drive the binary the way the data refresh does: no
//! arguments, fixed paths relative to the working directory.

use assert_cmd::{Command, cargo::cargo_bin_cmd};
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

fn rollup() -> Command {
    cargo_bin_cmd!("bluebikes_rollup")
}

const HEADER: &str = "ride_id,rideable_type,started_at,ended_at,start_station_name,start_station_id,end_station_name,end_station_id,start_lat,start_lng,end_lat,end_lng,member_casual";

fn fixture_csv() -> String {
    [
        HEADER,
        "A,electric,2025-05-12 08:00:00,2025-05-12 08:12:00,Central Square,M32011,Harvard Square,M32015,42.36,-71.10,42.37,-71.12,member",
        "B,classic,2025-05-13 18:30:00,2025-05-13 18:41:00,Harvard Square,M32015,Central Square,M32011,42.37,-71.12,42.36,-71.10,casual",
    ]
    .join("\n")
}

#[test]
fn test_run_without_arguments_writes_document() {
    let dir = tempdir().unwrap();
    let data_dir = dir.path().join("BluebikeData_2025");
    fs::create_dir(&data_dir).unwrap();
    fs::write(data_dir.join("202505-bluebikes-tripdata.csv"), fixture_csv()).unwrap();

    rollup()
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 1 trip files"))
        .stdout(predicate::str::contains("Total trips: 2"))
        .stdout(predicate::str::contains("Municipalities: Cambridge"))
        .stdout(predicate::str::contains("Done!"));

    let out = dir.path().join("public").join("data").join("bluebikes-2025.json");
    assert!(out.exists());
    let doc: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(doc["kpis"]["totalTrips"], 2);
    assert_eq!(doc["kpis"]["memberPct"], 50.0);
}

#[test]
fn test_missing_data_directory_exits_nonzero() {
    let dir = tempdir().unwrap();

    rollup()
        .current_dir(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("BluebikeData_2025"));
}

#[test]
fn test_empty_data_directory_exits_nonzero() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("BluebikeData_2025")).unwrap();

    rollup()
        .current_dir(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("no trip files"));
}
