//! End-to-end tests for both aggregation modes against real directories.

use std::fs;
use std::path::Path;

use paddock_manifest::prelude::*;
use tempfile::tempdir;

fn write_car(data_dir: &Path, folder: &str, file: &str, content: &str) {
    let dir = data_dir.join(folder);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(file), content).unwrap();
}

// -- Root mode: the three-car fixture ---------------------------------------

#[test]
fn root_mode_three_cars_across_two_sims() {
    let data = tempdir().unwrap();
    write_car(data.path(), "TestSimA", "car1.json", r#"{"carId": "car_1"}"#);
    write_car(data.path(), "TestSimA", "car2.json", r#"{"carId": "car_2"}"#);
    write_car(data.path(), "TestSimB", "alpha.json", r#"{"carId": "alpha"}"#);

    let report = generate_root_manifest(data.path()).unwrap();
    assert_eq!(report.cars_written, 3);
    assert!(report.skipped_by_folder.is_empty());

    let text = fs::read_to_string(data.path().join(MANIFEST_FILE_NAME)).unwrap();
    let manifest: RootManifest = serde_json::from_str(&text).unwrap();

    let sim_a = &manifest.cars["TestSimA"];
    assert_eq!(sim_a.len(), 2);
    assert_eq!(sim_a[0].car_id, "car_1");
    assert_eq!(sim_a[0].path, "TestSimA/car1.json");
    assert_eq!(sim_a[1].car_id, "car_2");
    assert_eq!(sim_a[1].path, "TestSimA/car2.json");

    let sim_b = &manifest.cars["TestSimB"];
    assert_eq!(sim_b.len(), 1);
    assert_eq!(sim_b[0].car_id, "alpha");
    assert_eq!(sim_b[0].path, "TestSimB/alpha.json");
}

// -- Per-folder mode: one valid, one invalid --------------------------------

#[test]
fn per_folder_mode_one_valid_one_invalid() {
    let data = tempdir().unwrap();
    write_car(
        data.path(),
        "TestSim",
        "good.json",
        r#"{"carName": "Good Car", "carId": "good"}"#,
    );
    write_car(data.path(), "TestSim", "bad.json", "not even json");

    let summary = generate_folder_manifests(data.path()).unwrap();
    assert_eq!(summary.folders_written, 1);
    assert_eq!(summary.cars_written, 1);
    assert_eq!(summary.files_skipped, 1);

    let text = fs::read_to_string(data.path().join("TestSim").join(MANIFEST_FILE_NAME)).unwrap();
    let manifest: FolderManifest = serde_json::from_str(&text).unwrap();
    assert_eq!(manifest.cars.len(), 1);
    assert_eq!(manifest.cars[0].car_id, "good");
    assert_eq!(manifest.cars[0].car_name, "Good Car");
    assert_eq!(manifest.cars[0].path, "good.json");
}

// -- Self-exclusion survives mode interleaving -------------------------------

#[test]
fn interleaved_modes_never_ingest_manifests() {
    let data = tempdir().unwrap();
    write_car(data.path(), "Sim", "car.json", r#"{"carId": "car_1"}"#);

    // Per-folder, then root, then per-folder again. Counts stay stable:
    // neither mode ever reads a manifest.json as a car source.
    let s1 = generate_folder_manifests(data.path()).unwrap();
    let r1 = generate_root_manifest(data.path()).unwrap();
    let s2 = generate_folder_manifests(data.path()).unwrap();
    let r2 = generate_root_manifest(data.path()).unwrap();

    assert_eq!(s1.cars_written, 1);
    assert_eq!(r1.cars_written, 1);
    assert_eq!(s2.cars_written, 1);
    assert_eq!(r2.cars_written, 1);
}

// -- Root mode idempotence over a mixed tree ---------------------------------

#[test]
fn root_mode_idempotent_over_mixed_tree() {
    let data = tempdir().unwrap();
    write_car(data.path(), "SimZ", "zebra.json", r#"{"carId": "zebra"}"#);
    write_car(data.path(), "SimZ", "alpha.json", r#"{"carId": "alpha"}"#);
    write_car(data.path(), "SimA", "only.json", r#"{"carId": "only"}"#);
    write_car(data.path(), "SimA", "broken.json", "{");

    let first = generate_root_manifest(data.path()).unwrap();
    let bytes_first = fs::read(data.path().join(MANIFEST_FILE_NAME)).unwrap();

    let second = generate_root_manifest(data.path()).unwrap();
    let bytes_second = fs::read(data.path().join(MANIFEST_FILE_NAME)).unwrap();

    assert_eq!(first.cars_written, 3);
    assert_eq!(second.cars_written, 3);
    assert_eq!(bytes_first, bytes_second);

    // Within SimZ, alpha sorts before zebra.
    let manifest: RootManifest = serde_json::from_str(
        std::str::from_utf8(&bytes_first).unwrap(),
    )
    .unwrap();
    let sim_z = &manifest.cars["SimZ"];
    assert_eq!(sim_z[0].car_id, "alpha");
    assert_eq!(sim_z[1].car_id, "zebra");

    // The skip is reported each run, not just the first.
    assert_eq!(second.skipped_by_folder.len(), 1);
    assert_eq!(second.skipped_by_folder[0].1.len(), 1);
    assert_eq!(second.skipped_by_folder[0].1[0].file_name, "broken.json");
}
