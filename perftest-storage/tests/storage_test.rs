//! Round trips through the filesystem.

use std::fs;
use std::path::PathBuf;

use chrono::{TimeZone, Utc};
use perftest_core::errors::StorageError;
use perftest_core::{
    Backend, BenchmarkConfig, Domain, EnvironmentInfo, Grid, KernelResult, Precision, RunResult,
    RuntimeInfo, RuntimeKind,
};
use perftest_storage::{default_file_name, list_results, load_result, load_results, save_result};

fn result(hour: u32) -> RunResult {
    RunResult {
        config: BenchmarkConfig::new(
            RuntimeKind::Gridtools,
            Grid::Strgrid,
            Precision::Double,
            Backend::Cuda,
            Domain::new(64, 64, 40).unwrap(),
            3,
        )
        .unwrap(),
        kernels: vec![KernelResult {
            kernel: "copy_stencil".to_string(),
            mean: 0.5,
            stdev: 0.25,
            samples: vec![0.25, 0.5, 0.75],
        }],
        runtime: RuntimeInfo {
            name: "gridtools".to_string(),
            version: "0123abcd".to_string(),
            datetime: Some(Utc.with_ymd_and_hms(2024, 2, 1, 8, 0, 0).unwrap()),
            path: PathBuf::from("/opt/gridtools/build"),
        },
        environment: EnvironmentInfo {
            hostname: "daint".to_string(),
            datetime: Utc.with_ymd_and_hms(2024, 3, 1, hour, 0, 0).unwrap(),
            executor: "local shell=/bin/sh jobs=1".to_string(),
        },
    }
}

#[test]
fn saved_result_loads_back_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested/deeper/result.json");

    save_result(&path, &result(12)).unwrap();
    assert_eq!(load_result(&path).unwrap(), result(12));
}

#[test]
fn file_is_pretty_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("result.json");
    save_result(&path, &result(12)).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("\n  \"config\""));
    assert!(content.contains("\"domain\""));
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_result(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, StorageError::Io { .. }));
}

#[test]
fn garbage_is_malformed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "{\"config\": 3}").unwrap();

    let err = load_result(&path).unwrap_err();
    assert!(matches!(err, StorageError::Malformed { .. }));
    assert!(err.to_string().contains("broken.json"));
}

#[test]
fn listing_is_sorted_and_filtered() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["b.json", "a.json", "notes.txt", "c.json"] {
        fs::write(dir.path().join(name), "{}").unwrap();
    }
    fs::create_dir(dir.path().join("d.json")).unwrap();

    let names: Vec<String> = list_results(dir.path())
        .unwrap()
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, ["a.json", "b.json", "c.json"]);
}

#[test]
fn load_results_expands_directories_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let runs = dir.path().join("runs");
    save_result(&runs.join("2.json"), &result(2)).unwrap();
    save_result(&runs.join("1.json"), &result(1)).unwrap();
    let single = dir.path().join("single.json");
    save_result(&single, &result(9)).unwrap();

    let loaded = load_results(&[single, runs]).unwrap();
    let hours: Vec<String> = loaded
        .iter()
        .map(|r| r.environment.datetime.format("%H").to_string())
        .collect();
    assert_eq!(hours, ["09", "01", "02"]);
}

#[test]
fn default_name_encodes_configuration_and_time() {
    assert_eq!(
        default_file_name(&result(12)),
        "gridtools-strgrid-double-cuda-20240301T120000.json"
    );
}
