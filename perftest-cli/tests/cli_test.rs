//! Argument parsing and subcommands driven in-process.

use std::path::{Path, PathBuf};

use chrono::{TimeZone, Utc};
use clap::Parser;
use perftest_cli::cli::{CompareArgs, HistoryArgs, RunArgs};
use perftest_cli::{commands, Cli, Command};
use perftest_core::config::PerftestConfig;
use perftest_core::{
    Backend, BenchmarkConfig, Domain, EnvironmentInfo, Grid, KernelResult, Precision, RunResult,
    RuntimeInfo, RuntimeKind, TimestampSource,
};
use perftest_storage::save_result;

fn result(day: u32, kernels: &[(&str, &[f64])]) -> RunResult {
    RunResult {
        config: BenchmarkConfig::new(
            RuntimeKind::Gridtools,
            Grid::Strgrid,
            Precision::Double,
            Backend::Cuda,
            Domain::default(),
            5,
        )
        .unwrap(),
        kernels: kernels
            .iter()
            .map(|(name, samples)| KernelResult {
                kernel: name.to_string(),
                mean: samples.iter().sum::<f64>() / samples.len() as f64,
                stdev: 0.0,
                samples: samples.to_vec(),
            })
            .collect(),
        runtime: RuntimeInfo {
            name: "gridtools".to_string(),
            version: "deadbeef".to_string(),
            datetime: None,
            path: PathBuf::from("/opt/gridtools"),
        },
        environment: EnvironmentInfo {
            hostname: "node".to_string(),
            datetime: Utc.with_ymd_and_hms(2024, 5, day, 0, 0, 0).unwrap(),
            executor: "local".to_string(),
        },
    }
}

const BASE: &[f64] = &[1.0, 1.02, 0.98, 1.01, 0.99];
const FAST: &[f64] = &[0.80, 0.82, 0.79, 0.81, 0.78];

fn seeded_config() -> PerftestConfig {
    let mut config = PerftestConfig::default();
    config.compare.seed = Some(5);
    config
}

fn capture(command: &Command, config: &PerftestConfig) -> String {
    let mut out = Vec::new();
    commands::execute(command, config, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

fn write_pair(dir: &Path) -> (PathBuf, PathBuf) {
    let before = dir.join("before.json");
    let after = dir.join("after.json");
    save_result(&before, &result(1, &[("copy_stencil", BASE), ("laplace", BASE)])).unwrap();
    save_result(&after, &result(2, &[("copy_stencil", FAST), ("laplace", BASE)])).unwrap();
    (before, after)
}

fn compare_args(before: PathBuf, after: PathBuf) -> CompareArgs {
    CompareArgs {
        before,
        after,
        resamples: None,
        alpha: None,
        seed: None,
        significant: false,
        json: false,
    }
}

#[test]
fn run_flags_become_overrides() {
    let cli = Cli::try_parse_from([
        "perftest", "run", "--runtime", "stella", "-g", "strgrid", "-p", "float", "-b", "cuda",
        "-d", "64x32x16", "-r", "3", "-j", "2", "--path", "/opt/stella", "-o", "out.json", "-vv",
    ])
    .unwrap();

    assert_eq!(cli.verbose, 2);
    let overrides = cli.command.overrides();
    assert_eq!(overrides.runtime, Some(RuntimeKind::Stella));
    assert_eq!(overrides.precision, Some(Precision::Float));
    assert_eq!(overrides.backend, Some(Backend::Cuda));
    assert_eq!(overrides.domain, Some(Domain::new(64, 32, 16).unwrap()));
    assert_eq!(overrides.repeat, Some(3));
    assert_eq!(overrides.parallel_jobs, Some(2));
    assert_eq!(overrides.runtime_path, Some(PathBuf::from("/opt/stella")));
    assert!(overrides.resamples.is_none());
}

#[test]
fn unknown_option_values_are_rejected() {
    assert!(Cli::try_parse_from(["perftest", "run", "-g", "hexgrid", "-o", "x.json"]).is_err());
    assert!(Cli::try_parse_from(["perftest", "run", "-d", "12x0", "-o", "x.json"]).is_err());
    assert!(Cli::try_parse_from(["perftest", "history", "--timestamp", "build", "a.json"]).is_err());
}

#[test]
fn history_needs_at_least_one_path() {
    assert!(Cli::try_parse_from(["perftest", "history"]).is_err());
    let cli = Cli::try_parse_from(["perftest", "history", "-t", "commit", "-l", "4", "a", "b"]).unwrap();
    let overrides = cli.command.overrides();
    assert_eq!(overrides.history_timestamp, Some(TimestampSource::Commit));
    assert_eq!(overrides.history_limit, Some(4));
}

#[test]
fn compare_prints_tags() {
    let dir = tempfile::tempdir().unwrap();
    let (before, after) = write_pair(dir.path());

    let output = capture(&Command::Compare(compare_args(before, after)), &seeded_config());

    let copy = output.lines().find(|l| l.starts_with("copy_stencil")).unwrap();
    assert!(copy.trim_end().ends_with("+++"), "{copy}");
    assert!(output.lines().any(|l| l.starts_with("laplace")));
}

#[test]
fn compare_json_can_filter_significant() {
    let dir = tempfile::tempdir().unwrap();
    let (before, after) = write_pair(dir.path());
    let mut args = compare_args(before, after);
    args.json = true;
    args.significant = true;

    let output = capture(&Command::Compare(args), &seeded_config());
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    let entries = value.as_array().unwrap();

    assert!(entries.iter().any(|e| e["key"]["kernel"] == "copy_stencil"));
    assert!(entries.iter().all(|e| e["classification"] != "="));
    assert_eq!(entries[0]["classification"], "+++");
}

#[test]
fn history_marks_missing_runs() {
    let dir = tempfile::tempdir().unwrap();
    save_result(&dir.path().join("a.json"), &result(3, &[("copy_stencil", BASE)])).unwrap();
    save_result(
        &dir.path().join("b.json"),
        &result(1, &[("copy_stencil", FAST), ("laplace", BASE)]),
    )
    .unwrap();

    let args = HistoryArgs {
        paths: vec![dir.path().to_path_buf()],
        timestamp: None,
        limit: None,
        json: false,
    };
    let output = capture(&Command::History(args), &PerftestConfig::default());
    let lines: Vec<&str> = output.lines().collect();

    assert_eq!(lines[0], "copy_stencil, cuda, double");
    assert!(lines[1].contains("2024-05-01"));
    assert!(lines[2].contains("2024-05-03"));
    assert_eq!(lines[3], "laplace, cuda, double");
    assert!(lines[5].trim_end().ends_with('-'), "{}", lines[5]);
}

#[test]
fn run_without_runtime_path_fails() {
    let dir = tempfile::tempdir().unwrap();
    let args = RunArgs {
        runtime: None,
        grid: None,
        precision: None,
        backend: None,
        domain: None,
        repeat: None,
        jobs: None,
        path: None,
        output: dir.path().join("out.json"),
    };
    let mut out = Vec::new();
    let err = commands::execute(&Command::Run(args), &PerftestConfig::default(), &mut out)
        .unwrap_err();
    assert!(err.to_string().contains("no build directory"));
}

#[cfg(unix)]
#[test]
fn run_stores_result_in_output_directory() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let build = dir.path().join("stella");
    std::fs::create_dir_all(&build).unwrap();
    let binary = build.join("StandaloneStencils");
    std::fs::write(&binary, "#!/bin/sh\necho \"[ RUN ] $4\"\necho \"[s] 0.125\"\n").unwrap();
    let mut perms = std::fs::metadata(&binary).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&binary, perms).unwrap();

    let results = dir.path().join("results");
    std::fs::create_dir_all(&results).unwrap();

    let mut config = PerftestConfig::default();
    config.run.runtime = Some(RuntimeKind::Stella);
    config.run.repeat = Some(2);
    config.runtimes.stella_path = Some(build);
    let args = RunArgs {
        runtime: None,
        grid: None,
        precision: None,
        backend: None,
        domain: None,
        repeat: None,
        jobs: None,
        path: None,
        output: results.clone(),
    };

    let output = capture(&Command::Run(args), &config);
    assert!(output.contains("copy_stencil"));

    let files = perftest_storage::list_results(&results).unwrap();
    assert_eq!(files.len(), 1);
    let stored = perftest_storage::load_result(&files[0]).unwrap();
    assert_eq!(stored.kernels.len(), 5);
    assert!(stored.kernels.iter().all(|k| k.samples == [0.125, 0.125]));
    assert_eq!(stored.runtime.name, "stella");
}
