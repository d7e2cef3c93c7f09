//! Results-table behavior: directory creation, append-only writes, and
//! the header-exactly-once invariant. All sessions here run against
//! scratch directories.

use std::fs;
use std::path::Path;

use matbench::clock::ManualClock;
use matbench::config::BenchConfig;
use matbench::memory::FixedSampler;
use matbench::report::{self, ResultRow, CSV_HEADER};
use matbench::runner::Runner;
use matbench::workload::dense::DenseMatMul;
use tempfile::TempDir;

fn run_session(csv: &Path, size: usize, runs: usize) {
    let clock = ManualClock::new(&[0.25]);
    let sampler = FixedSampler::new(&[100.0, 102.0]);
    let runner = Runner::new(clock, sampler);
    let config = BenchConfig::new(size, runs).unwrap();

    let summary = runner.run(&DenseMatMul, &config);
    let row = ResultRow::from_summary("rust", &summary);
    report::append(csv, &row).unwrap();
}

fn lines(csv: &Path) -> Vec<String> {
    fs::read_to_string(csv)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn test_session_appends_exactly_one_row() {
    let dir = TempDir::new().unwrap();
    let csv = dir.path().join("results").join("benchmark_results.csv");

    run_session(&csv, 2, 1);

    let lines = lines(&csv);
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], CSV_HEADER);

    let fields: Vec<&str> = lines[1].split(',').collect();
    assert_eq!(fields[0], "rust");
    assert_eq!(fields[1], "2"); // size
    assert_eq!(fields[2], "1"); // runs
    assert_eq!(fields[3], "0.2500"); // mean
    assert_eq!(fields[4], "0.0000"); // stdev (single run)
    assert_eq!(fields[7], "2.00"); // real memory delta
}

#[test]
fn test_header_written_exactly_once_across_sessions() {
    let dir = TempDir::new().unwrap();
    let csv = dir.path().join("results").join("benchmark_results.csv");

    run_session(&csv, 2, 1);
    run_session(&csv, 4, 2);
    run_session(&csv, 8, 3);

    let lines = lines(&csv);
    assert_eq!(lines.len(), 4);
    let header_count = lines.iter().filter(|l| *l == CSV_HEADER).count();
    assert_eq!(header_count, 1);
    assert_eq!(lines[0], CSV_HEADER);
}

#[test]
fn test_header_not_rewritten_on_prepopulated_table() {
    // A table another language implementation already wrote to.
    let dir = TempDir::new().unwrap();
    let csv = dir.path().join("benchmark_results.csv");
    fs::write(&csv, format!("{CSV_HEADER}\ncpp,512,10,1.0000,0.1000,0.9000,1.2000,6.00,6.00\n"))
        .unwrap();

    run_session(&csv, 2, 1);

    let lines = lines(&csv);
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("cpp,"));
    assert!(lines[2].starts_with("rust,"));
    assert_eq!(lines.iter().filter(|l| *l == CSV_HEADER).count(), 1);
}

#[test]
fn test_creates_nested_results_directory() {
    let dir = TempDir::new().unwrap();
    let csv = dir.path().join("a").join("b").join("results.csv");

    let row = ResultRow {
        language: "rust".to_string(),
        size: 2,
        runs: 1,
        mean_secs: 0.1,
        stdev_secs: 0.0,
        best_secs: 0.1,
        worst_secs: 0.1,
        real_memory_mb: 0.0,
        theoretical_memory_mb: 9.155_273_437_5e-5,
    };
    report::append(&csv, &row).unwrap();
    // Idempotent on the second append into the now-existing directory.
    report::append(&csv, &row).unwrap();

    assert_eq!(lines(&csv).len(), 3);
}

#[test]
fn test_append_fails_when_path_is_a_directory() {
    let dir = TempDir::new().unwrap();
    let row = ResultRow::from_summary(
        "rust",
        &Runner::new(ManualClock::new(&[0.1]), FixedSampler::new(&[0.0]))
            .run(&DenseMatMul, &BenchConfig::new(2, 1).unwrap()),
    );

    let err = report::append(dir.path(), &row).unwrap_err();
    assert!(matches!(err, matbench::Error::Io(_)));
}
