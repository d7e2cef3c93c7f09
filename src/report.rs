//! Persisted results table.
//!
//! Every session appends exactly one row to a CSV file shared with the
//! other language implementations of the benchmark. The table layout is a
//! fixed nine-column protocol; the header is written only when the file
//! is empty, so however many sessions (in whatever language) have already
//! appended, it appears exactly once.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::runner::Summary;

/// Default location of the results table, relative to the working
/// directory, shared with the sibling implementations.
pub const DEFAULT_RESULTS_PATH: &str = "results/benchmark_results.csv";

/// Header line of the results table.
pub const CSV_HEADER: &str =
    "language,size,runs,mean (s),stdev,best,worst,real memory (MB),theoretical memory (MB)";

/// One session's flat record for the results table.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow {
    /// Workload identifier for the `language` column.
    pub language: String,
    /// Matrix size n.
    pub size: usize,
    /// Number of measured runs.
    pub runs: usize,
    /// Mean run time, seconds.
    pub mean_secs: f64,
    /// Sample standard deviation of run times.
    pub stdev_secs: f64,
    /// Fastest run, seconds.
    pub best_secs: f64,
    /// Slowest run, seconds.
    pub worst_secs: f64,
    /// Mean measured memory growth, MB.
    pub real_memory_mb: f64,
    /// Estimated buffer footprint, MB.
    pub theoretical_memory_mb: f64,
}

impl ResultRow {
    /// Build a row from a session summary under the given workload
    /// identifier.
    #[must_use]
    pub fn from_summary(language: &str, summary: &Summary) -> Self {
        Self {
            language: language.to_string(),
            size: summary.size,
            runs: summary.runs,
            mean_secs: summary.mean_secs,
            stdev_secs: summary.stdev_secs,
            best_secs: summary.best_secs,
            worst_secs: summary.worst_secs,
            real_memory_mb: summary.mean_memory_mb,
            theoretical_memory_mb: summary.theoretical_memory_mb,
        }
    }

    /// Format the row as a CSV data line: times to four decimal places,
    /// memory to two, no quoting (no field can contain a comma).
    #[must_use]
    pub fn to_csv_line(&self) -> String {
        format!(
            "{},{},{},{:.4},{:.4},{:.4},{:.4},{:.2},{:.2}",
            self.language,
            self.size,
            self.runs,
            self.mean_secs,
            self.stdev_secs,
            self.best_secs,
            self.worst_secs,
            self.real_memory_mb,
            self.theoretical_memory_mb,
        )
    }
}

/// Append `row` to the results table at `path`.
///
/// Creates the parent directory if missing (idempotent) and the file on
/// first use. The header line is written only when the file is empty.
/// The handle is scoped to this call, so it is closed on every path out.
///
/// # Errors
///
/// Any filesystem failure is returned as [`Error::Io`](crate::Error::Io);
/// the session treats it as fatal.
pub fn append<P: AsRef<Path>>(path: P, row: &ResultRow) -> Result<()> {
    let path = path.as_ref();
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir)?;
        }
    }

    let mut file = OpenOptions::new().append(true).create(true).open(path)?;
    if file.metadata()?.len() == 0 {
        tracing::debug!(path = %path.display(), "new results table, writing header");
        writeln!(file, "{CSV_HEADER}")?;
    }
    writeln!(file, "{}", row.to_csv_line())?;
    Ok(())
}
