//! Sparse matrix-vector product workloads (CSR format).
//!
//! Companion kernels to the dense baseline: `y = A·x` over a compressed
//! sparse row matrix, either synthesized deterministically ([`CsrSpmv`])
//! or loaded from a Matrix Market `.mtx` file ([`MtxSpmv`]).

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::Workload;
use crate::error::{Error, Result};

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Sparse matrix in compressed sparse row format.
///
/// `row_ptr` has `rows + 1` entries; row `i`'s nonzeros live at positions
/// `row_ptr[i]..row_ptr[i + 1]` of `values`/`col_idx`.
#[derive(Debug, Clone, PartialEq)]
pub struct CsrMatrix {
    rows: usize,
    cols: usize,
    values: Vec<f64>,
    col_idx: Vec<usize>,
    row_ptr: Vec<usize>,
}

impl CsrMatrix {
    /// Number of rows.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Number of stored nonzero entries.
    #[must_use]
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Sparse matrix-vector product `y = A·x`.
    ///
    /// # Panics
    ///
    /// Panics if `x.len()` differs from the column count.
    #[must_use]
    pub fn spmv(&self, x: &[f64]) -> Vec<f64> {
        assert_eq!(x.len(), self.cols, "x: expected {} elements", self.cols);

        let mut y = vec![0.0; self.rows];
        for i in 0..self.rows {
            let mut sum = 0.0;
            for k in self.row_ptr[i]..self.row_ptr[i + 1] {
                sum += self.values[k] * x[self.col_idx[k]];
            }
            y[i] = sum;
        }
        y
    }

    /// Deterministic banded n×n matrix: row `i` holds nonzeros at columns
    /// `i ± bandwidth` (clipped to the matrix), valued `1 / (1 + |i - j|)`.
    ///
    /// Deterministic by design so repeated runs time identical work.
    #[must_use]
    pub fn banded(n: usize, bandwidth: usize) -> Self {
        let mut values = Vec::new();
        let mut col_idx = Vec::new();
        let mut row_ptr = Vec::with_capacity(n + 1);
        row_ptr.push(0);

        for i in 0..n {
            let lo = i.saturating_sub(bandwidth);
            let hi = (i + bandwidth).min(n - 1);
            for j in lo..=hi {
                values.push(1.0 / (1.0 + i.abs_diff(j) as f64));
                col_idx.push(j);
            }
            row_ptr.push(values.len());
        }

        Self {
            rows: n,
            cols: n,
            values,
            col_idx,
            row_ptr,
        }
    }

    /// Nonzero count [`Self::banded`] produces for the given shape,
    /// without building the matrix.
    #[must_use]
    pub fn banded_nnz(n: usize, bandwidth: usize) -> usize {
        (0..n)
            .map(|i| (i + bandwidth).min(n - 1) - i.saturating_sub(bandwidth) + 1)
            .sum()
    }

    /// Read a real-valued sparse matrix from a Matrix Market `.mtx` file
    /// in coordinate (triplet) format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be opened and
    /// [`Error::MatrixMarket`] if the content is malformed.
    pub fn from_matrix_market<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_matrix_market_reader(BufReader::new(File::open(path)?))
    }

    /// Parse Matrix Market coordinate format from any buffered reader.
    ///
    /// Comment lines start with `%`; the first data line is
    /// `rows cols nnz`, followed by `nnz` one-based `row col value`
    /// triplets.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MatrixMarket`] on truncated input, short lines,
    /// unparseable numbers, or out-of-range indices.
    pub fn from_matrix_market_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut lines = reader.lines();

        let header = loop {
            match lines.next() {
                Some(line) => {
                    let line = line?;
                    if !line.starts_with('%') && !line.trim().is_empty() {
                        break line;
                    }
                }
                None => {
                    return Err(Error::MatrixMarket("missing size header".to_string()));
                }
            }
        };

        let mut fields = header.split_whitespace();
        let rows = parse_field(fields.next(), "rows")?;
        let cols = parse_field(fields.next(), "cols")?;
        let nnz = parse_field(fields.next(), "nnz")?;

        // First pass over the triplets: collect and count per row.
        let mut triplets = Vec::with_capacity(nnz);
        let mut row_count = vec![0_usize; rows];
        for k in 0..nnz {
            let line = lines.next().ok_or_else(|| {
                Error::MatrixMarket(format!("expected {nnz} entries, got {k}"))
            })??;
            let mut entry = line.split_whitespace();

            let i: usize = parse_field(entry.next(), "row index")?;
            let j: usize = parse_field(entry.next(), "column index")?;
            let value: f64 = entry
                .next()
                .ok_or_else(|| Error::MatrixMarket(format!("entry {k}: missing value")))?
                .parse()
                .map_err(|_| Error::MatrixMarket(format!("entry {k}: invalid value")))?;

            // Matrix Market indices are one-based.
            if i == 0 || i > rows || j == 0 || j > cols {
                return Err(Error::MatrixMarket(format!(
                    "entry {k}: index ({i}, {j}) outside {rows}x{cols}"
                )));
            }
            triplets.push((i - 1, j - 1, value));
            row_count[i - 1] += 1;
        }

        // Prefix-sum the per-row counts into row_ptr, then scatter the
        // triplets into their row segments.
        let mut row_ptr = vec![0_usize; rows + 1];
        for i in 0..rows {
            row_ptr[i + 1] = row_ptr[i] + row_count[i];
        }

        let mut values = vec![0.0; nnz];
        let mut col_idx = vec![0_usize; nnz];
        let mut filled = vec![0_usize; rows];
        for (i, j, value) in triplets {
            let dest = row_ptr[i] + filled[i];
            values[dest] = value;
            col_idx[dest] = j;
            filled[i] += 1;
        }

        Ok(Self {
            rows,
            cols,
            values,
            col_idx,
            row_ptr,
        })
    }

    fn buffer_bytes(&self) -> usize {
        self.values.len() * std::mem::size_of::<f64>()
            + self.col_idx.len() * std::mem::size_of::<usize>()
            + self.row_ptr.len() * std::mem::size_of::<usize>()
    }
}

fn parse_field(field: Option<&str>, what: &str) -> Result<usize> {
    field
        .ok_or_else(|| Error::MatrixMarket(format!("missing {what}")))?
        .parse()
        .map_err(|_| Error::MatrixMarket(format!("invalid {what}")))
}

/// Synthetic sparse workload: builds the deterministic banded n×n matrix
/// fresh each call and multiplies it with a 1.0-filled dense vector.
#[derive(Debug, Clone, Copy)]
pub struct CsrSpmv {
    bandwidth: usize,
}

impl CsrSpmv {
    /// Default half-bandwidth of the synthetic matrix.
    pub const DEFAULT_BANDWIDTH: usize = 8;

    /// Create a workload with the given half-bandwidth.
    #[must_use]
    pub const fn new(bandwidth: usize) -> Self {
        Self { bandwidth }
    }
}

impl Default for CsrSpmv {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BANDWIDTH)
    }
}

impl Workload for CsrSpmv {
    fn label(&self) -> &str {
        "rust-spmv"
    }

    fn run(&self, n: usize) {
        let matrix = CsrMatrix::banded(n, self.bandwidth);
        let x = vec![1.0; n];
        let _y = matrix.spmv(&x);
    }

    /// CSR buffers plus the dense x and y vectors.
    fn theoretical_memory_mb(&self, n: usize) -> f64 {
        let nnz = CsrMatrix::banded_nnz(n, self.bandwidth);
        let csr = nnz * (std::mem::size_of::<f64>() + std::mem::size_of::<usize>())
            + (n + 1) * std::mem::size_of::<usize>();
        let vectors = 2 * n * std::mem::size_of::<f64>();
        (csr + vectors) as f64 / BYTES_PER_MB
    }
}

/// Workload over a matrix loaded from a Matrix Market file.
///
/// The matrix is loaded once at construction; each run multiplies it with
/// a fresh 1.0-filled dense vector. The size argument of `run` is ignored
/// in favor of the loaded matrix's own dimensions, which the caller should
/// report as the session's matrix size.
#[derive(Debug, Clone)]
pub struct MtxSpmv {
    matrix: CsrMatrix,
}

impl MtxSpmv {
    /// Load the matrix from `path`.
    ///
    /// # Errors
    ///
    /// Propagates [`Error::Io`] / [`Error::MatrixMarket`] from the reader.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self {
            matrix: CsrMatrix::from_matrix_market(path)?,
        })
    }

    /// The loaded matrix.
    #[must_use]
    pub const fn matrix(&self) -> &CsrMatrix {
        &self.matrix
    }
}

impl Workload for MtxSpmv {
    fn label(&self) -> &str {
        "rust-mtx"
    }

    fn run(&self, _n: usize) {
        let x = vec![1.0; self.matrix.cols];
        let _y = self.matrix.spmv(&x);
    }

    fn theoretical_memory_mb(&self, _n: usize) -> f64 {
        let vectors = (self.matrix.cols + self.matrix.rows) * std::mem::size_of::<f64>();
        (self.matrix.buffer_bytes() + vectors) as f64 / BYTES_PER_MB
    }
}
