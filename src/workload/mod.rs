//! Timed units of work.
//!
//! The harness measures whatever sits behind the [`Workload`] trait; the
//! kernels themselves are interchangeable and deliberately unoptimized.
//! [`dense::DenseMatMul`] is the workload shared with the other language
//! implementations; [`sparse`] adds CSR matrix-vector products.

pub mod dense;
pub mod sparse;

/// A unit of timed work of controllable size.
pub trait Workload {
    /// Identifier written to the `language` column of the results table.
    ///
    /// The dense workload uses the bare language tag (`rust`) so its rows
    /// line up with the `cpp`/`java`/`python` rows of the shared table;
    /// other workloads suffix the tag.
    fn label(&self) -> &str;

    /// Perform one full computation of size `n`.
    ///
    /// Every call does fresh allocations and a fresh O(n³) (dense) or
    /// O(nnz) (sparse) computation; implementations must not cache or
    /// early-exit. The result is dropped — only the cost of producing it
    /// matters.
    fn run(&self, n: usize);

    /// Estimated bytes-in-megabytes footprint of one `run(n)` call's
    /// buffers, ignoring container bookkeeping overhead.
    fn theoretical_memory_mb(&self, n: usize) -> f64;
}
