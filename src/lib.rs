//! # Matbench: Cross-Language Matrix Multiplication Benchmark Harness
//!
//! Matbench times a naive dense matrix multiplication kernel over repeated
//! runs, samples the process peak resident memory around each run, and
//! appends one summary row to a CSV table shared with the C++, Java, and
//! Python implementations of the same benchmark.
//!
//! The harness is the product here, not the kernel: the kernel is a
//! deliberately unoptimized triple loop used as an interchangeable unit of
//! work behind the [`workload::Workload`] trait.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use matbench::clock::MonotonicClock;
//! use matbench::config::BenchConfig;
//! use matbench::memory::PeakRssSampler;
//! use matbench::runner::Runner;
//! use matbench::workload::dense::DenseMatMul;
//!
//! let config = BenchConfig::new(256, 5)?;
//! let runner = Runner::new(MonotonicClock, PeakRssSampler);
//! let summary = runner.run(&DenseMatMul, &config);
//! println!("{summary}");
//! # Ok::<(), matbench::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::cast_precision_loss)] // benchmark dimensions are far below 2^52

pub mod clock;
pub mod config;
pub mod error;
pub mod memory;
pub mod report;
pub mod runner;
pub mod stats;
pub mod workload;

pub use error::{Error, Result};
