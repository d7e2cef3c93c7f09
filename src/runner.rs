//! Run loop: repeated measured executions of a workload.
//!
//! Measurement boundaries per run: sample memory, capture timer start,
//! run the workload, capture timer end, sample memory again. The memory
//! delta is the growth of the process high-water mark across the run,
//! clamped at zero because the OS metric can fluctuate in ways that would
//! otherwise report negative usage.

use std::fmt;

use crate::clock::Clock;
use crate::config::BenchConfig;
use crate::memory::MemorySampler;
use crate::stats;
use crate::workload::Workload;

/// Measurements from a single run. Immutable once recorded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSample {
    /// Wall-clock duration of the workload call, in seconds.
    pub elapsed_secs: f64,
    /// Growth of the peak resident set across the run, in MB. Never
    /// negative.
    pub memory_delta_mb: f64,
}

/// Aggregate statistics for one completed session.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    /// Matrix size n (the session times n×n multiplications).
    pub size: usize,
    /// Number of measured runs.
    pub runs: usize,
    /// Arithmetic mean of the per-run times, in seconds.
    pub mean_secs: f64,
    /// Sample standard deviation of the per-run times.
    pub stdev_secs: f64,
    /// Fastest run, in seconds.
    pub best_secs: f64,
    /// Slowest run, in seconds.
    pub worst_secs: f64,
    /// Mean of the per-run memory deltas, in MB.
    pub mean_memory_mb: f64,
    /// Estimated footprint of the workload's buffers, in MB.
    pub theoretical_memory_mb: f64,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\nResults:")?;
        writeln!(f, "Matrix size: {0}x{0}", self.size)?;
        writeln!(f, "Number of runs: {}", self.runs)?;
        writeln!(f, "Average time: {:.4} s", self.mean_secs)?;
        writeln!(f, "Standard deviation: {:.4} s", self.stdev_secs)?;
        writeln!(f, "Best time: {:.4} s", self.best_secs)?;
        writeln!(f, "Worst time: {:.4} s", self.worst_secs)?;
        writeln!(f, "Average real memory used: {:.2} MB", self.mean_memory_mb)?;
        writeln!(
            f,
            "Theoretical memory usage: {:.2} MB",
            self.theoretical_memory_mb
        )
    }
}

/// Sequential benchmark executor with injected clock and memory sampler.
///
/// The injection points exist so orchestration can be tested against
/// scripted time and memory readings; production sessions use
/// [`MonotonicClock`](crate::clock::MonotonicClock) and
/// [`PeakRssSampler`](crate::memory::PeakRssSampler).
#[derive(Debug)]
pub struct Runner<C, M> {
    clock: C,
    sampler: M,
}

impl<C: Clock, M: MemorySampler> Runner<C, M> {
    /// Create a runner over the given capabilities.
    pub const fn new(clock: C, sampler: M) -> Self {
        Self { clock, sampler }
    }

    /// Execute `config.runs` measured runs of `workload` at size
    /// `config.size` and aggregate the results.
    ///
    /// Emits one progress line per run on stdout.
    pub fn run(&self, workload: &dyn Workload, config: &BenchConfig) -> Summary {
        let samples = self.collect_samples(workload, config);
        Self::aggregate(workload, config, &samples)
    }

    /// The measurement loop, returning the raw per-run samples.
    pub fn collect_samples(&self, workload: &dyn Workload, config: &BenchConfig) -> Vec<RunSample> {
        let mut samples = Vec::with_capacity(config.runs);

        for i in 1..=config.runs {
            let memory_before = self.sampler.sample_mb();
            let start = self.clock.start();
            workload.run(config.size);
            let elapsed_secs = self.clock.elapsed_secs(&start);
            let memory_after = self.sampler.sample_mb();

            let memory_delta_mb = (memory_after - memory_before).max(0.0);
            tracing::debug!(
                run = i,
                elapsed_secs,
                memory_before,
                memory_after,
                "run complete"
            );
            println!(
                "Running {i}/{}: {elapsed_secs:.4} seconds, Memory used: {memory_delta_mb:.2} MB",
                config.runs
            );

            samples.push(RunSample {
                elapsed_secs,
                memory_delta_mb,
            });
        }

        samples
    }

    fn aggregate(workload: &dyn Workload, config: &BenchConfig, samples: &[RunSample]) -> Summary {
        let times: Vec<f64> = samples.iter().map(|s| s.elapsed_secs).collect();
        let deltas: Vec<f64> = samples.iter().map(|s| s.memory_delta_mb).collect();

        let mean_secs = stats::mean(&times);
        Summary {
            size: config.size,
            runs: config.runs,
            mean_secs,
            stdev_secs: stats::stdev(&times, mean_secs),
            best_secs: stats::min(&times),
            worst_secs: stats::max(&times),
            mean_memory_mb: stats::mean(&deltas),
            theoretical_memory_mb: workload.theoretical_memory_mb(config.size),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::memory::FixedSampler;
    use crate::workload::dense::DenseMatMul;

    #[test]
    fn test_summary_display_block() {
        let summary = Summary {
            size: 128,
            runs: 3,
            mean_secs: 0.123_456,
            stdev_secs: 0.01,
            best_secs: 0.11,
            worst_secs: 0.14,
            mean_memory_mb: 1.5,
            theoretical_memory_mb: 0.375,
        };
        let text = summary.to_string();
        assert!(text.contains("Matrix size: 128x128"));
        assert!(text.contains("Number of runs: 3"));
        assert!(text.contains("Average time: 0.1235 s"));
        assert!(text.contains("Average real memory used: 1.50 MB"));
        assert!(text.contains("Theoretical memory usage: 0.38 MB"));
    }

    #[test]
    fn test_run_uses_scripted_capabilities() {
        let clock = ManualClock::new(&[1.0, 3.0]);
        // Run 1: 100 -> 102 MB (+2). Run 2: 102 -> 102 MB (0).
        let sampler = FixedSampler::new(&[100.0, 102.0, 102.0, 102.0]);
        let runner = Runner::new(clock, sampler);
        let config = BenchConfig::new(2, 2).unwrap();

        let summary = runner.run(&DenseMatMul, &config);

        assert_eq!(summary.size, 2);
        assert_eq!(summary.runs, 2);
        assert!((summary.mean_secs - 2.0).abs() < 1e-12);
        assert!((summary.best_secs - 1.0).abs() < 1e-12);
        assert!((summary.worst_secs - 3.0).abs() < 1e-12);
        assert!((summary.stdev_secs - 2.0_f64.sqrt()).abs() < 1e-12);
        assert!((summary.mean_memory_mb - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_negative_memory_delta_clamps_to_zero() {
        let clock = ManualClock::new(&[0.1]);
        // High-water mark "drops" between samples: delta must clamp to 0.
        let sampler = FixedSampler::new(&[50.0, 40.0]);
        let runner = Runner::new(clock, sampler);
        let config = BenchConfig::new(2, 1).unwrap();

        let samples = runner.collect_samples(&DenseMatMul, &config);

        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].memory_delta_mb, 0.0);
    }
}
