//! Property-based tests for the statistics and estimator layers.
//!
//! - Test mathematical invariants over arbitrary sample sequences
//! - Run with ProptestConfig::with_cases(100)

use matbench::clock::ManualClock;
use matbench::config::BenchConfig;
use matbench::memory::FixedSampler;
use matbench::runner::Runner;
use matbench::stats;
use matbench::workload::dense::DenseMatMul;
use matbench::workload::Workload;
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

/// Non-empty sample sequences in a range that keeps the math well away
/// from overflow while still exercising several orders of magnitude.
fn arb_samples() -> impl Strategy<Value = Vec<f64>> {
    proptest::collection::vec(0.0f64..1.0e6, 1..64)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // ========================================================================
    // Statistics Aggregator Properties
    // ========================================================================

    /// Property: min <= mean <= max for any non-empty sample sequence.
    #[test]
    fn prop_mean_bounded_by_extremes(samples in arb_samples()) {
        let mean = stats::mean(&samples);
        prop_assert!(stats::min(&samples) <= mean + 1e-9);
        prop_assert!(mean <= stats::max(&samples) + 1e-9);
    }

    /// Property: standard deviation is never negative.
    #[test]
    fn prop_stdev_nonnegative(samples in arb_samples()) {
        let mean = stats::mean(&samples);
        prop_assert!(stats::stdev(&samples, mean) >= 0.0);
    }

    /// Property: a single sample has zero standard deviation, whatever
    /// its value.
    #[test]
    fn prop_stdev_singleton_is_zero(value in -1.0e9f64..1.0e9) {
        prop_assert_eq!(stats::stdev(&[value], value), 0.0);
    }

    /// Property: shifting every sample by a constant shifts the mean by
    /// the same constant and leaves the spread untouched.
    #[test]
    fn prop_stats_shift_invariance(samples in arb_samples(), shift in 0.0f64..1.0e3) {
        let shifted: Vec<f64> = samples.iter().map(|v| v + shift).collect();
        let mean = stats::mean(&samples);
        let shifted_mean = stats::mean(&shifted);
        prop_assert!((shifted_mean - mean - shift).abs() < 1e-6);
        prop_assert!(
            (stats::stdev(&shifted, shifted_mean) - stats::stdev(&samples, mean)).abs() < 1e-6
        );
    }

    // ========================================================================
    // Theoretical Memory Estimator Properties
    // ========================================================================

    /// Property: the dense estimate is exactly 3 * n^2 * 8 / 1048576 MB.
    #[test]
    fn prop_dense_estimate_formula(n in 1usize..4096) {
        let expected = 3.0 * (n * n) as f64 * 8.0 / 1_048_576.0;
        prop_assert_eq!(DenseMatMul.theoretical_memory_mb(n), expected);
    }

    /// Property: the dense estimate grows monotonically with n.
    #[test]
    fn prop_dense_estimate_monotonic(n in 1usize..4096) {
        prop_assert!(
            DenseMatMul.theoretical_memory_mb(n + 1) > DenseMatMul.theoretical_memory_mb(n)
        );
    }

    // ========================================================================
    // Memory Delta Clamp Properties
    // ========================================================================

    /// Property: whatever the sampler reports, recorded deltas are never
    /// negative, and clamp to zero exactly when the mark "drops".
    #[test]
    fn prop_memory_delta_never_negative(
        pairs in proptest::collection::vec((0.0f64..1.0e4, 0.0f64..1.0e4), 1..8)
    ) {
        let readings: Vec<f64> = pairs.iter().flat_map(|&(b, a)| [b, a]).collect();
        let runner = Runner::new(ManualClock::new(&[0.001]), FixedSampler::new(&readings));
        let config = BenchConfig::new(1, pairs.len()).unwrap();

        let samples = runner.collect_samples(&DenseMatMul, &config);

        prop_assert_eq!(samples.len(), pairs.len());
        for (sample, &(before, after)) in samples.iter().zip(&pairs) {
            prop_assert!(sample.memory_delta_mb >= 0.0);
            let expected = (after - before).max(0.0);
            prop_assert!((sample.memory_delta_mb - expected).abs() < 1e-12);
        }
    }
}
