//! Summary statistics over collected run samples.
//!
//! Pure functions, computed once per session after the run loop finishes.
//! Degenerate inputs (empty slice, single sample) return 0.0 instead of
//! failing: the configuration layer guarantees at least one run, so these
//! guards exist to keep the math total, not as a recovery path.

/// Arithmetic mean of `samples`.
///
/// Returns 0.0 for an empty slice.
#[must_use]
pub fn mean(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().sum::<f64>() / samples.len() as f64
}

/// Sample standard deviation with Bessel's correction (divide by n−1).
///
/// `mean` must be the arithmetic mean of `samples`; passing it in avoids
/// recomputing it and mirrors the two-pass formula used by the sibling
/// language implementations. Returns 0.0 when there are fewer than two
/// samples.
#[must_use]
pub fn stdev(samples: &[f64], mean: f64) -> f64 {
    if samples.len() <= 1 {
        return 0.0;
    }
    let sum_sq: f64 = samples.iter().map(|v| (v - mean).powi(2)).sum();
    (sum_sq / (samples.len() - 1) as f64).sqrt()
}

/// Smallest sample, or 0.0 for an empty slice.
#[must_use]
pub fn min(samples: &[f64]) -> f64 {
    samples.iter().copied().reduce(f64::min).unwrap_or(0.0)
}

/// Largest sample, or 0.0 for an empty slice.
#[must_use]
pub fn max(samples: &[f64]) -> f64 {
    samples.iter().copied().reduce(f64::max).unwrap_or(0.0)
}
