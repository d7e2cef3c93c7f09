//! Resident-memory sampling capability.
//!
//! The harness reports how much the process peak resident set grew across
//! each run. The OS metric behind this is the high-water mark from
//! `getrusage(2)`: monotonically nondecreasing and coarse. Two successive
//! samples give an approximation of a run's allocation footprint, never an
//! exact count; callers clamp negative differences to zero and accept that
//! unrelated allocator growth between samples inflates the delta.

use std::cell::RefCell;
use std::collections::VecDeque;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Point-in-time query of the process resident-memory high-water mark.
pub trait MemorySampler {
    /// Current peak resident set size, in megabytes.
    ///
    /// Must be O(1) and must not itself allocate enough to perturb the
    /// value it reports.
    fn sample_mb(&self) -> f64;
}

/// Production sampler backed by `getrusage(RUSAGE_SELF)`.
///
/// On platforms without rusage (non-unix) every sample is 0.0, so memory
/// deltas degrade to zero rather than failing the session.
#[derive(Debug, Clone, Copy, Default)]
pub struct PeakRssSampler;

impl MemorySampler for PeakRssSampler {
    fn sample_mb(&self) -> f64 {
        peak_rss_bytes() as f64 / BYTES_PER_MB
    }
}

/// Peak resident set size in bytes.
///
/// `ru_maxrss` is reported in kilobytes on Linux and in bytes on macOS.
#[cfg(unix)]
#[allow(clippy::cast_sign_loss)]
fn peak_rss_bytes() -> u64 {
    // SAFETY: rusage is a plain-old-data struct; zeroing all bytes is a
    // valid initial state.
    let mut usage: libc::rusage = unsafe { std::mem::zeroed() };
    // SAFETY: getrusage(RUSAGE_SELF, &mut usage) writes process-level
    // resource usage into a stack-allocated struct we own.
    let ret = unsafe { libc::getrusage(libc::RUSAGE_SELF, &mut usage) };
    if ret != 0 {
        return 0;
    }
    if cfg!(target_os = "macos") {
        usage.ru_maxrss as u64
    } else {
        usage.ru_maxrss as u64 * 1024
    }
}

#[cfg(not(unix))]
fn peak_rss_bytes() -> u64 {
    0
}

/// Scripted sampler for deterministic runner tests.
///
/// Each call to [`MemorySampler::sample_mb`] pops the next queued reading;
/// once the queue is exhausted the last reading repeats, matching the
/// nondecreasing plateau of a real high-water mark.
#[derive(Debug)]
pub struct FixedSampler {
    readings: RefCell<VecDeque<f64>>,
    last: f64,
}

impl FixedSampler {
    /// Create a sampler that reports the given readings in order.
    #[must_use]
    pub fn new(readings: &[f64]) -> Self {
        Self {
            readings: RefCell::new(readings.iter().copied().collect()),
            last: readings.last().copied().unwrap_or(0.0),
        }
    }
}

impl MemorySampler for FixedSampler {
    fn sample_mb(&self) -> f64 {
        self.readings.borrow_mut().pop_front().unwrap_or(self.last)
    }
}
