use std::collections::VecDeque;
use std::num::NonZeroUsize;

use super::types::SeriesStats;

/// Upper bound on the buffer allocated up front; larger windows grow on demand.
const PREALLOC_LIMIT: usize = 1024;

/// Bounded FIFO window of latency samples with cached statistics.
#[derive(Debug, Clone)]
pub struct SampleSeries {
    samples: VecDeque<f64>,
    capacity: NonZeroUsize,
    stats: SeriesStats,
}

impl SampleSeries {
    #[must_use]
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity.get().min(PREALLOC_LIMIT)),
            capacity,
            stats: SeriesStats::default(),
        }
    }

    /// Appends a sample, evicting the oldest one once the window is full.
    pub fn record(&mut self, value: f64) {
        self.samples.push_back(value);
        if self.samples.len() > self.capacity.get() {
            self.samples.pop_front();
        }
        self.stats = compute_stats(&self.samples);
    }

    pub fn clear(&mut self) {
        self.samples.clear();
        self.stats = SeriesStats::default();
    }

    #[must_use]
    pub const fn snapshot(&self) -> SeriesStats {
        self.stats
    }

    #[must_use]
    pub const fn capacity(&self) -> NonZeroUsize {
        self.capacity
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Samples in insertion order, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().copied()
    }

    #[must_use]
    pub fn to_vec(&self) -> Vec<f64> {
        self.samples.iter().copied().collect()
    }
}

fn compute_stats(samples: &VecDeque<f64>) -> SeriesStats {
    let Some(&last) = samples.back() else {
        return SeriesStats::default();
    };

    let (mut min, mut max, sum) = samples.iter().fold(
        (f64::INFINITY, f64::NEG_INFINITY, 0.0_f64),
        |(min, max, sum), &value| (min.min(value), max.max(value), sum + value),
    );
    // f64::min/max skip NaN, so an all-NaN window leaves the seeds untouched.
    if min > max {
        min = f64::NAN;
        max = f64::NAN;
    }

    let count = samples.len();
    let mut avg = sum / count as f64;
    // Summation rounding can push the mean a few ulps past the window bounds.
    if !avg.is_nan() && min <= max {
        avg = avg.max(min).min(max);
    }

    SeriesStats {
        last,
        min,
        max,
        avg,
        count,
    }
}
