//! Latency windows, derived statistics, and start/complete pairing.
mod aggregator;
mod series;
mod tracker;
mod types;

#[cfg(test)]
mod tests;

pub use aggregator::LatencyAggregator;
pub use series::SampleSeries;
pub use tracker::{DEFAULT_MAX_PENDING, EventTracker};
pub use types::{LatencyKind, SamplePolicy, SeriesStats, StatsSnapshot};
