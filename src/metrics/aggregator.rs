use std::num::NonZeroUsize;

use chrono::Utc;
use tokio::sync::watch;

use crate::error::AppResult;
use crate::sinks;

use super::series::SampleSeries;
use super::types::{LatencyKind, SamplePolicy, StatsSnapshot};

/// Owns the click and display windows and publishes a fresh snapshot after
/// every write.
#[derive(Debug)]
pub struct LatencyAggregator {
    click: SampleSeries,
    display: SampleSeries,
    policy: SamplePolicy,
    rejected_samples: u64,
    snapshot_tx: watch::Sender<StatsSnapshot>,
}

impl LatencyAggregator {
    #[must_use]
    pub fn new(max_history_size: NonZeroUsize, policy: SamplePolicy) -> Self {
        let (snapshot_tx, _snapshot_rx) = watch::channel(StatsSnapshot::default());
        Self {
            click: SampleSeries::new(max_history_size),
            display: SampleSeries::new(max_history_size),
            policy,
            rejected_samples: 0,
            snapshot_tx,
        }
    }

    pub fn record_click(&mut self, latency_ms: f64) {
        self.record(LatencyKind::Click, latency_ms);
    }

    pub fn record_display(&mut self, latency_ms: f64) {
        self.record(LatencyKind::Display, latency_ms);
    }

    pub fn record(&mut self, kind: LatencyKind, latency_ms: f64) {
        if !self.policy.accepts(latency_ms) {
            self.rejected_samples = self.rejected_samples.saturating_add(1);
            tracing::warn!(
                "Rejected {} latency sample {} (strict mode).",
                kind.label(),
                latency_ms
            );
            return;
        }
        self.series_mut(kind).record(latency_ms);
        self.publish();
    }

    /// Returns an owned copy of the current statistics.
    #[must_use]
    pub const fn statistics(&self) -> StatsSnapshot {
        StatsSnapshot {
            click: self.click.snapshot(),
            display: self.display.snapshot(),
        }
    }

    #[must_use]
    pub const fn series(&self, kind: LatencyKind) -> &SampleSeries {
        match kind {
            LatencyKind::Click => &self.click,
            LatencyKind::Display => &self.display,
        }
    }

    const fn series_mut(&mut self, kind: LatencyKind) -> &mut SampleSeries {
        match kind {
            LatencyKind::Click => &mut self.click,
            LatencyKind::Display => &mut self.display,
        }
    }

    #[must_use]
    pub const fn policy(&self) -> SamplePolicy {
        self.policy
    }

    /// Number of samples dropped by [`SamplePolicy::Strict`].
    #[must_use]
    pub const fn rejected_samples(&self) -> u64 {
        self.rejected_samples
    }

    /// Receiver that always holds the latest snapshot.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<StatsSnapshot> {
        self.snapshot_tx.subscribe()
    }

    pub fn clear(&mut self) {
        self.click.clear();
        self.display.clear();
        self.publish();
    }

    /// Serializes timestamp, statistics and both windows as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns an error when JSON serialization fails.
    pub fn export_structured(&self) -> AppResult<String> {
        sinks::render_structured(self, Utc::now())
    }

    /// Two-column `Type,Latency (ms)` table, click rows first.
    #[must_use]
    pub fn export_delimited(&self) -> String {
        sinks::render_delimited(self)
    }

    /// Human-readable statistics block.
    #[must_use]
    pub fn export_report(&self) -> String {
        sinks::render_report(&self.statistics())
    }

    fn publish(&self) {
        self.snapshot_tx.send_replace(self.statistics());
    }
}
