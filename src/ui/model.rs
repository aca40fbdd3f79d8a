use crate::metrics::{LatencyKind, SeriesStats, StatsSnapshot};

/// Latency below this is rendered as good.
pub const GOOD_LATENCY_MS: f64 = 50.0;
/// Latency below this (and not good) is rendered as acceptable.
pub const ACCEPTABLE_LATENCY_MS: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatencyStatus {
    Good,
    Acceptable,
    Poor,
}

impl LatencyStatus {
    #[must_use]
    pub fn classify(latency_ms: f64) -> Self {
        if latency_ms < GOOD_LATENCY_MS {
            LatencyStatus::Good
        } else if latency_ms < ACCEPTABLE_LATENCY_MS {
            LatencyStatus::Acceptable
        } else {
            LatencyStatus::Poor
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPanel {
    pub title: &'static str,
    pub last: String,
    pub avg: String,
    pub min_max: String,
    pub samples: String,
    pub last_status: LatencyStatus,
    pub avg_status: LatencyStatus,
}

impl SeriesPanel {
    fn new(kind: LatencyKind, stats: &SeriesStats) -> Self {
        let title = match kind {
            LatencyKind::Click => "Click Latency:",
            LatencyKind::Display => "Display Latency:",
        };
        Self {
            title,
            last: format!("{:.1}ms", stats.last),
            avg: format!("{:.1}ms", stats.avg),
            min_max: format!("{:.1}ms / {:.1}ms", stats.min, stats.max),
            samples: stats.count.to_string(),
            last_status: LatencyStatus::classify(stats.last),
            avg_status: LatencyStatus::classify(stats.avg),
        }
    }

    /// Plain-text rendition of the panel rows.
    #[must_use]
    pub fn lines(&self) -> [String; 4] {
        [
            format!("Last: {}", self.last),
            format!("Avg: {}", self.avg),
            format!("Min/Max: {}", self.min_max),
            format!("Samples: {}", self.samples),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PanelData {
    pub click: SeriesPanel,
    pub display: SeriesPanel,
    pub no_color: bool,
}

impl PanelData {
    #[must_use]
    pub fn from_snapshot(snapshot: &StatsSnapshot, no_color: bool) -> Self {
        Self {
            click: SeriesPanel::new(LatencyKind::Click, &snapshot.click),
            display: SeriesPanel::new(LatencyKind::Display, &snapshot.display),
            no_color,
        }
    }

    pub fn sections(&self) -> impl Iterator<Item = &SeriesPanel> {
        [&self.click, &self.display].into_iter()
    }
}
