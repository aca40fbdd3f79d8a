use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LatencyKind {
    Click,
    Display,
}

impl LatencyKind {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            LatencyKind::Click => "Click",
            LatencyKind::Display => "Display",
        }
    }
}

/// How recorded values that are negative or non-finite are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SamplePolicy {
    /// Store every value exactly as given.
    #[default]
    PassThrough,
    /// Drop values that are negative, NaN or infinite.
    Strict,
}

impl SamplePolicy {
    #[must_use]
    pub fn accepts(self, latency_ms: f64) -> bool {
        match self {
            SamplePolicy::PassThrough => true,
            SamplePolicy::Strict => latency_ms.is_finite() && latency_ms >= 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SeriesStats {
    pub last: f64,
    pub min: f64,
    pub max: f64,
    pub avg: f64,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StatsSnapshot {
    pub click: SeriesStats,
    pub display: SeriesStats,
}

impl StatsSnapshot {
    #[must_use]
    pub const fn series(&self, kind: LatencyKind) -> &SeriesStats {
        match kind {
            LatencyKind::Click => &self.click,
            LatencyKind::Display => &self.display,
        }
    }
}
