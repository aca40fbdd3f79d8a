use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{AppError, AppResult, SinkError};
use crate::metrics::{LatencyAggregator, LatencyKind, SeriesStats, StatsSnapshot};

/// Flat, camelCase statistics block used by the structured export.
///
/// JSON has no NaN or infinity, so non-finite values are written as `null`
/// and read back as NaN.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatStatistics {
    #[serde(deserialize_with = "nullable_latency")]
    pub last_click_latency: f64,
    #[serde(deserialize_with = "nullable_latency")]
    pub last_display_latency: f64,
    #[serde(deserialize_with = "nullable_latency")]
    pub avg_click_latency: f64,
    #[serde(deserialize_with = "nullable_latency")]
    pub avg_display_latency: f64,
    #[serde(deserialize_with = "nullable_latency")]
    pub min_click_latency: f64,
    #[serde(deserialize_with = "nullable_latency")]
    pub max_click_latency: f64,
    #[serde(deserialize_with = "nullable_latency")]
    pub min_display_latency: f64,
    #[serde(deserialize_with = "nullable_latency")]
    pub max_display_latency: f64,
    pub click_count: usize,
    pub display_count: usize,
}

impl From<&StatsSnapshot> for FlatStatistics {
    fn from(snapshot: &StatsSnapshot) -> Self {
        Self {
            last_click_latency: snapshot.click.last,
            last_display_latency: snapshot.display.last,
            avg_click_latency: snapshot.click.avg,
            avg_display_latency: snapshot.display.avg,
            min_click_latency: snapshot.click.min,
            max_click_latency: snapshot.click.max,
            min_display_latency: snapshot.display.min,
            max_display_latency: snapshot.display.max,
            click_count: snapshot.click.count,
            display_count: snapshot.display.count,
        }
    }
}

impl FlatStatistics {
    #[must_use]
    pub const fn to_snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            click: SeriesStats {
                last: self.last_click_latency,
                min: self.min_click_latency,
                max: self.max_click_latency,
                avg: self.avg_click_latency,
                count: self.click_count,
            },
            display: SeriesStats {
                last: self.last_display_latency,
                min: self.min_display_latency,
                max: self.max_display_latency,
                avg: self.avg_display_latency,
                count: self.display_count,
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportHistory {
    #[serde(deserialize_with = "nullable_latencies")]
    pub click_latencies: Vec<f64>,
    #[serde(deserialize_with = "nullable_latencies")]
    pub display_latencies: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredExport {
    pub timestamp: String,
    pub statistics: FlatStatistics,
    pub history: ExportHistory,
}

impl StructuredExport {
    #[must_use]
    pub fn capture(aggregator: &LatencyAggregator, captured_at: DateTime<Utc>) -> Self {
        Self {
            timestamp: captured_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            statistics: FlatStatistics::from(&aggregator.statistics()),
            history: ExportHistory {
                click_latencies: aggregator.series(LatencyKind::Click).to_vec(),
                display_latencies: aggregator.series(LatencyKind::Display).to_vec(),
            },
        }
    }
}

/// Pretty-printed JSON capture of the aggregator at `captured_at`.
///
/// # Errors
///
/// Returns an error when JSON serialization fails.
pub fn render_structured(
    aggregator: &LatencyAggregator,
    captured_at: DateTime<Utc>,
) -> AppResult<String> {
    let export = StructuredExport::capture(aggregator, captured_at);
    serde_json::to_string_pretty(&export)
        .map_err(|err| AppError::sink(SinkError::SerializeStructured { source: err }))
}

/// Reads a structured export back.
///
/// # Errors
///
/// Returns an error when the text is not a valid structured export.
pub fn parse_structured(text: &str) -> AppResult<StructuredExport> {
    serde_json::from_str(text)
        .map_err(|err| AppError::sink(SinkError::ParseStructured { source: err }))
}

fn nullable_latency<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

fn nullable_latencies<'de, D>(deserializer: D) -> Result<Vec<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Vec::<Option<f64>>::deserialize(deserializer)?;
    Ok(values
        .into_iter()
        .map(|value| value.unwrap_or(f64::NAN))
        .collect())
}
