use std::path::Path;

use chrono::Utc;
use tokio::io::{AsyncWriteExt, BufWriter};

use crate::args::ExportFormat;
use crate::error::{AppError, AppResult, SinkError};
use crate::metrics::LatencyAggregator;

use super::format::{render_delimited, render_report};
use super::structured::render_structured;

/// Renders the aggregator in the requested format.
///
/// # Errors
///
/// Returns an error when the structured export cannot be serialized.
pub fn render_export(format: ExportFormat, aggregator: &LatencyAggregator) -> AppResult<String> {
    match format {
        ExportFormat::Json => render_structured(aggregator, Utc::now()),
        ExportFormat::Csv => Ok(render_delimited(aggregator)),
        ExportFormat::Stats => Ok(render_report(&aggregator.statistics())),
    }
}

/// Writes an export of the aggregator to `path`.
///
/// # Errors
///
/// Returns an error when rendering fails or the file cannot be written.
pub async fn save_export(
    path: &Path,
    format: ExportFormat,
    aggregator: &LatencyAggregator,
) -> AppResult<()> {
    let content = render_export(format, aggregator)?;
    write_file(path, content.as_bytes()).await.map_err(|err| {
        AppError::sink(SinkError::WriteExport {
            path: path.to_path_buf(),
            source: err,
        })
    })?;
    tracing::info!("Wrote {} export to {}", format.as_str(), path.display());
    Ok(())
}

async fn write_file(path: &Path, content: &[u8]) -> Result<(), std::io::Error> {
    let file = tokio::fs::File::create(path).await?;
    let mut writer = BufWriter::new(file);
    writer.write_all(content).await?;
    writer.flush().await?;
    Ok(())
}
