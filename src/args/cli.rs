use clap::Parser;
use std::time::Duration;

use crate::config::MonitorConfig;
use crate::error::AppResult;
use crate::metrics::SamplePolicy;

use super::parsers::{parse_duration_arg, parse_positive_usize};
use super::types::{ExportFormat, PositiveUsize, PresenterKind};

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Rolling click and display latency telemetry. Reads samples from stdin, renders a live panel, and exports JSON/CSV/stats on exit."
)]
pub struct MonitorArgs {
    /// Path to a TOML or JSON config file (defaults to ./latmon.toml or ./latmon.json)
    #[arg(long = "config", short = 'c')]
    pub config: Option<String>,

    /// Panel refresh interval (supports ms/s/m/h, bare numbers are milliseconds)
    #[arg(
        long = "interval",
        short = 'i',
        default_value = "1000ms",
        value_parser = parse_duration_arg
    )]
    pub update_interval: Duration,

    /// Samples kept per category; older samples are evicted first
    #[arg(long = "max-history", default_value = "100", value_parser = parse_positive_usize)]
    pub max_history_size: PositiveUsize,

    /// Start with the refresh loop paused (send `resume` on stdin to start it)
    #[arg(long = "disabled")]
    pub disabled: bool,

    /// Drop negative or non-finite samples instead of recording them
    #[arg(long = "strict")]
    pub strict: bool,

    /// Where the live statistics are rendered
    #[arg(long = "presenter", value_enum, default_value_t = PresenterKind::Auto)]
    pub presenter: PresenterKind,

    /// Write a structured JSON export to this path on exit
    #[arg(long = "export-json")]
    pub export_json: Option<String>,

    /// Write a `Type,Latency (ms)` CSV export to this path on exit
    #[arg(long = "export-csv")]
    pub export_csv: Option<String>,

    /// Write the statistics report to this path on exit
    #[arg(long = "export-stats")]
    pub export_stats: Option<String>,

    /// Print the statistics report to stdout on exit
    #[arg(long = "summary")]
    pub summary: bool,

    /// Enable debug logging
    #[arg(long = "verbose", short = 'v')]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long = "no-color")]
    pub no_color: bool,
}

impl MonitorArgs {
    /// Builds the validated monitor configuration from the parsed flags.
    ///
    /// # Errors
    ///
    /// Returns an error when a value fails configuration validation.
    pub fn monitor_config(&self) -> AppResult<MonitorConfig> {
        let policy = if self.strict {
            SamplePolicy::Strict
        } else {
            SamplePolicy::PassThrough
        };
        Ok(MonitorConfig::builder()
            .update_interval(self.update_interval)
            .max_history_size(self.max_history_size.get())
            .enabled(!self.disabled)
            .sample_policy(policy)
            .build()?)
    }

    /// Export targets requested on the command line or in the config file.
    #[must_use]
    pub fn export_targets(&self) -> Vec<(ExportFormat, &str)> {
        [
            (ExportFormat::Json, self.export_json.as_deref()),
            (ExportFormat::Csv, self.export_csv.as_deref()),
            (ExportFormat::Stats, self.export_stats.as_deref()),
        ]
        .into_iter()
        .filter_map(|(format, path)| path.map(|path| (format, path)))
        .collect()
    }
}
