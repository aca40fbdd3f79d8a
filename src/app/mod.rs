mod feed;

#[cfg(test)]
mod tests;

use std::path::Path;

use tokio::io::BufReader;

use crate::args::MonitorArgs;
use crate::error::AppResult;
use crate::monitor::LatencyMonitor;
use crate::shutdown::{shutdown_channel, spawn_signal_listener};
use crate::sinks::save_export;
use crate::ui::DefaultPresenterFactory;

pub(crate) use feed::run_feed;

/// Runs the monitor against stdin until EOF or an interrupt, then writes the
/// requested exports.
///
/// # Errors
///
/// Returns an error when the monitor cannot start, stdin cannot be read, or an
/// export cannot be written.
pub(crate) async fn run_monitor(args: &MonitorArgs) -> AppResult<()> {
    let config = args.monitor_config()?;
    let factory = DefaultPresenterFactory::new(args.presenter, args.no_color);
    let mut monitor = LatencyMonitor::new(config).with_presenter_factory(Box::new(factory));
    monitor.init()?;
    tracing::info!(
        "Monitoring latencies (interval {} ms, history {}).",
        config.update_interval().as_millis(),
        config.max_history_size()
    );

    let (shutdown_tx, _) = shutdown_channel();
    let signal_handle = spawn_signal_listener(&shutdown_tx);
    let reader = BufReader::new(tokio::io::stdin());
    let feed_result = run_feed(&mut monitor, reader, shutdown_tx.subscribe()).await;

    drop(shutdown_tx.send(()));
    if let Err(err) = signal_handle.await {
        tracing::debug!("Signal listener ended abnormally: {}", err);
    }
    monitor.destroy();

    let summary = feed_result?;
    tracing::debug!(
        "Sample feed closed ({} applied, {} skipped).",
        summary.applied,
        summary.skipped
    );
    if monitor.aggregator().rejected_samples() > 0 {
        tracing::warn!(
            "{} samples were rejected by the strict policy.",
            monitor.aggregator().rejected_samples()
        );
    }

    write_outputs(args, &monitor).await
}

/// Writes every requested export file and prints the report for `--summary`.
///
/// # Errors
///
/// Returns an error when an export cannot be rendered or written.
pub(crate) async fn write_outputs(args: &MonitorArgs, monitor: &LatencyMonitor) -> AppResult<()> {
    for (format, path) in args.export_targets() {
        save_export(Path::new(path), format, monitor.aggregator()).await?;
    }
    if args.summary {
        print!("{}", monitor.export_report());
    }
    Ok(())
}
