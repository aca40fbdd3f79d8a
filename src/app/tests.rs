use super::feed::{FeedCommand, FeedSummary, parse_line};
use super::{run_feed, write_outputs};
use crate::args::MonitorArgs;
use crate::config::MonitorConfig;
use crate::error::{AppError, AppResult, ValidationError};
use crate::metrics::LatencyKind;
use crate::monitor::LatencyMonitor;
use crate::shutdown::shutdown_channel;
use crate::ui::NullPresenter;
use clap::Parser;
use tempfile::tempdir;

fn quiet_monitor(enabled: bool) -> AppResult<LatencyMonitor> {
    let config = MonitorConfig::try_new(1000, 100, enabled)?;
    Ok(LatencyMonitor::new(config).with_presenter(Box::new(NullPresenter)))
}

#[test]
fn parse_line_reads_every_command() -> AppResult<()> {
    let cases = [
        (
            "click 12.5",
            FeedCommand::Record {
                kind: LatencyKind::Click,
                latency_ms: 12.5,
            },
        ),
        (
            "  DISPLAY 3 ",
            FeedCommand::Record {
                kind: LatencyKind::Display,
                latency_ms: 3.0,
            },
        ),
        (
            "click-start 7",
            FeedCommand::Begin {
                kind: LatencyKind::Click,
                id: 7,
            },
        ),
        (
            "display-end 9",
            FeedCommand::Complete {
                kind: LatencyKind::Display,
                id: 9,
            },
        ),
        ("clear", FeedCommand::Clear),
        ("pause", FeedCommand::Pause),
        ("resume", FeedCommand::Resume),
    ];
    for (line, expected) in cases {
        if parse_line(line)? != Some(expected) {
            return Err(AppError::validation(format!("unexpected parse of '{}'", line)));
        }
    }
    Ok(())
}

#[test]
fn parse_line_ignores_blank_and_comment_lines() -> AppResult<()> {
    for line in ["", "   ", "# click 5", "\t# note"] {
        if parse_line(line)?.is_some() {
            return Err(AppError::validation(format!("'{}' should be ignored", line)));
        }
    }
    Ok(())
}

#[test]
fn parse_line_rejects_malformed_lines() -> AppResult<()> {
    match parse_line("scroll 4") {
        Err(ValidationError::UnknownFeedCommand { command }) if command == "scroll" => {}
        other => return Err(AppError::validation(format!("unexpected {:?}", other))),
    }
    match parse_line("click") {
        Err(ValidationError::FeedArity { expected: 1, .. }) => {}
        other => return Err(AppError::validation(format!("unexpected {:?}", other))),
    }
    match parse_line("clear now") {
        Err(ValidationError::FeedArity { expected: 0, .. }) => {}
        other => return Err(AppError::validation(format!("unexpected {:?}", other))),
    }
    match parse_line("click fast") {
        Err(ValidationError::InvalidLatencyText { value, .. }) if value == "fast" => {}
        other => return Err(AppError::validation(format!("unexpected {:?}", other))),
    }
    match parse_line("click-end -1") {
        Err(ValidationError::InvalidEventId { .. }) => {}
        other => return Err(AppError::validation(format!("unexpected {:?}", other))),
    }
    Ok(())
}

#[test]
fn parse_line_passes_unusual_latencies_through() -> AppResult<()> {
    match parse_line("click -5")? {
        Some(FeedCommand::Record { latency_ms, .. }) if latency_ms < 0.0 => Ok(()),
        other => Err(AppError::validation(format!("unexpected {:?}", other))),
    }
}

#[tokio::test(start_paused = true)]
async fn run_feed_records_samples_and_skips_bad_lines() -> AppResult<()> {
    let mut monitor = quiet_monitor(true)?;
    monitor.init()?;
    let input: &[u8] =
        b"click 10\nclick 20\n# comment\n\nbogus 1\ndisplay 5\nclick-start 1\nclick-end 1\nclick-end 2\n";
    let (_shutdown_tx, shutdown_rx) = shutdown_channel();

    let summary = run_feed(&mut monitor, input, shutdown_rx).await?;
    if summary
        != (FeedSummary {
            applied: 6,
            skipped: 1,
        })
    {
        return Err(AppError::validation(format!("unexpected summary {:?}", summary)));
    }

    let stats = monitor.statistics();
    if stats.click.count != 3 || stats.display.count != 1 {
        return Err(AppError::validation(format!("unexpected stats {:?}", stats)));
    }
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn run_feed_pause_and_resume_toggle_refresh() -> AppResult<()> {
    let mut monitor = quiet_monitor(true)?;
    monitor.init()?;
    let (_shutdown_tx, shutdown_rx) = shutdown_channel();

    run_feed(&mut monitor, &b"pause\n"[..], shutdown_rx).await?;
    if monitor.is_running() || monitor.is_enabled() {
        return Err(AppError::validation("pause should stop refreshing"));
    }

    let (_shutdown_tx, shutdown_rx) = shutdown_channel();
    run_feed(&mut monitor, &b"resume\n"[..], shutdown_rx).await?;
    if !monitor.is_running() {
        return Err(AppError::validation("resume should restart refreshing"));
    }
    monitor.destroy();
    Ok(())
}

#[tokio::test]
async fn run_feed_stops_on_shutdown() -> AppResult<()> {
    let mut monitor = quiet_monitor(false)?;
    let (reader, _writer) = tokio::io::duplex(64);
    let reader = tokio::io::BufReader::new(reader);
    let (shutdown_tx, shutdown_rx) = shutdown_channel();
    if shutdown_tx.send(()).is_err() {
        return Err(AppError::validation("Failed to send shutdown"));
    }

    let summary = tokio::time::timeout(
        std::time::Duration::from_secs(1),
        run_feed(&mut monitor, reader, shutdown_rx),
    )
    .await
    .map_err(|err| AppError::validation(format!("feed ignored shutdown: {}", err)))??;
    if summary != FeedSummary::default() {
        return Err(AppError::validation("nothing should be applied"));
    }
    Ok(())
}

#[tokio::test]
async fn write_outputs_saves_requested_exports() -> AppResult<()> {
    let dir = tempdir()?;
    let csv_path = dir.path().join("samples.csv");
    let stats_path = dir.path().join("stats.txt");
    let csv_arg = csv_path.to_string_lossy().into_owned();
    let stats_arg = stats_path.to_string_lossy().into_owned();
    let args = MonitorArgs::try_parse_from([
        "latmon",
        "--export-csv",
        csv_arg.as_str(),
        "--export-stats",
        stats_arg.as_str(),
    ])?;

    let mut monitor = quiet_monitor(false)?;
    monitor.record_click_latency(10.0);
    monitor.record_display_latency(2.5);
    write_outputs(&args, &monitor).await?;

    let csv = std::fs::read_to_string(&csv_path)?;
    if csv != "Type,Latency (ms)\nClick,10\nDisplay,2.5\n" {
        return Err(AppError::validation(format!("unexpected csv {:?}", csv)));
    }
    let stats = std::fs::read_to_string(&stats_path)?;
    if !stats.starts_with("=== LATENCY STATISTICS ===") || !stats.contains("  Last: 2.50 ms") {
        return Err(AppError::validation(format!("unexpected report {:?}", stats)));
    }
    if dir.path().join("samples.json").exists() {
        return Err(AppError::validation("json export was not requested"));
    }
    Ok(())
}
