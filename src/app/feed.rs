use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::error::{AppResult, ValidationError};
use crate::metrics::LatencyKind;
use crate::monitor::LatencyMonitor;
use crate::shutdown::ShutdownReceiver;

/// One instruction read from the sample feed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum FeedCommand {
    Record { kind: LatencyKind, latency_ms: f64 },
    Begin { kind: LatencyKind, id: u32 },
    Complete { kind: LatencyKind, id: u32 },
    Clear,
    Pause,
    Resume,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct FeedSummary {
    pub(crate) applied: usize,
    pub(crate) skipped: usize,
}

/// Parses a feed line. Blank lines and `#` comments yield `None`.
///
/// # Errors
///
/// Returns an error for unknown commands, wrong argument counts, and
/// arguments that are not numbers.
pub(crate) fn parse_line(line: &str) -> Result<Option<FeedCommand>, ValidationError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut parts = line.split_whitespace();
    let Some(command) = parts.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = parts.collect();

    let parsed = match command.to_ascii_lowercase().as_str() {
        "click" => FeedCommand::Record {
            kind: LatencyKind::Click,
            latency_ms: parse_latency(single_arg(command, &args)?)?,
        },
        "display" => FeedCommand::Record {
            kind: LatencyKind::Display,
            latency_ms: parse_latency(single_arg(command, &args)?)?,
        },
        "click-start" => FeedCommand::Begin {
            kind: LatencyKind::Click,
            id: parse_id(single_arg(command, &args)?)?,
        },
        "click-end" => FeedCommand::Complete {
            kind: LatencyKind::Click,
            id: parse_id(single_arg(command, &args)?)?,
        },
        "display-start" => FeedCommand::Begin {
            kind: LatencyKind::Display,
            id: parse_id(single_arg(command, &args)?)?,
        },
        "display-end" => FeedCommand::Complete {
            kind: LatencyKind::Display,
            id: parse_id(single_arg(command, &args)?)?,
        },
        "clear" => no_args(command, &args, FeedCommand::Clear)?,
        "pause" => no_args(command, &args, FeedCommand::Pause)?,
        "resume" => no_args(command, &args, FeedCommand::Resume)?,
        _ => {
            return Err(ValidationError::UnknownFeedCommand {
                command: command.to_owned(),
            });
        }
    };
    Ok(Some(parsed))
}

fn single_arg<'line>(command: &str, args: &[&'line str]) -> Result<&'line str, ValidationError> {
    match args {
        [value] => Ok(*value),
        [] | [_, _, ..] => Err(ValidationError::FeedArity {
            command: command.to_owned(),
            expected: 1,
        }),
    }
}

fn no_args(
    command: &str,
    args: &[&str],
    parsed: FeedCommand,
) -> Result<FeedCommand, ValidationError> {
    if args.is_empty() {
        Ok(parsed)
    } else {
        Err(ValidationError::FeedArity {
            command: command.to_owned(),
            expected: 0,
        })
    }
}

fn parse_latency(value: &str) -> Result<f64, ValidationError> {
    value
        .parse::<f64>()
        .map_err(|err| ValidationError::InvalidLatencyText {
            value: value.to_owned(),
            source: err,
        })
}

fn parse_id(value: &str) -> Result<u32, ValidationError> {
    value
        .parse::<u32>()
        .map_err(|err| ValidationError::InvalidEventId {
            value: value.to_owned(),
            source: err,
        })
}

/// Applies one command to the monitor.
///
/// # Errors
///
/// Returns an error when `resume` cannot restart the refresh loop.
pub(crate) fn apply_command(monitor: &mut LatencyMonitor, command: FeedCommand) -> AppResult<()> {
    match command {
        FeedCommand::Record {
            kind: LatencyKind::Click,
            latency_ms,
        } => monitor.record_click_latency(latency_ms),
        FeedCommand::Record {
            kind: LatencyKind::Display,
            latency_ms,
        } => monitor.record_display_latency(latency_ms),
        FeedCommand::Begin {
            kind: LatencyKind::Click,
            id,
        } => monitor.begin_click(id),
        FeedCommand::Begin {
            kind: LatencyKind::Display,
            id,
        } => monitor.begin_display(id),
        FeedCommand::Complete {
            kind: LatencyKind::Click,
            id,
        } => {
            monitor.complete_click(id);
        }
        FeedCommand::Complete {
            kind: LatencyKind::Display,
            id,
        } => {
            monitor.complete_display(id);
        }
        FeedCommand::Clear => monitor.clear(),
        FeedCommand::Pause => monitor.set_enabled(false)?,
        FeedCommand::Resume => monitor.set_enabled(true)?,
    }
    Ok(())
}

/// Reads commands until EOF or shutdown. Malformed lines are logged and
/// skipped.
///
/// # Errors
///
/// Returns an error when reading fails or a command cannot be applied.
pub(crate) async fn run_feed<R>(
    monitor: &mut LatencyMonitor,
    reader: R,
    mut shutdown_rx: ShutdownReceiver,
) -> AppResult<FeedSummary>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut summary = FeedSummary::default();
    let mut line_number: usize = 0;

    loop {
        let line = tokio::select! {
            _ = shutdown_rx.recv() => {
                tracing::debug!("Shutdown requested, closing the sample feed.");
                break;
            }
            line = lines.next_line() => line?,
        };
        let Some(line) = line else {
            tracing::debug!("Sample feed reached end of input.");
            break;
        };
        line_number = line_number.saturating_add(1);

        match parse_line(&line) {
            Ok(Some(command)) => {
                apply_command(monitor, command)?;
                summary.applied = summary.applied.saturating_add(1);
            }
            Ok(None) => {}
            Err(err) => {
                tracing::warn!("Skipping feed line {}: {}", line_number, err);
                summary.skipped = summary.skipped.saturating_add(1);
            }
        }
    }

    Ok(summary)
}
