use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Installs the global tracing subscriber. Logs go to stderr so stdout stays
/// free for the live panel and the summary report.
///
/// When stderr is the terminal the panel draws on, only errors are shown
/// unless `LATMON_LOG`/`RUST_LOG` asks for more, so log lines do not tear the
/// panel.
pub fn init_logging(verbose: bool, no_color: bool, shares_panel_terminal: bool) {
    let filter = std::env::var("LATMON_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .map_or_else(
            |_| EnvFilter::new(default_directive(verbose, shares_panel_terminal)),
            |value| EnvFilter::try_new(value).unwrap_or_else(|_| EnvFilter::new("info")),
        );

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(!no_color)
        .finish();

    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set global default subscriber: {}", err);
    }
}

const fn default_directive(verbose: bool, shares_panel_terminal: bool) -> &'static str {
    if shares_panel_terminal {
        "error"
    } else if verbose {
        "debug"
    } else {
        "info"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AppError, AppResult};

    #[test]
    fn init_logging_is_idempotent() {
        init_logging(false, true, false);
        init_logging(true, false, true);
    }

    #[test]
    fn panel_terminal_limits_default_filter() -> AppResult<()> {
        let cases = [
            (false, false, "info"),
            (true, false, "debug"),
            (false, true, "error"),
            (true, true, "error"),
        ];
        for (verbose, shares, expected) in cases {
            let directive = default_directive(verbose, shares);
            if directive != expected {
                return Err(AppError::validation(format!(
                    "verbose={} shares={} gave {}",
                    verbose, shares, directive
                )));
            }
        }
        Ok(())
    }
}
