use clap::ArgMatches;
use clap::parser::ValueSource;

use crate::args::{MonitorArgs, PositiveUsize};
use crate::error::ConfigError;

use super::types::ConfigFile;

/// Applies configuration values to CLI arguments that were not given on the
/// command line.
///
/// # Errors
///
/// Returns an error when a config value is invalid.
pub fn apply_config(
    args: &mut MonitorArgs,
    matches: &ArgMatches,
    config: &ConfigFile,
) -> Result<(), ConfigError> {
    if !is_cli(matches, "update_interval")
        && let Some(interval) = config.update_interval.as_ref()
    {
        args.update_interval =
            interval
                .to_duration()
                .map_err(|message| ConfigError::InvalidField {
                    field: "update_interval",
                    message,
                })?;
    }

    if !is_cli(matches, "max_history_size")
        && let Some(size) = config.max_history_size
    {
        args.max_history_size =
            PositiveUsize::try_from(size).map_err(|err| ConfigError::InvalidField {
                field: "max_history_size",
                message: err.to_string(),
            })?;
    }

    if !is_cli(matches, "disabled")
        && let Some(enabled) = config.enabled
    {
        args.disabled = !enabled;
    }

    if !is_cli(matches, "strict")
        && let Some(strict) = config.strict
    {
        args.strict = strict;
    }

    if !is_cli(matches, "presenter")
        && let Some(presenter) = config.presenter
    {
        args.presenter = presenter;
    }

    if !is_cli(matches, "export_json")
        && let Some(path) = config.export_json.clone()
    {
        args.export_json = Some(path);
    }

    if !is_cli(matches, "export_csv")
        && let Some(path) = config.export_csv.clone()
    {
        args.export_csv = Some(path);
    }

    if !is_cli(matches, "export_stats")
        && let Some(path) = config.export_stats.clone()
    {
        args.export_stats = Some(path);
    }

    if !is_cli(matches, "summary")
        && let Some(summary) = config.summary
    {
        args.summary = summary;
    }

    if !is_cli(matches, "no_color")
        && let Some(no_color) = config.no_color
    {
        args.no_color = no_color;
    }

    Ok(())
}

fn is_cli(matches: &ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(ValueSource::CommandLine)
}
