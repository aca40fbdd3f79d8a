use std::ffi::OsString;
use std::io::IsTerminal;
use std::time::Duration;

use clap::{ArgMatches, CommandFactory, FromArgMatches};

use crate::args::{MonitorArgs, PresenterKind};
use crate::error::AppResult;
use crate::ui::DefaultPresenterFactory;

/// Grace period for the blocking stdin reader when the runtime shuts down.
const RUNTIME_SHUTDOWN_GRACE: Duration = Duration::from_millis(250);

pub(crate) fn run() -> AppResult<()> {
    let (mut args, matches) = parse_args(std::env::args_os())?;
    apply_config(&mut args, &matches)?;

    crate::logger::init_logging(args.verbose, args.no_color, shares_panel_terminal(&args));

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let result = runtime.block_on(crate::app::run_monitor(&args));
    runtime.shutdown_timeout(RUNTIME_SHUTDOWN_GRACE);
    result
}

fn parse_args<I>(raw_args: I) -> AppResult<(MonitorArgs, ArgMatches)>
where
    I: IntoIterator<Item = OsString>,
{
    let matches = MonitorArgs::command().get_matches_from(raw_args);
    let args = MonitorArgs::from_arg_matches(&matches)?;
    Ok((args, matches))
}

fn apply_config(args: &mut MonitorArgs, matches: &ArgMatches) -> AppResult<()> {
    if let Some(config) = crate::config::load_config(args.config.as_deref())? {
        crate::config::apply_config(args, matches, &config)?;
    }
    Ok(())
}

/// True when the terminal panel will draw on the same TTY that receives logs.
fn shares_panel_terminal(args: &MonitorArgs) -> bool {
    let kind = DefaultPresenterFactory::new(args.presenter, args.no_color).resolved_kind();
    kind == PresenterKind::Terminal && std::io::stderr().is_terminal()
}
