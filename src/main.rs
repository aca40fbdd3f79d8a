mod app;
mod args;
mod config;
mod entry;
mod error;
mod logger;
mod metrics;
mod monitor;
mod shutdown;
mod sinks;
mod ui;

use error::AppResult;

fn main() -> AppResult<()> {
    entry::run()
}
