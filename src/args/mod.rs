//! CLI argument types and parsing helpers.
mod cli;
pub(crate) mod parsers;
mod types;


pub use cli::MonitorArgs;
pub use types::{ExportFormat, PositiveUsize, PresenterKind};

pub(crate) use parsers::parse_duration_value;
