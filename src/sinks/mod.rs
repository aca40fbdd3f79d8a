//! Export formats for recorded latency windows and statistics.
mod format;
mod structured;
mod writers;


pub use format::{render_delimited, render_report};
pub use structured::{
    ExportHistory, FlatStatistics, StructuredExport, parse_structured, render_structured,
};
pub use writers::{render_export, save_export};
