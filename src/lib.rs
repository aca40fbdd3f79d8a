//! Rolling click and display latency telemetry.
//!
//! [`LatencyMonitor`] keeps a bounded window of recent samples per category,
//! derives last/min/max/avg statistics after every recording, and refreshes a
//! [`Presenter`](ui::Presenter) with the latest snapshot on a fixed interval.
//! The `latmon` binary feeds the monitor from stdin and writes JSON, CSV, or
//! text reports on exit.
pub mod args;
pub mod config;
pub mod error;
pub mod metrics;
pub mod monitor;
pub mod sinks;
pub mod ui;

pub use config::MonitorConfig;
pub use monitor::LatencyMonitor;
