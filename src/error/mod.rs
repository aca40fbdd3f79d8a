mod app;
mod config;
mod monitor;
mod sink;
mod validation;

#[cfg(test)]
mod test_support;

pub use app::{AppError, AppResult};
pub use config::ConfigError;
pub use monitor::MonitorError;
pub use sink::SinkError;
pub use validation::ValidationError;
