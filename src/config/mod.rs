//! Configuration loading and application.
mod apply;
mod loader;
mod monitor;
pub mod types;


pub use apply::apply_config;
pub use loader::{DEFAULT_CONFIG_FILES, load_config};
pub use monitor::{
    DEFAULT_MAX_HISTORY_SIZE, DEFAULT_UPDATE_INTERVAL, MonitorConfig, MonitorConfigBuilder,
};

#[cfg(test)]
pub(crate) use loader::load_config_file;
