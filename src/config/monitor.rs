use std::num::NonZeroUsize;
use std::time::Duration;

use crate::error::ConfigError;
use crate::metrics::SamplePolicy;

pub const DEFAULT_UPDATE_INTERVAL: Duration = Duration::from_millis(1000);
pub const DEFAULT_MAX_HISTORY_SIZE: NonZeroUsize = NonZeroUsize::MIN.saturating_add(99);

/// Construction-time settings for a latency monitor. Validated once and
/// never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitorConfig {
    update_interval: Duration,
    max_history_size: NonZeroUsize,
    enabled: bool,
    sample_policy: SamplePolicy,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            update_interval: DEFAULT_UPDATE_INTERVAL,
            max_history_size: DEFAULT_MAX_HISTORY_SIZE,
            enabled: true,
            sample_policy: SamplePolicy::PassThrough,
        }
    }
}

impl MonitorConfig {
    #[must_use]
    pub fn builder() -> MonitorConfigBuilder {
        MonitorConfigBuilder::default()
    }

    /// Builds a config from raw values, rejecting zero interval or history.
    ///
    /// # Errors
    ///
    /// Returns an error when `update_interval_ms` or `max_history_size` is zero.
    pub fn try_new(
        update_interval_ms: u64,
        max_history_size: usize,
        enabled: bool,
    ) -> Result<Self, ConfigError> {
        Self::builder()
            .update_interval(Duration::from_millis(update_interval_ms))
            .max_history_size(max_history_size)
            .enabled(enabled)
            .build()
    }

    #[must_use]
    pub const fn update_interval(&self) -> Duration {
        self.update_interval
    }

    #[must_use]
    pub const fn max_history_size(&self) -> NonZeroUsize {
        self.max_history_size
    }

    #[must_use]
    pub const fn enabled(&self) -> bool {
        self.enabled
    }

    #[must_use]
    pub const fn sample_policy(&self) -> SamplePolicy {
        self.sample_policy
    }
}

#[derive(Debug, Clone, Default)]
pub struct MonitorConfigBuilder {
    update_interval: Option<Duration>,
    max_history_size: Option<usize>,
    enabled: Option<bool>,
    sample_policy: Option<SamplePolicy>,
}

impl MonitorConfigBuilder {
    #[must_use]
    pub const fn update_interval(mut self, interval: Duration) -> Self {
        self.update_interval = Some(interval);
        self
    }

    #[must_use]
    pub const fn max_history_size(mut self, size: usize) -> Self {
        self.max_history_size = Some(size);
        self
    }

    #[must_use]
    pub const fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    #[must_use]
    pub const fn sample_policy(mut self, policy: SamplePolicy) -> Self {
        self.sample_policy = Some(policy);
        self
    }

    /// Applies defaults to unset fields and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error when the interval or history size is zero.
    pub fn build(self) -> Result<MonitorConfig, ConfigError> {
        let update_interval = self.update_interval.unwrap_or(DEFAULT_UPDATE_INTERVAL);
        if update_interval.is_zero() {
            return Err(ConfigError::FieldMustBePositive {
                field: "update_interval",
            });
        }
        let max_history_size = match self.max_history_size {
            Some(size) => NonZeroUsize::new(size).ok_or(ConfigError::FieldMustBePositive {
                field: "max_history_size",
            })?,
            None => DEFAULT_MAX_HISTORY_SIZE,
        };

        Ok(MonitorConfig {
            update_interval,
            max_history_size,
            enabled: self.enabled.unwrap_or(true),
            sample_policy: self.sample_policy.unwrap_or_default(),
        })
    }
}
