//! Latency monitor lifecycle: recording, refresh loop, and presenter ownership.
mod scheduler;


pub use scheduler::{RefreshScheduler, SchedulerState};

use tokio::sync::watch;

use crate::config::MonitorConfig;
use crate::error::AppResult;
use crate::metrics::{EventTracker, LatencyAggregator, LatencyKind, StatsSnapshot};
use crate::ui::{DefaultPresenterFactory, Presenter, PresenterFactory};

/// Records click and display latencies and keeps a presenter refreshed with
/// the rolling statistics while enabled.
pub struct LatencyMonitor {
    config: MonitorConfig,
    aggregator: LatencyAggregator,
    tracker: EventTracker,
    scheduler: RefreshScheduler,
    factory: Box<dyn PresenterFactory>,
    owns_presenter: bool,
    enabled: bool,
    initialized: bool,
}

impl LatencyMonitor {
    #[must_use]
    pub fn new(config: MonitorConfig) -> Self {
        Self {
            config,
            aggregator: LatencyAggregator::new(config.max_history_size(), config.sample_policy()),
            tracker: EventTracker::default(),
            scheduler: RefreshScheduler::new(config.update_interval()),
            factory: Box::new(DefaultPresenterFactory::default()),
            owns_presenter: false,
            enabled: config.enabled(),
            initialized: false,
        }
    }

    /// Uses `presenter` instead of creating a default one. The monitor never
    /// releases an injected presenter.
    #[must_use]
    pub fn with_presenter(self, presenter: Box<dyn Presenter>) -> Self {
        self.scheduler.install_presenter(presenter);
        self
    }

    /// Replaces the factory consulted by `init` when no presenter is installed.
    #[must_use]
    pub fn with_presenter_factory(mut self, factory: Box<dyn PresenterFactory>) -> Self {
        self.factory = factory;
        self
    }

    /// Creates the default presenter if needed and starts the refresh loop
    /// when enabled. Calling it again while initialized does nothing.
    ///
    /// # Errors
    ///
    /// Returns an error when the default presenter cannot be created or the
    /// refresh loop cannot be started.
    pub fn init(&mut self) -> AppResult<()> {
        if self.initialized {
            return Ok(());
        }

        if !self.scheduler.has_presenter() {
            let presenter = self.factory.create()?;
            self.scheduler.install_presenter(presenter);
            self.owns_presenter = true;
        }

        if self.enabled
            && let Err(err) = self.scheduler.start(self.aggregator.subscribe())
        {
            self.release_owned_presenter();
            return Err(err);
        }

        self.initialized = true;
        tracing::info!("Latency monitor initialized");
        Ok(())
    }

    /// Starts or stops the refresh loop. Before `init` only the flag is kept.
    ///
    /// # Errors
    ///
    /// Returns an error when the refresh loop cannot be started.
    pub fn set_enabled(&mut self, enabled: bool) -> AppResult<()> {
        self.enabled = enabled;
        if !self.initialized {
            return Ok(());
        }
        if enabled {
            self.scheduler.start(self.aggregator.subscribe())?;
        } else {
            self.scheduler.stop();
        }
        tracing::debug!("Latency monitor enabled = {}", enabled);
        Ok(())
    }

    /// Stops the refresh loop and releases a presenter created by `init`.
    /// `init` must be called again to resume.
    pub fn destroy(&mut self) {
        self.scheduler.stop();
        self.release_owned_presenter();
        if self.initialized {
            self.initialized = false;
            tracing::info!("Latency monitor destroyed");
        }
    }

    fn release_owned_presenter(&mut self) {
        if !self.owns_presenter {
            return;
        }
        self.owns_presenter = false;
        if let Some(mut presenter) = self.scheduler.take_presenter() {
            presenter.release();
        }
    }

    pub fn record_click_latency(&mut self, latency_ms: f64) {
        self.aggregator.record_click(latency_ms);
    }

    pub fn record_display_latency(&mut self, latency_ms: f64) {
        self.aggregator.record_display(latency_ms);
    }

    pub fn begin_click(&mut self, id: u32) {
        self.tracker.begin(LatencyKind::Click, id);
    }

    pub fn begin_display(&mut self, id: u32) {
        self.tracker.begin(LatencyKind::Display, id);
    }

    /// Records the time since `begin_click(id)`, if that click is pending.
    pub fn complete_click(&mut self, id: u32) -> Option<f64> {
        self.complete(LatencyKind::Click, id)
    }

    /// Records the time since `begin_display(id)`, if that frame is pending.
    pub fn complete_display(&mut self, id: u32) -> Option<f64> {
        self.complete(LatencyKind::Display, id)
    }

    fn complete(&mut self, kind: LatencyKind, id: u32) -> Option<f64> {
        let latency_ms = self.tracker.complete(kind, id)?;
        self.aggregator.record(kind, latency_ms);
        Some(latency_ms)
    }

    #[must_use]
    pub const fn statistics(&self) -> StatsSnapshot {
        self.aggregator.statistics()
    }

    /// Serializes the current state as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns an error when JSON serialization fails.
    pub fn export_structured(&self) -> AppResult<String> {
        self.aggregator.export_structured()
    }

    #[must_use]
    pub fn export_delimited(&self) -> String {
        self.aggregator.export_delimited()
    }

    #[must_use]
    pub fn export_report(&self) -> String {
        self.aggregator.export_report()
    }

    pub fn clear(&mut self) {
        self.aggregator.clear();
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<StatsSnapshot> {
        self.aggregator.subscribe()
    }

    #[must_use]
    pub const fn aggregator(&self) -> &LatencyAggregator {
        &self.aggregator
    }

    #[must_use]
    pub const fn config(&self) -> &MonitorConfig {
        &self.config
    }

    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.initialized
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.scheduler.is_running()
    }

    #[must_use]
    pub fn pending_events(&self) -> usize {
        self.tracker.pending()
    }
}
