use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::error::{AppError, AppResult, MonitorError};
use crate::metrics::StatsSnapshot;
use crate::ui::Presenter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Stopped,
    Running,
}

/// Presenter plus the generation of the refresh loop allowed to use it.
/// Both live under one lock so `stop` cannot interleave with a render.
#[derive(Default)]
struct PresenterSlot {
    generation: u64,
    presenter: Option<Box<dyn Presenter>>,
}

/// Periodically hands the latest snapshot to the installed presenter.
pub struct RefreshScheduler {
    interval: Duration,
    slot: Arc<Mutex<PresenterSlot>>,
    task: Option<JoinHandle<()>>,
}

impl RefreshScheduler {
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            slot: Arc::new(Mutex::new(PresenterSlot::default())),
            task: None,
        }
    }

    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    #[must_use]
    pub const fn state(&self) -> SchedulerState {
        if self.task.is_some() {
            SchedulerState::Running
        } else {
            SchedulerState::Stopped
        }
    }

    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.task.is_some()
    }

    /// Replaces the presenter used by current and future ticks.
    pub fn install_presenter(&self, presenter: Box<dyn Presenter>) {
        lock_slot(&self.slot).presenter = Some(presenter);
    }

    pub fn take_presenter(&self) -> Option<Box<dyn Presenter>> {
        lock_slot(&self.slot).presenter.take()
    }

    #[must_use]
    pub fn has_presenter(&self) -> bool {
        lock_slot(&self.slot).presenter.is_some()
    }

    /// Arms the periodic refresh, cancelling any loop that is already running.
    ///
    /// # Errors
    ///
    /// Returns an error when called outside a Tokio runtime.
    pub fn start(&mut self, snapshots: watch::Receiver<StatsSnapshot>) -> AppResult<()> {
        let runtime = Handle::try_current()
            .map_err(|err| AppError::monitor(MonitorError::NoRuntime { source: err }))?;
        self.stop();

        let generation = self.advance_generation();
        let slot = Arc::clone(&self.slot);
        self.task = Some(runtime.spawn(run_refresh_loop(
            self.interval,
            generation,
            slot,
            snapshots,
        )));
        tracing::debug!(
            "Refresh loop started (interval {} ms, generation {}).",
            self.interval.as_millis(),
            generation
        );
        Ok(())
    }

    /// Cancels the live loop. No presenter call happens after this returns.
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            let generation = self.advance_generation();
            task.abort();
            tracing::debug!("Refresh loop stopped (generation now {}).", generation);
        }
    }

    fn advance_generation(&self) -> u64 {
        let mut slot = lock_slot(&self.slot);
        slot.generation = slot.generation.wrapping_add(1);
        slot.generation
    }
}

impl Drop for RefreshScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn run_refresh_loop(
    interval: Duration,
    generation: u64,
    slot: Arc<Mutex<PresenterSlot>>,
    snapshots: watch::Receiver<StatsSnapshot>,
) {
    let first_tick = Instant::now()
        .checked_add(interval)
        .unwrap_or_else(Instant::now);
    let mut ticker = tokio::time::interval_at(first_tick, interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        ticker.tick().await;
        let snapshot = *snapshots.borrow();
        let mut state = lock_slot(&slot);
        if state.generation != generation {
            break;
        }
        match state.presenter.as_mut() {
            Some(presenter) => {
                if let Err(err) = presenter.render(&snapshot) {
                    tracing::debug!("Skipping latency render: {}", err);
                }
            }
            None => tracing::trace!("No presenter installed, skipping tick."),
        }
    }
}

fn lock_slot(slot: &Mutex<PresenterSlot>) -> MutexGuard<'_, PresenterSlot> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}
