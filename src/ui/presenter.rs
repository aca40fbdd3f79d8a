use std::io::IsTerminal;

use crate::args::PresenterKind;
use crate::error::AppResult;
use crate::metrics::StatsSnapshot;

use super::model::PanelData;
use super::render::TerminalPresenter;

/// Renders statistics snapshots to some surface.
pub trait Presenter: Send {
    /// Draws one snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error when the surface cannot be drawn; the caller skips the
    /// tick.
    fn render(&mut self, snapshot: &StatsSnapshot) -> AppResult<()>;

    /// Tears down anything the presenter created on its surface.
    fn release(&mut self) {}
}

/// Produces the presenter a monitor uses when none was injected.
pub trait PresenterFactory: Send {
    /// Creates a new presenter that the monitor owns and releases on destroy.
    ///
    /// # Errors
    ///
    /// Returns an error when the presentation surface cannot be set up.
    fn create(&self) -> AppResult<Box<dyn Presenter>>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultPresenterFactory {
    pub kind: PresenterKind,
    pub no_color: bool,
}

impl DefaultPresenterFactory {
    #[must_use]
    pub const fn new(kind: PresenterKind, no_color: bool) -> Self {
        Self { kind, no_color }
    }

    /// The presenter `create` builds; `Auto` picks terminal when stdout is a TTY.
    #[must_use]
    pub fn resolved_kind(self) -> PresenterKind {
        match self.kind {
            PresenterKind::Auto if std::io::stdout().is_terminal() => PresenterKind::Terminal,
            PresenterKind::Auto => PresenterKind::Log,
            PresenterKind::Terminal | PresenterKind::Log | PresenterKind::None => self.kind,
        }
    }
}

impl PresenterFactory for DefaultPresenterFactory {
    fn create(&self) -> AppResult<Box<dyn Presenter>> {
        let kind = self.resolved_kind();
        tracing::debug!("Creating default presenter: {:?}", kind);
        match kind {
            PresenterKind::Terminal => Ok(Box::new(TerminalPresenter::stdout(self.no_color)?)),
            PresenterKind::Log => Ok(Box::new(LogPresenter)),
            PresenterKind::Auto | PresenterKind::None => Ok(Box::new(NullPresenter)),
        }
    }
}

/// Emits one log line per tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogPresenter;

impl Presenter for LogPresenter {
    fn render(&mut self, snapshot: &StatsSnapshot) -> AppResult<()> {
        let data = PanelData::from_snapshot(snapshot, true);
        let [click_last, click_avg, click_range, click_samples] = data.click.lines();
        let [display_last, display_avg, display_range, display_samples] = data.display.lines();
        tracing::info!(
            "click {} {} {} {} | display {} {} {} {}",
            click_last,
            click_avg,
            click_range,
            click_samples,
            display_last,
            display_avg,
            display_range,
            display_samples
        );
        Ok(())
    }
}

/// Accepts snapshots and draws nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullPresenter;

impl Presenter for NullPresenter {
    fn render(&mut self, _snapshot: &StatsSnapshot) -> AppResult<()> {
        Ok(())
    }
}
