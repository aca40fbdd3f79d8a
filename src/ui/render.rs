mod frame;
mod theme;

use crossterm::{
    cursor, execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{Terminal, backend::CrosstermBackend, prelude::Backend};
use std::io::{self, Stdout};

use crate::error::{AppError, AppResult, MonitorError};
use crate::metrics::StatsSnapshot;

use super::model::PanelData;
use super::presenter::Presenter;

pub(crate) use frame::draw_panel;

/// Draws the latency panel in the bottom-right corner of a ratatui terminal.
pub struct TerminalPresenter<B: Backend> {
    terminal: Terminal<B>,
    no_color: bool,
    owns_screen: bool,
}

impl TerminalPresenter<CrosstermBackend<Stdout>> {
    /// Switches stdout to the alternate screen and draws there until released.
    ///
    /// # Errors
    ///
    /// Returns an error when the terminal cannot be prepared.
    pub fn stdout(no_color: bool) -> AppResult<Self> {
        execute!(io::stdout(), EnterAlternateScreen, cursor::Hide).map_err(surface_setup)?;

        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = match Terminal::new(backend) {
            Ok(terminal) => terminal,
            Err(err) => {
                leave_screen();
                return Err(surface_setup(err));
            }
        };
        if let Err(err) = terminal.clear() {
            leave_screen();
            return Err(surface_setup(err));
        }

        Ok(Self {
            terminal,
            no_color,
            owns_screen: true,
        })
    }
}

impl<B: Backend> TerminalPresenter<B> {
    /// Wraps an already prepared backend; `release` leaves it untouched.
    ///
    /// # Errors
    ///
    /// Returns an error when the terminal cannot query the backend size.
    pub fn with_backend(backend: B, no_color: bool) -> AppResult<Self> {
        let terminal = Terminal::new(backend).map_err(surface_setup)?;
        Ok(Self {
            terminal,
            no_color,
            owns_screen: false,
        })
    }

    #[must_use]
    pub fn backend(&self) -> &B {
        self.terminal.backend()
    }
}

impl<B: Backend + Send> Presenter for TerminalPresenter<B> {
    fn render(&mut self, snapshot: &StatsSnapshot) -> AppResult<()> {
        let data = PanelData::from_snapshot(snapshot, self.no_color);
        self.terminal
            .draw(|f| draw_panel(f, &data))
            .map_err(|err| AppError::monitor(MonitorError::SurfaceDraw { source: err }))?;
        Ok(())
    }

    fn release(&mut self) {
        if self.owns_screen {
            self.owns_screen = false;
            leave_screen();
        }
    }
}

impl<B: Backend> Drop for TerminalPresenter<B> {
    fn drop(&mut self) {
        if self.owns_screen {
            leave_screen();
        }
    }
}

fn leave_screen() {
    execute!(io::stdout(), cursor::Show, LeaveAlternateScreen).ok();
}

fn surface_setup(err: io::Error) -> AppError {
    AppError::monitor(MonitorError::SurfaceSetup { source: err })
}
